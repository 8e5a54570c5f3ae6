//! Parser for Telegram JSON exports to transcript-like markdown
//!
//! Telegram's export format groups a whole workspace into one `messages`
//! array; forum topics surface only as `reply_to_message_id` references.
//! A sidecar CSV maps those topic ids to channel names. The output is a
//! markdown transcript with one `##` section per channel and
//! `[HH:MM] author: content` lines, ready for the map phase.

use crate::IngestError;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// User who reacted to a message
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionUser {
    /// Display name of the reacting user
    #[serde(rename = "from")]
    pub from_name: String,
}

/// Telegram reaction data
#[derive(Debug, Clone, Deserialize)]
pub struct Reaction {
    /// Reaction count
    pub count: u32,

    /// Unicode emoji; custom emojis don't carry this field
    #[serde(default)]
    pub emoji: Option<String>,

    /// Recent reacting users
    #[serde(default)]
    pub recent: Vec<ReactionUser>,
}

/// A parsed Telegram message
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    /// Message id
    pub id: i64,

    /// Message timestamp (local, no timezone in the export)
    pub date: NaiveDateTime,

    /// Author display name
    #[serde(rename = "from")]
    pub author: String,

    /// Message text; Telegram mixes plain strings and entity arrays
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: String,

    /// Topic thread this message belongs to
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,

    /// Attached photo path
    #[serde(default)]
    pub photo: Option<String>,

    /// Attached file path
    #[serde(default)]
    pub file: Option<String>,

    /// Sticker emoji
    #[serde(default)]
    pub sticker_emoji: Option<String>,

    /// Poll payload
    #[serde(default)]
    pub poll: Option<Value>,

    /// Reactions on this message
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// Handle Telegram's mixed text format: a plain string, or an array of
/// strings and `{"text": ...}` entity objects
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Array(parts) => {
            let mut text = String::new();
            for part in parts {
                match part {
                    Value::String(s) => text.push_str(&s),
                    Value::Object(obj) => {
                        if let Some(Value::String(s)) = obj.get("text") {
                            text.push_str(s);
                        }
                    }
                    other => text.push_str(&other.to_string()),
                }
            }
            Ok(text)
        }
        other => Err(D::Error::custom(format!(
            "unexpected text value: {}",
            other
        ))),
    }
}

impl TelegramMessage {
    /// The topic thread this message belongs to
    pub fn channel_id(&self) -> Option<i64> {
        self.reply_to_message_id
    }

    /// Timestamp as HH:MM
    pub fn formatted_time(&self) -> String {
        self.date.format("%H:%M").to_string()
    }

    /// Media type indicators for non-text payloads
    pub fn media_indicators(&self) -> Vec<String> {
        let mut indicators = Vec::new();
        if self.photo.is_some() {
            indicators.push("[Photo]".to_string());
        }
        if let Some(file) = &self.file {
            indicators.push(format!("[Document: {}]", file));
        }
        if self.poll.is_some() {
            indicators.push("[Poll]".to_string());
        }
        if let Some(sticker) = &self.sticker_emoji {
            indicators.push(format!("[Sticker: {}]", sticker));
        }
        indicators
    }

    /// Unicode reaction emojis on this message
    pub fn reaction_emojis(&self) -> Vec<String> {
        self.reactions
            .iter()
            .filter_map(|r| r.emoji.clone())
            .collect()
    }

    /// Convert to a transcript-style line
    pub fn to_transcript_line(&self) -> String {
        let mut content_parts = self.media_indicators();
        if !self.text.is_empty() {
            content_parts.push(self.text.clone());
        }

        let mut content = if content_parts.is_empty() {
            "[Empty message]".to_string()
        } else {
            content_parts.join(" ")
        };

        let emojis = self.reaction_emojis();
        if !emojis.is_empty() {
            content.push_str(&format!(" [{}]", emojis.join(", ")));
        }

        format!("[{}] {}: {}", self.formatted_time(), self.author, content)
    }
}

/// Load the topic-id to channel-name mapping from a CSV file
///
/// Expects `topic_id,topic_name` columns.
pub fn load_topic_mapping(path: &Path) -> Result<HashMap<i64, String>, IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(IngestError::Csv)?;
    let mut mapping = HashMap::new();

    for record in reader.deserialize::<TopicRow>() {
        let row = record?;
        let id = row
            .topic_id
            .parse::<i64>()
            .map_err(|e| IngestError::TopicMapping(format!("bad topic_id: {}", e)))?;
        mapping.insert(id, row.topic_name);
    }

    Ok(mapping)
}

#[derive(Debug, Deserialize)]
struct TopicRow {
    topic_id: String,
    topic_name: String,
}

/// Extract and parse non-service messages from export data
///
/// Messages that fail to parse are skipped with a warning; a single
/// malformed message never fails the export.
pub fn extract_messages(data: &Value) -> Vec<TelegramMessage> {
    let raw_messages = data
        .get("messages")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut messages = Vec::new();
    for raw in raw_messages {
        if raw.get("type").and_then(Value::as_str) == Some("service") {
            continue;
        }
        let id = raw.get("id").cloned();
        match serde_json::from_value::<TelegramMessage>(raw) {
            Ok(message) => messages.push(message),
            Err(e) => {
                warn!(
                    "Failed to parse message {}: {}",
                    id.map(|v| v.to_string()).unwrap_or_else(|| "unknown".into()),
                    e
                );
            }
        }
    }
    messages
}

/// Group messages by channel name, defaulting unmapped topics to "General"
///
/// The BTreeMap keeps channels in alphabetical order for the transcript.
pub fn group_by_channel(
    messages: Vec<TelegramMessage>,
    topic_mapping: &HashMap<i64, String>,
) -> BTreeMap<String, Vec<TelegramMessage>> {
    let mut channels: BTreeMap<String, Vec<TelegramMessage>> = BTreeMap::new();

    for message in messages {
        let channel_name = message
            .channel_id()
            .and_then(|id| topic_mapping.get(&id))
            .cloned()
            .unwrap_or_else(|| "General".to_string());
        channels.entry(channel_name).or_default().push(message);
    }

    channels
}

/// Build the final transcript markdown
pub fn build_transcript(
    channels: &BTreeMap<String, Vec<TelegramMessage>>,
    week_date: &str,
) -> String {
    let mut sections = vec!["# Telegram Export Transcript".to_string()];

    let week = if week_date.is_empty() {
        Local::now().format("%B %d, %Y").to_string()
    } else {
        week_date.to_string()
    };
    sections.push(format!("\nWeek of {}", week));
    sections.push(String::new());

    for (name, messages) in channels {
        if messages.is_empty() {
            continue;
        }

        let mut lines = vec![format!("## {}", name), String::new()];
        let mut sorted = messages.clone();
        sorted.sort_by_key(|m| m.date);
        lines.extend(sorted.iter().map(TelegramMessage::to_transcript_line));

        sections.push(lines.join("\n"));
        sections.push(String::new());
    }

    format!("{}\n", sections.join("\n").trim_end())
}

/// Derive the "Week of ..." header from a `..._week_YYYY-MM-DD.json` name
fn week_date_from_filename(path: &Path) -> String {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return String::new();
    };
    let Some((_, date_part)) = stem.split_once("week_") else {
        return String::new();
    };
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%B %d, %Y").to_string(),
        Err(_) => String::new(),
    }
}

/// Parse a Telegram JSON export into a transcript-like markdown file
///
/// Loads the export and topic mapping, groups messages by channel, and
/// writes the transcript to `output_path`, creating parent directories as
/// needed.
pub fn parse_telegram_export(
    telegram_json_path: &Path,
    topic_mapping_path: &Path,
    output_path: &Path,
) -> Result<(), IngestError> {
    let topic_mapping = load_topic_mapping(topic_mapping_path)?;

    let raw = std::fs::read_to_string(telegram_json_path)?;
    let data: Value = serde_json::from_str(&raw)?;

    let messages = extract_messages(&data);
    let channels = group_by_channel(messages, &topic_mapping);

    let week_date = week_date_from_filename(telegram_json_path);
    let transcript = build_transcript(&channels, &week_date);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, transcript)?;

    info!("Telegram export parsed: {} channels", channels.len());
    info!("Output saved to: {}", output_path.display());
    Ok(())
}
