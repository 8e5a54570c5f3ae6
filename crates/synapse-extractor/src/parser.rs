//! Parse the person-profiles reduce response

use crate::error::ExtractorError;
use crate::types::Profile;
use serde_json::Value;
use tracing::warn;

/// Parse an LLM reduce response into person profiles
///
/// Individual entries that fail to deserialize or validate are skipped with
/// a warning; the call only errors when the response as a whole is not a
/// JSON array.
pub fn parse_profile_response(response: &str) -> Result<Vec<Profile>, ExtractorError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let entries = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut profiles = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<Profile>(entry.clone()) {
            Ok(profile) => {
                if let Err(e) = profile.validate() {
                    warn!("Profile {} failed validation: {}", idx, e);
                    continue;
                }
                profiles.push(profile);
            }
            Err(e) => {
                warn!("Failed to parse profile {}: {}", idx, e);
            }
        }
    }

    Ok(profiles)
}

/// Extract JSON from a response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
