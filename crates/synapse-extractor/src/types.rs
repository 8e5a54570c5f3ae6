//! Profile types returned by the person-profiles reduce call

use serde::{Deserialize, Serialize};

/// Structured metadata about a person identified across transcripts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// The canonical/best name for this person
    pub name: String,

    /// All name variations observed in transcripts
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Their inferred organizational role or position
    #[serde(default)]
    pub role: String,

    /// Transcript filenames where this person appears
    #[serde(default)]
    pub mentioned_in_sources: Vec<String>,

    /// Key topics this person discussed or was involved with
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Complete profile information for a person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// The structured metadata for this person
    pub metadata: ProfileMetadata,

    /// Full markdown content of the profile with all sections
    pub content: String,
}

impl Profile {
    /// Validate that the profile is persistable
    pub fn validate(&self) -> Result<(), String> {
        if self.metadata.name.trim().is_empty() {
            return Err("profile name is empty".to_string());
        }
        if self.content.trim().is_empty() {
            return Err(format!(
                "profile content for '{}' is empty",
                self.metadata.name
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, content: &str) -> Profile {
        Profile {
            metadata: ProfileMetadata {
                name: name.to_string(),
                aliases: vec![],
                role: String::new(),
                mentioned_in_sources: vec![],
                topics: vec![],
            },
            content: content.to_string(),
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(profile("Alice", "## Alice\nLeads the project.").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(profile("   ", "body").validate().is_err());
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(profile("Alice", "  \n ").validate().is_err());
    }

    #[test]
    fn test_metadata_defaults_on_deserialize() {
        let json = r###"{"metadata": {"name": "Bob"}, "content": "## Bob"}"###;
        let parsed: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.metadata.name, "Bob");
        assert!(parsed.metadata.aliases.is_empty());
        assert!(parsed.metadata.topics.is_empty());
    }
}
