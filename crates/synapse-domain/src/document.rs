//! Document and extraction kinds

/// Source flavor of an input transcript
///
/// The kind selects which map prompt a document is analyzed with. Input
/// directories are homogeneous: one directory per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Meeting transcript (speaker-labelled prose)
    Meeting,

    /// Telegram chat export converted to transcript form
    Telegram,
}

impl DocumentKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Meeting => "meeting",
            DocumentKind::Telegram => "telegram",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "meeting" => Some(DocumentKind::Meeting),
            "telegram" => Some(DocumentKind::Telegram),
            _ => None,
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document kind: {}", s))
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The analysis a pipeline run performs
///
/// The kind is validated once at startup; downstream dispatch is a match
/// over this closed enumeration, so an unknown kind can never surface as a
/// runtime lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionKind {
    /// Synthesize one weekly-newsletter document
    Newsletter,

    /// Synthesize one profile document per identified person
    PersonProfiles,
}

impl ExtractionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionKind::Newsletter => "newsletter",
            ExtractionKind::PersonProfiles => "person_profiles",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newsletter" => Some(ExtractionKind::Newsletter),
            "person_profiles" => Some(ExtractionKind::PersonProfiles),
            _ => None,
        }
    }
}

impl std::str::FromStr for ExtractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid extraction kind: {}", s))
    }
}

impl std::fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_document_kind_round_trip() {
        for kind in [DocumentKind::Meeting, DocumentKind::Telegram] {
            assert_eq!(DocumentKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_extraction_kind_round_trip() {
        for kind in [ExtractionKind::Newsletter, ExtractionKind::PersonProfiles] {
            assert_eq!(ExtractionKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(DocumentKind::from_str("slack").is_err());
        assert!(ExtractionKind::from_str("digest").is_err());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            DocumentKind::parse("Meeting"),
            Some(DocumentKind::Meeting)
        );
        assert_eq!(
            ExtractionKind::parse("NEWSLETTER"),
            Some(ExtractionKind::Newsletter)
        );
    }
}
