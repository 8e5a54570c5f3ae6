//! Synapse Extractor
//!
//! Turns the opaque `LlmProvider` text-completion contract into the typed
//! seams the pipeline consumes: per-document extraction for the map phase
//! and one-shot synthesis for the reduce phase.
//!
//! # Architecture
//!
//! ```text
//! transcript ─► Extract (prompt template + provider) ─► map artifact
//! artifacts  ─► Reduce  (prompt template + provider) ─► newsletter / profiles
//! ```
//!
//! # Key Features
//!
//! - **Kind registry**: a closed (`ExtractionKind`, `DocumentKind`) match
//!   selects the prompt; unknown kinds are impossible after startup parsing
//! - **Fixed placeholder substitution**: document text and filenames are
//!   spliced into `{{...}}` slots of otherwise-constant instruction payloads
//! - **Profile parsing**: the person-profiles reduce response is parsed from
//!   (possibly code-fenced) JSON into validated `Profile` values

#![warn(missing_docs)]

mod error;
mod parser;
mod prompt;
mod registry;
mod types;

pub use error::ExtractorError;
pub use parser::parse_profile_response;
pub use registry::ExtractorRegistry;
pub use types::{Profile, ProfileMetadata};
