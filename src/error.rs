//! Error types for ferro-splice
//!
//! Errors in this crate are reserved for problems that must stop the caller:
//! bad configuration, malformed transcripts at ingestion and unavailable
//! reference data. Per-variant scoring problems never surface as errors; the
//! feature calculators report them as `NaN` instead.

use std::fmt;
use thiserror::Error;

/// Stable numeric codes, one per [`FerroError`] variant
///
/// Thousands group the origin: reference data (1xxx), caller input (2xxx),
/// engine configuration (3xxx) and I/O (9xxx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    TranscriptNotFound = 1001,
    ContigNotFound = 1002,
    SequenceNotAvailable = 1003,
    MalformedTranscript = 1004,

    InvalidCoordinates = 2001,
    InvalidVariant = 2002,

    InvalidConfig = 3001,

    Io = 9001,
    Json = 9002,
}

impl ErrorCode {
    /// Code as printed in messages, e.g. `E1004`
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::TranscriptNotFound => "unknown transcript accession",
            ErrorCode::ContigNotFound => "unknown contig",
            ErrorCode::SequenceNotAvailable => "reference sequence not available",
            ErrorCode::MalformedTranscript => "malformed transcript model",
            ErrorCode::InvalidCoordinates => "coordinates out of range",
            ErrorCode::InvalidVariant => "unusable variant",
            ErrorCode::InvalidConfig => "invalid engine configuration",
            ErrorCode::Io => "file I/O failure",
            ErrorCode::Json => "malformed JSON",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// Main error type for ferro-splice operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FerroError {
    /// No transcript with this accession
    #[error("Transcript not found: {id}")]
    ReferenceNotFound { id: String },

    /// Contig name is not known to the provider
    #[error("Contig not found: {name}")]
    ContigNotFound { name: String },

    /// Genomic sequence does not cover the requested region
    #[error("Sequence not available for {contig}:{start}-{end}")]
    SequenceNotAvailable { contig: String, start: u64, end: u64 },

    /// Region bounds are inverted or run off the contig
    #[error("Coordinates out of range: {msg}")]
    InvalidCoordinates { msg: String },

    /// Variant alleles or span are unusable
    #[error("Invalid variant: {msg}")]
    InvalidVariant { msg: String },

    /// Transcript exon/intron structure violates the model invariants
    #[error("Malformed transcript {accession}: {msg}")]
    MalformedTranscript { accession: String, msg: String },

    /// Engine configuration is unusable
    #[error("Invalid configuration: {msg}")]
    InvalidConfig { msg: String },

    #[error("I/O failure: {msg}")]
    Io { msg: String },

    #[error("Malformed JSON: {msg}")]
    Json { msg: String },
}

impl FerroError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        FerroError::InvalidConfig { msg: msg.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FerroError::ReferenceNotFound { .. } => ErrorCode::TranscriptNotFound,
            FerroError::ContigNotFound { .. } => ErrorCode::ContigNotFound,
            FerroError::SequenceNotAvailable { .. } => ErrorCode::SequenceNotAvailable,
            FerroError::InvalidCoordinates { .. } => ErrorCode::InvalidCoordinates,
            FerroError::InvalidVariant { .. } => ErrorCode::InvalidVariant,
            FerroError::MalformedTranscript { .. } => ErrorCode::MalformedTranscript,
            FerroError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            FerroError::Io { .. } => ErrorCode::Io,
            FerroError::Json { .. } => ErrorCode::Json,
        }
    }

    /// Message prefixed with the error code, e.g. `[E3001] Invalid configuration: ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for FerroError {
    fn from(e: std::io::Error) -> Self {
        FerroError::Io { msg: e.to_string() }
    }
}

impl From<serde_json::Error> for FerroError {
    fn from(e: serde_json::Error) -> Self {
        FerroError::Json { msg: e.to_string() }
    }
}
