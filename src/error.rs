//! Error types for jutsu-catalog.
//!
//! Per-field extractors never fail; they return absent values and let the
//! assembler proceed. Errors are reserved for unrecoverable page structure,
//! entity invariant violations, and the all-probes-empty video case.

/// Error type for catalog and video extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page structure is unrecognizable beyond recovery.
    #[error("malformed page: {0}")]
    Malformed(String),

    /// Character decoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// None of the video URL probes discovered any source.
    #[error("no video sources found in episode page")]
    NoVideoSources,

    /// An assembled entity violates one of its invariants.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
