//! Error types for the persistence layer.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised while encoding or decoding persisted resolution results.
///
/// There is no retry or partial recovery at this layer: any failure
/// abandons the whole record (and, for graph files, the whole graph).
/// Callers are expected to discard the cache entry and recompute.
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O failure in the underlying byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tag byte does not name a known kind.
    #[error("Invalid {what} tag: {tag:#04x}")]
    InvalidTag {
        /// What the tag was supposed to identify.
        what: &'static str,
        /// The tag byte actually read.
        tag: u8,
    },

    /// A nullable-field marker byte was neither absent nor present.
    #[error("Invalid null marker: {0:#04x}")]
    InvalidMarker(u8),

    /// A boolean byte was neither 0 nor 1.
    #[error("Invalid boolean: {0:#04x}")]
    InvalidBool(u8),

    /// A variant back-reference points outside the table built so far.
    #[error("Invalid variant back-reference: {0}")]
    InvalidVariantRef(u64),

    /// A string payload is not valid UTF-8.
    #[error("Invalid string encoding")]
    InvalidString,

    /// A variable-length integer ran past the maximum encodable width.
    #[error("Variable-length integer overflow")]
    VarintOverflow,

    /// The graph file does not start with the expected magic bytes.
    #[error("Invalid magic bytes: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: [u8; 4],
        /// Magic bytes actually read.
        actual: [u8; 4],
    },

    /// The graph file was written by a newer format version.
    #[error("Unsupported format version {version}, max supported is {max_supported}")]
    UnsupportedVersion {
        /// Version found in the file.
        version: u32,
        /// Maximum version this build understands.
        max_supported: u32,
    },

    /// The payload checksum does not match the footer.
    #[error("Checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// CRC32 recorded in the file.
        expected: u32,
        /// CRC32 computed over the payload.
        actual: u32,
    },

    /// Bytes remain after the last expected field of a graph file.
    #[error("{0} trailing bytes after graph payload")]
    TrailingBytes(usize),
}
