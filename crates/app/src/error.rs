//! Error types for the huffpress binary.

use thiserror::Error;

/// Anything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum AppError {
    /// The compression core rejected the input
    #[error("compression failed: {0}")]
    Core(#[from] huffpress_core::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `.huff` container could not be read
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// Rendering the JSON report failed
    #[error("report error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Framed container errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Format version this build does not understand
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),

    /// Container is shorter than its header claims
    #[error("container too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Payload size disagrees with the recorded bit length
    #[error("payload length mismatch: {bit_len} bits need {expected} bytes, got {actual}")]
    PayloadLengthMismatch {
        bit_len: u64,
        expected: usize,
        actual: usize,
    },

    /// A length does not fit its header field
    #[error("{field} of {value} does not fit in the container header")]
    FieldOverflow { field: &'static str, value: usize },

    /// Frequency table is empty, unordered, or its counts don't add up
    #[error("invalid frequency table: {0}")]
    InvalidTable(String),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, AppError>;
