//! Error types for the compression core.
//!
//! Every stage returns a structured error instead of panicking, so the shell
//! can map failures onto whatever user-facing behavior it needs.

use thiserror::Error;

/// Top-level error type for the compression core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input contained zero symbols, so no frequency table or tree exists.
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// The packer met a symbol the code table has no entry for.
    ///
    /// The code table is derived from the same input, so this always indicates
    /// a caller passing a table built from different data.
    #[error("no code for symbol {symbol:#04x} at input position {position}")]
    MissingCode { symbol: u8, position: usize },

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// A reader was limited to more bits than its buffer holds
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::EmptyInput.to_string(), "empty input: nothing to compress");

        let err = Error::MissingCode {
            symbol: b'z',
            position: 7,
        };
        assert_eq!(err.to_string(), "no code for symbol 0x7a at input position 7");
    }

    #[test]
    fn test_bit_io_conversion() {
        let err: Error = BitIoError::UnexpectedEof.into();
        assert!(matches!(err, Error::BitIo(BitIoError::UnexpectedEof)));
        assert_eq!(err.to_string(), "bit I/O error: unexpected end of bit stream");
    }
}
