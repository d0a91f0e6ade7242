//! Bit packing of prefix codes.
//!
//! Each input symbol's code is appended to one bitstream, in input order,
//! and the stream is packed MSB-first with the final byte zero-padded.
//! The exact bit count travels with the bytes in `PackedBuffer`; it is not
//! encoded in the bytes themselves.

use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::codes::CodeTable;
use crate::error::{Error, Result};

/// Packed bitstream plus its pre-padding length.
///
/// # Invariants
/// - `bytes.len() == bit_len.div_ceil(8)`
/// - bits past `bit_len` in the last byte are zero
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBuffer {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl PackedBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of zero bits padding the final byte (0-7).
    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }

    /// The meaningful bits, in stream order.
    pub fn bits(&self) -> BitReader<'_> {
        // bit_len never exceeds the buffer, so this cannot fail
        BitReader::with_bit_limit(&self.bytes, self.bit_len)
            .unwrap_or_else(|_| BitReader::new(&[]))
    }
}

/// Concatenate the code of every symbol in `symbols` and pack the result.
///
/// # Errors
/// `Error::MissingCode` for the first symbol that has no code in `codes`.
pub fn pack(symbols: &[u8], codes: &CodeTable) -> Result<PackedBuffer> {
    let mut bit_count = 0usize;
    for (position, &symbol) in symbols.iter().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or(Error::MissingCode { symbol, position })?;
        bit_count += code.len();
    }

    let mut writer = BitWriter::with_bit_capacity(bit_count);
    for code in symbols.iter().filter_map(|&symbol| codes.get(symbol)) {
        writer.write_iter(code.bits());
    }

    let bit_len = writer.bit_len();
    let bytes = writer.finish();

    debug!(
        symbols = symbols.len(),
        bit_len,
        bytes = bytes.len(),
        "packed bitstream"
    );

    Ok(PackedBuffer { bytes, bit_len })
}
