//! Bit-level I/O for prefix-code packing.
//!
//! `BitWriter` appends bits MSB-first: logical bit `i` lands in byte `i / 8`
//! at bit position `7 - i % 8`. `BitReader` walks the same layout back.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: reads up to its bit limit; without a limit the padding bits
//!   are indistinguishable from data
//!
//! # Example
//! ```
//! use huffpress_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_iter([true, false, true]);
//! writer.write_bit(true);
//! // 1011 -> padded to 10110000
//! assert_eq!(writer.bit_len(), 4);
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_0000]);
//!
//! let mut reader = BitReader::with_bit_limit(&bytes, 4).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert!(reader.read_bit().unwrap());
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - bits of `bit_buffer` below the first `bit_count` are zero
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that expects roughly `bits` bits of output.
    pub fn with_bit_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit yielded by `bits`, in order.
    pub fn write_iter<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the output bytes, zero-padding the final
    /// partial byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Return the number of complete bytes written so far.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position <= bit_limit <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
    /// Number of logical bits; anything past it is padding
    bit_limit: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`, padding included.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
            bit_limit: data.len() * 8,
        }
    }

    /// Create a reader that stops after `bit_len` bits.
    ///
    /// # Errors
    /// `BitIoError::InsufficientBits` if `data` holds fewer than `bit_len` bits.
    pub fn with_bit_limit(data: &'a [u8], bit_len: usize) -> Result<Self> {
        let available = data.len() * 8;
        if bit_len > available {
            return Err(BitIoError::InsufficientBits {
                requested: bit_len,
                available,
            }
            .into());
        }

        Ok(Self {
            data,
            bit_position: 0,
            bit_limit: bit_len,
        })
    }

    /// Read up to 64 bits, MSB-first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte = self.data[self.bit_position / 8];
            let bits_in_byte = 8 - self.bit_position % 8;
            let take = remaining.min(bits_in_byte);

            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (bits_in_byte - take)) & mask;
            result = (result << take) | bits as u64;

            self.bit_position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Return the number of bits left before the limit.
    pub fn bits_remaining(&self) -> usize {
        self.bit_limit - self.bit_position
    }

    /// Check if the reader reached its limit.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_limit
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits_remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
