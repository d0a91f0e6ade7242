//! Framed `.huff` container serialization and parsing.
//!
//! A container packages a packed bitstream with what a future decoder needs:
//! the exact bit length and the frequency table. Tree building is
//! deterministic, so the table alone reproduces the tree and codes.
//!
//! # Container Format
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x48 0x55 0x46 0x50 ("HUFP")
//! +------------------+
//! | version (1)      |  0x01
//! +------------------+
//! | raw_len (8)      |  u64 original input length
//! +------------------+
//! | bit_len (8)      |  u64 meaningful payload bits
//! +------------------+
//! | table_len (2)    |  u16 number of table entries (1..=256)
//! +------------------+
//! | payload_len (4)  |  u32 payload bytes
//! +------------------+
//! | crc32 (4)        |  u32 checksum
//! +------------------+
//! | table            |  table_len x (symbol u8, count u64), ascending symbol
//! | (variable)       |
//! +------------------+
//! | payload          |  packed bits (payload_len bytes)
//! | (variable)       |
//! +------------------+
//! ```
//!
//! All integers are little-endian.
//!
//! # CRC Coverage
//!
//! The CRC32 covers version, raw_len, bit_len, table_len, payload_len, the
//! table and the payload.

use huffpress_core::{CodeTable, FrequencyTable, HuffmanTree, PackedBuffer};

use crate::error::ContainerError;

/// Magic number for containers: "HUFP"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x50];

/// Current container version
pub const VERSION: u8 = 1;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 31;

/// Size of one frequency table entry
const ENTRY_SIZE: usize = 9;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Original uncompressed length
    pub raw_len: u64,

    /// Meaningful bits in `payload`
    pub bit_len: u64,

    /// `(symbol, count)` pairs in ascending symbol order
    pub table: Vec<(u8, u64)>,

    /// Packed bitstream
    pub payload: Vec<u8>,

    pub crc32: u32,
}

impl Container {
    /// Rebuild the frequency table the payload was encoded with.
    pub fn frequencies(&self) -> huffpress_core::Result<FrequencyTable> {
        FrequencyTable::from_counts(self.table.iter().copied())
    }

    /// Rebuild the code table the payload was encoded with.
    pub fn code_table(&self) -> huffpress_core::Result<CodeTable> {
        let tree = HuffmanTree::build(&self.frequencies()?)?;
        Ok(CodeTable::from_tree(&tree))
    }

    /// Total serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.table.len() * ENTRY_SIZE + self.payload.len()
    }
}

/// Serialize `packed`, encoded with the codes derived from `freqs`.
///
/// # Errors
/// `ContainerError::FieldOverflow` if the payload is 4 GiB or larger.
pub fn write_container(
    freqs: &FrequencyTable,
    packed: &PackedBuffer,
) -> Result<Vec<u8>, ContainerError> {
    let raw_len = freqs.total();
    let bit_len = packed.bit_len() as u64;
    let table_len: u16 = header_field("table_len", freqs.len())?;
    let payload_len: u32 = header_field("payload_len", packed.len())?;

    let mut table = Vec::with_capacity(freqs.len() * ENTRY_SIZE);
    for (symbol, count) in freqs.iter() {
        table.push(symbol);
        table.extend_from_slice(&count.to_le_bytes());
    }

    let crc32 = compute_crc(
        VERSION,
        raw_len,
        bit_len,
        table_len,
        payload_len,
        &table,
        packed.as_bytes(),
    );

    let mut out = Vec::with_capacity(HEADER_SIZE + table.len() + packed.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&raw_len.to_le_bytes());
    out.extend_from_slice(&bit_len.to_le_bytes());
    out.extend_from_slice(&table_len.to_le_bytes());
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.extend_from_slice(&crc32.to_le_bytes());
    out.extend_from_slice(&table);
    out.extend_from_slice(packed.as_bytes());

    Ok(out)
}

fn header_field<T>(field: &'static str, value: usize) -> Result<T, ContainerError>
where
    T: TryFrom<usize>,
{
    T::try_from(value).map_err(|_| ContainerError::FieldOverflow { field, value })
}

/// Parse and validate a container.
///
/// # Errors
/// - `ContainerError::TooShort` if the buffer is smaller than its header claims
/// - `ContainerError::InvalidMagic` / `UnsupportedVersion` for foreign data
/// - `ContainerError::Crc` if the checksum does not match
/// - `ContainerError::InvalidTable` if the table is empty, unordered, or does
///   not sum to `raw_len`
/// - `ContainerError::PayloadLengthMismatch` if `payload_len != ceil(bit_len / 8)`
pub fn parse_container(bytes: &[u8]) -> Result<Container, ContainerError> {
    let mut fields = Fields::new(bytes);

    let magic: [u8; 4] = fields.take()?;
    if magic != MAGIC {
        return Err(ContainerError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        });
    }

    let [version] = fields.take::<1>()?;
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion(version));
    }

    let raw_len = u64::from_le_bytes(fields.take()?);
    let bit_len = u64::from_le_bytes(fields.take()?);
    let table_len = u16::from_le_bytes(fields.take()?);
    let payload_len = u32::from_le_bytes(fields.take()?);
    let crc32 = u32::from_le_bytes(fields.take()?);

    let expected_size = HEADER_SIZE + table_len as usize * ENTRY_SIZE + payload_len as usize;
    if bytes.len() != expected_size {
        return Err(ContainerError::TooShort {
            required: expected_size,
            actual: bytes.len(),
        });
    }

    let table_bytes = fields.slice(table_len as usize * ENTRY_SIZE)?;
    let payload = fields.slice(payload_len as usize)?;

    let computed_crc = compute_crc(
        version,
        raw_len,
        bit_len,
        table_len,
        payload_len,
        table_bytes,
        payload,
    );
    if computed_crc != crc32 {
        return Err(ContainerError::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    let table = parse_table(table_bytes, raw_len)?;

    let expected_payload = bit_len.div_ceil(8);
    if payload.len() as u64 != expected_payload {
        return Err(ContainerError::PayloadLengthMismatch {
            bit_len,
            expected: expected_payload as usize,
            actual: payload.len(),
        });
    }

    Ok(Container {
        raw_len,
        bit_len,
        table,
        payload: payload.to_vec(),
        crc32,
    })
}

fn parse_table(bytes: &[u8], raw_len: u64) -> Result<Vec<(u8, u64)>, ContainerError> {
    if bytes.is_empty() {
        return Err(ContainerError::InvalidTable("no symbols".to_string()));
    }

    let mut fields = Fields::new(bytes);
    let mut table = Vec::with_capacity(bytes.len() / ENTRY_SIZE);
    let mut total = 0u64;

    while !fields.is_empty() {
        let [symbol] = fields.take::<1>()?;
        let count = u64::from_le_bytes(fields.take()?);

        if count == 0 {
            return Err(ContainerError::InvalidTable(format!(
                "symbol {:#04x} has a zero count",
                symbol
            )));
        }
        if let Some(&(previous, _)) = table.last() {
            if symbol <= previous {
                return Err(ContainerError::InvalidTable(format!(
                    "symbol {:#04x} out of order after {:#04x}",
                    symbol, previous
                )));
            }
        }

        total = total.saturating_add(count);
        table.push((symbol, count));
    }

    if total != raw_len {
        return Err(ContainerError::InvalidTable(format!(
            "counts sum to {} but raw_len is {}",
            total, raw_len
        )));
    }

    Ok(table)
}

/// Compute CRC32 over the protected fields.
fn compute_crc(
    version: u8,
    raw_len: u64,
    bit_len: u64,
    table_len: u16,
    payload_len: u32,
    table: &[u8],
    payload: &[u8],
) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&[version]);
    hasher.update(&raw_len.to_le_bytes());
    hasher.update(&bit_len.to_le_bytes());
    hasher.update(&table_len.to_le_bytes());
    hasher.update(&payload_len.to_le_bytes());

    hasher.update(table);
    hasher.update(payload);

    hasher.finalize()
}

/// Sequential reader over fixed-size little-endian fields.
struct Fields<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Fields<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn slice(&mut self, len: usize) -> Result<&'a [u8], ContainerError> {
        let end = self.position + len;
        let slice = self
            .bytes
            .get(self.position..end)
            .ok_or(ContainerError::TooShort {
                required: end,
                actual: self.bytes.len(),
            })?;
        self.position = end;
        Ok(slice)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ContainerError> {
        let slice = self.slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn is_empty(&self) -> bool {
        self.position >= self.bytes.len()
    }
}
