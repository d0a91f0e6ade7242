//! One-shot compression: analyze, build, assign, pack, report.

use std::time::Instant;

use tracing::debug;

use crate::codes::CodeTable;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::metrics::Metrics;
use crate::packer::{pack, PackedBuffer};
use crate::tree::HuffmanTree;

/// Outcome of compressing one input buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    /// Input size in bytes
    pub original_size: usize,

    /// Packed output size in bytes
    pub compressed_size: usize,

    /// `(original - compressed) / original * 100`, rounded to 2 decimals
    pub compression_percentage: f64,

    pub packed: PackedBuffer,
}

impl CompressionResult {
    fn new(original_size: usize, packed: PackedBuffer) -> Self {
        let compressed_size = packed.len();
        Self {
            original_size,
            compressed_size,
            compression_percentage: compression_percentage(original_size, compressed_size),
            packed,
        }
    }

    /// The percentage with exactly two decimals, e.g. `"75.00"`.
    pub fn percentage_string(&self) -> String {
        format!("{:.2}", self.compression_percentage)
    }

    pub fn bit_len(&self) -> usize {
        self.packed.bit_len()
    }
}

/// `(original - compressed) / original * 100`, rounded to 2 decimals.
///
/// Returns 0.0 when `original` is 0.
pub fn compression_percentage(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let raw = (original as f64 - compressed as f64) / original as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Huffman-encode `input` and report the size reduction.
///
/// # Errors
/// - `Error::EmptyInput` if `input` is empty
/// - `Error::MissingCode` if the packer meets an uncoded symbol (never
///   expected, the codes come from the same input)
///
/// # Example
/// ```
/// let result = huffpress_core::compress(b"aaaa").unwrap();
/// assert_eq!(result.original_size, 4);
/// assert_eq!(result.compressed_size, 1);
/// assert_eq!(result.percentage_string(), "75.00");
/// ```
pub fn compress(input: &[u8]) -> Result<CompressionResult> {
    compress_with_metrics(input, &mut Metrics::new())
}

/// Like [`compress`], recording sizes and stage timings into `metrics`.
pub fn compress_with_metrics(input: &[u8], metrics: &mut Metrics) -> Result<CompressionResult> {
    metrics.input_bytes = input.len() as u64;

    let stage = Instant::now();
    let freqs = FrequencyTable::from_bytes(input)?;
    metrics.analyze_time = stage.elapsed();
    metrics.distinct_symbols = freqs.len();
    debug!(
        bytes = input.len(),
        distinct = freqs.len(),
        "analyzed symbol frequencies"
    );

    let stage = Instant::now();
    let tree = HuffmanTree::build(&freqs)?;
    metrics.build_time = stage.elapsed();
    metrics.tree_height = tree.height();

    let stage = Instant::now();
    let codes = CodeTable::from_tree(&tree);
    metrics.assign_time = stage.elapsed();
    metrics.max_code_len = codes.max_code_len();

    let stage = Instant::now();
    let packed = pack(input, &codes)?;
    metrics.pack_time = stage.elapsed();
    metrics.encoded_bits = packed.bit_len() as u64;
    metrics.output_bytes = packed.len() as u64;

    metrics.complete();

    let result = CompressionResult::new(input.len(), packed);
    debug!(
        original = result.original_size,
        compressed = result.compressed_size,
        percentage = result.compression_percentage,
        "compression complete"
    );

    Ok(result)
}
