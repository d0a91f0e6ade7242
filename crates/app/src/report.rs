//! JSON report of a compression run.
//!
//! Field names and shapes follow the upload endpoint this tool replaces:
//!
//! ```json
//! {"originalSize":4,"compressedSize":1,"compressionPercentage":"75.00"}
//! ```
//!
//! `compressedData` (the packed bytes as a number array) is only emitted
//! when requested.

use huffpress_core::CompressionResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    pub original_size: usize,
    pub compressed_size: usize,
    /// Always two decimals, e.g. `"75.00"`
    pub compression_percentage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed_data: Option<Vec<u8>>,
}

impl CompressionReport {
    pub fn new(result: &CompressionResult, include_data: bool) -> Self {
        Self {
            original_size: result.original_size,
            compressed_size: result.compressed_size,
            compression_percentage: result.percentage_string(),
            compressed_data: include_data.then(|| result.packed.as_bytes().to_vec()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
