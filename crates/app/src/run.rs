//! Command execution.
//!
//! Everything here returns values instead of printing so that the binary
//! and the integration tests share one code path.

use std::fs;
use std::path::Path;

use huffpress_core::{compress_with_metrics, CompressionResult, FrequencyTable, Metrics};
use tracing::info;

use crate::config::{Config, InputSource, OutputFormat};
use crate::container::{parse_container, write_container};
use crate::error::Result;
use crate::input_gen::generate_sample_data;
use crate::report::CompressionReport;

/// Result of one `compress` command.
#[derive(Debug)]
pub struct CompressOutcome {
    pub result: CompressionResult,
    pub metrics: Metrics,
    /// Bytes written to the output file
    pub written_bytes: usize,
}

impl CompressOutcome {
    pub fn report(&self, include_data: bool) -> CompressionReport {
        CompressionReport::new(&self.result, include_data)
    }
}

/// Read or generate the bytes to compress.
pub fn load_input(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::File(path) => {
            let data = fs::read(path)?;
            info!(path = %path.display(), bytes = data.len(), "read input file");
            Ok(data)
        }
        InputSource::Sample { seed, size_bytes } => {
            info!(seed, bytes = size_bytes, "generating sample input");
            Ok(generate_sample_data(*seed, *size_bytes))
        }
    }
}

/// Serialize `result` in the requested layout.
pub fn encode_output(format: OutputFormat, input: &[u8], result: &CompressionResult) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Raw => Ok(result.packed.as_bytes().to_vec()),
        OutputFormat::Framed => {
            let freqs = FrequencyTable::from_bytes(input)?;
            Ok(write_container(&freqs, &result.packed)?)
        }
    }
}

/// Load input, compress it, and write the output file.
pub fn run_compress(config: &Config) -> Result<CompressOutcome> {
    let input = load_input(&config.input)?;

    let mut metrics = Metrics::new();
    let result = compress_with_metrics(&input, &mut metrics)?;

    let output = encode_output(config.format, &input, &result)?;
    fs::write(&config.output_file, &output)?;
    info!(
        path = %config.output_file.display(),
        bytes = output.len(),
        format = ?config.format,
        "wrote output"
    );

    Ok(CompressOutcome {
        result,
        metrics,
        written_bytes: output.len(),
    })
}

/// Describe a framed container: header fields and the rebuilt code table.
pub fn inspect(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let container = parse_container(&bytes)?;
    let codes = container.code_table()?;

    let mut lines = vec![
        format!("=== {} ===", path.display()),
        format!("Container size: {} bytes", bytes.len()),
        format!("Original size:  {} bytes", container.raw_len),
        format!(
            "Payload:        {} bytes ({} bits)",
            container.payload.len(),
            container.bit_len
        ),
        format!("Symbols:        {}", container.table.len()),
        format!("CRC32:          {:#010x}", container.crc32),
        String::new(),
        "symbol  count       code".to_string(),
    ];
    lines.extend(container.table.iter().map(|&(symbol, count)| {
        let code = codes.get(symbol).map(ToString::to_string).unwrap_or_default();
        format!("{:<7} {:<11} {}", display_symbol(symbol), count, code)
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        s => format!("{:#04x}", s),
    }
}
