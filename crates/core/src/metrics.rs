//! Metrics collection and reporting for a compression run.
//!
//! `compress_with_metrics` fills one `Metrics` value per call:
//! - input and output sizes
//! - alphabet size, tree height, code lengths
//! - time spent in each of the four stages
//!
//! # Thread Safety
//!
//! `Metrics` is plain data updated by a single call. Give each concurrent
//! compression its own instance.

use std::time::{Duration, Instant};

/// Sizes, code statistics and stage timings for one compression.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    pub analyze_time: Duration,
    pub build_time: Duration,
    pub assign_time: Duration,
    pub pack_time: Duration,

    // === Sizes ===
    /// Bytes handed to the compressor
    pub input_bytes: u64,

    /// Bytes of packed output
    pub output_bytes: u64,

    /// Meaningful bits in the packed output
    pub encoded_bits: u64,

    // === Codes ===
    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    /// Longest root-to-leaf path of the tree
    pub tree_height: usize,

    /// Longest assigned code, in bits
    pub max_code_len: usize,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            analyze_time: Duration::ZERO,
            build_time: Duration::ZERO,
            assign_time: Duration::ZERO,
            pack_time: Duration::ZERO,
            input_bytes: 0,
            output_bytes: 0,
            encoded_bits: 0,
            distinct_symbols: 0,
            tree_height: 0,
            max_code_len: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compressed size over original size.
    ///
    /// Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Percentage of the input saved, `(1 - ratio) * 100`.
    pub fn space_savings_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            (1.0 - self.compression_ratio()) * 100.0
        }
    }

    /// Average code length over the input.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_bytes as f64
        }
    }

    /// Compute throughput in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} us", self.duration().as_micros());
        println!();

        println!("Input:  {} bytes ({:.2} KiB)", self.input_bytes, self.input_bytes as f64 / 1024.0);
        println!("Output: {} bytes ({:.2} KiB)", self.output_bytes, self.output_bytes as f64 / 1024.0);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Saved: {:.2}%", self.space_savings_percent());
        println!();

        println!("=== Codes ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Tree height: {}", self.tree_height);
        println!("Longest code: {} bits", self.max_code_len);
        println!("Encoded bits: {}", self.encoded_bits);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();

        println!("=== Stages ===");
        println!("Analyze: {} us", self.analyze_time.as_micros());
        println!("Build:   {} us", self.build_time.as_micros());
        println!("Assign:  {} us", self.assign_time.as_micros());
        println!("Pack:    {} us", self.pack_time.as_micros());
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_us={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             encoded_bits={}\n\
             distinct_symbols={}\n\
             tree_height={}\n\
             max_code_len={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n\
             analyze_us={}\n\
             build_us={}\n\
             assign_us={}\n\
             pack_us={}\n",
            self.duration().as_micros(),
            self.input_bytes,
            self.output_bytes,
            self.encoded_bits,
            self.distinct_symbols,
            self.tree_height,
            self.max_code_len,
            self.compression_ratio(),
            self.bits_per_symbol(),
            self.analyze_time.as_micros(),
            self.build_time.as_micros(),
            self.assign_time.as_micros(),
            self.pack_time.as_micros(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
