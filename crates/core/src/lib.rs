//! huffpress-core: Huffman prefix-code compression of in-memory byte buffers
//!
//! Compression runs four stages strictly forward:
//! - `frequency`: count how often each byte occurs
//! - `tree`: merge the two lightest nodes until one tree remains
//! - `codes`: read each symbol's prefix code off its root-to-leaf path
//! - `packer`: concatenate codes in input order and pack them MSB-first
//!
//! `compress` ties the stages together and reports the size reduction.
//!
//! # Design Principles
//!
//! - **No panics**: empty input and missing codes are structured errors
//! - **Deterministic**: ties between equal weights are broken by insertion
//!   order, so identical input always yields identical output
//! - **Pure**: no I/O and no shared state; every call owns its data
//!
//! # Example
//! ```
//! use huffpress_core::{compress, Error};
//!
//! let result = compress(b"abracadabra").unwrap();
//! assert_eq!(result.original_size, 11);
//! assert_eq!(result.compressed_size, result.packed.bit_len().div_ceil(8));
//!
//! assert_eq!(compress(b""), Err(Error::EmptyInput));
//! ```

pub mod bitio;
pub mod codes;
pub mod compress;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod packer;
pub mod tree;

// Re-export commonly used types
pub use codes::{Code, CodeTable};
pub use compress::{compress, compress_with_metrics, CompressionResult};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use metrics::Metrics;
pub use packer::{pack, PackedBuffer};
pub use tree::{HuffmanNode, HuffmanTree};
