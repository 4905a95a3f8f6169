//! # huffpack
//!
//! Lossless byte-stream compression with a Huffman code.
//!
//! A compressed stream is one byte holding the number of meaningful bits in
//! the last payload byte, then the preorder-encoded tree padded to a byte
//! boundary, then the payload: every input symbol's code packed MSB-first.
//!
//! ## Quick Start
//!
//! ```no_run
//! use huffpack::HuffmanCodec;
//! use std::fs::File;
//!
//! // Compress a file
//! let input = File::open("input.txt")?;
//! let output = File::create("compressed.huff")?;
//! HuffmanCodec::encode_from_file(input, output)?;
//!
//! // Decompress a file
//! let compressed = File::open("compressed.huff")?;
//! let decompressed = File::create("output.txt")?;
//! HuffmanCodec::decode_from_file(compressed, decompressed)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod code_table;
pub mod compressor;
pub mod config;
pub mod decompressor;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod bit_io;
mod header;
mod min_heap;
mod tree_codec;

// Re-export main types for convenience
pub use code_table::{Code, CodeTable};
pub use compressor::{compress, CompressStats};
pub use decompressor::{decompress, DecompressStats};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
