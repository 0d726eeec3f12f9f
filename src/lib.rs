//! # huffzip
//!
//! Lossless compression with Huffman coding. The code tree travels in-band
//! as a preorder bit header, followed by the packed payload and a synthetic
//! end-of-stream symbol, so no lengths need to be stored.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use huffzip::HuffmanCodec;
//! use std::fs::File;
//!
//! // Compress a file
//! let input = File::open("input.txt")?;
//! let output = File::create("input_encoded.huf")?;
//! HuffmanCodec::encode_from_file(input, output)?;
//!
//! // Decompress a file
//! let compressed = File::open("input_encoded.huf")?;
//! let decompressed = File::create("input_decoded.txt")?;
//! HuffmanCodec::decode_from_file(compressed, decompressed)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod code_table;
pub mod compressed_data;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod report;
pub mod symbol;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

pub use bit_vec::{BitReader, BitVec};
pub use code_table::{Code, CodeTable};
pub use compressed_data::CompressedData;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use min_heap::HeapErr;
pub use report::{NoReport, Reporter, TextReport};
pub use symbol::Symbol;
