//! Lossless single-file compression with static Huffman coding.
//!
//! A container is `[header length: u32 BE][header][pad count][packed codes]`,
//! where the header carries the byte frequency table the decoder needs to
//! rebuild the exact same code table. An empty file compresses to an empty
//! container.

pub mod bitstreams;
pub mod container;
pub mod error;
pub mod huffman;
pub mod properties;
pub mod utils;

pub use container::{
    compress, compress_bytes, decompress, decompress_bytes, inspect, ContainerStats,
};
pub use error::{Error, Result};
pub use properties::Properties;
