//! Shared error and configuration types for the Huffman + RLE codec.

pub mod config;
pub mod error;

pub use config::{BufferConfig, CodecConfig};
pub use error::{CodecError, Result};
