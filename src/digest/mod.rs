//! SHA-256 digest engine
//!
//! Constant tables, block compression, the streaming engine, and the digest
//! value type.

mod compress;
mod config;
mod consts;
mod encoding;
mod engine;
mod error;
mod io;
mod output;

pub use config::{AfterFinish, DEFAULT_COMPACT_THRESHOLD, DEFAULT_INITIAL_CAPACITY, EngineConfig};
pub use encoding::Encoding;
pub use engine::Sha256;
pub use error::{Error, Result};
pub use io::DigestReader;
pub use output::Digest;

/// Bytes per compression block
pub const BLOCK_SIZE: usize = 64;

/// Digest size in bytes
pub const DIGEST_LEN: usize = 32;

/// Size of the big-endian bit-length field closing the padding
pub const LENGTH_FIELD_LEN: usize = 8;

/// 32-bit words in the chaining state
pub const STATE_WORDS: usize = 8;

/// 32-bit words per block
pub(crate) const BLOCK_WORDS: usize = BLOCK_SIZE / 4;

/// Compression rounds per block (also the message schedule length)
pub(crate) const ROUNDS: usize = 64;
