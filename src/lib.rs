//! Streaming, incremental SHA-256 (FIPS 180-2)
//!
//! Feed message bytes in chunks of any size over an unbounded session and
//! get back a 32-byte digest that is identical to the reference algorithm no
//! matter how the input was split.
//!
//! # Quick Start
//!
//! ```rust
//! use sha256_stream::Sha256;
//!
//! let mut engine = Sha256::new();
//! engine.update(b"ab")?;
//! engine.update(b"c")?;
//! let digest = engine.finish();
//!
//! assert_eq!(digest, Sha256::digest(b"abc"));
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! # Ok::<(), sha256_stream::Error>(())
//! ```
//!
//! # Lifecycle
//!
//! An engine is created ready to accept data, takes any number of `update`
//! calls, and is finished with `finish`. `finish` never disturbs the running
//! state, so it can be called repeatedly. Feeding more data afterwards is
//! governed by [`EngineConfig::after_finish`]: rejected with
//! [`Error::MisusedAfterFinalize`] by default, or treated as extending the
//! message with [`AfterFinish::Extend`]. `start` always begins a fresh
//! computation.
//!
//! # Features
//!
//! - **Chunking invariant** - any partition of the input yields the same digest
//! - **Exact length accounting** - native 64-bit bit counter, wrapping mod 2^64
//! - **Pluggable staging buffer** - the engine stages input through [`ByteBuffer`]
//! - **Text input** - UTF-8 validation and UTF-16 transcoding before hashing
//! - **I/O adapters** - `io::Write` for the engine, [`DigestReader`] for readers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod buffer;
pub mod digest;

pub use buffer::{ByteBuffer, ByteQueue};
pub use digest::{
    AfterFinish, BLOCK_SIZE, DIGEST_LEN, Digest, DigestReader, Encoding, EngineConfig, Error,
    Result, Sha256,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
