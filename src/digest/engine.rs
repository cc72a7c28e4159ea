//! Streaming SHA-256 engine.

use tracing::{debug, instrument, trace};

use super::compress::{compress, compress_bytes};
use super::consts::INITIAL_STATE;
use super::encoding::utf16_to_utf8;
use super::{
    AfterFinish, BLOCK_SIZE, BLOCK_WORDS, Digest, Encoding, EngineConfig, Error,
    LENGTH_FIELD_LEN, Result, STATE_WORDS,
};
use crate::buffer::{ByteBuffer, ByteQueue};

/// Bytes staged per processing pass, so a huge `update` never buffers more
/// than this before compressing.
const INGEST_CHUNK: usize = 16 * BLOCK_SIZE;

/// First padding byte: a single set bit after the message.
const PADDING_MARKER: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Finalized,
}

/// Incremental SHA-256 computation.
///
/// One instance is one hash computation: [`start`](Self::start) (implied by
/// the constructors), any number of [`update`](Self::update) calls with
/// arbitrarily sized chunks, then [`finish`](Self::finish). The digest does
/// not depend on how the input was chunked.
///
/// `finish` works on a copy of the state, so calling it again returns the
/// same digest. Whether `update` is allowed afterwards is decided by
/// [`EngineConfig::after_finish`].
///
/// ```
/// use sha256_stream::Sha256;
///
/// let mut engine = Sha256::new();
/// engine.update(b"hello ")?.update(b"world")?;
/// assert_eq!(
///     engine.finish().to_hex(),
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// # Ok::<(), sha256_stream::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sha256<B = ByteQueue> {
    config: EngineConfig,
    state: [u32; STATE_WORDS],
    bit_len: u64,
    buffer: B,
    phase: Phase,
}

impl Sha256 {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_buffer(config, ByteQueue::with_capacity(config.initial_capacity))
    }

    /// Hash `data` in one call.
    #[must_use]
    pub fn digest(data: impl AsRef<[u8]>) -> Digest {
        let mut engine = Self::new();
        engine.absorb(data.as_ref());
        engine.finish()
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ByteBuffer> Sha256<B> {
    /// Create an engine that stages input in a caller-supplied buffer.
    ///
    /// The buffer is cleared first.
    pub fn with_buffer(config: EngineConfig, buffer: B) -> Self {
        let mut engine = Self {
            config,
            state: INITIAL_STATE,
            bit_len: 0,
            buffer,
            phase: Phase::Ready,
        };
        engine.start();
        engine
    }

    /// Reset to the initial state, discarding everything fed so far.
    pub fn start(&mut self) -> &mut Self {
        self.state = INITIAL_STATE;
        self.bit_len = 0;
        self.buffer.clear();
        self.phase = Phase::Ready;
        self
    }

    /// Feed raw bytes.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self> {
        self.update_bytes(data.as_ref())
    }

    /// Feed bytes declared to be in `encoding`.
    ///
    /// With [`Encoding::Utf8`] the bytes must be valid UTF-8; otherwise
    /// nothing is hashed and [`Error::InvalidEncoding`] is returned.
    #[instrument(level = "trace", skip(self, data), fields(len = data.len()))]
    pub fn update_encoded(&mut self, data: &[u8], encoding: Encoding) -> Result<&mut Self> {
        self.ensure_accepting()?;
        let bytes = encoding.validate(data).inspect_err(|err| {
            debug!(%err, %encoding, "rejecting malformed input");
        })?;
        self.absorb(bytes);
        Ok(self)
    }

    /// Feed the UTF-8 encoding of `text`.
    pub fn update_str(&mut self, text: &str) -> Result<&mut Self> {
        self.update_bytes(text.as_bytes())
    }

    /// Feed UTF-16 text, hashed as its UTF-8 encoding.
    ///
    /// An unpaired surrogate fails with [`Error::InvalidEncoding`] and
    /// nothing is hashed.
    #[instrument(level = "trace", skip(self, units), fields(units = units.len()))]
    pub fn update_utf16(&mut self, units: &[u16]) -> Result<&mut Self> {
        self.ensure_accepting()?;
        let mut bytes = Vec::with_capacity(units.len() * 3);
        utf16_to_utf8(units, &mut bytes).inspect_err(|err| {
            debug!(%err, "rejecting malformed UTF-16 input");
        })?;
        self.absorb(&bytes);
        Ok(self)
    }

    /// Produce the digest of everything fed since the last `start`.
    ///
    /// Registers, length and staged bytes are left untouched; the engine is
    /// only marked finished.
    #[instrument(level = "trace", skip(self), fields(bits = self.bit_len))]
    pub fn finish(&mut self) -> Digest {
        self.phase = Phase::Finalized;
        self.current_digest()
    }

    /// Digest of everything fed so far, without marking the engine finished.
    #[must_use]
    pub fn current_digest(&self) -> Digest {
        let mut state = self.state;
        let (blocks, count) = pad_tail(self.buffer.unread(), self.bit_len);
        for block in &blocks[..count] {
            compress_bytes(&mut state, block);
        }
        Digest::from_state(&state)
    }

    /// Message length in bits, modulo 2^64.
    #[must_use]
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Message length in bytes, modulo 2^61.
    #[must_use]
    pub fn byte_len(&self) -> u64 {
        self.bit_len >> 3
    }

    /// Staged bytes not yet folded into the state (always below one block).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.remaining()
    }

    /// Whether `finish` has been called since the last `start` or update.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[instrument(level = "trace", skip(self, data), fields(len = data.len()))]
    fn update_bytes(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.ensure_accepting()?;
        self.absorb(data);
        Ok(self)
    }

    pub(super) fn ensure_accepting(&mut self) -> Result<()> {
        if self.phase == Phase::Finalized {
            match self.config.after_finish {
                AfterFinish::Reject => {
                    debug!("update on finalized engine rejected");
                    return Err(Error::MisusedAfterFinalize);
                }
                AfterFinish::Extend => {
                    trace!(bits = self.bit_len, "extending finalized message");
                    self.phase = Phase::Ready;
                }
            }
        }
        Ok(())
    }

    fn absorb(&mut self, data: &[u8]) {
        self.bit_len = self
            .bit_len
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        for chunk in data.chunks(INGEST_CHUNK) {
            self.buffer.append(chunk);
            self.drain_blocks();
        }
    }

    fn drain_blocks(&mut self) {
        let mut blocks = 0usize;
        while self.buffer.remaining() >= BLOCK_SIZE {
            let Some(words) = read_block(&mut self.buffer) else {
                break;
            };
            compress(&mut self.state, &words);
            blocks += 1;
        }

        if blocks > 0 {
            trace!(blocks, pending = self.buffer.remaining(), "compressed blocks");
        }

        let consumed = self.buffer.consumed();
        if consumed > 0 && consumed >= self.config.compact_threshold {
            trace!(consumed, "compacting staging buffer");
            self.buffer.compact();
        }
    }
}

fn read_block<B: ByteBuffer>(buffer: &mut B) -> Option<[u32; BLOCK_WORDS]> {
    let mut words = [0u32; BLOCK_WORDS];
    for word in &mut words {
        *word = buffer.read_u32_be()?;
    }
    Some(words)
}

/// Build the final padded block(s): `pending`, the marker byte, zeros up to
/// 56 mod 64, then the bit length as a 64-bit big-endian integer.
fn pad_tail(pending: &[u8], bit_len: u64) -> ([[u8; BLOCK_SIZE]; 2], usize) {
    debug_assert!(pending.len() < BLOCK_SIZE, "undrained staging buffer");

    let count = if pending.len() + 1 + LENGTH_FIELD_LEN <= BLOCK_SIZE {
        1
    } else {
        2
    };

    let mut blocks = [[0u8; BLOCK_SIZE]; 2];
    let tail = blocks.as_flattened_mut();
    tail[..pending.len()].copy_from_slice(pending);
    tail[pending.len()] = PADDING_MARKER;

    let end = count * BLOCK_SIZE;
    tail[end - LENGTH_FIELD_LEN..end].copy_from_slice(&bit_len.to_be_bytes());

    (blocks, count)
}

impl<B: ByteBuffer> std::io::Write for Sha256<B> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update_bytes(buf).map_err(std::io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
