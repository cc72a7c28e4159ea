//! I/O adapters that feed a [`Sha256`] engine while data moves.
//!
//! [`Sha256`] itself implements [`std::io::Write`], so `io::copy` can pump a
//! reader straight into it. [`DigestReader`] goes the other way: it wraps a
//! reader and hashes exactly the bytes handed back to the caller, including
//! short reads.

use std::io::{self, Read};

use super::{Digest, Result, Sha256};
use crate::buffer::ByteBuffer;

impl Sha256 {
    /// Read `reader` to the end and return the digest of everything read.
    pub fn digest_reader<R: Read>(mut reader: R) -> Result<Digest> {
        let mut engine = Self::new();
        io::copy(&mut reader, &mut engine)?;
        Ok(engine.finish())
    }
}

/// Reader adapter that hashes everything read through it.
#[derive(Debug)]
pub struct DigestReader<R, B = crate::buffer::ByteQueue> {
    inner: R,
    engine: Sha256<B>,
}

impl<R> DigestReader<R> {
    /// Wrap `inner` with a fresh default engine.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            engine: Sha256::new(),
        }
    }
}

impl<R, B: ByteBuffer> DigestReader<R, B> {
    /// Wrap `inner`, hashing into an existing engine.
    pub fn with_engine(inner: R, engine: Sha256<B>) -> Self {
        Self { inner, engine }
    }

    /// Digest of the bytes read so far.
    #[must_use]
    pub fn digest(&self) -> Digest {
        self.engine.current_digest()
    }

    /// Number of bytes read so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.engine.byte_len()
    }

    /// Borrow the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap into the reader and the digest of everything read.
    pub fn into_parts(mut self) -> (R, Digest) {
        let digest = self.engine.finish();
        (self.inner, digest)
    }
}

impl<R: Read, B: ByteBuffer> Read for DigestReader<R, B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // A refused read must leave the inner reader untouched.
        self.engine.ensure_accepting().map_err(io::Error::other)?;
        let n = self.inner.read(buf)?;
        self.engine
            .update(&buf[..n])
            .map_err(io::Error::other)?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn digest_reader_matches_one_shot() {
        let data = vec![0x42u8; 10_000];
        let digest = Sha256::digest_reader(Cursor::new(&data)).unwrap();
        assert_eq!(digest, Sha256::digest(&data));
    }

    #[test]
    fn reader_adapter_hashes_short_reads() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let mut reader = DigestReader::new(Trickle {
            data: &data,
            step: 7,
        });
        let mut copied = Vec::new();
        reader.read_to_end(&mut copied).unwrap();

        assert_eq!(copied, data);
        assert_eq!(reader.bytes_read(), 1000);
        assert_eq!(reader.digest(), Sha256::digest(&data));

        let (_, digest) = reader.into_parts();
        assert_eq!(digest, Sha256::digest(&data));
    }

    #[test]
    fn reader_adapter_continues_existing_engine() {
        let mut engine = Sha256::new();
        engine.update(b"hello ").unwrap();
        let mut reader = DigestReader::with_engine(Cursor::new(b"world".to_vec()), engine);
        io::copy(&mut reader, &mut io::sink()).unwrap();
        assert_eq!(reader.digest(), Sha256::digest(b"hello world"));
        assert_eq!(reader.get_ref().position(), 5);
    }

    #[test]
    fn reader_adapter_leaves_input_unread_on_finalized_engine() {
        let mut engine = Sha256::new();
        engine.update(b"head").unwrap();
        let expected = engine.finish();

        let mut reader = DigestReader::with_engine(Cursor::new(b"payload".to_vec()), engine);
        let mut buf = [0u8; 16];
        let err = reader.read(&mut buf).unwrap_err();

        assert!(matches!(
            err.get_ref().and_then(|inner| inner.downcast_ref::<crate::Error>()),
            Some(crate::Error::MisusedAfterFinalize)
        ));
        assert_eq!(reader.get_ref().position(), 0);
        assert_eq!(reader.digest(), expected);

        let (mut inner, _) = reader.into_parts();
        let mut rest = Vec::new();
        inner.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"payload");
    }
}
