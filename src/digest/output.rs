//! The 32-byte digest value produced by [`Sha256::finish`](super::Sha256::finish).

use std::fmt;
use std::str::FromStr;

use subtle::ConstantTimeEq;

use super::{DIGEST_LEN, Error, Result, STATE_WORDS};

/// A finished SHA-256 digest.
///
/// Always exactly [`DIGEST_LEN`] bytes: the eight state words serialized
/// big-endian. Formats as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub(crate) fn from_state(state: &[u32; STATE_WORDS]) -> Self {
        let mut out = [0u8; DIGEST_LEN];
        for (chunk, value) in out.chunks_exact_mut(4).zip(state.iter()) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        Self(out)
    }

    /// Parse a 64-character hex string (either case).
    pub fn from_hex(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.len() != DIGEST_LEN * 2 {
            return Err(Error::InvalidDigest {
                reason: format!("expected {} hex characters, got {}", DIGEST_LEN * 2, text.len()),
            });
        }

        let mut out = [0u8; DIGEST_LEN];
        for (byte, pair) in out.iter_mut().zip(text.as_bytes().chunks_exact(2)) {
            *byte = (hex_value(pair[0])? << 4) | hex_value(pair[1])?;
        }
        Ok(Self(out))
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Take the raw bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Compare against `expected` without short-circuiting on the first
    /// differing byte.
    #[must_use]
    pub fn verify(&self, expected: &[u8]) -> bool {
        expected.len() == DIGEST_LEN && bool::from(self.0.as_slice().ct_eq(expected))
    }
}

fn hex_value(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::InvalidDigest {
            reason: format!("non-hex character {:?}", char::from(c)),
        }),
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn state_serializes_big_endian() {
        let digest = Digest::from_state(&[0x0102_0304, 0, 0, 0, 0, 0, 0, 0xA0B0_C0D0]);
        assert_eq!(&digest.as_bytes()[..4], &[1, 2, 3, 4]);
        assert_eq!(&digest.as_bytes()[28..], &[0xA0, 0xB0, 0xC0, 0xD0]);
    }

    #[test]
    fn hex_parse_accepts_upper_case() {
        let lower: Digest = ABC.parse().unwrap();
        let upper = Digest::from_hex(&ABC.to_uppercase()).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_hex(), ABC);
        assert_eq!(format!("{lower:x}"), ABC);
    }

    #[test]
    fn hex_parse_rejects_bad_input() {
        assert!(matches!(
            Digest::from_hex("abcd"),
            Err(Error::InvalidDigest { .. })
        ));
        let bad = format!("{}zz", &ABC[..62]);
        assert!(matches!(
            Digest::from_hex(&bad),
            Err(Error::InvalidDigest { .. })
        ));
    }

    #[test]
    fn verify_checks_every_byte() {
        let digest: Digest = ABC.parse().unwrap();
        assert!(digest.verify(digest.as_bytes()));

        let mut tampered = digest.into_bytes();
        tampered[31] ^= 1;
        assert!(!digest.verify(&tampered));
        assert!(!digest.verify(&tampered[..16]));
    }

    #[test]
    fn verify_rejects_wrong_lengths() {
        let digest: Digest = ABC.parse().unwrap();
        let mut longer = digest.into_bytes().to_vec();
        longer.push(0);
        assert!(!digest.verify(&longer));
        assert!(!digest.verify(&[]));
        assert!(!Digest::from_bytes([0; DIGEST_LEN]).verify(&[0; DIGEST_LEN - 1]));
        assert!(Digest::from_bytes([0; DIGEST_LEN]).verify(&[0; DIGEST_LEN]));
    }

    #[test]
    fn debug_shows_hex() {
        let digest: Digest = ABC.parse().unwrap();
        assert_eq!(format!("{digest:?}"), format!("Digest({ABC})"));
    }
}
