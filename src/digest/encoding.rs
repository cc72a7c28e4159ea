//! Input encodings accepted by the engine's text-oriented update calls.

use std::fmt;
use std::str::FromStr;

use super::{Error, Result};

/// How the bytes passed to [`Sha256::update_encoded`](super::Sha256::update_encoded)
/// should be interpreted before hashing.
///
/// The digest always runs over bytes; `Utf8` only adds a validity check so
/// that malformed text is rejected instead of silently hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// Bytes are hashed exactly as given
    #[default]
    Raw,
    /// Bytes must form valid UTF-8 text
    Utf8,
}

impl Encoding {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Utf8 => "utf8",
        }
    }

    /// Check `data` against this encoding and return the bytes to hash.
    pub(crate) fn validate(self, data: &[u8]) -> Result<&[u8]> {
        match self {
            Self::Raw => Ok(data),
            Self::Utf8 => std::str::from_utf8(data)
                .map(str::as_bytes)
                .map_err(|err| Error::InvalidEncoding {
                    encoding: "UTF-8",
                    valid_up_to: err.valid_up_to(),
                }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "binary" => Ok(Self::Raw),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            _ => Err(Error::UnknownEncoding(s.to_owned())),
        }
    }
}

/// Transcode UTF-16 code units to UTF-8, appending to `out`.
///
/// On an unpaired surrogate nothing is appended and the error reports how
/// many units preceded it.
pub(crate) fn utf16_to_utf8(units: &[u16], out: &mut Vec<u8>) -> Result<()> {
    let start = out.len();
    let mut consumed = 0usize;
    let mut scratch = [0u8; 4];

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => {
                out.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
                consumed += ch.len_utf16();
            }
            Err(_) => {
                out.truncate(start);
                return Err(Error::InvalidEncoding {
                    encoding: "UTF-16",
                    valid_up_to: consumed,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("raw".parse::<Encoding>().unwrap(), Encoding::Raw);
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert!(matches!(
            "latin1".parse::<Encoding>(),
            Err(Error::UnknownEncoding(name)) if name == "latin1"
        ));
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for encoding in [Encoding::Raw, Encoding::Utf8] {
            assert_eq!(encoding.to_string().parse::<Encoding>().unwrap(), encoding);
        }
    }

    #[test]
    fn raw_accepts_arbitrary_bytes() {
        let data = [0xFFu8, 0xFE, 0x00];
        assert_eq!(Encoding::Raw.validate(&data).unwrap(), &data[..]);
    }

    #[test]
    fn utf8_rejects_truncated_sequence() {
        let data = "ok \u{2713}".as_bytes();
        let truncated = &data[..data.len() - 1];
        assert!(matches!(
            Encoding::Utf8.validate(truncated),
            Err(Error::InvalidEncoding {
                encoding: "UTF-8",
                valid_up_to: 3
            })
        ));
    }

    #[test]
    fn utf16_transcodes_surrogate_pairs() {
        let text = "\u{1D11E} clef";
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut out = Vec::new();
        utf16_to_utf8(&units, &mut out).unwrap();
        assert_eq!(out, text.as_bytes());
    }

    #[test]
    fn utf16_rejects_lone_surrogate_without_output() {
        let units = [0x0061u16, 0x0062, 0xD800, 0x0063];
        let mut out = b"kept".to_vec();
        let err = utf16_to_utf8(&units, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEncoding {
                encoding: "UTF-16",
                valid_up_to: 2
            }
        ));
        assert_eq!(out, b"kept");
    }
}
