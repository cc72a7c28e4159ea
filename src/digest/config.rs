//! Engine configuration.

use std::fmt;
use std::str::FromStr;

use super::{BLOCK_SIZE, Error, Result};

/// Default number of consumed bytes that triggers a staging-buffer compaction.
pub const DEFAULT_COMPACT_THRESHOLD: usize = 1024;

/// Default staging-buffer pre-allocation.
pub const DEFAULT_INITIAL_CAPACITY: usize = 2 * BLOCK_SIZE;

/// What `update` does once the engine has been finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AfterFinish {
    /// Fail with [`Error::MisusedAfterFinalize`] until `start` is called.
    #[default]
    Reject,
    /// Keep hashing: the message is extended and the next `finish` covers
    /// everything fed since the last `start`.
    Extend,
}

impl AfterFinish {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Extend => "extend",
        }
    }
}

impl fmt::Display for AfterFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AfterFinish {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "extend" => Ok(Self::Extend),
            _ => Err(Error::UnknownPolicy(s.to_owned())),
        }
    }
}

/// Digest engine configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Behaviour of `update` after `finish`.
    pub after_finish: AfterFinish,
    /// Consumed bytes held by the staging buffer before it is compacted.
    /// Zero compacts after every processing pass.
    pub compact_threshold: usize,
    /// Bytes pre-allocated for the staging buffer.
    pub initial_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            after_finish: AfterFinish::Reject,
            compact_threshold: DEFAULT_COMPACT_THRESHOLD,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Replace the after-finish policy.
    #[must_use]
    pub const fn with_after_finish(mut self, policy: AfterFinish) -> Self {
        self.after_finish = policy;
        self
    }

    /// Replace the compaction threshold.
    #[must_use]
    pub const fn with_compact_threshold(mut self, threshold: usize) -> Self {
        self.compact_threshold = threshold;
        self
    }

    /// Replace the staging buffer pre-allocation.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
