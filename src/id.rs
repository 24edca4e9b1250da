//! Document-store object ids.
//!
//! A [`TodoId`] is 12 bytes, rendered as 24 lowercase hex characters:
//!
//! ```text
//! | 4 bytes           | 5 bytes             | 3 bytes          |
//! | unix seconds (BE) | per-process random  | counter (BE)     |
//! ```
//!
//! The counter starts at a random value and wraps at 2^24, so ids minted by
//! one process within the same second stay unique.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

const LEN: usize = 12;
const HEX_LEN: usize = LEN * 2;
const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| {
    let random = Uuid::new_v4().into_bytes();
    [random[0], random[1], random[2], random[3], random[4]]
});

static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| {
    let random = Uuid::new_v4().into_bytes();
    AtomicU32::new(u32::from_be_bytes([0, random[0], random[1], random[2]]))
});

/// Identifier of a stored todo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId([u8; LEN]);

impl TodoId {
    /// Mints a fresh id.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; LEN]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; LEN] {
        self.0
    }

    /// Seconds since the Unix epoch at which the id was minted.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

/// Why a string is not a [`TodoId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Length in bytes of the rejected input.
    #[error("expected 24 hex characters, got {0}")]
    Length(usize),

    #[error("invalid hex character {0:?}")]
    InvalidChar(char),
}

impl FromStr for TodoId {
    type Err = IdError;

    /// Accepts exactly 24 hex digits, upper or lower case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HEX_LEN {
            return Err(IdError::Length(s.len()));
        }
        let mut nibbles = [0u8; HEX_LEN];
        for (i, c) in s.char_indices() {
            nibbles[i] = c
                .to_digit(16)
                .ok_or(IdError::InvalidChar(c))? as u8;
        }
        let mut bytes = [0u8; LEN];
        for (byte, pair) in bytes.iter_mut().zip(nibbles.chunks_exact(2)) {
            *byte = (pair[0] << 4) | pair[1];
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
