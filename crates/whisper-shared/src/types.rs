use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Emotional tone attached to every whisper.
///
/// Serialized as the lowercase tag (`"calm"`, `"love"`, ...) so persisted
/// JSON keeps the shape the mobile client wrote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Calm,
    Love,
    Dear,
    Greed,
}

impl Mood {
    /// All moods, in display order.
    pub const ALL: [Mood; 4] = [Mood::Calm, Mood::Love, Mood::Dear, Mood::Greed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Love => "love",
            Mood::Dear => "dear",
            Mood::Greed => "greed",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calm" => Ok(Mood::Calm),
            "love" => Ok(Mood::Love),
            "dear" => Ok(Mood::Dear),
            "greed" => Ok(Mood::Greed),
            other => Err(UnknownMood(other.to_string())),
        }
    }
}

/// A mood tag outside the closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

/// Opaque whisper identifier.
///
/// Derived from the creation instant (millisecond precision) plus a short
/// random suffix, so two whispers posted in the same millisecond still get
/// distinct ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WhisperId(String);

impl WhisperId {
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Utc::now().timestamp_millis(),
            random_base36(6)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WhisperId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WhisperId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for WhisperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anonymous author identifier.
///
/// `user_` + 13 random base-36 characters + creation time in milliseconds.
/// Generated once and persisted; stable across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        Self(format!(
            "user_{}{}",
            random_base36(13),
            Utc::now().timestamp_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A WGS-84 coordinate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
