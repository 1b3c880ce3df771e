//! Domain model structs held by the store and mirrored to persistence.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names, so persisted JSON keeps the same shape the mobile client writes
//! to its key-value storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use whisper_shared::types::{Coordinates, Mood, UserId, WhisperId};

// ---------------------------------------------------------------------------
// Whisper
// ---------------------------------------------------------------------------

/// A single anonymous post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Whisper {
    /// Unique identifier, assigned at creation and never reused.
    pub id: WhisperId,
    /// The note itself.  Validated once, at creation time.
    pub text: String,
    /// Emotional tone tag.
    pub mood: Mood,
    /// Creation instant; immutable.
    pub timestamp: DateTime<Utc>,
    /// Like counter; only ever incremented.
    pub likes: u32,
    /// Coordinates captured when the whisper was posted.
    pub location: Coordinates,
    /// Distance in meters from the viewer at creation time.  A snapshot,
    /// not recomputed as the viewer moves.
    pub distance: u32,
    /// Anonymous author identifier.
    pub user_id: UserId,
}

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// The local anonymous identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier, generated once and persisted.
    pub id: UserId,
    /// Always true; there are no named accounts.
    pub is_anonymous: bool,
    /// When this identity was created locally.
    pub created_at: DateTime<Utc>,
    /// Number of whispers posted by this identity.  Informational.
    pub total_whispers: u32,
    /// Likes received across this identity's whispers.  Informational,
    /// derived from the collection rather than authoritative.
    pub total_likes: u32,
}

// ---------------------------------------------------------------------------
// DeviceLocation
// ---------------------------------------------------------------------------

/// The viewer's last known position plus a display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable place label shown in the UI.
    pub city: String,
}

impl DeviceLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn whisper_json_uses_camel_case_keys() {
        let whisper = Whisper {
            id: "42".into(),
            text: "hello there".to_string(),
            mood: Mood::Calm,
            timestamp: Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
            likes: 3,
            location: Coordinates::new(21.1702, 72.8311),
            distance: 150,
            user_id: "user_123".into(),
        };

        let json = serde_json::to_string(&whisper).unwrap();
        assert!(json.contains("\"userId\":\"user_123\""));
        assert!(json.contains("\"mood\":\"calm\""));

        let back: Whisper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, whisper);
    }
}
