//! Built-in sample whispers used to populate an empty store on first
//! launch.

use chrono::{DateTime, Duration, Utc};

use whisper_shared::constants::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE};
use whisper_shared::types::{Coordinates, Mood};

use crate::models::Whisper;

/// The fixed sample set.  Timestamps are expressed relative to `now` so a
/// freshly seeded wall always looks recent.
pub fn sample_whispers(now: DateTime<Utc>) -> Vec<Whisper> {
    let here = Coordinates::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE);

    vec![
        Whisper {
            id: "1".into(),
            text: "A quiet corner with a book and a warm cup of tea brings peace to my restless mind."
                .to_string(),
            mood: Mood::Calm,
            timestamp: now - Duration::minutes(15),
            likes: 12,
            location: here,
            distance: 150,
            user_id: "user_123".into(),
        },
        Whisper {
            id: "2".into(),
            text: "Your smile is the sunrise that brightens my darkest days. Thank you for existing."
                .to_string(),
            mood: Mood::Love,
            timestamp: now - Duration::hours(2),
            likes: 25,
            location: here,
            distance: 300,
            user_id: "user_456".into(),
        },
        Whisper {
            id: "3".into(),
            text: "Dear future self, remember this moment of pure happiness. Hold onto it."
                .to_string(),
            mood: Mood::Dear,
            timestamp: now - Duration::hours(3),
            likes: 15,
            location: here,
            distance: 250,
            user_id: "user_789".into(),
        },
        Whisper {
            id: "4".into(),
            text: "Success isn't about the money, but the freedom to choose your own path."
                .to_string(),
            mood: Mood::Greed,
            timestamp: now - Duration::hours(4),
            likes: 18,
            location: here,
            distance: 400,
            user_id: "user_101".into(),
        },
    ]
}
