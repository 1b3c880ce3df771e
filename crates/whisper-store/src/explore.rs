//! Derived views over the whisper collection.
//!
//! Everything here is a pure function: callers pass a slice, get owned
//! copies back, and the stored collection is never touched.

use chrono::{DateTime, Utc};

use whisper_shared::constants::{
    EXPLORE_RESULT_LIMIT, NEARBY_RADIUS_METERS, TRENDING_WINDOW_HOURS,
};
use whisper_shared::types::Mood;

use crate::models::Whisper;

/// Ranking applied by the explore view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreCategory {
    /// Most liked first.
    Popular,
    /// Newest first.
    Recent,
    /// Within walking distance, closest first.
    Nearby,
    /// Recent high-engagement whispers, best score first.
    Trending,
}

/// Case-insensitive substring search over whisper text.  Preserves the
/// stored order.
pub fn search(whispers: &[Whisper], query: &str) -> Vec<Whisper> {
    let needle = query.to_lowercase();
    whispers
        .iter()
        .filter(|w| w.text.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Apply a category ranking.  `now` anchors the trending age window.
pub fn rank(whispers: &[Whisper], category: ExploreCategory, now: DateTime<Utc>) -> Vec<Whisper> {
    let mut ranked: Vec<Whisper> = match category {
        ExploreCategory::Nearby => whispers
            .iter()
            .filter(|w| w.distance <= NEARBY_RADIUS_METERS)
            .cloned()
            .collect(),
        ExploreCategory::Trending => whispers
            .iter()
            .filter(|w| age_hours(w, now) <= TRENDING_WINDOW_HOURS as f64)
            .cloned()
            .collect(),
        _ => whispers.to_vec(),
    };

    match category {
        ExploreCategory::Popular => ranked.sort_by(|a, b| b.likes.cmp(&a.likes)),
        ExploreCategory::Recent => ranked.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        ExploreCategory::Nearby => ranked.sort_by(|a, b| a.distance.cmp(&b.distance)),
        ExploreCategory::Trending => ranked.sort_by(|a, b| {
            let score_a = trending_score(a, now);
            let score_b = trending_score(b, now);
            score_b
                .partial_cmp(&score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                // Equal scores: newer whisper first.
                .then_with(|| b.timestamp.cmp(&a.timestamp))
        }),
    }

    ranked
}

/// Combined explore pipeline: optional text search, category ranking, and
/// the fixed result cap.
pub fn explore(
    whispers: &[Whisper],
    query: Option<&str>,
    category: ExploreCategory,
    now: DateTime<Utc>,
) -> Vec<Whisper> {
    let searched: Vec<Whisper> = match query {
        Some(q) if !q.trim().is_empty() => search(whispers, q),
        _ => whispers.to_vec(),
    };

    let mut ranked = rank(&searched, category, now);
    ranked.truncate(EXPLORE_RESULT_LIMIT);
    ranked
}

/// Likes per hour of age, the trending score.  Age is floored at one hour
/// so a fresh whisper does not divide by a near-zero value.
pub fn trending_score(whisper: &Whisper, now: DateTime<Utc>) -> f64 {
    whisper.likes as f64 / age_hours(whisper, now).max(1.0)
}

fn age_hours(whisper: &Whisper, now: DateTime<Utc>) -> f64 {
    let millis = now
        .signed_duration_since(whisper.timestamp)
        .num_milliseconds();
    millis as f64 / 3_600_000.0
}

// ---------------------------------------------------------------------------
// Mood distribution
// ---------------------------------------------------------------------------

/// Share of the collection carrying a given mood.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodStat {
    pub mood: Mood,
    pub count: usize,
    /// Percentage of the whole collection, 0 when it is empty.
    pub percentage: f64,
}

/// Count whispers per mood, most common first.  Ties keep the fixed
/// display order of [`Mood::ALL`].
pub fn mood_distribution(whispers: &[Whisper]) -> Vec<MoodStat> {
    let total = whispers.len();

    let mut stats: Vec<MoodStat> = Mood::ALL
        .iter()
        .map(|&mood| {
            let count = whispers.iter().filter(|w| w.mood == mood).count();
            let percentage = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            MoodStat {
                mood,
                count,
                percentage,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use whisper_shared::types::Coordinates;

    use super::*;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    fn whisper(id: &str, text: &str, mood: Mood, likes: u32, age: Duration, distance: u32) -> Whisper {
        Whisper {
            id: id.into(),
            text: text.to_string(),
            mood,
            timestamp: anchor() - age,
            likes,
            location: Coordinates::new(21.1702, 72.8311),
            distance,
            user_id: "user_test".into(),
        }
    }

    fn ids(whispers: &[Whisper]) -> Vec<&str> {
        whispers.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let wall = vec![
            whisper("1", "Morning coffee thoughts", Mood::Calm, 1, Duration::hours(1), 100),
            whisper("2", "COFFEE is life", Mood::Greed, 2, Duration::hours(2), 100),
            whisper("3", "tea instead", Mood::Calm, 3, Duration::hours(3), 100),
        ];

        let hits = search(&wall, "coffee");
        assert_eq!(ids(&hits), vec!["1", "2"]);
    }

    #[test]
    fn popular_sorts_by_likes_descending() {
        let wall = vec![
            whisper("1", "a", Mood::Calm, 3, Duration::hours(1), 100),
            whisper("2", "b", Mood::Calm, 9, Duration::hours(2), 100),
            whisper("3", "c", Mood::Calm, 5, Duration::hours(3), 100),
        ];

        let ranked = rank(&wall, ExploreCategory::Popular, anchor());
        assert_eq!(ids(&ranked), vec!["2", "3", "1"]);
    }

    #[test]
    fn recent_sorts_by_timestamp_descending() {
        let wall = vec![
            whisper("1", "a", Mood::Calm, 0, Duration::hours(5), 100),
            whisper("2", "b", Mood::Calm, 0, Duration::minutes(10), 100),
            whisper("3", "c", Mood::Calm, 0, Duration::hours(1), 100),
        ];

        let ranked = rank(&wall, ExploreCategory::Recent, anchor());
        assert_eq!(ids(&ranked), vec!["2", "3", "1"]);
    }

    #[test]
    fn nearby_filters_and_sorts_by_distance() {
        let wall = vec![
            whisper("1", "a", Mood::Calm, 0, Duration::hours(1), 800),
            whisper("2", "b", Mood::Calm, 0, Duration::hours(1), 1500),
            whisper("3", "c", Mood::Calm, 0, Duration::hours(1), 200),
        ];

        let ranked = rank(&wall, ExploreCategory::Nearby, anchor());
        assert_eq!(ids(&ranked), vec!["3", "1"]);
    }

    #[test]
    fn trending_scores_likes_per_hour() {
        // Same age: more likes wins (10 vs 5).
        let wall = vec![
            whisper("a", "x", Mood::Calm, 10, Duration::hours(1), 100),
            whisper("b", "y", Mood::Calm, 5, Duration::hours(1), 100),
        ];
        let ranked = rank(&wall, ExploreCategory::Trending, anchor());
        assert_eq!(ids(&ranked), vec!["a", "b"]);

        // Old-but-liked loses to fresh engagement (score 1 vs 5).
        let wall = vec![
            whisper("a", "x", Mood::Calm, 10, Duration::hours(10), 100),
            whisper("b", "y", Mood::Calm, 5, Duration::hours(1), 100),
        ];
        let ranked = rank(&wall, ExploreCategory::Trending, anchor());
        assert_eq!(ids(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn trending_excludes_whispers_older_than_a_day() {
        let wall = vec![
            whisper("old", "x", Mood::Calm, 100, Duration::hours(30), 100),
            whisper("new", "y", Mood::Calm, 1, Duration::hours(2), 100),
        ];

        let ranked = rank(&wall, ExploreCategory::Trending, anchor());
        assert_eq!(ids(&ranked), vec!["new"]);
    }

    #[test]
    fn trending_ties_break_newer_first() {
        // Both under an hour old: age floors to 1, scores are equal.
        let wall = vec![
            whisper("older", "x", Mood::Calm, 5, Duration::minutes(40), 100),
            whisper("newer", "y", Mood::Calm, 5, Duration::minutes(10), 100),
        ];

        let ranked = rank(&wall, ExploreCategory::Trending, anchor());
        assert_eq!(ids(&ranked), vec!["newer", "older"]);
    }

    #[test]
    fn explore_caps_results_at_twenty() {
        let wall: Vec<Whisper> = (0..25)
            .map(|i| {
                whisper(
                    &i.to_string(),
                    "note",
                    Mood::Calm,
                    i,
                    Duration::minutes(i as i64),
                    100,
                )
            })
            .collect();

        let results = explore(&wall, None, ExploreCategory::Popular, anchor());
        assert_eq!(results.len(), 20);
        // Highest like counts survive the cap.
        assert_eq!(results[0].likes, 24);
    }

    #[test]
    fn explore_combines_search_and_ranking() {
        let wall = vec![
            whisper("1", "quiet rain", Mood::Calm, 2, Duration::hours(1), 100),
            whisper("2", "loud rain", Mood::Calm, 8, Duration::hours(2), 100),
            whisper("3", "sunshine", Mood::Calm, 20, Duration::hours(3), 100),
        ];

        let results = explore(&wall, Some("rain"), ExploreCategory::Popular, anchor());
        assert_eq!(ids(&results), vec!["2", "1"]);
    }

    #[test]
    fn blank_query_matches_everything() {
        let wall = vec![whisper("1", "a", Mood::Calm, 0, Duration::hours(1), 100)];
        let results = explore(&wall, Some("   "), ExploreCategory::Recent, anchor());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn mood_distribution_counts_and_percentages() {
        let wall = vec![
            whisper("1", "a", Mood::Calm, 0, Duration::hours(1), 100),
            whisper("2", "b", Mood::Calm, 0, Duration::hours(1), 100),
            whisper("3", "c", Mood::Love, 0, Duration::hours(1), 100),
            whisper("4", "d", Mood::Greed, 0, Duration::hours(1), 100),
        ];

        let stats = mood_distribution(&wall);
        assert_eq!(stats[0].mood, Mood::Calm);
        assert_eq!(stats[0].count, 2);
        assert!((stats[0].percentage - 50.0).abs() < f64::EPSILON);

        // Dear has no whispers and sorts last.
        assert_eq!(stats[3].mood, Mood::Dear);
        assert_eq!(stats[3].count, 0);
    }

    #[test]
    fn mood_distribution_of_empty_collection_is_all_zero() {
        let stats = mood_distribution(&[]);
        assert_eq!(stats.len(), 4);
        for (stat, mood) in stats.iter().zip(Mood::ALL) {
            assert_eq!(stat.mood, mood);
            assert_eq!(stat.count, 0);
            assert_eq!(stat.percentage, 0.0);
        }
    }
}
