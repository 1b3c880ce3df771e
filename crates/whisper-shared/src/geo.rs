//! Great-circle geometry and display formatting for distances and
//! timestamps.

use chrono::{DateTime, Utc};

use crate::constants::EARTH_RADIUS_KM;
use crate::types::Coordinates;

/// Distance between two coordinates via the Haversine formula, in whole
/// meters (rounded).
pub fn distance_meters(a: Coordinates, b: Coordinates) -> u32 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_KM * c * 1000.0).round() as u32
}

/// Format a distance for display: `"150m away"` under a kilometer,
/// `"1.5km away"` from there on.
pub fn format_distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{meters}m away")
    } else {
        format!("{:.1}km away", meters as f64 / 1000.0)
    }
}

/// Relative phrasing of a timestamp against the current instant.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, Utc::now())
}

/// Relative phrasing of `timestamp` as seen from `now`.
///
/// "Just now" under a minute, then minutes, hours and days, and an
/// absolute date once the whisper is a week old.
pub fn format_timestamp_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);

    let seconds = elapsed.num_seconds();
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, plural(minutes))
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural(hours))
    } else if days < 7 {
        format!("{} day{} ago", days, plural(days))
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn distance_is_zero_for_identical_points() {
        let p = Coordinates::new(21.1702, 72.8311);
        assert_eq!(distance_meters(p, p), 0);
    }

    #[test]
    fn distance_matches_known_value() {
        // 0.01 degrees of latitude along a meridian is ~1112 m.
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.01, 0.0);
        assert_eq!(distance_meters(a, b), 1112);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(21.1702, 72.8311);
        let b = Coordinates::new(19.0760, 72.8777);
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }

    #[test]
    fn format_distance_switches_to_km() {
        assert_eq!(format_distance(150), "150m away");
        assert_eq!(format_distance(999), "999m away");
        assert_eq!(format_distance(1000), "1.0km away");
        assert_eq!(format_distance(1500), "1.5km away");
        assert_eq!(format_distance(2340), "2.3km away");
    }

    #[test]
    fn format_timestamp_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();

        let cases = [
            (Duration::seconds(30), "Just now".to_string()),
            (Duration::minutes(1), "1 minute ago".to_string()),
            (Duration::minutes(5), "5 minutes ago".to_string()),
            (Duration::hours(1), "1 hour ago".to_string()),
            (Duration::hours(23), "23 hours ago".to_string()),
            (Duration::days(1), "1 day ago".to_string()),
            (Duration::days(6), "6 days ago".to_string()),
        ];

        for (age, expected) in cases {
            assert_eq!(format_timestamp_at(now - age, now), expected);
        }
    }

    #[test]
    fn format_timestamp_falls_back_to_date() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let old = now - Duration::days(10);
        assert_eq!(format_timestamp_at(old, now), "Jul 27, 2026");
    }
}
