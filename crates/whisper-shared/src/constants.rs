/// Application name
pub const APP_NAME: &str = "Whisper Walls";

/// Default visibility radius in meters (2 km)
pub const DEFAULT_RADIUS_METERS: u32 = 2_000;

/// Cutoff for the "nearby" explore view in meters
pub const NEARBY_RADIUS_METERS: u32 = 1_000;

/// Whispers older than this are excluded from the trending view
pub const TRENDING_WINDOW_HOURS: i64 = 24;

/// Maximum number of entries returned by any explore view
pub const EXPLORE_RESULT_LIMIT: usize = 20;

/// Minimum whisper length in characters (after trimming)
pub const MIN_WHISPER_CHARS: usize = 3;

/// Maximum whisper length in characters
pub const MAX_WHISPER_CHARS: usize = 400;

/// Fallback latitude used when location permission is denied (Surat, Gujarat)
pub const FALLBACK_LATITUDE: f64 = 21.1702;

/// Fallback longitude used when location permission is denied
pub const FALLBACK_LONGITUDE: f64 = 72.8311;

/// Display label for the fallback coordinate
pub const FALLBACK_CITY: &str = "Surat, Gujarat (Default)";

/// Display label for freshly read device coordinates
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// Mean Earth radius in kilometers, used by the Haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;
