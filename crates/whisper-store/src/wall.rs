//! The application state container.
//!
//! [`WhisperWall`] owns the authoritative runtime state: the anonymous
//! user identity, the whisper collection, the mood filter and radius
//! settings, and the viewer's last known position.  Every mutation writes
//! a fresh collection snapshot through the [`KeyValueStore`] collaborator;
//! persistence and sensor failures are logged and degraded to defaults,
//! never surfaced to the caller.

use chrono::Utc;
use tracing::{debug, info, warn};

use whisper_shared::constants::{
    CURRENT_LOCATION_LABEL, DEFAULT_RADIUS_METERS, FALLBACK_CITY, FALLBACK_LATITUDE,
    FALLBACK_LONGITUDE,
};
use whisper_shared::moderation;
use whisper_shared::types::{Coordinates, Mood, UserId, WhisperId};
use whisper_shared::validation;

use crate::explore::{self, ExploreCategory, MoodStat};
use crate::kv::{keys, KeyValueStore};
use crate::location::{LocationProvider, PermissionStatus};
use crate::models::{DeviceLocation, UserProfile, Whisper};
use crate::seed;

/// Store lifecycle.  Operations called before `Ready` act on
/// empty/default state rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Ready,
}

/// Derived statistics over the local user's own whispers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub whispers_posted: usize,
    pub likes_received: u32,
    /// Count of the user's whispers per mood, in display order.
    pub moods: Vec<(Mood, usize)>,
}

/// Central application state.
///
/// Generic over its two collaborators: the key-value persistence backend
/// and the device location provider.  The store is the source of truth at
/// runtime; persistence is a write-through mirror refreshed on every
/// mutation and read once during [`initialize`](WhisperWall::initialize).
pub struct WhisperWall<S, L> {
    storage: S,
    locations: L,
    lifecycle: Lifecycle,
    user: Option<UserProfile>,
    whispers: Vec<Whisper>,
    selected_mood: Mood,
    location_radius: u32,
    location: Option<DeviceLocation>,
    first_launch: bool,
}

impl<S, L> WhisperWall<S, L>
where
    S: KeyValueStore,
    L: LocationProvider,
{
    /// Create an uninitialised store over the given collaborators.
    pub fn new(storage: S, locations: L) -> Self {
        Self {
            storage,
            locations,
            lifecycle: Lifecycle::Uninitialized,
            user: None,
            whispers: Vec::new(),
            selected_mood: Mood::Calm,
            location_radius: DEFAULT_RADIUS_METERS,
            location: None,
            first_launch: false,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Load persisted state, seeding defaults where nothing is stored.
    ///
    /// Runs once per store; repeat calls are no-ops.  Every step fails
    /// soft: a broken backend leaves the store on built-in defaults and
    /// the error in the log.
    pub async fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Uninitialized {
            return;
        }
        self.lifecycle = Lifecycle::Loading;

        self.load_first_launch_flag().await;
        self.load_user().await;
        self.load_whispers().await;
        self.load_radius().await;
        self.refresh_location().await;

        self.lifecycle = Lifecycle::Ready;
        info!(
            whispers = self.whispers.len(),
            first_launch = self.first_launch,
            "store initialised"
        );
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True only while [`initialize`](WhisperWall::initialize) is running.
    pub fn is_loading(&self) -> bool {
        self.lifecycle == Lifecycle::Loading
    }

    async fn load_first_launch_flag(&mut self) {
        match self.storage.get(keys::HAS_LAUNCHED).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.first_launch = true;
                if let Err(e) = self.storage.set(keys::HAS_LAUNCHED, "true").await {
                    warn!(error = %e, "failed to persist first-launch flag");
                }
            }
            Err(e) => warn!(error = %e, "failed to read first-launch flag"),
        }
    }

    async fn load_user(&mut self) {
        let id = match self.storage.get(keys::USER_ID).await {
            Ok(Some(id)) => UserId::from(id),
            Ok(None) => {
                let id = UserId::generate();
                if let Err(e) = self.storage.set(keys::USER_ID, id.as_str()).await {
                    warn!(error = %e, "failed to persist user id");
                }
                id
            }
            Err(e) => {
                warn!(error = %e, "failed to read user id, using a session-only identity");
                UserId::generate()
            }
        };

        self.user = Some(UserProfile {
            id,
            is_anonymous: true,
            created_at: Utc::now(),
            total_whispers: 0,
            total_likes: 0,
        });
    }

    async fn load_whispers(&mut self) {
        match self.storage.get(keys::WHISPERS).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Whisper>>(&json) {
                Ok(whispers) => self.whispers = whispers,
                Err(e) => {
                    warn!(error = %e, "corrupt whisper collection, reseeding");
                    self.seed_whispers().await;
                }
            },
            Ok(None) => self.seed_whispers().await,
            Err(e) => {
                warn!(error = %e, "failed to read whispers, using the sample set");
                self.whispers = seed::sample_whispers(Utc::now());
            }
        }
    }

    async fn seed_whispers(&mut self) {
        self.whispers = seed::sample_whispers(Utc::now());
        self.persist_whispers().await;
    }

    async fn load_radius(&mut self) {
        match self.storage.get(keys::LOCATION_RADIUS).await {
            Ok(Some(raw)) => match raw.parse::<u32>() {
                Ok(radius) => self.location_radius = radius,
                Err(e) => warn!(value = %raw, error = %e, "ignoring unparsable radius"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to read radius"),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The full collection, newest first.
    pub fn whispers(&self) -> &[Whisper] {
        &self.whispers
    }

    pub fn selected_mood(&self) -> Mood {
        self.selected_mood
    }

    pub fn location_radius(&self) -> u32 {
        self.location_radius
    }

    pub fn location(&self) -> Option<&DeviceLocation> {
        self.location.as_ref()
    }

    pub fn is_first_launch(&self) -> bool {
        self.first_launch
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Post a new whisper.
    ///
    /// Returns false when the trimmed text is empty, when no user identity
    /// exists yet, or when the text fails validation or the denylist
    /// screen.  The new whisper is prepended, so the stored order stays
    /// newest-first.
    pub async fn add_whisper(&mut self, text: &str, mood: Mood) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) else {
            return false;
        };

        let validation = validation::validate_whisper_text(text);
        if !validation.is_valid() {
            debug!(
                violations = validation.violations().len(),
                "rejected whisper text"
            );
            return false;
        }
        if moderation::contains_bad_words(text) {
            debug!("rejected whisper matching the denylist");
            return false;
        }

        let location = self
            .location
            .as_ref()
            .map(DeviceLocation::coordinates)
            .unwrap_or(Coordinates::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE));

        let whisper = Whisper {
            id: WhisperId::generate(),
            text: trimmed.to_string(),
            mood,
            timestamp: Utc::now(),
            likes: 0,
            location,
            distance: 0,
            user_id,
        };
        if let Some(user) = self.user.as_mut() {
            user.total_whispers += 1;
        }

        // Fresh snapshot, never an in-place mutation.
        let mut next = Vec::with_capacity(self.whispers.len() + 1);
        next.push(whisper);
        next.extend(self.whispers.iter().cloned());
        self.whispers = next;

        self.persist_whispers().await;
        true
    }

    /// Increment the like counter for `id`.  Unknown ids are a no-op.
    pub async fn like_whisper(&mut self, id: &WhisperId) {
        if !self.whispers.iter().any(|w| &w.id == id) {
            debug!(whisper = %id, "like for unknown whisper ignored");
            return;
        }

        let next: Vec<Whisper> = self
            .whispers
            .iter()
            .map(|w| {
                if &w.id == id {
                    let mut liked = w.clone();
                    liked.likes += 1;
                    liked
                } else {
                    w.clone()
                }
            })
            .collect();

        self.whispers = next;
        self.persist_whispers().await;
    }

    /// Switch the mood filter.  Session-scoped; not persisted.
    pub fn set_selected_mood(&mut self, mood: Mood) {
        self.selected_mood = mood;
    }

    /// Update the visibility radius and persist it.
    pub async fn set_location_radius(&mut self, meters: u32) {
        self.location_radius = meters;
        if let Err(e) = self
            .storage
            .set(keys::LOCATION_RADIUS, &meters.to_string())
            .await
        {
            warn!(error = %e, "failed to persist radius");
        }
    }

    /// Clear (or set) the one-time first-launch flag once onboarding is
    /// done.
    pub fn set_first_launch(&mut self, first_launch: bool) {
        self.first_launch = first_launch;
    }

    // ------------------------------------------------------------------
    // Location
    // ------------------------------------------------------------------

    /// Ask the collaborator for foreground location permission.
    ///
    /// A grant refreshes the current position and returns true.  Denials
    /// fall back to the default city coordinate and return false, as does
    /// any provider error.
    pub async fn request_location_permission(&mut self) -> bool {
        match self.locations.request_permission().await {
            Ok(PermissionStatus::Granted) => {
                self.read_coordinates().await;
                true
            }
            Ok(PermissionStatus::Denied) => {
                info!("location permission denied, using fallback city");
                self.location = Some(DeviceLocation {
                    latitude: FALLBACK_LATITUDE,
                    longitude: FALLBACK_LONGITUDE,
                    city: FALLBACK_CITY.to_string(),
                });
                false
            }
            Err(e) => {
                warn!(error = %e, "location permission request failed");
                false
            }
        }
    }

    /// Refresh the current position when permission was already granted.
    /// Silent no-op otherwise.
    pub async fn refresh_location(&mut self) {
        match self.locations.permission_status().await {
            Ok(PermissionStatus::Granted) => self.read_coordinates().await,
            Ok(PermissionStatus::Denied) => {}
            Err(e) => warn!(error = %e, "failed to read permission status"),
        }
    }

    async fn read_coordinates(&mut self) {
        match self.locations.current_coordinates().await {
            Ok(coords) => {
                self.location = Some(DeviceLocation {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                    city: CURRENT_LOCATION_LABEL.to_string(),
                });
            }
            Err(e) => warn!(error = %e, "failed to read coordinates"),
        }
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Whispers matching the selected mood within the visibility radius,
    /// newest first.  Pure; running it twice yields the same set.
    pub fn filtered_whispers(&self) -> Vec<Whisper> {
        let mut filtered: Vec<Whisper> = self
            .whispers
            .iter()
            .filter(|w| w.mood == self.selected_mood && w.distance <= self.location_radius)
            .cloned()
            .collect();
        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        filtered
    }

    /// Explore view over the full collection, anchored at the current
    /// instant.
    pub fn explore(&self, query: Option<&str>, category: ExploreCategory) -> Vec<Whisper> {
        explore::explore(&self.whispers, query, category, Utc::now())
    }

    /// Mood share across the full collection.
    pub fn mood_distribution(&self) -> Vec<MoodStat> {
        explore::mood_distribution(&self.whispers)
    }

    /// Stats over the local user's own whispers.  All zero until an
    /// identity exists.
    pub fn user_stats(&self) -> UserStats {
        let Some(user) = self.user.as_ref() else {
            return UserStats {
                whispers_posted: 0,
                likes_received: 0,
                moods: Vec::new(),
            };
        };

        let mine: Vec<&Whisper> = self
            .whispers
            .iter()
            .filter(|w| w.user_id == user.id)
            .collect();
        let likes_received = mine.iter().map(|w| w.likes).sum();
        let moods = Mood::ALL
            .iter()
            .map(|&m| (m, mine.iter().filter(|w| w.mood == m).count()))
            .collect();

        UserStats {
            whispers_posted: mine.len(),
            likes_received,
            moods,
        }
    }

    // ------------------------------------------------------------------
    // Persistence helpers
    // ------------------------------------------------------------------

    async fn persist_whispers(&self) {
        let json = match serde_json::to_string(&self.whispers) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize whispers");
                return;
            }
        };
        if let Err(e) = self.storage.set(keys::WHISPERS, &json).await {
            warn!(error = %e, "failed to persist whispers");
        }
    }
}
