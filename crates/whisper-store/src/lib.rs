//! # whisper-store
//!
//! Local state and persistence for the Whisper Walls application.
//!
//! The crate owns the canonical whisper collection, the anonymous user
//! identity, and the filter settings, mirrors every mutation through a
//! key-value backend (SQLite on device, in-memory for tests), and exposes
//! the derived explore views every screen consumes.

pub mod database;
pub mod explore;
pub mod kv;
pub mod location;
pub mod migrations;
pub mod models;
pub mod seed;
pub mod wall;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use explore::{ExploreCategory, MoodStat};
pub use kv::{KeyValueStore, MemoryStore};
pub use location::{FixedLocationProvider, LocationProvider, PermissionStatus};
pub use models::*;
pub use wall::{Lifecycle, UserStats, WhisperWall};
