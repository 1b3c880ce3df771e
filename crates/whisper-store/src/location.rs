//! Device location collaborator.
//!
//! The store never talks to platform location services directly; it goes
//! through [`LocationProvider`] so the device integration stays outside
//! this crate.  [`FixedLocationProvider`] covers tests and headless
//! embedders.

use async_trait::async_trait;

use whisper_shared::types::Coordinates;

use crate::error::{Result, StoreError};

/// Foreground location permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Source of the device's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Current permission state, without prompting the user.
    async fn permission_status(&self) -> Result<PermissionStatus>;

    /// Prompt for foreground location permission.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Read the device's current coordinates.
    async fn current_coordinates(&self) -> Result<Coordinates>;
}

/// A [`LocationProvider`] that always reports the same state.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    status: PermissionStatus,
    coordinates: Option<Coordinates>,
}

impl FixedLocationProvider {
    /// Provider with permission granted and a fixed position.
    pub fn granted(coordinates: Coordinates) -> Self {
        Self {
            status: PermissionStatus::Granted,
            coordinates: Some(coordinates),
        }
    }

    /// Provider with permission denied.
    pub fn denied() -> Self {
        Self {
            status: PermissionStatus::Denied,
            coordinates: None,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn permission_status(&self) -> Result<PermissionStatus> {
        Ok(self.status)
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.status)
    }

    async fn current_coordinates(&self) -> Result<Coordinates> {
        self.coordinates
            .ok_or_else(|| StoreError::LocationUnavailable("no fix configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn granted_provider_reports_its_fix() {
        let provider = FixedLocationProvider::granted(Coordinates::new(48.8566, 2.3522));
        assert_eq!(
            provider.permission_status().await.unwrap(),
            PermissionStatus::Granted
        );
        let coords = provider.current_coordinates().await.unwrap();
        assert_eq!(coords.latitude, 48.8566);
    }

    #[tokio::test]
    async fn denied_provider_has_no_fix() {
        let provider = FixedLocationProvider::denied();
        assert_eq!(
            provider.request_permission().await.unwrap(),
            PermissionStatus::Denied
        );
        assert!(provider.current_coordinates().await.is_err());
    }
}
