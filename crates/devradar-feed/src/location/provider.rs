use async_trait::async_trait;
use devradar_common::{Coordinates, RadarError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    High,
    Balanced,
}

/// Device location services.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Result<Permission, RadarError>;

    /// One-shot position read.
    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates, RadarError>;
}

/// Serves a fixed position, or denies permission when there is none.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    position: Option<Coordinates>,
}

impl FixedLocationProvider {
    pub fn at(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub fn denied() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> Result<Permission, RadarError> {
        Ok(match self.position {
            Some(_) => Permission::Granted,
            None => Permission::Denied,
        })
    }

    async fn current_position(&self, _accuracy: Accuracy) -> Result<Coordinates, RadarError> {
        self.position
            .ok_or_else(|| RadarError::LocationUnavailable("no fixed position configured".into()))
    }
}
