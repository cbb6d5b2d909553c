use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::LocationError, model::Position};

/// Source of the user's current position.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Position known up front, from command-line arguments or configuration.
///
/// The default source has no position and always reports it unavailable.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    position: Option<Position>,
}

impl FixedLocation {
    pub fn new(position: Position) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Prefer an explicit position, falling back to the configured default.
    pub fn resolve(explicit: Option<Position>, config: &Config) -> Self {
        Self {
            position: explicit.or(config.default_location),
        }
    }
}

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Position, LocationError> {
        self.position.ok_or(LocationError::Unavailable)
    }
}
