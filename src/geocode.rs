use async_trait::async_trait;
use serde::Serialize;

use crate::{error::GeocodeError, types::place::Coordinate};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub coordinate: Coordinate,
    pub display_name: String,
}

/// Free text to coordinates and back
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service has no match for `text`
    async fn geocode(&self, text: &str) -> Result<Option<GeocodedLocation>, GeocodeError>;

    /// `Ok(None)` when nothing is known at `coordinate`
    async fn reverse_geocode(&self, coordinate: Coordinate)
        -> Result<Option<String>, GeocodeError>;
}
