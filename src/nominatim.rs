use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::{
    error::GeocodeError,
    geocode::{GeocodedLocation, Geocoder},
    rate_limit::RateLimiter,
    types::{
        nominatim::{NominatimPlace, NominatimReversePlace},
        place::Coordinate,
    },
};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim client. Every request goes through the shared [`RateLimiter`]
/// since the public instance allows one request per second.
#[derive(Debug)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    rate_limit: RateLimiter,
}

impl NominatimClient {
    /// `http` should already carry the identifying user agent
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        timeout: Duration,
        min_interval: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            rate_limit: RateLimiter::new(min_interval),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, text: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
        self.rate_limit.wait().await;
        let places: Vec<NominatimPlace> = self
            .http
            .get(self.endpoint("search"))
            .query(&[
                ("q", text),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(place) = places.into_iter().next() else {
            warn!("no geocoding match for {:?}", text);
            return Ok(None);
        };
        let coordinate = parse_coordinate(&place.lat, &place.lon)?;
        debug!("geocoded {:?} to {}", text, coordinate);
        Ok(Some(GeocodedLocation {
            coordinate,
            display_name: place.display_name.unwrap_or_else(|| text.to_string()),
        }))
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodeError> {
        self.rate_limit.wait().await;
        let place: NominatimReversePlace = self
            .http
            .get(self.endpoint("reverse"))
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if place.address.is_none() {
            debug!("no address at {}", coordinate);
            return Ok(None);
        }
        Ok(place.display_name)
    }
}

fn parse_coordinate(lat: &str, lon: &str) -> Result<Coordinate, GeocodeError> {
    let invalid = || GeocodeError::InvalidCoordinate(format!("{lat},{lon}"));
    let latitude = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let longitude = lon.trim().parse::<f64>().map_err(|_| invalid())?;
    Coordinate::new(latitude, longitude).map_err(|_| invalid())
}
