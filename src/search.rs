use std::{sync::Arc, time::Duration};

use tracing::{info, instrument, warn};

use crate::{
    classify::{classify, Classification},
    distance::annotate_and_rank,
    error::{GeocodeError, Result, SearchError},
    filter::to_filter,
    geocode::Geocoder,
    normalize::normalize,
    overpass::GeodataService,
    types::place::{Coordinate, SearchResult},
};

pub const DEFAULT_RADIUS_METERS: u32 = 1000;
pub const DEFAULT_MAX_RADIUS_METERS: u32 = 50_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub coordinate: Option<Coordinate>,
    pub location_text: Option<String>,
    pub radius_meters: u32,
}

impl SearchRequest {
    pub fn near(query: impl Into<String>, coordinate: Coordinate, radius_meters: u32) -> Self {
        Self {
            query: query.into(),
            coordinate: Some(coordinate),
            location_text: None,
            radius_meters,
        }
    }

    pub fn around(
        query: impl Into<String>,
        location_text: impl Into<String>,
        radius_meters: u32,
    ) -> Self {
        Self {
            query: query.into(),
            coordinate: None,
            location_text: Some(location_text.into()),
            radius_meters,
        }
    }
}

/// The place search pipeline. Holds no per-request state; the geocoder's rate
/// limit clock is the only thing shared between concurrent searches.
pub struct PlaceSearch {
    geocoder: Arc<dyn Geocoder>,
    geodata: Arc<dyn GeodataService>,
    query_timeout: Duration,
    max_radius_meters: u32,
}

impl PlaceSearch {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        geodata: Arc<dyn GeodataService>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            geocoder,
            geodata,
            query_timeout,
            max_radius_meters: DEFAULT_MAX_RADIUS_METERS,
        }
    }

    pub fn with_max_radius(mut self, max_radius_meters: u32) -> Self {
        self.max_radius_meters = max_radius_meters;
        self
    }

    #[instrument(skip(self, request), fields(query = %request.query, radius = request.radius_meters))]
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResult> {
        if request.radius_meters == 0 || request.radius_meters > self.max_radius_meters {
            return Err(SearchError::InvalidInput(format!(
                "radius_meters must be between 1 and {}, got {}",
                self.max_radius_meters, request.radius_meters
            )));
        }

        let center = self
            .resolve_center(request.coordinate, request.location_text.as_deref())
            .await?;

        let classification = classify(&request.query);
        let fallback_text = match &classification {
            Classification::Matched(_) => None,
            Classification::Unmatched => Some(request.query.as_str()),
        };
        let filter = to_filter(&classification.categories(), fallback_text);

        let elements = self
            .geodata
            .execute(&filter, center, request.radius_meters, self.query_timeout)
            .await?;
        let places = annotate_and_rank(normalize(elements), center);
        info!("found {} places around {}", places.len(), center);

        Ok(SearchResult {
            places,
            query: request.query,
            radius_meters: request.radius_meters,
            center,
        })
    }

    async fn resolve_center(
        &self,
        coordinate: Option<Coordinate>,
        location_text: Option<&str>,
    ) -> Result<Coordinate> {
        if let Some(coordinate) = coordinate {
            return Ok(coordinate);
        }
        let Some(text) = location_text.filter(|text| !text.trim().is_empty()) else {
            return Err(SearchError::MissingLocation);
        };
        match self.geocoder.geocode(text).await {
            Ok(Some(location)) => {
                info!("resolved {:?} to {}", text, location.display_name);
                Ok(location.coordinate)
            }
            Ok(None) => Err(SearchError::GeocodeFailed {
                location: text.to_string(),
            }),
            Err(err) => {
                warn!("geocoding {:?} failed: {}", text, err);
                Err(SearchError::GeocodeFailed {
                    location: text.to_string(),
                })
            }
        }
    }

    /// Pass-through to the geocoder, no ranking or normalization
    pub async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodeError> {
        self.geocoder.reverse_geocode(coordinate).await
    }
}
