use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::place::{Coordinate, ElementKind, RankedPlace, SearchResult};

/// A place as handed to tool callers and the map widget
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub category: String,
    pub tags: BTreeMap<String, String>,
    pub address: Option<String>,
    pub osm_id: i64,
    pub osm_type: ElementKind,
    pub osm_url: String,
    pub display_name: String,
    pub distance_meters: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub places: Vec<Place>,
    pub count: usize,
    pub query: String,
    pub radius_meters: u32,
    pub center: Coordinate,
}

impl From<RankedPlace> for Place {
    fn from(value: RankedPlace) -> Self {
        let place = value.place;
        Self {
            osm_url: place.external_id.url(),
            name: place.name,
            lat: place.coordinate.latitude,
            lng: place.coordinate.longitude,
            category: place.category,
            tags: place.tags,
            address: place.address,
            osm_id: place.external_id.id,
            osm_type: place.external_id.kind,
            display_name: place.display_label,
            distance_meters: value.distance_meters,
        }
    }
}

impl From<SearchResult> for SearchResults {
    fn from(value: SearchResult) -> Self {
        let places: Vec<Place> = value.places.into_iter().map(Place::from).collect();
        Self {
            count: places.len(),
            places,
            query: value.query,
            radius_meters: value.radius_meters,
            center: value.center,
        }
    }
}
