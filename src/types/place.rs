use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A WGS84 position. Always in range once constructed through [`Coordinate::new`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SearchError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SearchError::InvalidInput(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SearchError::InvalidInput(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// geo-types points are x = longitude, y = latitude
impl From<Coordinate> for geo_types::Point {
    fn from(value: Coordinate) -> Self {
        geo_types::Point::new(value.longitude, value.latitude)
    }
}

/// The OSM element kinds the search can return
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "node" => Some(Self::Node),
            "way" => Some(Self::Way),
            "relation" => Some(Self::Relation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable reference back to the OSM element a place was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsmId {
    pub kind: ElementKind,
    pub id: i64,
}

impl OsmId {
    pub fn url(&self) -> String {
        format!("https://www.openstreetmap.org/{}/{}", self.kind, self.id)
    }
}

/// A normalized place, before it has been measured against a search center
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coordinate: Coordinate,
    pub category: String,
    pub tags: BTreeMap<String, String>,
    pub address: Option<String>,
    pub external_id: OsmId,
    pub display_label: String,
}

/// A place together with its great-circle distance from the search center
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlace {
    pub place: Place,
    pub distance_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Ascending by `distance_meters`
    pub places: Vec<RankedPlace>,
    pub query: String,
    pub radius_meters: u32,
    pub center: Coordinate,
}
