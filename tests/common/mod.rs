#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::Router;
use osm_finder::{
    error::{GeocodeError, SearchError},
    filter::SearchFilter,
    geocode::{GeocodedLocation, Geocoder},
    overpass::GeodataService,
    search::PlaceSearch,
    types::{
        overpass::{OverpassCoord, OverpassElement},
        place::Coordinate,
    },
};

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

pub fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn node(id: i64, lat: f64, lon: f64, pairs: &[(&str, &str)]) -> OverpassElement {
    OverpassElement {
        element_type: "node".to_string(),
        id,
        lat: Some(lat),
        lon: Some(lon),
        center: None,
        tags: tags(pairs),
    }
}

pub fn way(id: i64, lat: f64, lon: f64, pairs: &[(&str, &str)]) -> OverpassElement {
    OverpassElement {
        element_type: "way".to_string(),
        id,
        lat: None,
        lon: None,
        center: Some(OverpassCoord { lat, lon }),
        tags: tags(pairs),
    }
}

/// Geocoder that knows a fixed set of names
#[derive(Default)]
pub struct FakeGeocoder {
    pub known: Vec<(String, Coordinate)>,
    pub address: Option<String>,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn knowing(name: &str, at: Coordinate) -> Self {
        Self {
            known: vec![(name.to_string(), at)],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, text: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(GeocodeError::InvalidCoordinate("broken".to_string()));
        }
        Ok(self
            .known
            .iter()
            .find(|(name, _)| name == text)
            .map(|(name, coordinate)| GeocodedLocation {
                coordinate: *coordinate,
                display_name: name.clone(),
            }))
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodeError> {
        self.calls.lock().unwrap().push(coordinate.to_string());
        Ok(self.address.clone())
    }
}

#[derive(Debug, Clone)]
pub struct GeodataCall {
    pub filter: SearchFilter,
    pub center: Coordinate,
    pub radius_meters: u32,
    pub timeout: Duration,
}

/// Geodata backend that returns canned elements, or fails when `elements` is `Err`
pub struct FakeGeodata {
    pub elements: Result<Vec<OverpassElement>, String>,
    pub calls: Mutex<Vec<GeodataCall>>,
}

impl FakeGeodata {
    pub fn returning(elements: Vec<OverpassElement>) -> Self {
        Self {
            elements: Ok(elements),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            elements: Err(reason.to_string()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<GeodataCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeodataService for FakeGeodata {
    async fn execute(
        &self,
        filter: &SearchFilter,
        center: Coordinate,
        radius_meters: u32,
        timeout: Duration,
    ) -> Result<Vec<OverpassElement>, SearchError> {
        self.calls.lock().unwrap().push(GeodataCall {
            filter: filter.clone(),
            center,
            radius_meters,
            timeout,
        });
        self.elements
            .clone()
            .map_err(SearchError::UpstreamUnavailable)
    }
}

pub fn place_search(geocoder: Arc<FakeGeocoder>, geodata: Arc<FakeGeodata>) -> PlaceSearch {
    PlaceSearch::new(geocoder, geodata, Duration::from_secs(25))
}

pub const PUERTA_DEL_SOL: (f64, f64) = (40.4168, -3.7038);

/// Parks within 500 m of Puerta del Sol, deliberately out of distance order.
/// Nearest first they are 11, 12, 10.
pub fn madrid_parks() -> Vec<OverpassElement> {
    vec![
        way(
            10,
            40.4195,
            -3.7010,
            &[("name", "Jardín de la Plaza"), ("leisure", "park")],
        ),
        node(11, 40.4170, -3.7040, &[("leisure", "park")]),
        way(
            12,
            40.4180,
            -3.7070,
            &[
                ("name:es", "Jardines de Sabatini"),
                ("leisure", "park"),
                ("addr:city", "Madrid"),
            ],
        ),
        // no center, dropped
        OverpassElement {
            center: None,
            ..way(13, 0.0, 0.0, &[("leisure", "park")])
        },
    ]
}

/// Serve `app` on an ephemeral local port
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    addr
}
