use serde::Deserialize;

use crate::{error::SearchError, types::place::Coordinate};

/// Latitude/longitude as they arrive from callers, either half possibly missing.
/// Accepts both `latitude`/`longitude` and the short `lat`/`lng`.
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct PartialLatLng {
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
}

impl PartialLatLng {
    /// `None` unless both halves are present. Out of range values are an error
    /// rather than silently ignored.
    pub fn coordinate(&self) -> Result<Option<Coordinate>, SearchError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_halves_make_a_coordinate() {
        let partial: PartialLatLng = serde_json::from_str(r#"{"lat": 40.4, "lng": -3.7}"#).unwrap();
        assert_eq!(
            partial.coordinate().unwrap(),
            Some(Coordinate::new(40.4, -3.7).unwrap())
        );
        let long_names: PartialLatLng =
            serde_json::from_str(r#"{"latitude": 40.4, "longitude": -3.7}"#).unwrap();
        assert!(long_names.coordinate().unwrap().is_some());
    }

    #[test]
    fn one_half_is_no_coordinate() {
        let partial: PartialLatLng = serde_json::from_str(r#"{"lat": 40.4}"#).unwrap();
        assert_eq!(partial.coordinate().unwrap(), None);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let partial: PartialLatLng = serde_json::from_str(r#"{"lat": 140.0, "lng": 0}"#).unwrap();
        assert!(partial.coordinate().is_err());
    }
}
