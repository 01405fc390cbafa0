use crate::types::place::{Coordinate, Place, RankedPlace};

/// Mean earth radius used for all distances, in metres
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in metres
pub trait HaversineDistance<Rhs = Self> {
    fn haversine_distance(&self, other: &Rhs) -> f64;
}

impl HaversineDistance for Coordinate {
    fn haversine_distance(&self, other: &Coordinate) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let delta_phi = (other.latitude - self.latitude).to_radians();
        let delta_lambda = (other.longitude - self.longitude).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl HaversineDistance<Coordinate> for Place {
    fn haversine_distance(&self, other: &Coordinate) -> f64 {
        self.coordinate.haversine_distance(other)
    }
}

/// Measure every place from `center` and order nearest first. The sort is
/// stable, so equal distances keep their input order.
pub fn annotate_and_rank(places: Vec<Place>, center: Coordinate) -> Vec<RankedPlace> {
    let mut ranked: Vec<RankedPlace> = places
        .into_iter()
        .map(|place| RankedPlace {
            distance_meters: place.haversine_distance(&center),
            place,
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked
}
