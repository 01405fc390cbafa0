use std::fmt::Write as _;

use crate::types::place::SearchResult;

pub const DEFAULT_SUMMARY_LIMIT: usize = 10;

/// Human readable listing of the nearest `limit` places
pub fn render(result: &SearchResult, limit: usize) -> String {
    if result.places.is_empty() {
        return format!(
            "No places matching '{}' found within {} m. Try a larger radius or a different kind of place.",
            result.query, result.radius_meters
        );
    }

    let mut text = format!(
        "Found {} places matching '{}':\n",
        result.places.len(),
        result.query
    );
    for (i, ranked) in result.places.iter().take(limit).enumerate() {
        let place = &ranked.place;
        let _ = write!(
            text,
            "\n{}. {} ({}) - {:.2} km",
            i + 1,
            place.name,
            place.category,
            ranked.distance_meters / 1000.0
        );
        if let Some(address) = &place.address {
            let _ = write!(text, "\n   Address: {address}");
        }
    }
    if result.places.len() > limit {
        let _ = write!(text, "\n\n... and {} more", result.places.len() - limit);
    }
    text
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::place::{Coordinate, ElementKind, OsmId, Place, RankedPlace};

    fn ranked(name: &str, address: Option<&str>, distance_meters: f64) -> RankedPlace {
        RankedPlace {
            place: Place {
                name: name.to_string(),
                coordinate: Coordinate::new(40.0, -3.0).unwrap(),
                category: "cafe".to_string(),
                tags: BTreeMap::new(),
                address: address.map(str::to_string),
                external_id: OsmId {
                    kind: ElementKind::Node,
                    id: 1,
                },
                display_label: name.to_string(),
            },
            distance_meters,
        }
    }

    fn result(places: Vec<RankedPlace>) -> SearchResult {
        SearchResult {
            places,
            query: "cafés".to_string(),
            radius_meters: 800,
            center: Coordinate::new(40.0, -3.0).unwrap(),
        }
    }

    #[test]
    fn empty_result_suggests_widening() {
        assert_eq!(
            render(&result(vec![]), 10),
            "No places matching 'cafés' found within 800 m. Try a larger radius or a different kind of place."
        );
    }

    #[test]
    fn lists_places_with_km_and_address() {
        let text = render(
            &result(vec![
                ranked("Café Gijón", Some("Paseo de Recoletos, 21"), 130.0),
                ranked("Unnamed", None, 1520.0),
            ]),
            10,
        );
        assert_eq!(
            text,
            "Found 2 places matching 'cafés':\n\
             \n1. Café Gijón (cafe) - 0.13 km\
             \n   Address: Paseo de Recoletos, 21\
             \n2. Unnamed (cafe) - 1.52 km"
        );
    }

    #[test]
    fn truncates_after_limit() {
        let places = (0..4).map(|i| ranked("x", None, i as f64)).collect();
        let text = render(&result(places), 2);
        assert!(text.starts_with("Found 4 places"));
        assert!(text.contains("\n2. x"));
        assert!(!text.contains("\n3. x"));
        assert!(text.ends_with("... and 2 more"));
    }
}
