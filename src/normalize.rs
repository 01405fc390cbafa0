use std::collections::BTreeMap;

use tracing::debug;

use crate::types::{
    overpass::OverpassElement,
    place::{Coordinate, ElementKind, OsmId, Place},
};

pub const UNNAMED: &str = "Unnamed";
pub const GENERIC_CATEGORY: &str = "place";

const NAME_TAGS: [&str; 4] = ["name", "name:es", "name:en", "ref"];
const CATEGORY_TAGS: [&str; 4] = ["amenity", "leisure", "tourism", "shop"];
const ADDRESS_TAGS: [&str; 3] = ["addr:street", "addr:housenumber", "addr:city"];

/// Turn raw Overpass elements into places. Elements of an unknown kind or
/// without a usable position are dropped.
pub fn normalize(elements: Vec<OverpassElement>) -> Vec<Place> {
    let received = elements.len();
    let places: Vec<Place> = elements.into_iter().filter_map(normalize_element).collect();
    debug!("normalized {} of {} elements", places.len(), received);
    places
}

pub fn normalize_element(element: OverpassElement) -> Option<Place> {
    let kind = ElementKind::parse(&element.element_type)?;
    let coordinate = position(&element)?;
    let tags = element.tags;

    let name = first_tag(&tags, &NAME_TAGS).unwrap_or(UNNAMED).to_string();
    let category = first_tag(&tags, &CATEGORY_TAGS)
        .unwrap_or(GENERIC_CATEGORY)
        .to_string();
    let address_parts: Vec<&str> = ADDRESS_TAGS
        .iter()
        .filter_map(|key| tag(&tags, key))
        .collect();
    let address = (!address_parts.is_empty()).then(|| address_parts.join(", "));
    let display_label = display_label(&name, &category, address.as_deref());

    Some(Place {
        name,
        coordinate,
        category,
        address,
        external_id: OsmId {
            kind,
            id: element.id,
        },
        display_label,
        tags,
    })
}

/// Direct position first, then the centroid Overpass adds for ways and relations
fn position(element: &OverpassElement) -> Option<Coordinate> {
    let direct = element.lat.zip(element.lon);
    let center = element.center.map(|c| (c.lat, c.lon));
    let (lat, lon) = direct.or(center)?;
    Coordinate::new(lat, lon).ok()
}

fn tag<'a>(tags: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    tags.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn first_tag<'a>(tags: &'a BTreeMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| tag(tags, key))
}

fn display_label(name: &str, category: &str, address: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(3);
    if !name.is_empty() {
        parts.push(name.to_string());
    }
    if !category.is_empty() {
        parts.push(format!("({category})"));
    }
    if let Some(address) = address {
        parts.push(format!("- {address}"));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::overpass::OverpassCoord;

    fn element(kind: &str, id: i64, tags: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            element_type: kind.to_string(),
            id,
            lat: None,
            lon: None,
            center: None,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn node(id: i64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> OverpassElement {
        OverpassElement {
            lat: Some(lat),
            lon: Some(lon),
            ..element("node", id, tags)
        }
    }

    #[test]
    fn untagged_way_with_center_is_unnamed_place() {
        let way = OverpassElement {
            center: Some(OverpassCoord {
                lat: 40.0,
                lon: -3.0,
            }),
            ..element("way", 7, &[])
        };
        let place = normalize_element(way).expect("way with center is usable");
        assert_eq!(place.name, UNNAMED);
        assert_eq!(place.category, GENERIC_CATEGORY);
        assert_eq!(place.coordinate, Coordinate::new(40.0, -3.0).unwrap());
        assert_eq!(place.address, None);
        assert_eq!(place.display_label, "Unnamed (place)");
        assert_eq!(
            place.external_id,
            OsmId {
                kind: ElementKind::Way,
                id: 7
            }
        );
    }

    #[test]
    fn elements_without_position_are_dropped() {
        let places = normalize(vec![
            element("way", 1, &[("name", "No center")]),
            element("relation", 2, &[]),
            OverpassElement {
                lat: Some(40.0),
                ..element("node", 3, &[])
            },
        ]);
        assert!(places.is_empty());
    }

    #[test]
    fn unknown_kinds_are_dropped() {
        let area = OverpassElement {
            center: Some(OverpassCoord { lat: 1.0, lon: 1.0 }),
            ..element("area", 1, &[("name", "Somewhere")])
        };
        assert!(normalize(vec![area]).is_empty());
    }

    #[test]
    fn zero_coordinates_are_usable() {
        let places = normalize(vec![node(1, 0.0, 0.0, &[("name", "Null Island")])]);
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn out_of_range_positions_are_dropped() {
        assert!(normalize(vec![node(1, 91.0, 0.0, &[])]).is_empty());
    }

    #[test]
    fn name_falls_back_through_locales_and_ref() {
        let cases: [(&[(&str, &str)], &str); 5] = [
            (&[("name", "Café Central"), ("name:es", "es"), ("ref", "r")], "Café Central"),
            (&[("name:es", "Parque del Retiro"), ("name:en", "Retiro Park")], "Parque del Retiro"),
            (&[("name:en", "Retiro Park"), ("ref", "r")], "Retiro Park"),
            (&[("ref", "B-12"), ("name", "")], "B-12"),
            (&[("amenity", "bench")], UNNAMED),
        ];
        for (tags, expected) in cases {
            let place = normalize_element(node(1, 40.0, -3.0, tags)).unwrap();
            assert_eq!(place.name, expected);
        }
    }

    #[test]
    fn category_prefers_amenity_then_leisure_tourism_shop() {
        let cases: [(&[(&str, &str)], &str); 4] = [
            (&[("shop", "books"), ("amenity", "cafe"), ("leisure", "park")], "cafe"),
            (&[("shop", "books"), ("tourism", "museum"), ("leisure", "park")], "park"),
            (&[("shop", "books"), ("tourism", "museum")], "museum"),
            (&[("shop", "books")], "books"),
        ];
        for (tags, expected) in cases {
            let place = normalize_element(node(1, 40.0, -3.0, tags)).unwrap();
            assert_eq!(place.category, expected);
        }
    }

    #[test]
    fn address_joins_present_parts_in_order() {
        let place = normalize_element(node(
            1,
            40.0,
            -3.0,
            &[
                ("name", "Café Gijón"),
                ("amenity", "cafe"),
                ("addr:city", "Madrid"),
                ("addr:street", "Paseo de Recoletos"),
                ("addr:housenumber", "21"),
            ],
        ))
        .unwrap();
        assert_eq!(place.address.as_deref(), Some("Paseo de Recoletos, 21, Madrid"));
        assert_eq!(
            place.display_label,
            "Café Gijón (cafe) - Paseo de Recoletos, 21, Madrid"
        );

        let partial = normalize_element(node(
            2,
            40.0,
            -3.0,
            &[("addr:street", "Calle Mayor"), ("addr:city", "Madrid")],
        ))
        .unwrap();
        assert_eq!(partial.address.as_deref(), Some("Calle Mayor, Madrid"));
    }

    #[test]
    fn tags_are_kept_on_the_place() {
        let place = normalize_element(node(1, 40.0, -3.0, &[("wheelchair", "yes")])).unwrap();
        assert_eq!(place.tags.get("wheelchair").map(String::as_str), Some("yes"));
    }

    #[test]
    fn node_position_wins_over_center() {
        let both = OverpassElement {
            center: Some(OverpassCoord { lat: 1.0, lon: 1.0 }),
            ..node(1, 2.0, 2.0, &[])
        };
        let place = normalize_element(both).unwrap();
        assert_eq!(place.coordinate, Coordinate::new(2.0, 2.0).unwrap());
    }
}
