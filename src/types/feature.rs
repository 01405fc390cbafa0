use color_eyre::eyre;
use color_eyre::eyre::eyre;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};

use super::place::{RankedPlace, SearchResult};

/// Properties that are attached to a place feature
#[derive(Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
    pub category: String,
    pub distance_meters: f64,
    pub address: Option<String>,
    pub display_name: String,
    pub osm_url: String,
}

/// For converting FeatureProperties to geojson properties
impl TryInto<JsonObject> for FeatureProperties {
    type Error = eyre::Error;

    fn try_into(self) -> Result<JsonObject, Self::Error> {
        let value = serde_json::to_value(self)?;
        let properties = value
            .as_object()
            .ok_or(eyre!("Couldn't create object for properties"))?;
        Ok(properties.to_owned())
    }
}

pub fn place_feature(ranked: &RankedPlace) -> eyre::Result<Feature> {
    let place = &ranked.place;
    let point = geo_types::Point::from(place.coordinate);
    let osm_url = place.external_id.url();
    Ok(Feature {
        id: Some(Id::String(osm_url.clone())),
        geometry: Some(Geometry::new((&point).into())),
        properties: Some(
            FeatureProperties {
                name: place.name.clone(),
                category: place.category.clone(),
                distance_meters: ranked.distance_meters,
                address: place.address.clone(),
                display_name: place.display_label.clone(),
                osm_url,
            }
            .try_into()?,
        ),
        ..Default::default()
    })
}

/// One point feature per place, nearest first
pub fn feature_collection(result: &SearchResult) -> eyre::Result<FeatureCollection> {
    result.places.iter().map(place_feature).collect()
}
