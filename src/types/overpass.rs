use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top level of an Overpass `[out:json]` response. Elements are kept as raw
/// json so one odd element cannot sink the whole batch.
#[derive(Serialize, Deserialize, Debug)]
pub struct OverpassResponse {
    pub elements: Vec<serde_json::Value>,
    #[serde(default)]
    pub remark: Option<String>,
}

/// A raw element as returned by `out center`. Nodes carry `lat`/`lon`, ways and
/// relations carry a `center`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OverpassCoord>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OverpassCoord {
    pub lat: f64,
    pub lon: f64,
}
