use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One hit from `/search?format=json`. Nominatim sends coordinates as strings.
#[derive(Serialize, Deserialize, Debug)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body of `/reverse?format=json`. A miss comes back as `{"error": ...}` with
/// no address.
#[derive(Serialize, Deserialize, Debug)]
pub struct NominatimReversePlace {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<HashMap<String, String>>,
}
