use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::{
    clients::AppState,
    error::SearchError,
    search::SearchRequest,
    summary,
    types::{
        dto::{geom::PartialLatLng, place::SearchResults},
        place::{Coordinate, SearchResult},
    },
};

pub const SEARCH_PLACES: &str = "search_places";
pub const REVERSE_GEOCODE: &str = "reverse_geocode";

/// Marker between the summary and the json payload in `search_places` text
pub const JSON_SEPARATOR: &str = "--- JSON DATA FOR THE WIDGET ---";

#[derive(Deserialize, Debug)]
pub struct SearchPlacesArgs {
    pub query: String,
    #[serde(flatten)]
    pub position: PartialLatLng,
    #[serde(default)]
    pub location_text: Option<String>,
    #[serde(default)]
    pub radius_meters: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct ReverseGeocodeArgs {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<TextContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    pub is_error: bool,
}

impl ToolResult {
    fn text(text: String, structured_content: Option<Value>) -> Self {
        Self {
            content: vec![TextContent {
                content_type: "text",
                text,
            }],
            structured_content,
            is_error: false,
        }
    }

    fn failure(text: String) -> Self {
        Self {
            is_error: true,
            ..Self::text(text, None)
        }
    }
}

/// Arguments that do not fit the tool's schema
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("unknown tool {0:?}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        source: serde_json::Error,
    },
}

/// Descriptors for `tools/list`
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": SEARCH_PLACES,
            "description": "Search for places (cafes, parks, libraries, ...) near a location using OpenStreetMap data. \
                Give either coordinates or a location_text, which is geocoded when coordinates are missing.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Kind of place to look for, in English or Spanish, e.g. 'cafes', 'parques', 'museums'."
                    },
                    "latitude": { "type": "number", "description": "Latitude of the search center" },
                    "longitude": { "type": "number", "description": "Longitude of the search center" },
                    "location_text": {
                        "type": "string",
                        "description": "Address or place name, used when latitude/longitude are not given."
                    },
                    "radius_meters": {
                        "type": "integer",
                        "description": "Search radius in meters",
                        "default": 1000,
                        "minimum": 1
                    }
                },
                "required": ["query"]
            }
        },
        {
            "name": REVERSE_GEOCODE,
            "description": "Turn a latitude/longitude pair into a readable address using OpenStreetMap.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "latitude": { "type": "number" },
                    "longitude": { "type": "number" }
                },
                "required": ["latitude", "longitude"]
            }
        }
    ])
}

/// Run a tool. Schema problems are errors for the caller's protocol layer;
/// failures while running the tool come back as an `is_error` result.
#[instrument(skip(state, arguments))]
pub async fn call_tool(
    state: &AppState,
    name: &str,
    arguments: Value,
) -> Result<ToolResult, ToolCallError> {
    match name {
        SEARCH_PLACES => {
            let args: SearchPlacesArgs =
                serde_json::from_value(arguments).map_err(|source| {
                    ToolCallError::InvalidArguments {
                        tool: SEARCH_PLACES,
                        source,
                    }
                })?;
            Ok(search_places(state, args).await)
        }
        REVERSE_GEOCODE => {
            let args: ReverseGeocodeArgs =
                serde_json::from_value(arguments).map_err(|source| {
                    ToolCallError::InvalidArguments {
                        tool: REVERSE_GEOCODE,
                        source,
                    }
                })?;
            Ok(reverse_geocode(state, args).await)
        }
        other => Err(ToolCallError::UnknownTool(other.to_string())),
    }
}

/// Shared by the tool and the plain http route
pub async fn run_search(
    state: &AppState,
    args: SearchPlacesArgs,
) -> Result<SearchResult, SearchError> {
    info!(
        "searching places: query={:?} position={:?} location_text={:?} radius={:?}",
        args.query, args.position, args.location_text, args.radius_meters
    );
    let request = SearchRequest {
        query: args.query,
        coordinate: args.position.coordinate()?,
        location_text: args.location_text,
        radius_meters: args.radius_meters.unwrap_or(state.default_radius_meters),
    };
    state.search.search(request).await
}

async fn search_places(state: &AppState, args: SearchPlacesArgs) -> ToolResult {
    let result = match run_search(state, args).await {
        Ok(result) => result,
        Err(err) => {
            error!("search_places failed: {}", err);
            return ToolResult::failure(format!("Error searching places: {err}"));
        }
    };

    let summary = summary::render(&result, state.summary_limit);
    let results = SearchResults::from(result);
    let structured = match serde_json::to_value(&results) {
        Ok(value) => value,
        Err(err) => {
            error!("could not serialize search results: {}", err);
            return ToolResult::failure(format!("Error searching places: {err}"));
        }
    };
    if results.places.is_empty() {
        return ToolResult::text(summary, Some(structured));
    }
    let pretty = serde_json::to_string_pretty(&structured).unwrap_or_default();
    ToolResult::text(
        format!("{summary}\n\n{JSON_SEPARATOR}\n{pretty}"),
        Some(structured),
    )
}

async fn reverse_geocode(state: &AppState, args: ReverseGeocodeArgs) -> ToolResult {
    let coordinate = match Coordinate::new(args.latitude, args.longitude) {
        Ok(coordinate) => coordinate,
        Err(err) => return ToolResult::failure(format!("Error: {err}")),
    };
    info!("reverse geocoding {}", coordinate);
    match state.search.reverse_geocode(coordinate).await {
        Ok(Some(address)) => ToolResult::text(address, None),
        Ok(None) => ToolResult::text(
            format!("Could not find an address for {coordinate}"),
            None,
        ),
        Err(err) => {
            error!("reverse_geocode failed: {}", err);
            ToolResult::failure(format!("Error in reverse geocoding: {err}"))
        }
    }
}
