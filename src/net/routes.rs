use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::instrument;

use super::{
    response::{ResponseError, Result},
    rpc::handle_message,
};
use crate::{
    clients::AppState,
    error::SearchError,
    tools::{run_search, SearchPlacesArgs},
    types::{
        dto::{geom::PartialLatLng, place::SearchResults},
        feature::feature_collection,
    },
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/search.geojson", get(search_geojson))
        .route("/reverse", get(reverse))
        .route("/mcp", post(mcp))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    query: String,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    longitude: Option<f64>,
    #[serde(default)]
    location_text: Option<String>,
    #[serde(default)]
    radius_meters: Option<u32>,
}

impl From<SearchParams> for SearchPlacesArgs {
    fn from(value: SearchParams) -> Self {
        Self {
            query: value.query,
            position: PartialLatLng {
                latitude: value.latitude,
                longitude: value.longitude,
            },
            location_text: value.location_text,
            radius_meters: value.radius_meters,
        }
    }
}

#[instrument(skip(state))]
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>> {
    let result = run_search(&state, params.into()).await?;
    Ok(Json(result.into()))
}

#[instrument(skip(state))]
async fn search_geojson(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FeatureCollection>> {
    let result = run_search(&state, params.into()).await?;
    Ok(Json(feature_collection(&result)?))
}

#[instrument(skip(state))]
async fn reverse(
    State(state): State<AppState>,
    Query(position): Query<PartialLatLng>,
) -> Result<String> {
    let coordinate = position
        .coordinate()?
        .ok_or(SearchError::InvalidInput(
            "latitude and longitude are both required".to_string(),
        ))?;
    state
        .search
        .reverse_geocode(coordinate)
        .await
        .map_err(|err| ResponseError::with_status(StatusCode::BAD_GATEWAY, err.to_string()))?
        .ok_or(ResponseError::not_found(format!(
            "No address found for {coordinate}"
        )))
}

/// JSON-RPC over http. Notifications get `202 Accepted` and no body.
async fn mcp(State(state): State<AppState>, body: Bytes) -> Response {
    match handle_message(&state, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
