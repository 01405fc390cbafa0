use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use crate::{
    config::Config, nominatim::NominatimClient, overpass::OverpassClient, search::PlaceSearch,
};

/// Shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<PlaceSearch>,
    pub default_radius_meters: u32,
    pub summary_limit: usize,
}

impl AppState {
    pub fn new(search: PlaceSearch, config: &Config) -> Self {
        Self {
            search: Arc::new(search),
            default_radius_meters: config.default_radius_meters,
            summary_limit: config.summary_limit,
        }
    }
}

/// One reqwest client for both upstreams; it carries the user agent both
/// services require of their callers.
pub fn build_reqwest_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()
        .wrap_err("Failed to build reqwest client")
}

pub fn build_place_search(config: &Config) -> Result<PlaceSearch> {
    let http = build_reqwest_client(config)?;
    info!("Using overpass at {}", config.overpass_url);
    info!("Using nominatim at {}", config.nominatim_url);
    let geocoder = NominatimClient::new(
        http.clone(),
        &config.nominatim_url,
        config.nominatim_timeout,
        config.nominatim_min_interval,
    );
    let geodata = OverpassClient::new(http, &config.overpass_url);
    Ok(
        PlaceSearch::new(Arc::new(geocoder), Arc::new(geodata), config.overpass_timeout)
            .with_max_radius(config.max_radius_meters),
    )
}
