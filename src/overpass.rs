use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::SearchError,
    filter::SearchFilter,
    types::{
        overpass::{OverpassElement, OverpassResponse},
        place::Coordinate,
    },
};

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Runs a filter against a geodata backend and hands back raw elements
#[async_trait]
pub trait GeodataService: Send + Sync {
    /// Transport failures and timeouts are `UpstreamUnavailable`. A response
    /// without the expected structure is zero elements, not an error.
    async fn execute(
        &self,
        filter: &SearchFilter,
        center: Coordinate,
        radius_meters: u32,
        timeout: Duration,
    ) -> Result<Vec<OverpassElement>, SearchError>;
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    url: String,
}

impl OverpassClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl GeodataService for OverpassClient {
    #[instrument(skip(self, filter))]
    async fn execute(
        &self,
        filter: &SearchFilter,
        center: Coordinate,
        radius_meters: u32,
        timeout: Duration,
    ) -> Result<Vec<OverpassElement>, SearchError> {
        let query = filter.to_overpass_ql(center, radius_meters, timeout);
        info!("running overpass query with {} clauses", filter.clauses().len());
        debug!("{}", query);

        let response = self
            .http
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .timeout(timeout)
            .send()
            .await
            .map_err(upstream_error)?
            .error_for_status()
            .map_err(upstream_error)?;
        let body = response.bytes().await.map_err(upstream_error)?;
        Ok(parse_elements(&body))
    }
}

fn upstream_error(err: reqwest::Error) -> SearchError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    warn!("overpass request failed: {}", reason);
    SearchError::UpstreamUnavailable(reason)
}

/// Decode an Overpass json body. Anything that is not an object with an
/// `elements` array counts as no results; elements that do not decode are
/// skipped.
pub fn parse_elements(body: &[u8]) -> Vec<OverpassElement> {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            warn!("overpass response is not json, treating as empty: {}", err);
            return vec![];
        }
    };
    let remark = value
        .get("remark")
        .and_then(|remark| remark.as_str())
        .map(str::to_string);
    let response: OverpassResponse = match serde_json::from_value(value) {
        Ok(response) => response,
        Err(err) => {
            warn!(
                ?remark,
                "overpass response has no elements, treating as empty: {}", err
            );
            return vec![];
        }
    };
    if let Some(remark) = &response.remark {
        warn!("overpass remark: {}", remark);
    }
    response
        .elements
        .into_iter()
        .filter_map(|element| serde_json::from_value(element).ok())
        .collect()
}
