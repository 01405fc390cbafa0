use thiserror::Error;

/// Failures that abort a search. Malformed upstream responses and unusable
/// elements never surface here; they degrade to fewer results instead.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("a location is required: provide latitude/longitude or location_text")]
    MissingLocation,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("could not resolve location: {location}")]
    GeocodeFailed { location: String },
    #[error("geodata service unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl SearchError {
    /// Input errors are raised before any network call is made
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingLocation | Self::InvalidInput(_))
    }
}

/// Transport or decoding failure talking to the geocoding service
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("geocoding service returned an invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
