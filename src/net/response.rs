use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::SearchError;

pub struct ResponseError(Response);

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        self.0
    }
}

impl<E> From<E> for ResponseError
where
    E: Into<color_eyre::eyre::Error>,
{
    fn from(value: E) -> Self {
        let report = Into::<color_eyre::eyre::Error>::into(value);
        let status = report
            .downcast_ref::<SearchError>()
            .map_or(StatusCode::INTERNAL_SERVER_ERROR, status_for);
        Self((status, report.to_string()).into_response())
    }
}

fn status_for(err: &SearchError) -> StatusCode {
    match err {
        SearchError::MissingLocation | SearchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        SearchError::GeocodeFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SearchError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
    }
}

impl ResponseError {
    pub fn with_status<T>(status_code: StatusCode, data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((status_code, data).into_response())
    }

    pub fn not_found<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::NOT_FOUND, data).into_response())
    }
}

pub type Result<T, E = ResponseError> = axum::response::Result<T, E>;
