use super::AppState;
use crate::outcome::RequestOutcome;
use crate::{Error, Result};
use axum::extract::rejection::PathRejection;
use axum::extract::{ConnectInfo, FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Request URI and peer address, captured for the outcome record.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub uri: String,
    pub client: String,
}

impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let client = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_else(|| "-".to_string());

        Ok(Self {
            uri: parts.uri.to_string(),
            client,
        })
    }
}

/// A `{*name}` path parameter whose rejection is left to the handler, so a
/// malformed name still ends in a reported outcome.
pub type NameParam = std::result::Result<Path<String>, PathRejection>;

pub fn name_param(param: NameParam) -> Result<String> {
    param
        .map(|Path(name)| name)
        .map_err(|e| Error::InvalidParam(e.body_text()))
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        if self.is_rejection() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl AppState {
    /// Report the handler's outcome and turn it into the response.
    /// Every handler ends here exactly once.
    pub fn finish(
        &self,
        meta: RequestMeta,
        name: Option<&str>,
        result: Result<Response>,
    ) -> Response {
        let (response, mut outcome) = match result {
            Ok(response) => {
                let outcome = RequestOutcome::new(meta.uri, meta.client, response.status());
                (response, outcome)
            }
            Err(e) => {
                let code = e.status_code();
                let mut outcome =
                    RequestOutcome::new(meta.uri, meta.client, code).with_error(e.to_string());
                if e.is_kubernetes() {
                    outcome = outcome.from_cluster();
                }
                (error_response(code, &e), outcome)
            }
        };

        if let Some(name) = name {
            outcome = outcome.with_name(name);
        }
        self.reporter.report(&outcome);
        response
    }
}

fn error_response(code: StatusCode, e: &Error) -> Response {
    (code, format!("{}\n", e)).into_response()
}
