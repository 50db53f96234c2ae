//! Diagnostic and file-store handlers.

use super::request::{name_param, NameParam};
use super::{AppState, RequestMeta};
use axum::body::Body;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

fn stream_file(file: File) -> Response {
    Body::from_stream(ReaderStream::new(file)).into_response()
}

pub async fn health(State(state): State<AppState>, meta: RequestMeta) -> Response {
    let body = state.diagnostics.health();
    state.finish(meta, None, Ok(body.into_response()))
}

pub async fn status(State(state): State<AppState>, meta: RequestMeta) -> Response {
    let report = state.diagnostics.status_report();
    state.finish(meta, None, Ok(report.into_response()))
}

pub async fn env(State(state): State<AppState>, meta: RequestMeta) -> Response {
    let report = state.diagnostics.env_report();
    state.finish(meta, None, Ok(report.into_response()))
}

pub async fn config(State(state): State<AppState>, meta: RequestMeta) -> Response {
    let result = state.diagnostics.open_config().await.map(stream_file);
    state.finish(meta, None, result)
}

pub async fn list_files(State(state): State<AppState>, meta: RequestMeta) -> Response {
    let result = state.store.list().await.map(|names| {
        names
            .into_iter()
            .map(|name| name + "\n")
            .collect::<String>()
            .into_response()
    });
    state.finish(meta, None, result)
}

pub async fn read_file(
    State(state): State<AppState>,
    meta: RequestMeta,
    name: NameParam,
) -> Response {
    let result = match name_param(name) {
        Ok(name) => state.store.open(&name).await.map(stream_file),
        Err(e) => Err(e),
    };
    state.finish(meta, None, result)
}

pub async fn write_file(
    State(state): State<AppState>,
    meta: RequestMeta,
    name: NameParam,
    body: Body,
) -> Response {
    let result = match name_param(name) {
        Ok(name) => state
            .store
            .write(&name, body.into_data_stream())
            .await
            .map(|_| ().into_response()),
        Err(e) => Err(e),
    };
    state.finish(meta, None, result)
}
