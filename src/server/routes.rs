//! Route composition.
//!
//! The base routes are always present. The cluster routes are merged in once,
//! at startup, when a cluster client could be built; handlers never check for
//! the client themselves.

use super::{cluster, handlers, AppState, ClusterState};
use crate::k8s::ClusterClient;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn base_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/env", get(handlers::env))
        .route("/config", get(handlers::config))
        .route("/file", get(handlers::list_files))
        // `*name` spans several segments so nested keys stay addressable
        .route(
            "/file/{*name}",
            get(handlers::read_file).put(handlers::write_file),
        )
}

pub fn cluster_routes() -> Router<ClusterState> {
    Router::new()
        .route("/pod", get(cluster::list_pods))
        .route("/deployment", get(cluster::list_deployments))
        .route(
            "/deployment/restart/{*name}",
            get(cluster::restart_deployment),
        )
        .route("/service", get(cluster::list_services))
}

/// Compose the final router. Cluster routes exist only when `cluster` is set.
pub fn build_routes(state: AppState, cluster: Option<Arc<dyn ClusterClient>>) -> Router {
    let router = base_routes().with_state(state.clone());

    match cluster {
        Some(client) => {
            router.merge(cluster_routes().with_state(ClusterState { app: state, client }))
        }
        None => router,
    }
}
