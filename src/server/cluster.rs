//! Handlers proxying the cluster API. Registered only when a client exists.

use super::request::{name_param, NameParam};
use super::{ClusterState, RequestMeta};
use crate::k8s::client::restart_timestamp;
use crate::k8s::{DeploymentSummary, PodSummary, ServiceSummary, DEFAULT_NAMESPACE};
use axum::extract::State;
use axum::response::{IntoResponse, Response};

fn lines(items: impl Iterator<Item = String>) -> Response {
    items.map(|l| l + "\n").collect::<String>().into_response()
}

pub async fn list_pods(State(state): State<ClusterState>, meta: RequestMeta) -> Response {
    let result = state
        .client
        .list_pods(DEFAULT_NAMESPACE)
        .await
        .map(|pods| lines(pods.iter().map(PodSummary::line)));
    state.app.finish(meta, None, result)
}

pub async fn list_deployments(State(state): State<ClusterState>, meta: RequestMeta) -> Response {
    let result = state
        .client
        .list_deployments(DEFAULT_NAMESPACE)
        .await
        .map(|deployments| lines(deployments.iter().map(DeploymentSummary::line)));
    state.app.finish(meta, None, result)
}

pub async fn list_services(State(state): State<ClusterState>, meta: RequestMeta) -> Response {
    let result = state
        .client
        .list_services(DEFAULT_NAMESPACE)
        .await
        .map(|services| lines(services.iter().map(ServiceSummary::line)));
    state.app.finish(meta, None, result)
}

pub async fn restart_deployment(
    State(state): State<ClusterState>,
    meta: RequestMeta,
    name: NameParam,
) -> Response {
    let name = match name_param(name) {
        Ok(name) => name,
        Err(e) => return state.app.finish(meta, None, Err(e)),
    };

    // kubectl rollout restart deployment <name>
    let restarted_at = restart_timestamp();
    let result = state
        .client
        .restart_deployment(DEFAULT_NAMESPACE, &name, &restarted_at)
        .await
        .map(|restarted| format!("restart {}\n", restarted).into_response());
    state.app.finish(meta, Some(&name), result)
}
