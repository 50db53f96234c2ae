use super::types::{DeploymentSummary, PodSummary, ServiceSummary};
use crate::{Error, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};
use kube::api::{ListParams, Patch, PatchParams};
use kube::{Api, Client, Config};
use serde_json::json;
use tracing::{debug, info};

/// Namespace every cluster operation runs against.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Pod-template annotation bumped to force a rolling restart.
pub const RESTARTED_AT_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// Timestamp layout written into [`RESTARTED_AT_ANNOTATION`].
pub const RESTART_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// The list/patch calls the HTTP proxy issues against the cluster.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSummary>>;

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<DeploymentSummary>>;

    async fn list_services(&self, namespace: &str) -> Result<Vec<ServiceSummary>>;

    /// Patch the deployment's pod template so its pods get replaced.
    /// Returns the deployment name reported back by the API.
    async fn restart_deployment(
        &self,
        namespace: &str,
        name: &str,
        restarted_at: &str,
    ) -> Result<String>;
}

/// Merge patch that sets the restart annotation on the pod template.
pub fn restart_patch(restarted_at: &str) -> serde_json::Value {
    json!({
        "spec": {
            "template": {
                "metadata": {
                    "annotations": {
                        RESTARTED_AT_ANNOTATION: restarted_at
                    }
                }
            }
        }
    })
}

/// Current local time in the restart annotation layout.
pub fn restart_timestamp() -> String {
    chrono::Local::now().format(RESTART_TIMESTAMP_FORMAT).to_string()
}

pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Connect with the service-account credentials mounted into the pod.
    pub async fn in_cluster() -> Result<Self> {
        debug!("Initializing in-cluster Kubernetes client");

        let config = Config::incluster()
            .map_err(|e| Error::Kubernetes(format!("in-cluster config unavailable: {}", e)))?;
        let client = Client::try_from(config)?;

        info!("Kubernetes client configured from in-cluster credentials");

        Ok(Self { client })
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn services(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterClient for KubeCluster {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSummary>> {
        let list = self.pods(namespace).list(&ListParams::default()).await?;
        Ok(list.items.iter().map(PodSummary::from_k8s_pod).collect())
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<DeploymentSummary>> {
        let list = self
            .deployments(namespace)
            .list(&ListParams::default())
            .await?;
        Ok(list
            .items
            .iter()
            .map(DeploymentSummary::from_k8s_deployment)
            .collect())
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<ServiceSummary>> {
        let list = self.services(namespace).list(&ListParams::default()).await?;
        Ok(list.items.iter().map(ServiceSummary::from_k8s_service).collect())
    }

    async fn restart_deployment(
        &self,
        namespace: &str,
        name: &str,
        restarted_at: &str,
    ) -> Result<String> {
        let patch = restart_patch(restarted_at);
        let deployment = self
            .deployments(namespace)
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;

        Ok(deployment
            .metadata
            .name
            .unwrap_or_else(|| name.to_string()))
    }
}
