use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub pod_ip: Option<String>,
}

impl PodSummary {
    pub fn from_k8s_pod(pod: &Pod) -> Self {
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            pod_ip: pod.status.as_ref().and_then(|s| s.pod_ip.clone()),
        }
    }

    pub fn line(&self) -> String {
        format!("pod: {} {}", self.pod_ip.as_deref().unwrap_or_default(), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    pub name: String,
}

impl DeploymentSummary {
    pub fn from_k8s_deployment(deployment: &Deployment) -> Self {
        Self {
            name: deployment.metadata.name.clone().unwrap_or_default(),
        }
    }

    pub fn line(&self) -> String {
        format!("deployment: {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    pub cluster_ip: Option<String>,
}

impl ServiceSummary {
    pub fn from_k8s_service(service: &Service) -> Self {
        Self {
            name: service.metadata.name.clone().unwrap_or_default(),
            cluster_ip: service.spec.as_ref().and_then(|s| s.cluster_ip.clone()),
        }
    }

    pub fn line(&self) -> String {
        format!(
            "service: {} {}",
            self.cluster_ip.as_deref().unwrap_or_default(),
            self.name
        )
    }
}
