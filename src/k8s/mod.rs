pub mod client;
pub mod types;

pub use client::{ClusterClient, KubeCluster, DEFAULT_NAMESPACE};
pub use types::{DeploymentSummary, PodSummary, ServiceSummary};
