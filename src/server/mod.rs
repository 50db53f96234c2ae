//! HTTP surface: shared state, handlers and route composition.

pub mod cluster;
pub mod handlers;
pub mod request;
pub mod routes;

pub use request::RequestMeta;
pub use routes::build_routes;

use crate::config::ServerConfig;
use crate::diag::Diagnostics;
use crate::filestore::FileStore;
use crate::k8s::ClusterClient;
use crate::outcome::{OutcomeReporter, TracingReporter};
use crate::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Read-only context handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub diagnostics: Diagnostics,
    pub store: FileStore,
    pub reporter: Arc<dyn OutcomeReporter>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            diagnostics: Diagnostics::new(config.clone()),
            store: FileStore::new(config.data_dir.clone()),
            reporter: Arc::new(TracingReporter),
            config,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn OutcomeReporter>) -> Self {
        self.reporter = reporter;
        self
    }
}

/// State for the cluster routes. Only exists when a client was constructed.
#[derive(Clone)]
pub struct ClusterState {
    pub app: AppState,
    pub client: Arc<dyn ClusterClient>,
}

/// Bind `addr` and serve `router` until SIGINT or SIGTERM.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C)"),
        _ = terminate => info!("received SIGTERM"),
    }
}
