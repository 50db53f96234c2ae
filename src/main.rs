use anyhow::Context;
use clap::Parser;
use kdebug::cli::Cli;
use kdebug::config::ServerConfig;
use kdebug::k8s::{ClusterClient, KubeCluster};
use kdebug::server::{self, AppState};
use kdebug::{runtime, VERSION};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    if cli.show_version {
        println!("version {}", VERSION);
        return;
    }

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let workers = runtime::worker_threads();
    let config = Arc::new(ServerConfig::from_cli(&cli, workers));

    let result = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")
        .and_then(|rt| rt.block_on(run(config)));

    if let Err(e) = result {
        error!(error = %format!("{:#}", e), "listen and serve error");
        process::exit(1);
    }
}

async fn run(config: Arc<ServerConfig>) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;

    let cluster: Option<Arc<dyn ClusterClient>> = match KubeCluster::in_cluster().await {
        Ok(client) => {
            info!(addr = %config.addr, version = VERSION, "starting with k8s");
            Some(Arc::new(client) as Arc<dyn ClusterClient>)
        }
        Err(e) => {
            info!(addr = %config.addr, version = VERSION, error = %e, "starting without k8s");
            None
        }
    };

    let router = server::build_routes(AppState::new(config), cluster);
    server::serve(addr, router).await?;
    Ok(())
}
