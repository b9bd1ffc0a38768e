mod api;
mod middleware;
mod scheduler;
mod store;

use std::sync::Arc;

use infldb_ingest::{ProfileLoader, SourceClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::store::ProfileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(infldb_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sources = infldb_core::load_sources_or_default(&config.sources_path)?;
    tracing::info!(
        env = %config.env,
        sources = sources.sources.len(),
        path = %config.sources_path.display(),
        "starting profile server"
    );

    let client = SourceClient::from_config(&config)?;
    let loader = Arc::new(ProfileLoader::new(client.clone(), sources.sources));
    let store = Arc::new(ProfileStore::new());

    // Serve immediately; health reports "loading" until the first load lands.
    {
        let store = Arc::clone(&store);
        let loader = Arc::clone(&loader);
        tokio::spawn(async move {
            let _ = store.reload(&loader).await;
        });
    }

    let _scheduler =
        scheduler::build_scheduler(Arc::clone(&store), loader, &config.reload_cron).await?;

    let app = build_app(AppState {
        store,
        client,
        performance_dir: Arc::from(config.performance_dir.as_str()),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
