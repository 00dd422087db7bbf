//! Conflict Dashboard Data Service — Binary Entrypoint
//! Boots the Axum HTTP server, the fixture data source, and the refresh
//! scheduler that keeps the in-memory snapshots current.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use conflict_dashboard::api::{self, AppState};
use conflict_dashboard::config::DashboardConfig;
use conflict_dashboard::feed::providers::fixture::FixtureSource;
use conflict_dashboard::feed::scheduler::RefreshScheduler;
use conflict_dashboard::feed::types::DataSource;
use conflict_dashboard::store::DashboardStore;
use conflict_dashboard::{feed, metrics};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("conflict_dashboard=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = DashboardConfig::load_default()?;
    tracing::info!(
        data_dir = %cfg.data_dir.display(),
        refresh_secs = cfg.refresh_secs,
        auto_refresh = cfg.auto_refresh,
        "starting dashboard service"
    );

    let prometheus = metrics::install(cfg.refresh_secs);

    let store = Arc::new(DashboardStore::new());
    let source: Arc<dyn DataSource> = Arc::new(FixtureSource::new(cfg.data_dir.clone()));

    // First snapshot before the server starts accepting traffic.
    feed::refresh_once(source.as_ref(), &store).await;

    let mut scheduler = RefreshScheduler::new();
    scheduler.set_enabled(cfg.auto_refresh);
    {
        let store = Arc::clone(&store);
        let source = Arc::clone(&source);
        scheduler.set_callback(move || {
            let store = Arc::clone(&store);
            let source = Arc::clone(&source);
            async move {
                feed::refresh_once(source.as_ref(), &store).await;
                Ok(())
            }
        });
    }
    scheduler.configure(cfg.refresh_period())?;

    let state = AppState {
        store,
        source,
        scheduler: scheduler.handle(),
        data_dir: cfg.data_dir.clone(),
    };
    let router = api::router(state).merge(metrics::router(prometheus));

    let listener = tokio::net::TcpListener::bind(&cfg.bind).await?;
    tracing::info!(addr = %cfg.bind, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
