// Framework bootstrap for the probe runtime.

use crate::frameworks::config::{self, LogFormat, ProbeConfig};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, StdoutLogSink, SystemClock};
use crate::interface_adapters::store::ClusterConnector;

use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Diagnostics only; probe lines are written by `StdoutLogSink`.
fn init_diagnostics(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Compact => builder.compact().init(),
    }

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "probe process panicked");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, probe_config: ProbeConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let connector = ClusterConnector::new(probe_config.cluster_url());
    tracing::info!(
        %address,
        cluster_url = %probe_config.cluster_url(),
        retries = connector.retries(),
        "probe endpoint ready"
    );

    let app = routes::app(AppState {
        connector: Arc::new(connector),
        sink: Arc::new(StdoutLogSink),
        clock: Arc::new(SystemClock),
    });

    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "probe endpoint stopped");
    })
}

pub async fn run_with_config() -> Result<()> {
    // A local .env is optional.
    let _ = dotenvy::dotenv();
    init_diagnostics(config::log_format());

    // Endpoint settings are read once, before the first invocation.
    let probe_config = ProbeConfig::from_env();
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, probe_config).await
}
