use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine::{AppState, Settings, build_app};
use vitrine_server::{ShutdownCoordinator, shutdown_signal};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let settings = Settings::from_env().context("reading configuration from the environment")?;
	let addr = settings.bind_addr;
	let state = Arc::new(AppState::from_settings(settings));

	info!(graphql = %state.settings.graphql_url, %addr, "starting vitrine");
	let server = build_app(state);

	let coordinator = ShutdownCoordinator::new(SHUTDOWN_GRACE);
	tokio::select! {
		result = server.listen_with_shutdown(addr, coordinator.clone()) => {
			// listen errors are not Send + Sync, so they cannot cross `?`
			result.map_err(|e| anyhow::anyhow!(e.to_string()))?;
		}
		_ = shutdown_signal() => {
			coordinator.shutdown();
			coordinator.wait_for_shutdown().await;
		}
	}

	Ok(())
}
