use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{error, info};

/// Coordinates graceful shutdown between the signal listener and the serve
/// loop.
///
/// [`shutdown`](Self::shutdown) broadcasts the stop request; the serve loop
/// calls [`notify_shutdown_complete`](Self::notify_shutdown_complete) once it
/// has stopped accepting connections, and
/// [`wait_for_shutdown`](Self::wait_for_shutdown) blocks until then, bounded
/// by the grace period.
#[derive(Clone)]
pub struct ShutdownCoordinator {
	shutdown_tx: broadcast::Sender<()>,
	complete_tx: watch::Sender<bool>,
	complete_rx: watch::Receiver<bool>,
	grace_period: Duration,
}

impl ShutdownCoordinator {
	pub fn new(grace_period: Duration) -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		let (complete_tx, complete_rx) = watch::channel(false);
		Self {
			shutdown_tx,
			complete_tx,
			complete_rx,
			grace_period,
		}
	}

	/// Subscribe to the shutdown broadcast.
	pub fn subscribe(&self) -> broadcast::Receiver<()> {
		self.shutdown_tx.subscribe()
	}

	/// Request shutdown. Safe to call more than once.
	pub fn shutdown(&self) {
		// Send fails only when nothing is subscribed, in which case there is
		// no serve loop to stop.
		let _ = self.shutdown_tx.send(());
	}

	/// Mark the serve loop as stopped.
	pub fn notify_shutdown_complete(&self) {
		let _ = self.complete_tx.send(true);
	}

	/// Wait until the serve loop reports completion or the grace period
	/// elapses.
	pub async fn wait_for_shutdown(&self) {
		let mut complete = self.complete_rx.clone();
		let drained = tokio::time::timeout(self.grace_period, async {
			while !*complete.borrow() {
				if complete.changed().await.is_err() {
					break;
				}
			}
		})
		.await;

		if drained.is_err() {
			info!(
				grace_period_secs = self.grace_period.as_secs(),
				"grace period elapsed before connections drained"
			);
		}
	}
}

/// Resolve when the process receives SIGINT or, on unix, SIGTERM.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(err) = tokio::signal::ctrl_c().await {
			error!(error = %err, "failed to install Ctrl+C handler");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(err) => {
				error!(error = %err, "failed to install SIGTERM handler");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {}
		_ = terminate => {}
	}
}
