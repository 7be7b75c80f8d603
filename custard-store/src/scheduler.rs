//! Periodic flavor updates.
//!
//! One [`UpdateCoordinator`] polls one configured location. Coordinators
//! share a [`FlavorStore`] but nothing else, so a slow vendor never delays
//! another location's cycle.

use std::sync::Arc;
use std::time::Duration;

use custard_core::{FlavorProvider, LocationKey, ProviderError};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::flavor_store::{FlavorStore, UpdateState};

/// Shortest interval a coordinator ticks at.
const MIN_TICK: Duration = Duration::from_secs(1);

/// Host state for a failed cycle.
///
/// Rejected credentials need the user; everything else is retried on the
/// next cycle.
pub fn failure_state(error: &ProviderError) -> UpdateState {
    let reason = error.kind().reason().to_string();
    if error.is_authentication() {
        UpdateState::NeedsReauth { reason }
    } else {
        UpdateState::Failed { reason }
    }
}

/// Polls one location on an interval.
pub struct UpdateCoordinator {
    key: LocationKey,
    provider: Arc<dyn FlavorProvider>,
    interval: Duration,
    store: Arc<FlavorStore>,
    wake: Notify,
}

impl UpdateCoordinator {
    /// Creates a coordinator for `store_id` at `provider`.
    pub fn new(
        provider: Arc<dyn FlavorProvider>,
        store_id: impl Into<String>,
        interval: Duration,
        store: Arc<FlavorStore>,
    ) -> Self {
        Self {
            key: LocationKey::new(provider.kind(), store_id),
            provider,
            interval,
            store,
            wake: Notify::new(),
        }
    }

    /// The polled location.
    pub fn key(&self) -> &LocationKey {
        &self.key
    }

    /// Time between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one update cycle and records its outcome.
    ///
    /// A cycle already running for this location is
    /// [`StoreError::RefreshInProgress`].
    #[instrument(skip(self), fields(location = %self.key))]
    pub async fn refresh(&self) -> Result<UpdateState, StoreError> {
        self.store.start_refresh(&self.key).await?;

        let state = match self.provider.get_current_flavor(&self.key.store_id).await {
            Ok(flavor) => {
                info!(flavor = %flavor.name, "Flavor updated");
                self.store.record_success(&self.key, flavor).await;
                UpdateState::Ok
            }
            Err(error) => {
                let state = failure_state(&error);
                warn!(
                    state = state.label(),
                    reason = state.reason().unwrap_or_default(),
                    error = ?error,
                    "Flavor update failed"
                );
                self.store.record_failure(&self.key, state.clone()).await;
                state
            }
        };

        self.store.end_refresh(&self.key).await;
        Ok(state)
    }

    /// Asks a running coordinator to update now.
    pub fn request_refresh(&self) {
        self.wake.notify_one();
    }

    /// Updates immediately, then every interval and on
    /// [`request_refresh`](Self::request_refresh), until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        self.store.register(&self.key).await;

        let mut ticker = tokio::time::interval(self.interval.max(MIN_TICK));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(location = %self.key, interval = ?self.interval, "Coordinator started");

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {}
                () = self.wake.notified() => ticker.reset(),
            }

            if let Err(error) = self.refresh().await {
                debug!(location = %self.key, error = %error, "Skipping cycle");
            }
        }

        debug!(location = %self.key, "Coordinator stopped");
    }
}
