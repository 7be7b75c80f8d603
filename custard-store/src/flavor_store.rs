//! Flavor state store.
//!
//! Holds the last good flavor and update state of every polled location,
//! with change notifications for renderers.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use custard_core::{FlavorInfo, LocationKey};
use serde::Serialize;
use tokio::sync::{RwLock, watch};
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Update State
// ============================================================================

/// Outcome of the latest update cycle of one location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum UpdateState {
    /// No cycle has finished yet.
    #[default]
    Pending,
    /// The latest cycle read a flavor.
    Ok,
    /// The latest cycle failed; the next one will retry.
    Failed {
        /// Short, user-facing reason.
        reason: String,
    },
    /// The vendor rejected credentials; retrying will not help.
    NeedsReauth {
        /// Short, user-facing reason.
        reason: String,
    },
}

impl UpdateState {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ok => "ok",
            Self::Failed { .. } => "failed",
            Self::NeedsReauth { .. } => "needs reauthorization",
        }
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } | Self::NeedsReauth { reason } => Some(reason),
            Self::Pending | Self::Ok => None,
        }
    }

    /// Returns true if the latest cycle succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Everything known about one location.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatus {
    /// Last good flavor. Survives later failures.
    pub flavor: Option<FlavorInfo>,
    /// When `flavor` was read.
    pub updated_at: Option<DateTime<Utc>>,
    /// When the latest cycle finished.
    pub last_attempt: Option<DateTime<Utc>>,
    /// Outcome of the latest cycle.
    pub state: UpdateState,
}

// ============================================================================
// Flavor Store
// ============================================================================

#[derive(Default)]
struct FlavorStoreInner {
    statuses: HashMap<LocationKey, LocationStatus>,
    refreshing: HashSet<LocationKey>,
}

/// State store for polled locations.
///
/// Observable via a watch channel carrying a version counter.
pub struct FlavorStore {
    inner: Arc<RwLock<FlavorStoreInner>>,
    notify: watch::Sender<u64>,
}

impl Default for FlavorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlavorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(FlavorStoreInner::default())),
            notify,
        }
    }

    // ========================================================================
    // Locations
    // ========================================================================

    /// Starts tracking `key` as pending. Existing state is kept.
    pub async fn register(&self, key: &LocationKey) {
        let inserted = {
            let mut inner = self.inner.write().await;
            if inner.statuses.contains_key(key) {
                false
            } else {
                inner.statuses.insert(key.clone(), LocationStatus::default());
                true
            }
        };
        if inserted {
            self.notify_change();
            debug!(location = %key, "Location registered");
        }
    }

    /// Stops tracking `key`.
    pub async fn remove(&self, key: &LocationKey) -> Option<LocationStatus> {
        let removed = {
            let mut inner = self.inner.write().await;
            inner.refreshing.remove(key);
            inner.statuses.remove(key)
        };
        if removed.is_some() {
            self.notify_change();
        }
        removed
    }

    /// Status of one location.
    pub async fn status(&self, key: &LocationKey) -> Option<LocationStatus> {
        self.inner.read().await.statuses.get(key).cloned()
    }

    /// Last good flavor of one location.
    pub async fn flavor(&self, key: &LocationKey) -> Option<FlavorInfo> {
        self.inner
            .read()
            .await
            .statuses
            .get(key)
            .and_then(|s| s.flavor.clone())
    }

    /// Status of every location, ordered by key.
    pub async fn all(&self) -> BTreeMap<LocationKey, LocationStatus> {
        self.inner
            .read()
            .await
            .statuses
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // ========================================================================
    // Outcomes
    // ========================================================================

    /// Replaces the last good flavor and marks the location ok.
    pub async fn record_success(&self, key: &LocationKey, flavor: FlavorInfo) {
        let now = Utc::now();
        {
            let mut inner = self.inner.write().await;
            let status = inner.statuses.entry(key.clone()).or_default();
            status.flavor = Some(flavor);
            status.updated_at = Some(now);
            status.last_attempt = Some(now);
            status.state = UpdateState::Ok;
        }
        self.notify_change();
        debug!(location = %key, "Flavor recorded");
    }

    /// Records a failed cycle, keeping the last good flavor.
    pub async fn record_failure(&self, key: &LocationKey, state: UpdateState) {
        {
            let mut inner = self.inner.write().await;
            let status = inner.statuses.entry(key.clone()).or_default();
            status.last_attempt = Some(Utc::now());
            status.state = state;
        }
        self.notify_change();
        debug!(location = %key, "Update failure recorded");
    }

    // ========================================================================
    // Refresh Management
    // ========================================================================

    /// Marks a location as refreshing.
    pub async fn start_refresh(&self, key: &LocationKey) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.refreshing.insert(key.clone()) {
            return Err(StoreError::RefreshInProgress(key.unique_id()));
        }
        Ok(())
    }

    /// Marks a location as done refreshing.
    pub async fn end_refresh(&self, key: &LocationKey) {
        self.inner.write().await.refreshing.remove(key);
    }

    /// Checks if a location is currently refreshing.
    pub async fn is_refreshing(&self, key: &LocationKey) -> bool {
        self.inner.read().await.refreshing.contains(key)
    }

    // ========================================================================
    // Observable
    // ========================================================================

    /// Subscribes to store changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    fn notify_change(&self) {
        self.notify.send_modify(|version| *version += 1);
    }

    // ========================================================================
    // Staleness
    // ========================================================================

    /// Checks if a location's last good flavor is older than `threshold`.
    ///
    /// A location without a flavor is stale.
    pub async fn is_stale(&self, key: &LocationKey, threshold: Duration) -> bool {
        match self.age(key).await {
            Some(age) => {
                age > chrono::Duration::from_std(threshold).unwrap_or(chrono::Duration::MAX)
            }
            None => true,
        }
    }

    /// Age of a location's last good flavor.
    pub async fn age(&self, key: &LocationKey) -> Option<chrono::Duration> {
        self.inner
            .read()
            .await
            .statuses
            .get(key)
            .and_then(|s| s.updated_at)
            .map(|t| Utc::now().signed_duration_since(t))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use custard_core::ProviderKind;

    fn key() -> LocationKey {
        LocationKey::new(ProviderKind::Kopps, "kopps-glendale")
    }

    fn flavor(name: &str) -> FlavorInfo {
        FlavorInfo::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_register_is_pending() {
        let store = FlavorStore::new();
        assert!(store.status(&key()).await.is_none());

        store.register(&key()).await;
        let status = store.status(&key()).await.unwrap();
        assert_eq!(status.state, UpdateState::Pending);
        assert!(status.flavor.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_flavor() {
        let store = FlavorStore::new();
        store.record_success(&key(), flavor("Butter Pecan")).await;
        store
            .record_failure(
                &key(),
                UpdateState::Failed {
                    reason: "provider unreachable".into(),
                },
            )
            .await;

        let status = store.status(&key()).await.unwrap();
        assert_eq!(status.flavor.unwrap().name, "Butter Pecan");
        assert_eq!(status.state.reason(), Some("provider unreachable"));
        assert!(status.last_attempt >= status.updated_at);
    }

    #[tokio::test]
    async fn test_refresh_tracking() {
        let store = FlavorStore::new();
        assert!(!store.is_refreshing(&key()).await);

        store.start_refresh(&key()).await.unwrap();
        assert!(store.is_refreshing(&key()).await);

        // Second refresh should fail
        assert!(matches!(
            store.start_refresh(&key()).await,
            Err(StoreError::RefreshInProgress(_))
        ));

        store.end_refresh(&key()).await;
        assert!(!store.is_refreshing(&key()).await);
    }

    #[tokio::test]
    async fn test_changes_are_published() {
        let store = FlavorStore::new();
        let mut rx = store.subscribe();

        store.register(&key()).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        // Registering again is not a change.
        store.register(&key()).await;
        assert!(!rx.has_changed().unwrap());

        store.record_success(&key(), flavor("Turtle")).await;
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test]
    async fn test_staleness() {
        let store = FlavorStore::new();

        // No flavor = stale
        assert!(store.is_stale(&key(), Duration::from_secs(60)).await);

        store.record_success(&key(), flavor("Turtle")).await;
        assert!(!store.is_stale(&key(), Duration::from_secs(60)).await);
        assert!(store.age(&key()).await.is_some());
    }

    #[tokio::test]
    async fn test_all_is_ordered() {
        let store = FlavorStore::new();
        let oscars = LocationKey::new(ProviderKind::Oscars, "oscars-franklin");
        store.register(&oscars).await;
        store.register(&key()).await;

        let keys: Vec<_> = store.all().await.into_keys().collect();
        assert_eq!(keys, vec![key(), oscars.clone()]);

        assert!(store.remove(&oscars).await.is_some());
        assert_eq!(store.all().await.len(), 1);
    }
}
