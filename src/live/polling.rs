//! Polling-driven live updates
//!
//! A [`PollingManager`] periodically asks an injected [`StatsSource`] for a
//! fresh [`LiveStats`] snapshot, diffs it against the previous one, appends
//! the resulting notifications to a shared store and invokes the configured
//! callbacks. Ticks run inside a single task and each snapshot fetch is
//! awaited before the next tick fires, so ticks never overlap. A failing
//! tick is logged and skipped; it never stops the scheduler and never
//! replaces the last good snapshot.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::store::NotificationStore;
use super::{detect_changes, LiveStats, Notification};
use crate::error::{EngineError, Result};

/// Callback invoked with each fresh snapshot
pub type UpdateCallback = Arc<dyn Fn(&LiveStats) + Send + Sync>;
/// Callback invoked once per generated notification
pub type NotificationCallback = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Polling configuration; the manager stores a copy and can be reconfigured
/// live through [`PollingManager::update_config`]
#[derive(Clone)]
pub struct PollingConfig {
    pub interval: Duration,
    pub enabled: bool,
    pub on_update: Option<UpdateCallback>,
    pub on_notification: Option<NotificationCallback>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            enabled: true,
            on_update: None,
            on_notification: None,
        }
    }
}

impl fmt::Debug for PollingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingConfig")
            .field("interval", &self.interval)
            .field("enabled", &self.enabled)
            .field("on_update", &self.on_update.is_some())
            .field("on_notification", &self.on_notification.is_some())
            .finish()
    }
}

/// Source of fresh [`LiveStats`] snapshots.
///
/// Production implementations fetch real counts from the platform API. The
/// previous snapshot is passed in so sources can compute deltas cheaply.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, current: &LiveStats) -> Result<LiveStats>;
}

/// Seeded demo source producing plausible booking and document deltas.
/// Never wire this into production paths.
pub struct SimulatedStatsSource {
    rng: std::sync::Mutex<StdRng>,
    booking_chance: f64,
    document_chance: f64,
}

impl SimulatedStatsSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: std::sync::Mutex::new(StdRng::seed_from_u64(seed)),
            booking_chance: 0.4,
            document_chance: 0.2,
        }
    }
}

#[async_trait]
impl StatsSource for SimulatedStatsSource {
    async fn fetch(&self, current: &LiveStats) -> Result<LiveStats> {
        let (new_booking, new_document) = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| EngineError::snapshot_source("simulation rng poisoned"))?;
            (
                rng.gen::<f64>() < self.booking_chance,
                rng.gen::<f64>() < self.document_chance,
            )
        };

        Ok(LiveStats {
            total_appointments: current.total_appointments + u64::from(new_booking),
            total_documents: current.total_documents + u64::from(new_document),
            recent_bookings: current.recent_bookings + u64::from(new_booking),
            last_update: Utc::now(),
            ..*current
        })
    }
}

/// Cooperative scheduler for live updates.
///
/// One manager per tenant: the manager owns the last-known snapshot and
/// shares a notification store with its caller; neither is global state.
pub struct PollingManager {
    config: PollingConfig,
    source: Arc<dyn StatsSource>,
    store: Arc<RwLock<NotificationStore>>,
    current: Arc<RwLock<Option<LiveStats>>>,
    task: Option<JoinHandle<()>>,
}

impl PollingManager {
    pub fn new(
        config: PollingConfig,
        source: Arc<dyn StatsSource>,
        store: Arc<RwLock<NotificationStore>>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            current: Arc::new(RwLock::new(None)),
            task: None,
        }
    }

    /// Record the initial snapshot and, when enabled, start the tick loop.
    pub async fn start(&mut self, initial_stats: LiveStats) {
        *self.current.write().await = Some(initial_stats);

        if !self.config.enabled || self.is_running() {
            return;
        }

        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let current = Arc::clone(&self.current);
        let on_update = self.config.on_update.clone();
        let on_notification = self.config.on_notification.clone();
        let interval = self.config.interval;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first interval tick completes immediately; consume it so
            // the first real tick happens one full interval after start.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(err) = run_tick(
                    source.as_ref(),
                    &store,
                    &current,
                    on_update.as_ref(),
                    on_notification.as_ref(),
                )
                .await
                {
                    warn!(error = %err, "polling tick failed");
                }
            }
        }));

        debug!(interval_ms = interval.as_millis() as u64, "polling started");
    }

    /// Cancel the pending timer. The last-known snapshot is retained.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("polling stopped");
        }
    }

    /// Whether the tick loop is currently scheduled
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Replace the configuration. Toggling `enabled` starts or stops the
    /// timer without losing the last-known snapshot.
    pub async fn update_config(&mut self, config: PollingConfig) {
        let enable = config.enabled;
        self.config = config;

        if enable && !self.is_running() {
            let stats = self.current.read().await.clone();
            if let Some(stats) = stats {
                self.start(stats).await;
            }
        } else if !enable && self.is_running() {
            self.stop();
        }
    }

    /// Last snapshot recorded by `start` or a successful tick
    pub async fn current_stats(&self) -> Option<LiveStats> {
        self.current.read().await.clone()
    }
}

impl Drop for PollingManager {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_tick(
    source: &dyn StatsSource,
    store: &Arc<RwLock<NotificationStore>>,
    current: &Arc<RwLock<Option<LiveStats>>>,
    on_update: Option<&UpdateCallback>,
    on_notification: Option<&NotificationCallback>,
) -> Result<()> {
    let previous = match current.read().await.clone() {
        Some(stats) => stats,
        None => return Ok(()),
    };

    let new_stats = source.fetch(&previous).await?;
    let notifications = detect_changes(&previous, &new_stats, Utc::now());

    // Only a successful fetch replaces the snapshot.
    *current.write().await = Some(new_stats);

    if let Some(callback) = on_update {
        callback(&new_stats);
    }

    for notification in notifications {
        store.write().await.push(notification.clone());
        if let Some(callback) = on_notification {
            callback(&notification);
        }
    }

    Ok(())
}
