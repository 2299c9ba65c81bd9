//! Refresh scheduling for the mounted dashboard.
//!
//! `DashboardRuntime` is the lifetime of one mounted dashboard: it owns the
//! shared view model, the periodic refresh task and the scrubbing reset timer.
//! All background work is cancelled when the runtime is unmounted or dropped.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::dashboard::Dashboard;
use crate::models::DashboardConfig;

/// View model shared between the refresh task and request handlers
pub type SharedDashboard = Arc<Mutex<Dashboard>>;

/// Handle to the running refresh task.
///
/// Dropping the handle aborts the task.
pub struct RefreshHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }

    /// Stop the loop and wait for it to exit. No tick runs after this returns.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Periodically refreshes a shared dashboard
pub struct RefreshScheduler {
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Spawn the refresh loop. The first tick fires one interval from now.
    pub fn start(&self, dashboard: SharedDashboard) -> RefreshHandle {
        let period = self.interval;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            info!("Starting dashboard refresh loop ({:?} interval)", period);
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        dashboard.lock().await.refresh();
                    }
                }
            }
            info!("Dashboard refresh loop stopped");
        });

        RefreshHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// A mounted dashboard and its timers
pub struct DashboardRuntime {
    dashboard: SharedDashboard,
    refresh: std::sync::Mutex<Option<RefreshHandle>>,
    scrubbing_duration: Duration,
    scrubbing_timer: std::sync::Mutex<Option<JoinHandle<()>>>,
}

fn lock_slot<T>(slot: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl DashboardRuntime {
    /// Mount `dashboard` and arm its refresh timer. Must be called from
    /// within a Tokio runtime.
    pub fn mount(dashboard: Dashboard, config: &DashboardConfig) -> Self {
        let dashboard = Arc::new(Mutex::new(dashboard));
        let refresh = RefreshScheduler::new(config.refresh_interval()).start(dashboard.clone());
        Self {
            dashboard,
            refresh: std::sync::Mutex::new(Some(refresh)),
            scrubbing_duration: config.scrubbing_duration(),
            scrubbing_timer: std::sync::Mutex::new(None),
        }
    }

    pub fn dashboard(&self) -> SharedDashboard {
        self.dashboard.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        lock_slot(&self.refresh)
            .as_ref()
            .map_or(false, RefreshHandle::is_running)
    }

    /// Turn scrubbing on and arm the timer that turns it off again.
    ///
    /// A new activation replaces any pending timer. The dashboard lock is
    /// held until the timer for this generation is stored.
    pub async fn initiate_manual_scrubbing(&self) {
        let mut guard = self.dashboard.lock().await;
        let generation = guard.begin_scrubbing();
        let dashboard = self.dashboard.clone();
        let duration = self.scrubbing_duration;

        let timer = tokio::spawn(async move {
            time::sleep(duration).await;
            if dashboard.lock().await.finish_scrubbing(generation) {
                debug!("Scrubbing reset after {:?}", duration);
            }
        });
        self.replace_scrubbing_timer(Some(timer));
        drop(guard);
    }

    /// Set the scrubbing switch directly, cancelling any pending reset
    pub async fn set_scrubbing(&self, active: bool) {
        let mut guard = self.dashboard.lock().await;
        guard.set_scrubbing(active);
        self.replace_scrubbing_timer(None);
        drop(guard);
    }

    fn replace_scrubbing_timer(&self, timer: Option<JoinHandle<()>>) {
        let mut slot = lock_slot(&self.scrubbing_timer);
        if let Some(previous) = std::mem::replace(&mut *slot, timer) {
            previous.abort();
        }
    }

    /// Tear down the dashboard: stop the refresh loop and cancel timers.
    /// Later calls are no-ops.
    pub async fn unmount(&self) {
        self.replace_scrubbing_timer(None);
        let refresh = lock_slot(&self.refresh).take();
        if let Some(refresh) = refresh {
            refresh.stop().await;
            info!("Dashboard unmounted");
        }
    }
}

impl Drop for DashboardRuntime {
    fn drop(&mut self) {
        self.replace_scrubbing_timer(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generators::{RandomTelemetry, Region, SERVER_COUNT, WAF_LOG_SIZE};

    const INTERVAL: Duration = Duration::from_secs(5);

    fn config() -> DashboardConfig {
        DashboardConfig {
            alert_probability: 0.0,
            ..DashboardConfig::default()
        }
    }

    fn mount(seed: u64) -> DashboardRuntime {
        let config = config();
        let dashboard = Dashboard::new(Box::new(RandomTelemetry::seeded(seed)), &config);
        DashboardRuntime::mount(dashboard, &config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_replaces_collections() {
        let runtime = mount(1);
        let shared = runtime.dashboard();
        let before = shared.lock().await.snapshot();

        time::sleep(INTERVAL - Duration::from_millis(1)).await;
        assert_eq!(shared.lock().await.refresh_count(), 0);

        time::sleep(Duration::from_millis(2)).await;
        let after = shared.lock().await.snapshot();
        assert_eq!(after.refresh_count, 1);

        assert_eq!(after.traffic.len(), 20);
        assert_eq!(after.geo.len(), Region::ALL.len());
        assert_eq!(after.servers.len(), SERVER_COUNT);
        assert_eq!(after.waf.len(), WAF_LOG_SIZE);
        assert_ne!(after.traffic, before.traffic);
        assert_ne!(after.geo, before.geo);

        runtime.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_keep_firing() {
        let runtime = mount(2);
        time::sleep(INTERVAL * 3 + Duration::from_millis(1)).await;
        assert_eq!(runtime.dashboard().lock().await.refresh_count(), 3);
        runtime.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_updates_after_unmount() {
        let runtime = mount(3);
        let shared = runtime.dashboard();
        time::sleep(INTERVAL + Duration::from_millis(1)).await;
        assert_eq!(shared.lock().await.refresh_count(), 1);

        runtime.unmount().await;
        let frozen = shared.lock().await.snapshot();

        time::sleep(INTERVAL * 4).await;
        let later = shared.lock().await.snapshot();
        assert_eq!(later.refresh_count, 1);
        assert_eq!(later.traffic, frozen.traffic);
        assert_eq!(later.servers, frozen.servers);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_refresh_loop() {
        let runtime = mount(4);
        let shared = runtime.dashboard();
        drop(runtime);

        time::sleep(INTERVAL * 3).await;
        assert_eq!(shared.lock().await.refresh_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_scrubbing_resets() {
        let runtime = mount(5);
        let shared = runtime.dashboard();

        runtime.initiate_manual_scrubbing().await;
        assert!(shared.lock().await.is_scrubbing());

        time::sleep(Duration::from_millis(2_000)).await;
        runtime.initiate_manual_scrubbing().await;

        // the first activation's timer would have fired here
        time::sleep(Duration::from_millis(1_500)).await;
        assert!(shared.lock().await.is_scrubbing());

        time::sleep(Duration::from_millis(1_600)).await;
        assert!(!shared.lock().await.is_scrubbing());

        runtime.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_cancels_pending_reset() {
        let runtime = mount(6);
        let shared = runtime.dashboard();

        runtime.initiate_manual_scrubbing().await;
        runtime.set_scrubbing(true).await;
        time::sleep(Duration::from_secs(10)).await;
        assert!(shared.lock().await.is_scrubbing());

        runtime.set_scrubbing(false).await;
        assert!(!shared.lock().await.is_scrubbing());
        runtime.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_scrubbing_timer() {
        let runtime = mount(7);
        let shared = runtime.dashboard();
        runtime.initiate_manual_scrubbing().await;
        runtime.unmount().await;

        time::sleep(Duration::from_secs(10)).await;
        assert!(shared.lock().await.is_scrubbing());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_scrubbing_always_resets() {
        let config = DashboardConfig {
            alert_probability: 0.0,
            scrubbing_duration_ms: 5,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::new(Box::new(RandomTelemetry::seeded(8)), &config);
        let runtime = Arc::new(DashboardRuntime::mount(dashboard, &config));
        let shared = runtime.dashboard();

        let mut stuck = 0;
        for _ in 0..100 {
            let calls: Vec<_> = (0..8)
                .map(|i| {
                    let runtime = runtime.clone();
                    tokio::spawn(async move {
                        if i == 3 {
                            runtime.set_scrubbing(true).await;
                        }
                        runtime.initiate_manual_scrubbing().await;
                    })
                })
                .collect();
            for call in calls {
                call.await.unwrap();
            }
            time::sleep(Duration::from_millis(30)).await;
            if shared.lock().await.is_scrubbing() {
                stuck += 1;
            }
        }
        assert_eq!(stuck, 0);
        runtime.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_through_shared_reference() {
        let runtime = Arc::new(mount(9));
        let other = runtime.clone();
        let shared = runtime.dashboard();
        assert!(runtime.is_refreshing());

        runtime.unmount().await;
        assert!(!other.is_refreshing());
        other.unmount().await;

        time::sleep(INTERVAL * 2).await;
        assert_eq!(shared.lock().await.refresh_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_changes_keep_tick_phase() {
        let runtime = mount(10);
        let shared = runtime.dashboard();

        time::sleep(INTERVAL / 2).await;
        assert!(shared.lock().await.force_alert());
        time::sleep(INTERVAL / 4).await;
        assert!(shared.lock().await.dismiss_alert().is_some());

        time::sleep(INTERVAL / 4 + Duration::from_millis(1)).await;
        assert_eq!(shared.lock().await.refresh_count(), 1);
        runtime.unmount().await;
    }
}
