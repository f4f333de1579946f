//! Emission Loop
//!
//! One long-lived task that turns the current rate table into log lines.
//!
//! ## State machine
//!
//! ```text
//!        ┌──────────────── no active category ───────────────┐
//!        ▼                                                    │
//!   ┌─────────┐   first active    ┌───────────────┐          │
//!   │  Scan   │ ─────────────────▶│ Emit(category)│──┐       │
//!   └─────────┘                   └───────────────┘  │ next  │
//!        ▲   ▲                        │   ▲          │ active│
//!        │   └──── scan finished ─────┘   └──────────┘       │
//!        │                                                    │
//!   ┌─────────┐                                              │
//!   │  Idle   │◀─────────────────────────────────────────────┘
//!   └─────────┘
//! ```
//!
//! - Scan reads one snapshot of the rate table per pass.
//! - Emit writes one line, then pauses `10 / rate` seconds.
//! - Idle pauses for the idle interval; only entered when a pass found
//!   nothing to emit.
//!
//! Categories are served one after another, so two busy categories slow each
//! other down. Every pause races the cancellation token.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::core::{Category, Rate, RateTable};
use crate::generator;
use crate::rates::RateStore;
use crate::sink::LogSink;

pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// Where the loop is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Scan,
    Emit {
        snapshot: RateTable,
        category: Category,
        rate: Rate,
    },
    Idle,
}

impl LoopState {
    /// First active category at or after `from` in scan order
    fn next_emit(snapshot: RateTable, from: usize) -> Option<LoopState> {
        Category::ALL[from.min(Category::ALL.len())..]
            .iter()
            .map(|&category| (category, snapshot.get(category)))
            .find(|(_, rate)| rate.is_active())
            .map(|(category, rate)| LoopState::Emit {
                snapshot,
                category,
                rate,
            })
    }
}

/// Pause after emitting one line at `rate`
pub fn pacing_interval(rate: Rate) -> Option<Duration> {
    let per_second = rate.messages_per_second();
    (per_second > 0.0).then(|| Duration::from_secs_f64(1.0 / per_second))
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters updated by the loop, readable from anywhere
#[derive(Debug, Default)]
pub struct EngineStats {
    emitted: [AtomicU64; 4],
    failed: [AtomicU64; 4],
    passes: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub emitted: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub passes: u64,
    pub categories: BTreeMap<Category, CategoryStats>,
}

impl EngineStats {
    fn record_emitted(&self, category: Category) {
        self.emitted[category.index()].fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self, category: Category) {
        self.failed[category.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn emitted(&self, category: Category) -> u64 {
        self.emitted[category.index()].load(Ordering::Relaxed)
    }

    pub fn failed(&self, category: Category) -> u64 {
        self.failed[category.index()].load(Ordering::Relaxed)
    }

    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            passes: self.passes(),
            categories: Category::ALL
                .into_iter()
                .map(|c| {
                    let stats = CategoryStats {
                        emitted: self.emitted(c),
                        failed: self.failed(c),
                    };
                    (c, stats)
                })
                .collect(),
        }
    }
}

// ============================================================================
// Loop
// ============================================================================

pub struct EmissionLoop<S> {
    store: RateStore,
    sink: S,
    stats: Arc<EngineStats>,
    idle_interval: Duration,
    cancel: CancellationToken,
}

impl<S: LogSink + 'static> EmissionLoop<S> {
    pub fn new(store: RateStore, sink: S) -> Self {
        Self {
            store,
            sink,
            stats: Arc::new(EngineStats::default()),
            idle_interval: DEFAULT_IDLE_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_idle_interval(mut self, idle_interval: Duration) -> Self {
        self.idle_interval = idle_interval;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn stats(&self) -> Arc<EngineStats> {
        Arc::clone(&self.stats)
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run on the current runtime; the handle yields the sink back on exit
    pub fn spawn(self) -> JoinHandle<S> {
        tokio::spawn(self.run())
    }

    /// Drive the state machine until cancelled
    pub async fn run(mut self) -> S {
        info!(
            idle_ms = self.idle_interval.as_millis() as u64,
            "emission loop started"
        );

        let mut state = LoopState::Scan;
        while !self.cancel.is_cancelled() {
            trace!(?state, "emission loop step");
            state = match state {
                LoopState::Scan => {
                    let snapshot = self.store.get_rates();
                    self.stats.passes.fetch_add(1, Ordering::Relaxed);
                    LoopState::next_emit(snapshot, 0).unwrap_or(LoopState::Idle)
                }
                LoopState::Emit {
                    snapshot,
                    category,
                    rate,
                } => {
                    // Inactive categories never reach Emit
                    let pause = pacing_interval(rate).unwrap_or(self.idle_interval);
                    self.emit_one(category).await;
                    if !Self::suspend(&self.cancel, pause).await {
                        break;
                    }
                    LoopState::next_emit(snapshot, category.index() + 1)
                        .unwrap_or(LoopState::Scan)
                }
                LoopState::Idle => {
                    if !Self::suspend(&self.cancel, self.idle_interval).await {
                        break;
                    }
                    LoopState::Scan
                }
            };
        }

        info!(passes = self.stats.passes(), "emission loop stopped");
        self.sink
    }

    async fn emit_one(&mut self, category: Category) {
        let line = generator::generate(category);
        match self.sink.append(category, line.as_str()).await {
            Ok(()) => {
                self.stats.record_emitted(category);
                debug!(%category, "line emitted");
            }
            Err(error) => {
                self.stats.record_failure(category);
                warn!(%category, %error, "failed to append log line, skipping");
            }
        }
    }

    /// Sleep unless cancelled first; returns false on cancellation
    async fn suspend(cancel: &CancellationToken, pause: Duration) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = time::sleep(pause) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SimError, SimResult};
    use crate::sink::MemorySink;
    use async_trait::async_trait;
    use std::path::PathBuf;

    fn rate(v: i64) -> Rate {
        Rate::clamped(v)
    }

    /// Sink that fails for one category and records the rest
    #[derive(Clone)]
    struct FlakySink {
        broken: Category,
        inner: MemorySink,
    }

    #[async_trait]
    impl LogSink for FlakySink {
        async fn append(&mut self, category: Category, line: &str) -> SimResult<()> {
            if category == self.broken {
                return Err(SimError::SinkWrite {
                    category,
                    path: PathBuf::from("/dev/full"),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.append(category, line).await
        }
    }

    #[test]
    fn test_pacing_interval() {
        assert_eq!(pacing_interval(rate(100)), Some(Duration::from_millis(100)));
        assert_eq!(pacing_interval(rate(1)), Some(Duration::from_secs(10)));
        assert_eq!(pacing_interval(rate(50)), Some(Duration::from_millis(200)));
        assert_eq!(pacing_interval(rate(0)), None);
    }

    #[test]
    fn test_next_emit_follows_scan_order() {
        let mut table = RateTable::default();
        assert_eq!(LoopState::next_emit(table, 0), None);

        table.set(Category::Error, rate(10));
        table.set(Category::Access, rate(20));
        match LoopState::next_emit(table, 0) {
            Some(LoopState::Emit { category, .. }) => assert_eq!(category, Category::Error),
            other => panic!("unexpected {other:?}"),
        }
        match LoopState::next_emit(table, Category::Error.index() + 1) {
            Some(LoopState::Emit { category, rate: r, .. }) => {
                assert_eq!(category, Category::Access);
                assert_eq!(r, rate(20));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(LoopState::next_emit(table, Category::ALL.len()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_rate_emits_about_ten_per_second() {
        let store = RateStore::new();
        let sink = MemorySink::new();
        store.set_rate(Category::Access, rate(100));

        let engine = EmissionLoop::new(store.clone(), sink.clone());
        let cancel = engine.cancellation();
        let handle = engine.spawn();

        time::sleep(Duration::from_secs(2)).await;
        cancel.cancel();
        handle.await.unwrap();

        let access = sink.count(Category::Access);
        assert!((15..=21).contains(&access), "access lines: {access}");
        for other in [Category::System, Category::Error, Category::Application] {
            assert_eq!(sink.count(other), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_rates_stay_silent() {
        let store = RateStore::new();
        let sink = MemorySink::new();
        let engine = EmissionLoop::new(store, sink.clone());
        let stats = engine.stats();
        let cancel = engine.cancellation();
        let handle = engine.spawn();

        time::sleep(Duration::from_secs(5)).await;
        cancel.cancel();
        handle.await.unwrap();

        for category in Category::ALL {
            assert_eq!(sink.count(category), 0);
        }
        // Idle passes keep scanning
        assert!(stats.passes() >= 40, "passes: {}", stats.passes());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lowest_rate_emits_within_window() {
        let store = RateStore::new();
        let sink = MemorySink::new();
        store.set_rate(Category::System, rate(1));

        let engine = EmissionLoop::new(store, sink.clone());
        let cancel = engine.cancellation();
        let handle = engine.spawn();

        time::sleep(Duration::from_secs(10)).await;
        assert!(sink.count(Category::System) >= 1);
        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_change_is_picked_up() {
        let store = RateStore::new();
        let sink = MemorySink::new();
        let engine = EmissionLoop::new(store.clone(), sink.clone());
        let cancel = engine.cancellation();
        let handle = engine.spawn();

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.count(Category::Error), 0);

        store.set_rate(Category::Error, rate(100));
        time::sleep(Duration::from_secs(1)).await;
        let running = sink.count(Category::Error);
        assert!(running >= 5, "error lines: {running}");

        store.set_rate(Category::Error, rate(0));
        time::sleep(Duration::from_millis(500)).await;
        let settled = sink.count(Category::Error);
        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(sink.count(Category::Error), settled);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_does_not_stop_loop() {
        let store = RateStore::new();
        let inner = MemorySink::new();
        let sink = FlakySink {
            broken: Category::Error,
            inner: inner.clone(),
        };
        store.set_rate(Category::Error, rate(100));
        store.set_rate(Category::Application, rate(100));

        let engine = EmissionLoop::new(store, sink);
        let stats = engine.stats();
        let cancel = engine.cancellation();
        let handle = engine.spawn();

        time::sleep(Duration::from_secs(2)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert!(stats.failed(Category::Error) >= 5);
        assert_eq!(stats.emitted(Category::Error), 0);
        assert!(inner.count(Category::Application) >= 5);
        assert_eq!(
            stats.emitted(Category::Application),
            inner.count(Category::Application) as u64
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_long_pause() {
        let store = RateStore::new();
        let sink = MemorySink::new();
        store.set_rate(Category::System, rate(1));

        let engine = EmissionLoop::new(store, sink.clone());
        let cancel = engine.cancellation();
        let handle = engine.spawn();

        // Loop is now inside its ten second pause
        time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        let started = time::Instant::now();
        handle.await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(sink.count(Category::System), 1);
    }

    #[test]
    fn test_stats_snapshot_lists_every_category() {
        let stats = EngineStats::default();
        stats.record_emitted(Category::Access);
        stats.record_failure(Category::System);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.categories.len(), 4);
        assert_eq!(snapshot.categories[&Category::Access].emitted, 1);
        assert_eq!(snapshot.categories[&Category::System].failed, 1);
    }
}
