//! Monitor: threshold check, capture, and the tick/cancel loop.
//!
//! Lifecycle is `Idle -> Running -> Stopped`. A monitor runs at most once;
//! configuration is fixed at construction, so nothing can change underneath a
//! running loop.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use memwatch_core::{HeapRuntime, MonitorConfig, ProfileSink, Snapshot};
use memwatch_mem::PeakTracker;

use crate::error::{MonitorError, Result};
use crate::handle::MonitorHandle;
use crate::metrics;
use crate::outcome::{MonitorSummary, TickOutcome};
use crate::signal;

/// Callback notified of every capture/sink failure. Failures never stop the loop.
pub type ErrorObserver = Arc<dyn Fn(&MonitorError) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
}

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// Heap watchdog bound to one sink and one heap runtime.
pub struct Monitor {
    config: MonitorConfig,
    sink: Arc<dyn ProfileSink>,
    runtime: Arc<dyn HeapRuntime>,
    observer: Option<ErrorObserver>,
    state: AtomicU8,
    peak: PeakTracker,
    /// Write that outlived its timeout. No new write starts until it finishes.
    pending_write: Mutex<Option<JoinHandle<memwatch_core::Result<()>>>>,
}

impl Monitor {
    /// Monitor with the default 5 MiB threshold and 10 s poll interval.
    pub fn new(sink: Arc<dyn ProfileSink>, runtime: Arc<dyn HeapRuntime>) -> Self {
        Self::with_config(MonitorConfig::default(), sink, runtime)
    }

    pub fn with_config(
        config: MonitorConfig,
        sink: Arc<dyn ProfileSink>,
        runtime: Arc<dyn HeapRuntime>,
    ) -> Self {
        Self {
            config,
            sink,
            runtime,
            observer: None,
            state: AtomicU8::new(IDLE),
            peak: PeakTracker::new(),
            pending_write: Mutex::new(None),
        }
    }

    /// Register a callback for capture and sink failures.
    pub fn on_error(mut self, observer: impl Fn(&MonitorError) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn state(&self) -> MonitorState {
        match self.state.load(Ordering::Acquire) {
            IDLE => MonitorState::Idle,
            RUNNING => MonitorState::Running,
            _ => MonitorState::Stopped,
        }
    }

    /// Highest allocation sampled so far, readable while the loop runs.
    pub fn peak_allocated_bytes(&self) -> u64 {
        self.peak.peak()
    }

    /// Run the monitoring loop until `cancel` fires.
    ///
    /// The first tick happens one full poll interval after the call. The
    /// returned future only completes once the monitor is stopped; a tick that
    /// is already executing finishes before the loop observes cancellation.
    ///
    /// # Errors
    ///
    /// `MonitorError::AlreadyStarted` if this monitor has been run before or
    /// is running now. Tick failures are reported to the observer and counted
    /// in the summary, never returned.
    pub async fn run(&self, cancel: CancellationToken) -> Result<MonitorSummary> {
        self.state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MonitorError::AlreadyStarted)?;
        // Marks the monitor stopped however this future ends (including drop).
        let _stopped = StopOnDrop(&self.state);

        let period = self.config.poll_interval();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        metrics::emit_started(
            self.config.threshold_bytes(),
            period,
            self.config.sink_timeout(),
        );

        let mut summary = MonitorSummary::default();
        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let outcome = self.check_and_emit().await;
                    summary.record(&outcome);
                }
            }
        }
        drop(ticker);

        summary.peak_allocated_bytes = self.peak.peak();
        metrics::emit_stopped(&summary);
        Ok(summary)
    }

    /// Blocking form of [`run`](Self::run) on a private current-thread runtime.
    ///
    /// Must not be called from inside an async context. Returns as soon as
    /// the loop stops, even if a timed-out sink write is still running.
    pub fn run_blocking(&self, cancel: CancellationToken) -> Result<MonitorSummary> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let summary = rt.block_on(self.run(cancel));
        rt.shutdown_background();
        summary
    }

    /// Blocking run that stops on SIGINT or SIGTERM.
    ///
    /// The signal handlers are installed before the monitor enters `Running`.
    pub fn run_until_signal(&self) -> Result<MonitorSummary> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let summary = rt.block_on(async {
            let signals = signal::ShutdownSignal::listen()?;
            let cancel = CancellationToken::new();
            let watcher = tokio::spawn(signals.cancel(cancel.clone()));
            let summary = self.run(cancel).await;
            watcher.abort();
            summary
        });
        rt.shutdown_background();
        summary
    }

    /// Run in a background task with its own cancellation token.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn(self) -> MonitorHandle {
        self.spawn_with_cancel(CancellationToken::new())
    }

    /// Run in a background task, stopping when `cancel` (or the handle) fires.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn_with_cancel(self, cancel: CancellationToken) -> MonitorHandle {
        let monitor = Arc::new(self);
        let task = tokio::spawn({
            let monitor = Arc::clone(&monitor);
            let cancel = cancel.clone();
            async move { monitor.run(cancel).await }
        });
        MonitorHandle::new(monitor, cancel, task)
    }

    /// One tick: sample, compare, and on `allocated >= threshold` collect,
    /// capture, name, and write. Only the loop calls this, so ticks never
    /// overlap.
    pub(crate) async fn check_and_emit(&self) -> TickOutcome {
        let threshold = self.config.threshold_bytes();
        let outcome = self.check_and_emit_inner(threshold).await;
        metrics::emit_tick(threshold, &outcome);
        outcome
    }

    async fn check_and_emit_inner(&self, threshold: u64) -> TickOutcome {
        let allocated_bytes = self.runtime.allocated_bytes();
        self.peak.record(allocated_bytes);

        if allocated_bytes < threshold {
            return TickOutcome::BelowThreshold { allocated_bytes };
        }

        if self.sink_busy().await {
            self.report(&MonitorError::SinkBusy);
            return TickOutcome::SinkBusy { allocated_bytes };
        }

        let snapshot = match self.capture().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.report(&err);
                return TickOutcome::CaptureFailed { allocated_bytes };
            }
        };

        let file_name = snapshot.file_name().to_string();
        let bytes = snapshot.len();
        let digest = snapshot.digest();

        match self.write(snapshot).await {
            Ok(()) => {
                tracing::info!(
                    %file_name,
                    bytes,
                    %digest,
                    allocated_bytes,
                    threshold_bytes = threshold,
                    "heap profile emitted"
                );
                TickOutcome::Emitted {
                    allocated_bytes,
                    file_name,
                    bytes,
                }
            }
            Err(err) => {
                self.report(&err);
                TickOutcome::SinkFailed {
                    allocated_bytes,
                    file_name,
                }
            }
        }
    }

    /// Collect, then dump, on the blocking pool. The capture instant is taken
    /// after the dump completes.
    async fn capture(&self) -> Result<Snapshot> {
        let runtime = Arc::clone(&self.runtime);
        task::spawn_blocking(move || -> memwatch_core::Result<Snapshot> {
            runtime.collect();
            let payload = runtime.dump_profile()?;
            Ok(Snapshot::new(Utc::now(), payload))
        })
        .await
        .map_err(|e| MonitorError::Task(format!("heap capture: {e}")))?
        .map_err(MonitorError::Capture)
    }

    async fn write(&self, snapshot: Snapshot) -> Result<()> {
        let (file_name, payload) = snapshot.into_parts();
        let sink = Arc::clone(&self.sink);
        let name = file_name.clone();
        let mut write = task::spawn_blocking(move || sink.write(&name, &payload));

        let joined = match self.config.sink_timeout() {
            Some(timeout) => match time::timeout(timeout, &mut write).await {
                Ok(joined) => joined,
                Err(_) => {
                    // Still running on the blocking pool; later ticks skip the
                    // sink until it finishes.
                    *self.lock_pending_write() = Some(write);
                    return Err(MonitorError::SinkTimeout { file_name, timeout });
                }
            },
            None => write.await,
        };

        match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(MonitorError::Sink { file_name, source }),
            Err(e) => Err(MonitorError::Task(format!("sink write '{file_name}': {e}"))),
        }
    }

    /// True while a timed-out write is still running. Reaps it once done.
    async fn sink_busy(&self) -> bool {
        let pending = self.lock_pending_write().take();
        let Some(write) = pending else {
            return false;
        };
        if !write.is_finished() {
            *self.lock_pending_write() = Some(write);
            return true;
        }
        match write.await {
            Ok(Ok(())) => tracing::debug!("timed-out sink write completed late"),
            Ok(Err(e)) => tracing::warn!(error = %e, "timed-out sink write failed late"),
            Err(e) => tracing::warn!(error = %e, "timed-out sink write task failed"),
        }
        false
    }

    fn lock_pending_write(&self) -> MutexGuard<'_, Option<JoinHandle<memwatch_core::Result<()>>>> {
        self.pending_write
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, err: &MonitorError) {
        tracing::warn!(error = %err, "memory monitor tick failed");
        if let Some(observer) = &self.observer {
            observer(err);
        }
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

struct StopOnDrop<'a>(&'a AtomicU8);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(STOPPED, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use memwatch_core::Error as CoreError;
    use memwatch_io::MemorySink;

    /// Replays a fixed list of allocation readings, then cancels `done` and
    /// reports zero.
    struct ScriptedRuntime {
        readings: Mutex<VecDeque<u64>>,
        done: CancellationToken,
        collects: AtomicUsize,
        fail_dump: bool,
    }

    impl ScriptedRuntime {
        fn new(readings: impl IntoIterator<Item = u64>, done: CancellationToken) -> Self {
            Self {
                readings: Mutex::new(readings.into_iter().collect()),
                done,
                collects: AtomicUsize::new(0),
                fail_dump: false,
            }
        }

        fn failing_dump(mut self) -> Self {
            self.fail_dump = true;
            self
        }
    }

    impl HeapRuntime for ScriptedRuntime {
        fn allocated_bytes(&self) -> u64 {
            match self.readings.lock().unwrap().pop_front() {
                Some(v) => v,
                None => {
                    self.done.cancel();
                    0
                }
            }
        }

        fn collect(&self) {
            self.collects.fetch_add(1, Ordering::SeqCst);
        }

        fn dump_profile(&self) -> memwatch_core::Result<Vec<u8>> {
            if self.fail_dump {
                Err(CoreError::Capture("dump disabled".into()))
            } else {
                Ok(b"heap profile: 0: 0 [0: 0] @ heap/1\n".to_vec())
            }
        }
    }

    struct FailingSink;

    impl ProfileSink for FailingSink {
        fn write(&self, _file_name: &str, _payload: &[u8]) -> memwatch_core::Result<()> {
            Err(CoreError::Sink("bucket unavailable".into()))
        }
    }

    fn config(threshold: u64, interval_ms: u64) -> MonitorConfig {
        MonitorConfig::builder()
            .threshold_bytes(threshold)
            .poll_interval(Duration::from_millis(interval_ms))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_threshold_boundary_triggers_on_equal() {
        let cancel = CancellationToken::new();
        let rt = Arc::new(ScriptedRuntime::new([99, 100, 101], cancel));
        let sink = MemorySink::new();
        let monitor = Monitor::with_config(config(100, 10), Arc::new(sink.clone()), rt.clone());

        assert!(!monitor.check_and_emit().await.triggered());
        assert!(monitor.check_and_emit().await.triggered());
        assert!(monitor.check_and_emit().await.triggered());
        assert_eq!(sink.len(), 2);
        assert_eq!(rt.collects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_threshold_triggers_every_tick() {
        let cancel = CancellationToken::new();
        let rt = Arc::new(ScriptedRuntime::new([0, 0], cancel));
        let sink = MemorySink::new();
        let monitor = Monitor::with_config(config(0, 10), Arc::new(sink.clone()), rt);

        monitor.check_and_emit().await;
        monitor.check_and_emit().await;
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_default_threshold_is_five_mib() {
        let five_mib = 5 * 1024 * 1024;
        let cancel = CancellationToken::new();
        let rt = Arc::new(ScriptedRuntime::new([five_mib - 1, five_mib], cancel));
        let sink = MemorySink::new();
        let monitor = Monitor::new(Arc::new(sink.clone()), rt);

        assert_eq!(monitor.config().poll_interval(), Duration::from_secs(10));
        assert_eq!(
            monitor.check_and_emit().await,
            TickOutcome::BelowThreshold {
                allocated_bytes: five_mib - 1
            }
        );
        assert!(matches!(
            monitor.check_and_emit().await,
            TickOutcome::Emitted { allocated_bytes, .. } if allocated_bytes == five_mib
        ));
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_emitted_name_has_profile_shape() {
        let rt = Arc::new(ScriptedRuntime::new([500], CancellationToken::new()));
        let sink = MemorySink::new();
        let monitor = Monitor::with_config(config(100, 10), Arc::new(sink.clone()), rt);

        let TickOutcome::Emitted { file_name, bytes, .. } = monitor.check_and_emit().await else {
            panic!("expected emission");
        };
        let (stamp, rest) = file_name.split_once('_').unwrap();
        let epoch = rest.strip_suffix(".pprof").unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert!(epoch.parse::<i64>().unwrap() > 1_700_000_000);
        assert_eq!(sink.get(&file_name).unwrap().len(), bytes);
    }

    #[tokio::test]
    async fn test_capture_failure_skips_write_and_notifies() {
        let rt = Arc::new(ScriptedRuntime::new([500], CancellationToken::new()).failing_dump());
        let sink = MemorySink::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let monitor = Monitor::with_config(config(100, 10), Arc::new(sink.clone()), rt).on_error({
            let seen = Arc::clone(&seen);
            move |err| {
                assert!(matches!(err, MonitorError::Capture(_)));
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert_eq!(
            monitor.check_and_emit().await,
            TickOutcome::CaptureFailed {
                allocated_bytes: 500
            }
        );
        assert!(sink.is_empty());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_sink_times_out() {
        struct SlowSink;
        impl ProfileSink for SlowSink {
            fn write(&self, _file_name: &str, _payload: &[u8]) -> memwatch_core::Result<()> {
                std::thread::sleep(Duration::from_millis(200));
                Ok(())
            }
        }

        let cfg = MonitorConfig::builder()
            .threshold_bytes(1)
            .poll_interval(Duration::from_millis(10))
            .sink_timeout(Some(Duration::from_millis(20)))
            .build()
            .unwrap();
        let rt = Arc::new(ScriptedRuntime::new([10], CancellationToken::new()));
        let timeouts = Arc::new(AtomicUsize::new(0));
        let monitor = Monitor::with_config(cfg, Arc::new(SlowSink), rt).on_error({
            let timeouts = Arc::clone(&timeouts);
            move |err| {
                if matches!(err, MonitorError::SinkTimeout { .. }) {
                    timeouts.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        assert!(matches!(
            monitor.check_and_emit().await,
            TickOutcome::SinkFailed { .. }
        ));
        assert_eq!(timeouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_sink_keeps_loop_running() {
        let cancel = CancellationToken::new();
        let rt = Arc::new(ScriptedRuntime::new([200, 200, 200], cancel.clone()));
        let errors = Arc::new(AtomicUsize::new(0));
        let monitor = Monitor::with_config(config(100, 5), Arc::new(FailingSink), rt).on_error({
            let errors = Arc::clone(&errors);
            move |err| {
                assert!(matches!(err, MonitorError::Sink { .. }));
                errors.fetch_add(1, Ordering::SeqCst);
            }
        });

        let summary = monitor.run(cancel).await.unwrap();
        // Three scripted ticks plus the tick that exhausted the script.
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.sink_failures, 3);
        assert_eq!(summary.snapshots_emitted, 0);
        assert_eq!(errors.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_tick() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let rt = Arc::new(ScriptedRuntime::new([1_000], CancellationToken::new()));
        let sink = MemorySink::new();
        let monitor = Monitor::with_config(config(1, 10), Arc::new(sink.clone()), rt);

        let summary = monitor.run(cancel).await.unwrap();
        assert_eq!(summary.ticks, 0);
        assert!(sink.is_empty());
        assert_eq!(monitor.state(), MonitorState::Stopped);
    }

    #[tokio::test]
    async fn test_monitor_runs_only_once() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let rt = Arc::new(ScriptedRuntime::new([], CancellationToken::new()));
        let monitor = Monitor::with_config(config(1, 10), Arc::new(MemorySink::new()), rt);

        assert_eq!(monitor.state(), MonitorState::Idle);
        monitor.run(cancel.clone()).await.unwrap();
        assert!(matches!(
            monitor.run(cancel).await,
            Err(MonitorError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_run_blocking_stops_on_cancel() {
        let cancel = CancellationToken::new();
        let rt = Arc::new(ScriptedRuntime::new([300, 10], cancel.clone()));
        let sink = MemorySink::new();
        let monitor = Monitor::with_config(config(100, 5), Arc::new(sink.clone()), rt);

        let summary = monitor.run_blocking(cancel).unwrap();
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.snapshots_emitted, 1);
        assert_eq!(summary.peak_allocated_bytes, 300);
        assert_eq!(monitor.peak_allocated_bytes(), 300);
        assert_eq!(sink.len(), 1);
    }

    /// Blocks every write for `hold`, tracking how many run at once.
    struct StuckSink {
        hold: Duration,
        stuck_calls: usize,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl StuckSink {
        /// The first `stuck_calls` writes block; later ones return at once.
        fn new(hold: Duration, stuck_calls: usize) -> Self {
            Self {
                hold,
                stuck_calls,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    impl ProfileSink for StuckSink {
        fn write(&self, _file_name: &str, _payload: &[u8]) -> memwatch_core::Result<()> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if call < self.stuck_calls {
                std::thread::sleep(self.hold);
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn timeout_config(timeout_ms: u64) -> MonitorConfig {
        MonitorConfig::builder()
            .threshold_bytes(1)
            .poll_interval(Duration::from_millis(10))
            .sink_timeout(Some(Duration::from_millis(timeout_ms)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_stuck_sink_gets_one_write_and_stop_returns_promptly() {
        let cancel = CancellationToken::new();
        let rt = Arc::new(ScriptedRuntime::new(
            std::iter::repeat(100).take(10_000),
            CancellationToken::new(),
        ));
        let sink = Arc::new(StuckSink::new(Duration::from_secs(3), usize::MAX));
        let (timeouts, busy) = (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)));
        let monitor = Monitor::with_config(timeout_config(20), sink.clone(), rt).on_error({
            let (timeouts, busy) = (Arc::clone(&timeouts), Arc::clone(&busy));
            move |err| match err {
                MonitorError::SinkTimeout { .. } => {
                    timeouts.fetch_add(1, Ordering::SeqCst);
                }
                MonitorError::SinkBusy => {
                    busy.fetch_add(1, Ordering::SeqCst);
                }
                other => panic!("unexpected error: {other}"),
            }
        });

        let stopper = {
            let cancel = cancel.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(200));
                cancel.cancel();
            })
        };
        let started = std::time::Instant::now();
        let summary = monitor.run_blocking(cancel).unwrap();
        let elapsed = started.elapsed();
        stopper.join().unwrap();

        assert!(elapsed < Duration::from_secs(2), "stop took {elapsed:?}");
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(summary.ticks >= 3, "{summary:?}");
        assert_eq!(summary.sink_failures, summary.ticks);
        assert_eq!(timeouts.load(Ordering::SeqCst), 1);
        assert_eq!(busy.load(Ordering::SeqCst) as u64, summary.ticks - 1);
    }

    #[tokio::test]
    async fn test_sink_resumes_after_late_write_finishes() {
        let rt = Arc::new(ScriptedRuntime::new([100, 100, 100], CancellationToken::new()));
        let sink = Arc::new(StuckSink::new(Duration::from_millis(80), 1));
        let monitor = Monitor::with_config(timeout_config(20), sink.clone(), rt.clone());

        assert!(matches!(
            monitor.check_and_emit().await,
            TickOutcome::SinkFailed { .. }
        ));
        assert_eq!(
            monitor.check_and_emit().await,
            TickOutcome::SinkBusy {
                allocated_bytes: 100
            }
        );
        // Busy ticks skip collection and capture entirely.
        assert_eq!(rt.collects.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(matches!(
            monitor.check_and_emit().await,
            TickOutcome::Emitted { .. }
        ));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
        assert_eq!(sink.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_longest_poll_interval_runs_and_stops() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let cfg = MonitorConfig::builder()
            .poll_interval(memwatch_core::config::MAX_POLL_INTERVAL)
            .build()
            .unwrap();
        let rt = Arc::new(ScriptedRuntime::new([], CancellationToken::new()));
        let monitor = Monitor::with_config(cfg, Arc::new(MemorySink::new()), rt);

        let summary = monitor.run(cancel).await.unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(monitor.state(), MonitorState::Stopped);
    }
}
