//! Fixed-rate render loop.
//!
//! Each tick snapshots the [`StateStore`], renders one frame and hands it to
//! the [`OutputWorker`]. Late ticks are skipped instead of replayed, and the
//! wait on the driver is capped per tick, so the loop keeps its cadence
//! whatever the hardware does.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::Local;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::output::{Frame, OutputWorker, WriteOutcome};
use crate::renderer::Renderer;
use crate::state::StateStore;

/// Default target frame rate (50 FPS).
pub const DEFAULT_FPS: u32 = 50;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// How long shutdown waits for the output thread to blank and release the driver.
const OUTPUT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Counters shared between the render loop and the health endpoint.
#[derive(Debug, Default)]
pub struct RenderStats {
    frames_written: AtomicU64,
    frames_failed: AtomicU64,
    frames_dropped: AtomicU64,
    last_render_us: AtomicU64,
}

/// Point-in-time copy of [`RenderStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub frames_written: u64,
    pub frames_failed: u64,
    pub frames_dropped: u64,
    pub last_render_us: u64,
}

impl RenderStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_written: self.frames_written.load(Ordering::Relaxed),
            frames_failed: self.frames_failed.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            last_render_us: self.last_render_us.load(Ordering::Relaxed),
        }
    }

    fn record(&self, outcome: &WriteOutcome) {
        let counter = match outcome {
            WriteOutcome::Written => &self.frames_written,
            WriteOutcome::Failed(_) | WriteOutcome::Disconnected => &self.frames_failed,
            WriteOutcome::TimedOut | WriteOutcome::Busy => &self.frames_dropped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Render loop driving one globe.
///
/// # Usage
///
/// ```ignore
/// let scheduler = FrameScheduler::new(renderer, store.clone(), output);
/// let stats = scheduler.stats();
/// tokio::spawn(scheduler.run(cancel.child_token()));
/// ```
pub struct FrameScheduler {
    renderer: Renderer,
    store: StateStore,
    output: OutputWorker,
    frame_duration: Duration,
    driver_timeout: Duration,
    stats: Arc<RenderStats>,
}

impl FrameScheduler {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (50 FPS) for frame timing.
    pub fn new(renderer: Renderer, store: StateStore, output: OutputWorker) -> Self {
        Self::with_frame_duration(renderer, store, output, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    ///
    /// The driver timeout defaults to one frame duration.
    pub fn with_frame_duration(
        renderer: Renderer,
        store: StateStore,
        output: OutputWorker,
        frame_duration: Duration,
    ) -> Self {
        Self {
            renderer,
            store,
            output,
            frame_duration,
            driver_timeout: frame_duration,
            stats: Arc::default(),
        }
    }

    /// Cap the wait for each frame write
    #[must_use]
    pub fn with_driver_timeout(mut self, driver_timeout: Duration) -> Self {
        self.driver_timeout = driver_timeout;
        self
    }

    pub fn stats(&self) -> Arc<RenderStats> {
        Arc::clone(&self.stats)
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Render and push a single frame
    pub async fn tick(&mut self) -> WriteOutcome {
        let state = self.store.read();

        let started = Instant::now();
        let frame: Frame = self
            .renderer
            .render(&state, Local::now().naive_local())
            .iter()
            .copied()
            .collect();
        let render_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.last_render_us.store(render_us, Ordering::Relaxed);
        trace!(render_us, "frame rendered");

        let outcome = self.output.submit(frame, self.driver_timeout).await;
        match &outcome {
            WriteOutcome::Written => {}
            WriteOutcome::Failed(e) => warn!(error = %e, "frame write failed"),
            WriteOutcome::TimedOut => {
                warn!(timeout = ?self.driver_timeout, "frame write timed out, frame dropped");
            }
            WriteOutcome::Busy => debug!("output busy, frame dropped"),
            WriteOutcome::Disconnected => warn!("output worker gone, frame lost"),
        }
        self.stats.record(&outcome);

        outcome
    }

    /// Tick until `cancel` fires, then blank and release the driver
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.frame_duration);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut changes = self.store.subscribe();
        info!(
            leds = self.renderer.led_count(),
            frame_ms = self.frame_duration.as_millis(),
            "render engine started"
        );

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            if changes.has_changed().unwrap_or(false) {
                let state = *changes.borrow_and_update();
                debug!(
                    mode = state.mode.as_str(),
                    color = %state.color,
                    offset = state.offset,
                    "display state changed"
                );
            }

            self.tick().await;
        }

        self.output.shutdown(OUTPUT_SHUTDOWN_GRACE).await;
        info!(stats = ?self.stats.snapshot(), "render engine stopped");
    }
}
