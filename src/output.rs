//! LED hardware boundary.
//!
//! The chipset protocol lives behind [`OutputDriver`]. The driver is owned
//! by a dedicated output thread so a slow or hung write can only cost the
//! frames it overlaps, never a render tick.

use std::fmt::{self, Write as _};
use std::time::Duration;

use smart_leds::SmartLedsWrite;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

use crate::color::Rgb;
use crate::error::{DriverError, StartupError};
use crate::renderer::MAX_LEDS;

/// One rendered frame, sized to the pixel topology
pub type Frame = heapless::Vec<Rgb, MAX_LEDS>;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms. Dropping
/// the driver must release the hardware.
pub trait OutputDriver: Send + 'static {
    /// Bring the hardware up; called once before the first frame
    fn init(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DriverError>;
}

/// Adapter for any `smart-leds` writer
pub struct SmartLedsDriver<W> {
    writer: W,
}

impl<W> SmartLedsDriver<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> OutputDriver for SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = Rgb> + Send + 'static,
    W::Error: fmt::Debug,
{
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DriverError> {
        self.writer
            .write(colors.iter().copied())
            .map_err(|e| DriverError::Io(format!("{e:?}")))
    }
}

/// Logs every frame as hex at trace level
#[derive(Debug, Default)]
pub struct TraceDriver;

impl OutputDriver for TraceDriver {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DriverError> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let mut hex = String::with_capacity(colors.len() * 7);
            for Rgb { r, g, b } in colors {
                let _ = write!(hex, "{r:02x}{g:02x}{b:02x} ");
            }
            tracing::trace!(frame = hex.trim_end(), "frame");
        }
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullDriver;

impl OutputDriver for NullDriver {
    fn write(&mut self, _colors: &[Rgb]) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Outcome of handing one frame to the output thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Failed(DriverError),
    /// The write did not finish within the tick budget
    TimedOut,
    /// The previous frame is still being written; this one was dropped
    Busy,
    Disconnected,
}

struct FrameJob {
    frame: Frame,
    done: oneshot::Sender<Result<(), DriverError>>,
}

/// Dedicated thread owning the LED driver
pub struct OutputWorker {
    jobs: Option<mpsc::Sender<FrameJob>>,
    /// Fires once the thread has blanked the LEDs and dropped the driver
    stopped: Option<oneshot::Receiver<()>>,
}

impl OutputWorker {
    /// Initialize `driver` and move it onto its own thread
    ///
    /// On shutdown the thread blanks `led_count` pixels and drops the driver.
    pub fn spawn<O: OutputDriver>(mut driver: O, led_count: usize) -> Result<Self, StartupError> {
        driver.init()?;

        let (jobs, mut rx) = mpsc::channel::<FrameJob>(1);
        let (stopped_tx, stopped) = oneshot::channel();
        // Detached: shutdown waits on `stopped`, never on a join.
        std::thread::Builder::new()
            .name("globe-output".into())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    let result = driver.write(&job.frame);
                    let _ = job.done.send(result);
                }

                let blank = vec![Rgb::default(); led_count];
                if let Err(e) = driver.write(&blank) {
                    tracing::warn!(error = %e, "failed to blank LEDs on shutdown");
                }
                drop(driver);
                tracing::debug!("output worker stopped, driver released");
                let _ = stopped_tx.send(());
            })
            .map_err(StartupError::Worker)?;

        Ok(Self {
            jobs: Some(jobs),
            stopped: Some(stopped),
        })
    }

    /// Hand `frame` to the driver and wait at most `timeout` for the write
    pub async fn submit(&self, frame: Frame, timeout: Duration) -> WriteOutcome {
        let Some(jobs) = &self.jobs else {
            return WriteOutcome::Disconnected;
        };

        let (done, result) = oneshot::channel();
        match jobs.try_send(FrameJob { frame, done }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => return WriteOutcome::Busy,
            Err(TrySendError::Closed(_)) => return WriteOutcome::Disconnected,
        }

        match tokio::time::timeout(timeout, result).await {
            Ok(Ok(Ok(()))) => WriteOutcome::Written,
            Ok(Ok(Err(e))) => WriteOutcome::Failed(e),
            Ok(Err(_)) => WriteOutcome::Disconnected,
            Err(_) => WriteOutcome::TimedOut,
        }
    }

    /// Close the frame channel and wait up to `grace` for the thread to
    /// blank the LEDs and release the driver
    ///
    /// A thread still stuck in the driver after `grace` is left behind;
    /// nothing on the runtime keeps waiting for it.
    pub async fn shutdown(mut self, grace: Duration) {
        self.jobs.take();
        let Some(stopped) = self.stopped.take() else {
            return;
        };

        match tokio::time::timeout(grace, stopped).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => tracing::error!("output worker exited without releasing the driver"),
            Err(_) => tracing::warn!(?grace, "output worker did not stop in time, abandoning it"),
        }
    }
}
