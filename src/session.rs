//! Periodic frame processing on a tokio task.
//!
//! A session grabs a frame from a [`FrameSource`] on every tick, runs it
//! through a [`TrackerPipeline`] and reports directions to a sink. Only one
//! frame is ever in flight: a tick whose deadline falls before the previous
//! frame finished is dropped, never queued, so grabs stay on tick boundaries.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::config::TrackerConfig;
use crate::error::SessionError;
use crate::integration::{DirectionSink, Frame, RegionSource, TrackerPipeline};
use crate::tracker::FrameReport;

/// Provider of raw frames, typically a camera.
pub trait FrameSource {
    type Error: fmt::Display;

    /// Grab the next frame. `Ok(None)` means nothing is available right now.
    fn grab(&mut self) -> Result<Option<Frame>, Self::Error>;

    /// Free the underlying device. Called exactly once per session.
    fn release(&mut self);
}

/// Called after each processed frame, e.g. to draw and display it.
pub type FrameObserver = Box<dyn FnMut(&mut Frame, &FrameReport) + Send>;

struct SourceSlot<F> {
    source: F,
    released: bool,
}

/// Frame source shared between the session task and its handle.
///
/// The lock is only held while grabbing or releasing, so a release never
/// waits on frame processing, and no grab can follow a release.
struct SharedSource<F> {
    slot: Mutex<SourceSlot<F>>,
}

impl<F: FrameSource> SharedSource<F> {
    fn new(source: F) -> Self {
        Self {
            slot: Mutex::new(SourceSlot {
                source,
                released: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SourceSlot<F>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `None` once the source has been released.
    fn grab(&self) -> Option<Result<Option<Frame>, F::Error>> {
        let mut slot = self.lock();
        if slot.released {
            return None;
        }
        Some(slot.source.grab())
    }

    fn release_once(&self) -> bool {
        let mut slot = self.lock();
        if slot.released {
            return false;
        }
        slot.released = true;
        slot.source.release();
        true
    }
}

/// Summary of a stopped session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopReport {
    /// Whether the in-flight frame, if any, finished within the stop timeout.
    pub completed_in_time: bool,
    pub frames_processed: u64,
}

/// Builder for a running session.
pub struct TrackingSession<F, R, S>
where
    R: RegionSource,
{
    source: F,
    pipeline: TrackerPipeline<R>,
    sink: S,
    tick_interval: Duration,
    stop_timeout: Duration,
    observer: Option<FrameObserver>,
}

impl<F, R, S> TrackingSession<F, R, S>
where
    F: FrameSource + Send + 'static,
    R: RegionSource + Send + 'static,
    R::Error: fmt::Display,
    S: DirectionSink + Send + 'static,
{
    pub fn new(source: F, pipeline: TrackerPipeline<R>, sink: S, config: &TrackerConfig) -> Self {
        Self {
            source,
            pipeline,
            sink,
            tick_interval: config.tick_interval(),
            stop_timeout: config.stop_timeout(),
            observer: None,
        }
    }

    /// Install a per-frame observer for rendering or display.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: FnMut(&mut Frame, &FrameReport) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Shorthand for `new(..).start()`.
    pub fn start(
        source: F,
        pipeline: TrackerPipeline<R>,
        sink: S,
        config: &TrackerConfig,
    ) -> SessionHandle<F> {
        Self::new(source, pipeline, sink, config).spawn()
    }

    /// Spawn the processing task. Must be called from within a tokio runtime.
    ///
    /// Ticks and the stop signal are handled on the async side; each frame is
    /// grabbed and processed on the blocking pool so slow frames never stall
    /// the runtime's timers.
    pub fn spawn(self) -> SessionHandle<F> {
        let TrackingSession {
            source,
            pipeline,
            sink,
            tick_interval,
            stop_timeout,
            observer,
        } = self;

        let shared = Arc::new(SharedSource::new(source));
        let frames = Arc::new(AtomicU64::new(0));
        let (stop_tx, mut stop_rx) = watch::channel(false);

        info!(?tick_interval, "starting tracking session");

        let task = {
            let shared = Arc::clone(&shared);
            let frames = Arc::clone(&frames);
            let mut worker = FrameWorker {
                pipeline,
                sink,
                observer,
            };
            tokio::spawn(async move {
                let mut ticker = time::interval(tick_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                let mut last_frame_done: Option<Instant> = None;

                loop {
                    let deadline = tokio::select! {
                        biased;
                        _ = stop_rx.changed() => break,
                        deadline = ticker.tick() => deadline,
                    };

                    if last_frame_done.is_some_and(|done| deadline < done) {
                        debug!("tick fired during the previous frame, dropped");
                        continue;
                    }

                    let job = {
                        let shared = Arc::clone(&shared);
                        let frames = Arc::clone(&frames);
                        task::spawn_blocking(move || {
                            let live = worker.step(&shared, &frames);
                            (worker, live)
                        })
                    };
                    let (returned, live) = match job.await {
                        Ok(done) => done,
                        Err(err) => {
                            error!(%err, "frame worker panicked, ending session");
                            return;
                        }
                    };
                    worker = returned;
                    last_frame_done = Some(Instant::now());

                    if !live {
                        break;
                    }
                }

                worker.pipeline.tracker_mut().reset();
                debug!("session task finished");
            })
        };

        SessionHandle {
            shared,
            frames,
            stop_tx,
            task: Some(task),
            stop_timeout,
        }
    }
}

/// State moved onto the blocking pool for one frame, then handed back.
struct FrameWorker<R: RegionSource, S> {
    pipeline: TrackerPipeline<R>,
    sink: S,
    observer: Option<FrameObserver>,
}

impl<R, S> FrameWorker<R, S>
where
    R: RegionSource,
    R::Error: fmt::Display,
    S: DirectionSink,
{
    /// Grab and process one frame. Returns `false` once the source is released.
    fn step<F: FrameSource>(&mut self, source: &SharedSource<F>, frames: &AtomicU64) -> bool {
        let mut frame = match source.grab() {
            None => return false,
            Some(Ok(Some(frame))) => frame,
            Some(Ok(None)) => {
                debug!("no frame available");
                return true;
            }
            Some(Err(err)) => {
                error!(%err, "failed to grab frame");
                return true;
            }
        };

        match self
            .pipeline
            .process_frame(&frame.data, frame.width, frame.height, &mut self.sink)
        {
            Ok(report) => {
                frames.fetch_add(1, Ordering::Relaxed);
                if let Some(observer) = self.observer.as_mut() {
                    observer(&mut frame, &report);
                }
            }
            Err(err) => {
                error!(%err, frame = frame.frame_number, "failed to process frame");
            }
        }
        true
    }
}

/// Control handle of a running session.
pub struct SessionHandle<F: FrameSource> {
    shared: Arc<SharedSource<F>>,
    frames: Arc<AtomicU64>,
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    stop_timeout: Duration,
}

impl<F: FrameSource> SessionHandle<F> {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Stop scheduling, wait up to the stop timeout for the in-flight frame,
    /// then release the frame source whether or not the wait timed out.
    pub async fn stop(&mut self) -> Result<StopReport, SessionError> {
        let mut task = self.task.take().ok_or(SessionError::AlreadyStopped)?;

        let _ = self.stop_tx.send(true);

        let completed_in_time = match time::timeout(self.stop_timeout, &mut task).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                error!(%err, "session task failed");
                true
            }
            Err(_) => {
                warn!(
                    timeout = ?self.stop_timeout,
                    "in-flight frame still running, releasing source anyway"
                );
                false
            }
        };

        self.shared.release_once();

        let report = StopReport {
            completed_in_time,
            frames_processed: self.frames_processed(),
        };
        info!(frames = report.frames_processed, "tracking session stopped");
        Ok(report)
    }
}

impl<F: FrameSource> Drop for SessionHandle<F> {
    fn drop(&mut self) {
        if self.task.take().is_some() {
            let _ = self.stop_tx.send(true);
            self.shared.release_once();
        }
    }
}
