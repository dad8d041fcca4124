//! Destinations for direction events.

use std::sync::mpsc;

use tokio::sync::mpsc as tokio_mpsc;
use tracing::{info, warn};

use crate::tracker::Direction;

/// Receives direction events synchronously, at most one per frame.
///
/// Reporting cannot fail from the tracker's point of view; a sink that
/// loses its consumer logs and drops the event.
pub trait DirectionSink {
    fn report(&mut self, direction: Direction);
}

impl<F> DirectionSink for F
where
    F: FnMut(Direction),
{
    fn report(&mut self, direction: Direction) {
        self(direction)
    }
}

/// Collects every event, in order.
impl DirectionSink for Vec<Direction> {
    fn report(&mut self, direction: Direction) {
        self.push(direction);
    }
}

impl DirectionSink for mpsc::Sender<Direction> {
    fn report(&mut self, direction: Direction) {
        if self.send(direction).is_err() {
            warn!(%direction, "direction receiver dropped");
        }
    }
}

impl DirectionSink for tokio_mpsc::UnboundedSender<Direction> {
    fn report(&mut self, direction: Direction) {
        if self.send(direction).is_err() {
            warn!(%direction, "direction receiver dropped");
        }
    }
}

/// Logs each event at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DirectionSink for LogSink {
    fn report(&mut self, direction: Direction) {
        info!(direction = direction.label(), "motion detected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut labels = Vec::new();
        let mut sink = |d: Direction| labels.push(d.label());
        sink.report(Direction::Left);
        sink.report(Direction::Up);
        assert_eq!(labels, ["Left", "Up"]);
    }

    #[test]
    fn test_std_channel_sink() {
        let (mut tx, rx) = mpsc::channel();
        tx.report(Direction::Down);
        assert_eq!(rx.try_recv(), Ok(Direction::Down));

        drop(rx);
        // Dropped receiver must not panic.
        tx.report(Direction::Right);
    }

    #[test]
    fn test_tokio_channel_sink() {
        let (mut tx, mut rx) = tokio_mpsc::unbounded_channel();
        tx.report(Direction::Right);
        assert_eq!(rx.try_recv(), Ok(Direction::Right));
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        LogSink.report(Direction::Up);
    }
}
