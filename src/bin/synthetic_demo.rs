//! Track a synthetic blue square moving around a dark frame.
//!
//! Usage: `synthetic_demo [config.toml]`

use std::convert::Infallible;
use std::env;
use std::path::Path;
use std::time::Duration;

use colortrack_rs::{
    ColorRegionSource, Frame, FrameSource, LogSink, OutlineRenderer, OverlayRenderer,
    TrackerConfig, TrackerPipeline, TrackingSession,
};
use tracing::{debug, error, info};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const SIDE: u32 = 150;

/// Waypoints of the square's top-left corner; `None` hides it.
const PATH: &[Option<(u32, u32)>] = &[
    Some((60, 160)),
    Some((80, 170)),
    Some((300, 160)),
    Some((300, 300)),
    Some((300, 40)),
    None,
    Some((420, 160)),
    Some((200, 160)),
];

/// Holds each waypoint for a few frames so that the path reads like motion.
struct SyntheticCamera {
    frame_number: u64,
    frames_per_step: u64,
}

impl SyntheticCamera {
    fn render(&self) -> Frame {
        let step = (self.frame_number / self.frames_per_step) as usize % PATH.len();
        let mut frame = Frame::filled(WIDTH, HEIGHT, [20, 20, 20], self.frame_number);
        frame.timestamp = Duration::from_millis(self.frame_number * 16);

        if let Some((sx, sy)) = PATH[step] {
            for y in sy..(sy + SIDE).min(HEIGHT) {
                let row = (y * WIDTH) as usize;
                for x in sx..(sx + SIDE).min(WIDTH) {
                    let i = (row + x as usize) * 3;
                    frame.data[i..i + 3].copy_from_slice(&[0, 0, 255]);
                }
            }
        }
        frame
    }
}

impl FrameSource for SyntheticCamera {
    type Error = Infallible;

    fn grab(&mut self) -> Result<Option<Frame>, Self::Error> {
        let frame = self.render();
        self.frame_number += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        info!(frames = self.frame_number, "synthetic camera released");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colortrack_rs=info,synthetic_demo=info".into()),
        )
        .init();

    let config = match env::args().nth(1) {
        Some(path) => match TrackerConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                error!(%err, "could not load config");
                std::process::exit(1);
            }
        },
        None => TrackerConfig::default(),
    };
    info!(?config, "configuration loaded");

    let source = ColorRegionSource::new(&config.preprocess);
    info!("{}", source.preprocessor().range());

    let camera = SyntheticCamera {
        frame_number: 0,
        frames_per_step: 4,
    };
    let pipeline = TrackerPipeline::new(source, &config);
    let mut renderer = OutlineRenderer::default();

    let mut handle = TrackingSession::new(camera, pipeline, LogSink, &config)
        .with_observer(move |frame, report| {
            if let Some(bbox) = report.accepted() {
                renderer.render(frame, &bbox);
                debug!(frame = frame.frame_number, ?bbox, "accepted region");
            }
        })
        .spawn();

    let run_for = config.tick_interval() * (PATH.len() as u32 * 4 * 2);
    tokio::time::sleep(run_for).await;

    match handle.stop().await {
        Ok(report) => info!(?report, "done"),
        Err(err) => error!(%err, "stop failed"),
    }
}
