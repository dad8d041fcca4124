use colortrack_rs::{
    ColorRegionSource, Direction, Frame, OutlineRenderer, OverlayRenderer, RegionSource,
    TrackerConfig, TrackerPipeline,
};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 400;
const SIDE: u32 = 150;

/// Dark frame with an optional blue square at `(x, y)`.
fn scene(square: Option<(u32, u32)>, frame_number: u64) -> Frame {
    let mut frame = Frame::filled(WIDTH, HEIGHT, [20, 20, 20], frame_number);
    if let Some((sx, sy)) = square {
        for y in sy..sy + SIDE {
            for x in sx..sx + SIDE {
                let i = ((y * WIDTH + x) * 3) as usize;
                frame.data[i..i + 3].copy_from_slice(&[0, 0, 255]);
            }
        }
    }
    frame
}

#[test]
fn test_color_source_finds_square() {
    let mut source = ColorRegionSource::default();
    let frame = scene(Some((100, 120)), 0);

    let regions = source.regions(&frame.data, frame.width, frame.height).unwrap();
    assert_eq!(regions.len(), 1);

    let bbox = regions[0];
    assert!(bbox.width > 100 && bbox.width < 300, "{bbox:?}");
    assert!(bbox.height > 100 && bbox.height < 300, "{bbox:?}");
    assert!((bbox.x - 100).abs() <= 20, "{bbox:?}");
    assert!((bbox.y - 120).abs() <= 20, "{bbox:?}");
}

#[test]
fn test_empty_scene_has_no_regions() {
    let mut source = ColorRegionSource::default();
    let frame = scene(None, 0);
    let regions = source.regions(&frame.data, frame.width, frame.height).unwrap();
    assert!(regions.is_empty());
}

#[test]
fn test_moving_square_end_to_end() {
    let config = TrackerConfig::default();
    let mut pipeline = TrackerPipeline::new(ColorRegionSource::new(&config.preprocess), &config);
    let mut events: Vec<Direction> = Vec::new();

    let script = [
        Some((40, 200)),  // baseline
        Some((220, 200)), // moved right by 180
        Some((230, 210)), // jitter inside the dead zone
        Some((230, 40)),  // moved up by 170
        None,             // lost
        Some((40, 40)),   // re-acquired, no event
    ];

    let mut accepted = 0;
    for (n, square) in script.iter().enumerate() {
        let frame = scene(*square, n as u64);
        let report = pipeline
            .process_frame(&frame.data, frame.width, frame.height, &mut events)
            .unwrap();
        accepted += usize::from(report.accepted().is_some());
    }

    assert_eq!(accepted, 5);
    assert_eq!(events, vec![Direction::Left, Direction::Up]);
}

#[test]
fn test_overlay_on_accepted_box() {
    let config = TrackerConfig::default();
    let mut pipeline = TrackerPipeline::new(ColorRegionSource::new(&config.preprocess), &config);
    let mut events: Vec<Direction> = Vec::new();
    let mut frame = scene(Some((100, 100)), 0);

    let report = pipeline
        .process_frame(&frame.data, frame.width, frame.height, &mut events)
        .unwrap();
    let bbox = report.accepted().unwrap();

    OutlineRenderer::default().render(&mut frame, &bbox);

    let i = ((bbox.y as u32 * WIDTH + bbox.x as u32) * 3) as usize;
    assert_eq!(&frame.data[i..i + 3], &[255, 0, 0]);
}
