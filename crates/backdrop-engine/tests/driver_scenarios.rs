use std::time::{Duration, Instant};

use backdrop_core::{AnimationKind, SceneConfig, Theme, TimingMode};
use backdrop_engine::{
    DrawLog, DrawOp, FrameDriver, PixelCanvas, ResizableSurface, Rotator, Surface, Viewport,
};

fn frames<S: ResizableSurface>(driver: &mut FrameDriver<S>, start: Instant, n: u64) {
    for i in 0..n {
        assert!(driver.on_frame(start + Duration::from_millis(i * 16)));
    }
}

#[test]
fn test_starfield_to_bubbles_swap_drops_star_state() {
    let scene = SceneConfig::default();
    let palette = Theme::Classic.palette();
    let mut driver = FrameDriver::with_seed(DrawLog::default(), scene.clone(), palette, 3);
    driver
        .start(AnimationKind::Starfield, Viewport::new(320, 180))
        .unwrap();
    frames(&mut driver, Instant::now(), 3);

    driver.swap(AnimationKind::Bubbles).unwrap();
    let active = driver.active().unwrap();
    assert_eq!(active.kind(), AnimationKind::Bubbles);
    assert_eq!(active.entity_count(), scene.bubbles as usize);
    assert_eq!(driver.registered_callbacks(), 1);

    let ops_before = driver.surface().ops().len();
    assert!(driver.on_frame(Instant::now()));
    let frame = &driver.surface().ops()[ops_before..];
    let radii: Vec<f32> = frame
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillCircle { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii.len(), scene.bubbles as usize);
    // Stars never exceed 1.5; every circle here belongs to a bubble.
    assert!(radii.iter().all(|r| *r >= 5.0));
}

#[test]
fn test_headless_pixel_run_every_kind() {
    let mut driver = FrameDriver::with_seed(
        PixelCanvas::default(),
        SceneConfig::default(),
        Theme::Cosmic.palette(),
        11,
    );
    driver.set_timing(TimingMode::Elapsed);
    let viewport = Viewport::from_cells(60, 20);
    for kind in AnimationKind::ALL {
        driver.start(kind, viewport).unwrap();
        frames(&mut driver, Instant::now(), 10);
        assert_eq!(driver.surface().width(), 60.0);
        assert_eq!(driver.surface().height(), 40.0);
        assert_eq!(driver.registered_callbacks(), 1);
    }
    driver.stop();
    assert_eq!(driver.registered_callbacks(), 0);
}

#[test]
fn test_round_robin_rotation_through_driver() {
    let rotator = Rotator::default();
    let mut driver = FrameDriver::with_seed(
        DrawLog::default(),
        SceneConfig::default(),
        Theme::Ocean.palette(),
        5,
    );
    driver
        .start(rotator.kind_at(0), Viewport::new(200, 100))
        .unwrap();

    let mut index = 0;
    let mut seen = vec![driver.active_kind().unwrap()];
    for _ in 1..rotator.catalog().len() {
        index = rotator.pick_next_round_robin(index);
        driver.swap(rotator.kind_at(index)).unwrap();
        assert!(driver.on_frame(Instant::now()));
        seen.push(driver.active_kind().unwrap());
        assert_eq!(driver.registered_callbacks(), 1);
    }
    assert_eq!(seen, AnimationKind::ALL.to_vec());
}
