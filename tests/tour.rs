//! End-to-end tour over the public API: input events in, stops and camera
//! poses out.

use glam::Vec2;
use isle::input::{InputEvent, InputProcessor, MouseButton};
use isle::timeline::{EntryContent, RecordingPanel, RingPlacement};
use isle::tour::{parse_script, TourRunner};
use isle::{IsleCommand, IsleEngine, IsleError, Options, Timeline};
use web_time::{Duration, Instant};

fn seeded_options() -> Options {
    let mut options = Options::default();
    options.scene.seed = Some(5);
    options.navigation.intro_delay_ms = None;
    options
}

#[test]
fn scripted_tour_visits_stops_in_order() {
    let t0 = Instant::now();
    let mut engine = IsleEngine::with_builtin_timeline(seeded_options(), t0).unwrap();
    let mut panel = RecordingPanel::new();
    let mut runner = TourRunner::new(60, t0);

    let steps = parse_script("next wait:1100 next wait:1100 prev wait:1100 goto:11 wait:1100 next").unwrap();
    runner.run(&mut engine, &mut panel, &steps);
    runner.run_for(&mut engine, &mut panel, Duration::from_millis(1100));

    let titles: Vec<&str> = panel.shown().iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(titles.len(), 5);
    assert_eq!(titles[0], titles[2]);
    assert_eq!(engine.current_index(), 0);
    assert_eq!(panel.current_title(), Some("Foundation"));
    let last = runner.last_frame().unwrap();
    assert!(!last.flying);
    assert_eq!(last.current_index, 0);
}

#[test]
fn rejected_goto_keeps_the_tour_going() {
    let t0 = Instant::now();
    let mut engine = IsleEngine::with_builtin_timeline(seeded_options(), t0).unwrap();
    let mut panel = RecordingPanel::new();
    let mut runner = TourRunner::new(30, t0);

    let steps = parse_script("goto:-3, goto:40, next").unwrap();
    runner.run(&mut engine, &mut panel, &steps);
    assert_eq!(panel.shown().len(), 1);
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn custom_timeline_from_toml() {
    let source = r#"
[[entry]]
title = "Dawn"
description = "First light."

[[entry]]
title = "Dusk"
content = "Last light."
"#;
    let timeline = Timeline::from_toml_str(source, RingPlacement::default()).unwrap();
    assert_eq!(timeline.len(), 2);

    let t0 = Instant::now();
    let mut engine = IsleEngine::new(seeded_options(), timeline, t0);
    let mut panel = RecordingPanel::new();
    engine.execute(IsleCommand::Prev, &mut panel, t0).unwrap();
    assert_eq!(panel.shown()[0], ("Dusk".to_owned(), "Last light.".to_owned()));
    assert_eq!(engine.layout().houses.len(), 2);
}

#[test]
fn empty_timeline_is_refused() {
    let err = Timeline::on_ring(Vec::<EntryContent>::new(), RingPlacement::default()).unwrap_err();
    assert!(matches!(err, IsleError::EmptyTimeline));
}

#[test]
fn mouse_click_on_framed_house_flies_there() {
    let t0 = Instant::now();
    let mut options = seeded_options();
    options.scene.ring_radius = 20.0;
    let mut engine = IsleEngine::with_builtin_timeline(options, t0).unwrap();
    let mut input = InputProcessor::new();
    let mut panel = RecordingPanel::new();

    let mut feed = |engine: &mut IsleEngine, panel: &mut RecordingPanel, event, now| {
        if let Some(cmd) = input.handle_event(event) {
            let _ = engine.execute(cmd, panel, now);
        }
    };

    feed(&mut engine, &mut panel, InputEvent::Resized { width: 800, height: 600 }, t0);
    engine.execute(IsleCommand::Goto { index: 4 }, &mut panel, t0).unwrap();
    let t1 = t0 + Duration::from_millis(1200);
    let _ = engine.update(&mut panel, t1);
    engine.execute(IsleCommand::Next, &mut panel, t1).unwrap();
    assert_eq!(engine.current_index(), 5);

    // Mid-flight the camera is still near stop 4; a drag must not pick.
    feed(&mut engine, &mut panel, InputEvent::CursorMoved { x: 400.0, y: 300.0 }, t1);
    feed(&mut engine, &mut panel, InputEvent::MouseButton { button: MouseButton::Left, pressed: true }, t1);
    feed(&mut engine, &mut panel, InputEvent::CursorMoved { x: 440.0, y: 300.0 }, t1);
    feed(&mut engine, &mut panel, InputEvent::MouseButton { button: MouseButton::Left, pressed: false }, t1);
    assert_eq!(engine.current_index(), 5);

    // Once landed, stop 5 sits at the centre of the view; a still click
    // selects it again.
    let t2 = t1 + Duration::from_millis(1200);
    let _ = engine.update(&mut panel, t2);
    let visits = engine.navigator().visits();
    feed(&mut engine, &mut panel, InputEvent::CursorMoved { x: 400.0, y: 300.0 }, t2);
    feed(&mut engine, &mut panel, InputEvent::MouseButton { button: MouseButton::Left, pressed: true }, t2);
    feed(&mut engine, &mut panel, InputEvent::MouseButton { button: MouseButton::Left, pressed: false }, t2);
    assert_eq!(engine.navigator().visits(), visits + 1);
    assert_eq!(engine.current_index(), 5);
}

#[test]
fn key_bindings_drive_navigation() {
    let t0 = Instant::now();
    let mut engine = IsleEngine::with_builtin_timeline(seeded_options(), t0).unwrap();
    let input = InputProcessor::new();
    let mut panel = RecordingPanel::new();

    for key in ["ArrowRight", "KeyD", "ArrowLeft", "Home", "F5"] {
        if let Some(cmd) = input.handle_key_press(key) {
            engine.execute(cmd, &mut panel, t0).unwrap();
        }
    }
    assert_eq!(panel.shown().len(), 4);
    assert_eq!(engine.current_index(), 0);

    // Orbit input after landing moves the camera.
    let landed = engine.update(&mut panel, t0 + Duration::from_secs(2));
    engine
        .execute(IsleCommand::RotateCamera { delta: Vec2::new(200.0, 0.0) }, &mut panel, t0)
        .unwrap();
    let mut frame = landed;
    for i in 1..=30 {
        frame = engine.update(&mut panel, t0 + Duration::from_secs(2) + Duration::from_millis(16 * i));
    }
    assert!((frame.pose.eye - landed.pose.eye).length() > 1e-2);
}
