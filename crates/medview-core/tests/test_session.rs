mod common;

use std::time::Instant;

use approx::assert_abs_diff_eq;

use medview_core::annotation::NoText;
use medview_core::calibration::Calibration;
use medview_core::config::{ViewerConfig, WindowLevel};
use medview_core::error::MedviewError;
use medview_core::geometry::Point;
use medview_core::session::{
    DecodedSlice, InputEvent, Key, Modifiers, SliceSource, ViewerCommand, ViewerEvent,
    ViewerSession,
};

use common::{move_to, session_with_slice, slice_changes};

fn wheel(delta: f64, modifiers: Modifiers) -> InputEvent {
    InputEvent::Wheel {
        pos: Point::new(30.0, 40.0),
        delta,
        modifiers,
    }
}

fn key(key: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::Key { key, modifiers }
}

/// Source with per-slice spacing `index + 1`.
struct SpacingSource(usize);

impl SliceSource for SpacingSource {
    fn len(&self) -> usize {
        self.0
    }

    fn decode(&mut self, index: usize) -> medview_core::error::Result<DecodedSlice> {
        if index >= self.0 {
            return Err(MedviewError::SliceIndexOutOfRange {
                index,
                total: self.0,
            });
        }
        let spacing = (index + 1) as f64;
        Ok(DecodedSlice {
            calibration: Calibration::new(spacing, spacing),
            ..DecodedSlice::bare(32, 32)
        })
    }
}

// ---------------------------------------------------------------------------
// Slice navigation
// ---------------------------------------------------------------------------

#[test]
fn test_wheel_steps_slices_and_clamps() {
    let mut session = session_with_slice(3, Calibration::default());
    let mut seen = Vec::new();
    for delta in [-120.0, -120.0, -120.0, 120.0, 120.0, 120.0] {
        seen.extend(slice_changes(
            &session.handle_event(wheel(delta, Modifiers::NONE), &mut NoText),
        ));
    }
    assert_eq!(seen, vec![1, 2, 1, 0]);
    assert_eq!(session.current_slice(), 0);
}

#[test]
fn test_arrow_keys_step_slices() {
    let mut session = session_with_slice(3, Calibration::default());
    session.handle_event(key(Key::Down, Modifiers::NONE), &mut NoText);
    session.handle_event(key(Key::Down, Modifiers::NONE), &mut NoText);
    assert_eq!(session.current_slice(), 2);
    session.handle_event(key(Key::Up, Modifiers::NONE), &mut NoText);
    assert_eq!(session.current_slice(), 1);
}

#[test]
fn test_select_slice_is_clamped() {
    let mut session = session_with_slice(4, Calibration::default());
    let events = session.select_slice(99).unwrap();
    assert_eq!(
        events,
        vec![ViewerEvent::SliceChanged { index: 3, total: 4 }]
    );
    assert!(session.select_slice(3).unwrap().is_empty());
}

#[test]
fn test_select_slice_on_empty_series_fails() {
    let mut session = ViewerSession::default();
    session.load_series(0);
    assert!(matches!(
        session.select_slice(0),
        Err(MedviewError::EmptySeries)
    ));
}

#[test]
fn test_decode_current_updates_calibration() {
    let mut source = SpacingSource(3);
    let mut session = ViewerSession::default();
    session.load_series(source.len());
    session.select_slice(2).unwrap();
    session.decode_current(&mut source).unwrap();
    assert_eq!(session.calibration(), Calibration::new(3.0, 3.0));
    assert!(source.decode(3).is_err());
}

#[test]
fn test_load_series_resets_transform() {
    let mut session = session_with_slice(2, Calibration::default());
    let now = Instant::now();
    session.execute(ViewerCommand::ZoomIn, now).unwrap();
    session.execute(ViewerCommand::RotateLeft, now).unwrap();
    session.execute(ViewerCommand::PlayCine, now).unwrap();
    let events = session.load_series(5);
    assert!(session.transform().is_identity());
    assert!(!session.is_cine_running());
    assert_eq!(slice_changes(&events), vec![0]);
}

// ---------------------------------------------------------------------------
// Zoom and keyboard shortcuts
// ---------------------------------------------------------------------------

#[test]
fn test_ctrl_wheel_zooms_at_cursor() {
    let mut session = session_with_slice(3, Calibration::default());
    let cursor = Point::new(30.0, 40.0);
    let before = session.to_image(cursor);
    let events = session.handle_event(wheel(120.0, Modifiers::CTRL), &mut NoText);
    assert!(slice_changes(&events).is_empty());
    assert_abs_diff_eq!(session.transform().scale, 1.1, epsilon = 1e-12);
    let after = session.to_image(cursor);
    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-9);
    assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-9);
}

#[test]
fn test_keyboard_zoom_and_reset() {
    let mut session = session_with_slice(1, Calibration::default());
    session.handle_event(key(Key::Plus, Modifiers::CTRL), &mut NoText);
    session.handle_event(key(Key::Plus, Modifiers::CTRL), &mut NoText);
    session.handle_event(key(Key::Minus, Modifiers::CTRL), &mut NoText);
    assert_abs_diff_eq!(session.transform().scale, 1.2, epsilon = 1e-12);
    // Without Ctrl the zoom keys do nothing.
    assert!(session
        .handle_event(key(Key::Plus, Modifiers::NONE), &mut NoText)
        .is_empty());
    session.handle_event(key(Key::R, Modifiers::CTRL), &mut NoText);
    assert!(session.transform().is_identity());
}

#[test]
fn test_fit_to_view_uses_view_and_content_size() {
    let mut session = session_with_slice(1, Calibration::default());
    session.set_view_size(400.0, 300.0);
    session
        .execute(ViewerCommand::FitToView, Instant::now())
        .unwrap();
    assert_abs_diff_eq!(session.transform().scale, 3.0 * 0.95, epsilon = 1e-12);
}

#[test]
fn test_rotated_view_maps_pointer_into_image() {
    let mut session = session_with_slice(1, Calibration::default());
    session
        .execute(ViewerCommand::FlipHorizontal, Instant::now())
        .unwrap();
    // 100 px wide content mirrored about x = 50.
    let events = session.handle_event(move_to(10.0, 20.0), &mut NoText);
    let ViewerEvent::CursorReadout(readout) = &events[0] else {
        panic!("expected a cursor readout");
    };
    assert_abs_diff_eq!(readout.position.x, 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(readout.position.y, 20.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Window/level
// ---------------------------------------------------------------------------

#[test]
fn test_presets_change_window_level() {
    let mut session = session_with_slice(1, Calibration::default());
    assert_eq!(session.window_level(), WindowLevel::new(400.0, 40.0));
    let events = session
        .execute(
            ViewerCommand::ApplyPreset {
                name: "Bone".to_string(),
            },
            Instant::now(),
        )
        .unwrap();
    assert_eq!(
        events,
        vec![ViewerEvent::WindowLevelChanged(WindowLevel::new(2000.0, 300.0))]
    );
}

#[test]
fn test_unknown_preset_is_an_error() {
    let mut session = session_with_slice(1, Calibration::default());
    let result = session.apply_preset("Sinus");
    assert!(matches!(result, Err(MedviewError::UnknownPreset(_))));
    assert_eq!(session.window_level(), WindowLevel::new(400.0, 40.0));
}

#[test]
fn test_window_width_is_clamped() {
    let mut session = session_with_slice(1, Calibration::default());
    session.set_window_level(WindowLevel::new(0.0, 40.0));
    assert_eq!(session.window_level(), WindowLevel::new(1.0, 40.0));

    let events = session
        .execute(
            ViewerCommand::SetWindowLevel {
                width: -200.0,
                center: -600.0,
            },
            Instant::now(),
        )
        .unwrap();
    assert_eq!(
        events,
        vec![ViewerEvent::WindowLevelChanged(WindowLevel::new(1.0, -600.0))]
    );

    let config = ViewerConfig::from_toml_str("[window]\nwidth = 0.0\ncenter = 40.0\n").unwrap();
    assert_eq!(ViewerSession::new(config).window_level().width, 1.0);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_file_drives_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.toml");
    std::fs::write(
        &path,
        "zoom_step = 2.0\nshow_intensity = false\n\n[window]\nwidth = 80.0\ncenter = 40.0\n",
    )
    .unwrap();
    let config = ViewerConfig::load(&path).unwrap();
    let mut session = ViewerSession::new(config);
    session.load_series(1);
    session.slice_decoded(DecodedSlice {
        samples: Some(common::ramp_grid(
            10,
            10,
            medview_core::intensity::Rescale::default(),
        )),
        ..DecodedSlice::bare(10, 10)
    });

    assert_eq!(session.window_level(), WindowLevel::new(80.0, 40.0));
    session.execute(ViewerCommand::ZoomIn, Instant::now()).unwrap();
    assert_eq!(session.transform().scale, 2.0);
    let events = session.handle_event(move_to(1.0, 1.0), &mut NoText);
    let ViewerEvent::CursorReadout(readout) = &events[0] else {
        panic!("expected a cursor readout");
    };
    assert!(readout.intensity.is_none());
}

#[test]
fn test_malformed_config_is_reported() {
    assert!(matches!(
        ViewerConfig::from_toml_str("zoom_step = \"big\""),
        Err(MedviewError::Config(_))
    ));
}
