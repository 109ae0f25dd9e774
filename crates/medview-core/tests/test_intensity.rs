mod common;

use approx::assert_abs_diff_eq;

use medview_core::annotation::NoText;
use medview_core::calibration::Calibration;
use medview_core::geometry::Point;
use medview_core::intensity::{sample, IntensityReading, Modality, Rescale, SampleGrid};
use medview_core::session::{DecodedSlice, ViewerEvent};

use common::{move_to, ramp_grid, session_with_slice};

const CT_RESCALE: Rescale = Rescale {
    slope: 1.0,
    intercept: -1024.0,
};

#[test]
fn test_sample_applies_rescale() {
    let grid = ramp_grid(4, 3, CT_RESCALE);
    // raw value at (2, 1) is 1 * 4 + 2 = 6
    assert_eq!(grid.sample(Point::new(2.0, 1.0)), IntensityReading::Value(-1018.0));
    assert_eq!(grid.sample(Point::new(2.0, 1.0)).to_string(), "HU: -1018");
}

#[test]
fn test_sample_truncates_coordinates() {
    let grid = ramp_grid(4, 3, Rescale::default());
    assert_eq!(grid.sample(Point::new(1.9, 0.99)), IntensityReading::Value(1.0));
}

#[test]
fn test_sample_outside_image_is_unavailable() {
    let grid = ramp_grid(4, 3, Rescale::default());
    for at in [
        Point::new(-1.5, 0.0),
        Point::new(4.0, 0.0),
        Point::new(0.0, 3.0),
        Point::new(f64::NAN, 1.0),
    ] {
        assert_eq!(grid.sample(at), IntensityReading::Unavailable);
    }
    assert_eq!(IntensityReading::Unavailable.to_string(), "HU: -");
}

#[test]
fn test_sample_past_buffer_end_is_unavailable() {
    // Declared 4x4 but only 10 samples present.
    let pixels: Vec<i16> = (0..10).collect();
    let reading = sample(
        &pixels,
        4,
        4,
        &Modality::Ct,
        Rescale::default(),
        Point::new(3.0, 3.0),
    );
    assert_eq!(reading, IntensityReading::Unavailable);
}

#[test]
fn test_non_ct_is_not_applicable_everywhere() {
    let pixels = vec![100u16; 16];
    let mr = Modality::from_code("MR");
    for at in [Point::new(1.0, 1.0), Point::new(-5.0, 2.0), Point::new(99.0, 99.0)] {
        let reading = sample(&pixels, 4, 4, &mr, Rescale::default(), at);
        assert_eq!(reading, IntensityReading::NotApplicable);
        assert_eq!(reading.to_string(), "HU: N/A (Not CT)");
    }
}

#[test]
fn test_fractional_rescale_rounds_for_display() {
    let grid = SampleGrid::new(
        1,
        1,
        vec![3],
        Modality::Ct,
        Rescale {
            slope: 0.5,
            intercept: 0.0,
        },
    )
    .unwrap();
    let reading = grid.sample(Point::ZERO);
    assert_abs_diff_eq!(
        match reading {
            IntensityReading::Value(v) => v,
            _ => f64::NAN,
        },
        1.5
    );
    assert_eq!(reading.rounded(), Some(2));
}

#[test]
fn test_zero_sized_grid_is_rejected() {
    assert!(SampleGrid::new(0, 4, Vec::new(), Modality::Ct, Rescale::default()).is_err());
}

#[test]
fn test_pointer_move_reports_position_and_intensity() {
    let mut session = session_with_slice(1, Calibration::default());
    let events = session.handle_event(move_to(7.6, 2.2), &mut NoText);
    let ViewerEvent::CursorReadout(readout) = &events[0] else {
        panic!("expected a cursor readout");
    };
    assert_eq!(readout.position_text(), "Position: (7, 2)");
    assert_eq!(readout.intensity, Some(IntensityReading::Value(207.0)));
}

#[test]
fn test_readout_without_samples_has_no_intensity() {
    let mut session = session_with_slice(1, Calibration::default());
    session.slice_decoded(DecodedSlice::bare(100, 100));
    let events = session.handle_event(move_to(1.0, 1.0), &mut NoText);
    assert_eq!(
        events,
        vec![ViewerEvent::CursorReadout(medview_core::session::CursorReadout {
            position: Point::new(1.0, 1.0),
            intensity: None,
        })]
    );
}
