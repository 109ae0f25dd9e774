mod common;

use medview_core::annotation::{AnnotationCapture, AnnotationKind, NoText};
use medview_core::calibration::Calibration;
use medview_core::geometry::Point;
use medview_core::overlay::{OverlayGroup, OverlayRegistry, Primitive};
use medview_core::tools::Tool;

use common::{click_all, move_to, press, release, session_with_slice, ScriptedText};

fn stroke_points(overlays: &OverlayRegistry) -> Vec<Vec<Point>> {
    overlays
        .iter_group(OverlayGroup::Annotation)
        .filter_map(|(_, prim)| match prim {
            Primitive::Polyline { points, .. } => Some(points.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_freehand_drag_builds_one_stroke() {
    let mut session = session_with_slice(1, Calibration::default());
    session.activate(Tool::Annotate(AnnotationKind::Freehand));
    session.handle_event(press(1.0, 1.0), &mut NoText);
    session.handle_event(move_to(2.0, 2.0), &mut NoText);
    session.handle_event(move_to(3.0, 5.0), &mut NoText);
    session.handle_event(release(3.0, 5.0), &mut NoText);
    // Moves after release do not extend the finished stroke.
    session.handle_event(move_to(9.0, 9.0), &mut NoText);

    let strokes = stroke_points(session.overlays());
    assert_eq!(strokes.len(), 1);
    assert_eq!(
        strokes[0],
        vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 5.0)]
    );
    assert!(session.annotations().active_stroke().is_none());
    // Freehand stays armed for the next stroke.
    assert_eq!(session.active_tool(), Tool::Annotate(AnnotationKind::Freehand));
}

#[test]
fn test_leaving_freehand_keeps_open_stroke() {
    let mut session = session_with_slice(1, Calibration::default());
    session.activate(Tool::Annotate(AnnotationKind::Freehand));
    session.handle_event(press(1.0, 1.0), &mut NoText);
    session.handle_event(move_to(4.0, 4.0), &mut NoText);
    session.deactivate();
    assert!(session.annotations().active_stroke().is_none());
    assert_eq!(stroke_points(session.overlays()).len(), 1);
}

#[test]
fn test_arrow_two_clicks_then_deactivates() {
    let mut session = session_with_slice(1, Calibration::default());
    session.activate(Tool::Annotate(AnnotationKind::Arrow));
    click_all(&mut session, &mut NoText, &[(10.0, 10.0)]);
    assert_eq!(session.annotations().arrow_start(), Some(Point::new(10.0, 10.0)));
    assert_eq!(session.overlays().group_len(OverlayGroup::Annotation), 0);

    click_all(&mut session, &mut NoText, &[(40.0, 10.0)]);
    assert_eq!(session.overlays().group_len(OverlayGroup::Annotation), 2);
    assert_eq!(session.active_tool(), Tool::None);
    let head = session
        .overlays()
        .iter_group(OverlayGroup::Annotation)
        .find_map(|(_, prim)| match prim {
            Primitive::Polygon { points, .. } => Some(points.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(head.len(), 3);
    assert_eq!(head[0], Point::new(40.0, 10.0));
}

#[test]
fn test_text_places_label_and_deactivates() {
    let mut session = session_with_slice(1, Calibration::default());
    session.activate(Tool::Annotate(AnnotationKind::Text));
    let mut prompt = ScriptedText(vec!["lesion".to_string()]);
    click_all(&mut session, &mut prompt, &[(20.0, 30.0)]);

    let labels: Vec<_> = session
        .overlays()
        .iter_group(OverlayGroup::Annotation)
        .filter_map(|(_, prim)| match prim {
            Primitive::Label { at, text, .. } => Some((*at, text.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec![(Point::new(20.0, 30.0), "lesion".to_string())]);
    assert_eq!(session.active_tool(), Tool::None);
}

#[test]
fn test_text_without_input_still_deactivates() {
    let mut session = session_with_slice(1, Calibration::default());
    session.activate(Tool::Annotate(AnnotationKind::Text));
    let mut prompt = ScriptedText(vec![String::new()]);
    click_all(&mut session, &mut prompt, &[(20.0, 30.0)]);
    assert!(session.overlays().is_empty());
    assert_eq!(session.active_tool(), Tool::None);
}

#[test]
fn test_clear_annotations_leaves_measurements() {
    let mut overlays = OverlayRegistry::new();
    let mut capture = AnnotationCapture::new();
    overlays.insert(
        OverlayGroup::Measurement,
        Primitive::measurement_marker(Point::ZERO, 6.0),
    );
    capture.begin_stroke(Point::new(1.0, 1.0), &mut overlays);
    capture.arrow_click(Point::ZERO, &mut overlays);
    capture.arrow_click(Point::new(5.0, 5.0), &mut overlays);
    capture.clear_all(&mut overlays);
    assert_eq!(overlays.group_len(OverlayGroup::Annotation), 0);
    assert_eq!(overlays.group_len(OverlayGroup::Measurement), 1);
    assert!(capture.active_stroke().is_none());
}
