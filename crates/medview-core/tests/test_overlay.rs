use medview_core::geometry::Point;
use medview_core::overlay::{Color, OverlayGroup, OverlayRegistry, Primitive};

fn marker(x: f64) -> Primitive {
    Primitive::measurement_marker(Point::new(x, 0.0), 6.0)
}

#[test]
fn test_clear_group_only_touches_that_group() {
    let mut reg = OverlayRegistry::new();
    for i in 0..5 {
        reg.insert(OverlayGroup::Measurement, marker(i as f64));
    }
    let stroke = reg.insert(
        OverlayGroup::Annotation,
        Primitive::freehand_stroke(Point::ZERO),
    );
    assert_eq!(reg.clear_group(OverlayGroup::Measurement), 5);
    assert_eq!(reg.len(), 1);
    assert!(reg.contains(stroke));
    assert_eq!(reg.group_of(stroke), Some(OverlayGroup::Annotation));
}

#[test]
fn test_handles_go_stale_after_clear() {
    let mut reg = OverlayRegistry::new();
    let old = reg.insert(OverlayGroup::Measurement, marker(1.0));
    reg.clear_group(OverlayGroup::Measurement);
    let new = reg.insert(OverlayGroup::Measurement, marker(2.0));
    assert_ne!(old, new);
    assert!(reg.get(old).is_none());
    assert!(reg.remove(old).is_none());
    assert!(reg.contains(new));
}

#[test]
fn test_iteration_keeps_insertion_order() {
    let mut reg = OverlayRegistry::new();
    let a = reg.insert(OverlayGroup::Measurement, marker(1.0));
    let b = reg.insert(OverlayGroup::Measurement, marker(2.0));
    let c = reg.insert(OverlayGroup::Measurement, marker(3.0));
    reg.remove(b);
    let order: Vec<_> = reg
        .iter_group(OverlayGroup::Measurement)
        .map(|(h, _)| h)
        .collect();
    assert_eq!(order, vec![a, c]);
}

#[test]
fn test_push_point_only_extends_polylines() {
    let mut stroke = Primitive::freehand_stroke(Point::ZERO);
    assert!(stroke.push_point(Point::new(1.0, 1.0)));
    let mut line = Primitive::measurement_line(Point::ZERO, Point::new(1.0, 1.0));
    assert!(!line.push_point(Point::new(2.0, 2.0)));
}

#[test]
fn test_default_styles() {
    match Primitive::area_polygon(vec![Point::ZERO]) {
        Primitive::Polygon { stroke, fill, .. } => {
            assert_eq!(stroke.color, Color::CYAN);
            assert_eq!(fill, Some(Color::argb(50, 0, 255, 255)));
        }
        other => panic!("unexpected {other:?}"),
    }
    match Primitive::measurement_label(Point::ZERO, "x") {
        Primitive::Label { style, .. } => {
            assert!(style.bold);
            assert_eq!(style.foreground, Color::YELLOW);
            assert_eq!(style.background, Color::argb(180, 0, 0, 0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_primitive_serializes_with_kind_tag() {
    let json = serde_json::to_value(marker(1.0)).unwrap();
    assert_eq!(json["kind"], "marker");
    assert_eq!(json["diameter"], 6.0);
}
