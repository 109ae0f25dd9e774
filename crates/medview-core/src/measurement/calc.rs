//! Pure measurement math on image-space points.

use crate::calibration::Calibration;
use crate::consts::MIN_AREA_POINTS;
use crate::geometry::Point;

/// Euclidean distance in millimeters between two pixel positions.
pub fn distance_mm(p1: Point, p2: Point, calibration: &Calibration) -> f64 {
    calibration.to_mm(p2 - p1).length()
}

/// Angle at `vertex` from the arm towards `p1` to the arm towards `p3`, in
/// degrees within `[0, 360)`.
///
/// The raw angle is signed (positive when turning clockwise on a y-down
/// surface); negative results are wrapped by adding 360.
pub fn angle_deg(p1: Point, vertex: Point, p3: Point) -> f64 {
    let v1 = p1 - vertex;
    let v2 = p3 - vertex;
    let mut angle = v1.cross(v2).atan2(v1.dot(v2)).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

/// Shoelace area of the closed polygon through `points`, in mm².
/// Returns `None` for fewer than three vertices.
pub fn polygon_area_mm2(points: &[Point], calibration: &Calibration) -> Option<f64> {
    if points.len() < MIN_AREA_POINTS {
        return None;
    }
    let twice_signed: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.cross(*b))
        .sum();
    Some((twice_signed / 2.0).abs() * calibration.pixel_area())
}

/// Arithmetic mean of the vertices.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::ZERO, |acc, p| acc + *p);
    Some(Point::new(sum.x / n, sum.y / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn angle_opposite_turn_wraps() {
        let a = angle_deg(Point::new(0.0, 1.0), Point::ZERO, Point::new(1.0, 0.0));
        assert!((a - 270.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_triangle_has_zero_area() {
        let pts = [Point::ZERO, Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(polygon_area_mm2(&pts, &Calibration::default()), Some(0.0));
    }
}
