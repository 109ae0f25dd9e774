use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point (or offset) in pixel units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// 2D affine transform in row-vector form:
///
/// ```text
/// x' = x * m11 + y * m21 + dx
/// y' = x * m12 + y * m22 + dy
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Affine2 {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2 {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::IDENTITY
        }
    }

    /// Scale by `(sx, sy)` keeping `center` fixed.
    pub fn scale_about(sx: f64, sy: f64, center: Point) -> Self {
        Self {
            m11: sx,
            m12: 0.0,
            m21: 0.0,
            m22: sy,
            dx: center.x - sx * center.x,
            dy: center.y - sy * center.y,
        }
    }

    /// Rotate by `degrees` about `center`. Positive angles turn clockwise on a
    /// y-down surface.
    pub fn rotate_about(degrees: f64, center: Point) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            m11: cos,
            m12: sin,
            m21: -sin,
            m22: cos,
            dx: center.x - center.x * cos + center.y * sin,
            dy: center.y - center.x * sin - center.y * cos,
        }
    }

    /// Transform that applies `self` first and `next` afterwards.
    pub fn then(&self, next: &Affine2) -> Affine2 {
        Affine2 {
            m11: self.m11 * next.m11 + self.m12 * next.m21,
            m12: self.m11 * next.m12 + self.m12 * next.m22,
            m21: self.m21 * next.m11 + self.m22 * next.m21,
            m22: self.m21 * next.m12 + self.m22 * next.m22,
            dx: self.dx * next.m11 + self.dy * next.m21 + next.dx,
            dy: self.dx * next.m12 + self.dy * next.m22 + next.dy,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.m11 + p.y * self.m21 + self.dx,
            p.x * self.m12 + p.y * self.m22 + self.dy,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Affine2> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        let m11 = self.m22 / det;
        let m12 = -self.m12 / det;
        let m21 = -self.m21 / det;
        let m22 = self.m11 / det;
        Some(Affine2 {
            m11,
            m12,
            m21,
            m22,
            dx: -(self.dx * m11 + self.dy * m21),
            dy: -(self.dx * m12 + self.dy * m22),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn rotate_quarter_turn_about_center() {
        let t = Affine2::rotate_about(90.0, Point::new(10.0, 10.0));
        assert_close(t.apply(Point::new(20.0, 10.0)), Point::new(10.0, 20.0));
    }

    #[test]
    fn inverse_round_trips() {
        let t = Affine2::scale_about(2.0, -3.0, Point::new(5.0, 4.0))
            .then(&Affine2::rotate_about(30.0, Point::new(5.0, 4.0)))
            .then(&Affine2::translation(7.0, -2.0));
        let inv = t.inverse().unwrap();
        let p = Point::new(12.5, -3.25);
        assert_close(inv.apply(t.apply(p)), p);
    }

    #[test]
    fn singular_has_no_inverse() {
        let t = Affine2::scale_about(0.0, 1.0, Point::ZERO);
        assert!(t.inverse().is_none());
    }
}
