use serde::Serialize;

use crate::geometry::Point;

/// 8-bit ARGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    /// Translucent dark backing behind labels.
    pub const LABEL_BACKGROUND: Color = Color::argb(180, 0, 0, 0);
    /// Translucent fill of area polygons.
    pub const AREA_FILL: Color = Color::argb(50, 0, 255, 255);
}

/// Stroke and fill of a vector primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Text styling. Labels are bold yellow on a dark translucent box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub foreground: Color,
    pub background: Color,
    pub bold: bool,
    pub font_size: Option<f64>,
    pub padding: f64,
}

impl TextStyle {
    pub const MEASUREMENT: TextStyle = TextStyle {
        foreground: Color::YELLOW,
        background: Color::LABEL_BACKGROUND,
        bold: true,
        font_size: None,
        padding: 3.0,
    };

    pub const ANNOTATION: TextStyle = TextStyle {
        foreground: Color::YELLOW,
        background: Color::LABEL_BACKGROUND,
        bold: true,
        font_size: Some(14.0),
        padding: 5.0,
    };
}

/// A drawable overlay element, in image-surface coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Filled dot centered on `at`.
    Marker {
        at: Point,
        diameter: f64,
        fill: Color,
        outline: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Open poly-line (freehand strokes).
    Polyline { points: Vec<Point>, stroke: Stroke },
    /// Closed polygon with optional fill.
    Polygon {
        points: Vec<Point>,
        stroke: Stroke,
        fill: Option<Color>,
    },
    /// Text whose top-left corner sits at `at`.
    Label {
        at: Point,
        text: String,
        style: TextStyle,
    },
}

impl Primitive {
    pub fn measurement_marker(at: Point, diameter: f64) -> Self {
        Primitive::Marker {
            at,
            diameter,
            fill: Color::YELLOW,
            outline: Stroke {
                color: Color::RED,
                width: 1.0,
            },
        }
    }

    pub fn measurement_line(from: Point, to: Point) -> Self {
        Primitive::Line {
            from,
            to,
            stroke: Stroke {
                color: Color::CYAN,
                width: 2.0,
            },
        }
    }

    pub fn area_polygon(points: Vec<Point>) -> Self {
        Primitive::Polygon {
            points,
            stroke: Stroke {
                color: Color::CYAN,
                width: 2.0,
            },
            fill: Some(Color::AREA_FILL),
        }
    }

    pub fn measurement_label(at: Point, text: impl Into<String>) -> Self {
        Primitive::Label {
            at,
            text: text.into(),
            style: TextStyle::MEASUREMENT,
        }
    }

    pub fn freehand_stroke(start: Point) -> Self {
        Primitive::Polyline {
            points: vec![start],
            stroke: Stroke {
                color: Color::RED,
                width: 2.0,
            },
        }
    }

    pub fn arrow_shaft(from: Point, to: Point) -> Self {
        Primitive::Line {
            from,
            to,
            stroke: Stroke {
                color: Color::ORANGE,
                width: 3.0,
            },
        }
    }

    pub fn arrow_head(points: [Point; 3]) -> Self {
        Primitive::Polygon {
            points: points.to_vec(),
            stroke: Stroke {
                color: Color::ORANGE,
                width: 2.0,
            },
            fill: Some(Color::ORANGE),
        }
    }

    pub fn annotation_text(at: Point, text: impl Into<String>) -> Self {
        Primitive::Label {
            at,
            text: text.into(),
            style: TextStyle::ANNOTATION,
        }
    }

    /// Append a vertex to a poly-line. Other primitives are left untouched.
    pub fn push_point(&mut self, point: Point) -> bool {
        match self {
            Primitive::Polyline { points, .. } => {
                points.push(point);
                true
            }
            _ => false,
        }
    }
}
