//! Drawing composition: simulation records in, draw commands out.
//!
//! None of these functions validate their input. A missing field reads as
//! `NaN` and yields degenerate geometry, which back ends skip.

use crate::command::{Color, DrawCommand, Point, Shape, Style};
use crate::curve::Curve;
use crate::fields::{AxisKeys, Fields, VALUE0, VALUE1};
use crate::scale::{Chart, CoordinateMapper};

/// Vertical label offset (pixels) when the label sits below its anchor.
pub const LABEL_OFFSET_BELOW: f64 = 15.0;
/// Vertical label offset (pixels) when the label sits above its anchor.
pub const LABEL_OFFSET_ABOVE: f64 = -5.0;
/// Radius of label marker circles.
pub const MARKER_RADIUS: f64 = 3.0;
/// Class shared by both guidelines.
pub const GUIDELINE_CLASS: &str = "guideline";

/// Where and how a dataset is drawn: target group, classes, plotted keys and axis rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer<'a> {
    pub group: &'a str,
    pub class: &'a str,
    pub keys: AxisKeys<'a>,
    /// Swap the two keys between screen X and Y.
    pub rotate: bool,
}

impl<'a> Layer<'a> {
    pub fn new(group: &'a str, keys: AxisKeys<'a>) -> Self {
        Self {
            group,
            class: "",
            keys,
            rotate: false,
        }
    }

    pub fn class(mut self, class: &'a str) -> Self {
        self.class = class;
        self
    }

    pub fn rotated(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    fn classes(&self, kind: &str) -> String {
        if self.class.is_empty() {
            kind.to_string()
        } else {
            format!("{kind} {}", self.class)
        }
    }

    fn project<M: CoordinateMapper, P: Fields>(&self, chart: &M, datum: &P) -> Point {
        Point::new(
            chart.to_pixel_x(datum.value(self.keys.x_key(self.rotate))),
            chart.to_pixel_y(datum.value(self.keys.y_key(self.rotate))),
        )
    }
}

/// One path through every record, in input order.
pub fn draw_curve<M, P>(
    chart: &M,
    layer: &Layer<'_>,
    data: &[P],
    curve: Curve,
    style: Style,
) -> DrawCommand
where
    M: CoordinateMapper,
    P: Fields,
{
    let vertices: Vec<Point> = data.iter().map(|d| layer.project(chart, d)).collect();
    tracing::trace!(group = layer.group, vertices = vertices.len(), %curve, "curve");
    DrawCommand::append(
        layer.group,
        layer.classes("curve"),
        Shape::Path { vertices, curve },
        style,
    )
}

/// Band between the `value0` and `value1` fields, positioned along the first key.
///
/// Without rotation the band is vertical (`x ← first key`); with rotation it
/// is horizontal (`y ← first key`).
pub fn draw_area<M, P>(
    chart: &M,
    layer: &Layer<'_>,
    data: &[P],
    curve: Curve,
    style: Style,
) -> DrawCommand
where
    M: CoordinateMapper,
    P: Fields,
{
    let key = layer.keys.first;
    let (lower, upper): (Vec<Point>, Vec<Point>) = data
        .iter()
        .map(|d| {
            if layer.rotate {
                let y = chart.to_pixel_y(d.value(key));
                (
                    Point::new(chart.to_pixel_x(d.value(VALUE0)), y),
                    Point::new(chart.to_pixel_x(d.value(VALUE1)), y),
                )
            } else {
                let x = chart.to_pixel_x(d.value(key));
                (
                    Point::new(x, chart.to_pixel_y(d.value(VALUE0))),
                    Point::new(x, chart.to_pixel_y(d.value(VALUE1))),
                )
            }
        })
        .unzip();
    tracing::trace!(group = layer.group, vertices = lower.len(), "area");
    DrawCommand::append(
        layer.group,
        layer.classes("area"),
        Shape::Area {
            lower,
            upper,
            curve,
        },
        style,
    )
}

/// Rectangle spanning the `<key>_start`/`<key>_end` pairs of both keys.
///
/// Extents are normalised so width and height are never negative, whichever
/// end maps to the smaller pixel coordinate.
pub fn draw_rect<M, P>(chart: &M, layer: &Layer<'_>, datum: &P, style: Style) -> DrawCommand
where
    M: CoordinateMapper,
    P: Fields,
{
    let x_key = layer.keys.x_key(layer.rotate);
    let y_key = layer.keys.y_key(layer.rotate);
    let x0 = chart.to_pixel_x(datum.value(&format!("{x_key}_start")));
    let x1 = chart.to_pixel_x(datum.value(&format!("{x_key}_end")));
    let y0 = chart.to_pixel_y(datum.value(&format!("{y_key}_start")));
    let y1 = chart.to_pixel_y(datum.value(&format!("{y_key}_end")));
    DrawCommand::append(
        layer.group,
        layer.classes("rect"),
        Shape::Rect {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        },
        style,
    )
}

/// Text label attached to a plotted record.
#[derive(Debug, Clone, PartialEq)]
pub struct Label<'a> {
    pub text: &'a str,
    /// Travel direction of the labelled train, `true` for increasing positions.
    pub direction: bool,
    /// Draw a marker circle on the anchor point.
    pub marker: bool,
    pub color: Color,
}

/// Vertical offset keeping a label clear of the curve it annotates.
pub fn label_offset(direction: bool, rotate: bool) -> f64 {
    if direction != rotate {
        LABEL_OFFSET_BELOW
    } else {
        LABEL_OFFSET_ABOVE
    }
}

/// Label (and optional marker) at the record's mapped position.
pub fn draw_text<M, P>(chart: &M, layer: &Layer<'_>, datum: &P, label: &Label<'_>) -> Vec<DrawCommand>
where
    M: CoordinateMapper,
    P: Fields,
{
    let anchor = layer.project(chart, datum);
    let mut commands = Vec::with_capacity(2);
    if label.marker {
        commands.push(marker_at(layer, anchor, label.color));
    }
    commands.push(DrawCommand::append(
        layer.group,
        layer.classes("label"),
        Shape::Text {
            position: Point::new(anchor.x, anchor.y + label_offset(label.direction, layer.rotate)),
            content: label.text.to_string(),
        },
        Style::fill(label.color),
    ));
    commands
}

fn marker_at(layer: &Layer<'_>, center: Point, color: Color) -> DrawCommand {
    DrawCommand::append(
        layer.group,
        layer.classes("marker"),
        Shape::Circle {
            center,
            radius: MARKER_RADIUS,
        },
        Style::fill(color),
    )
}

/// Marker circle at the record's mapped position.
pub fn draw_marker<M, P>(chart: &M, layer: &Layer<'_>, datum: &P, color: Color) -> DrawCommand
where
    M: CoordinateMapper,
    P: Fields,
{
    marker_at(layer, layer.project(chart, datum), color)
}

/// Crosshair guides anchored at the origin, replacing any previous ones in `group`.
pub fn draw_guidelines(chart: &Chart, group: &str) -> Vec<DrawCommand> {
    let style = Style::stroke(Color::GREY, 1.0);
    vec![
        DrawCommand::remove(group, GUIDELINE_CLASS),
        DrawCommand::append(
            group,
            format!("{GUIDELINE_CLASS} guide-x"),
            Shape::Line {
                from: Point::ORIGIN,
                to: Point::new(0.0, chart.height),
            },
            style,
        ),
        DrawCommand::append(
            group,
            format!("{GUIDELINE_CLASS} guide-y"),
            Shape::Line {
                from: Point::ORIGIN,
                to: Point::new(chart.width, 0.0),
            },
            style,
        ),
    ]
}
