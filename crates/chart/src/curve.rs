//! Interpolation curves applied to drawn paths and areas.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::command::Point;

/// Samples per segment when flattening monotone curves.
const MONOTONE_SAMPLES: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("unknown interpolation curve '{0}'")]
    Unknown(String),
}

/// How consecutive vertices are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    #[default]
    Linear,
    /// Vertical step halfway between vertices.
    Step,
    /// Value changes at the start of each segment.
    StepBefore,
    /// Value holds until the next vertex.
    StepAfter,
    /// Cubic interpolation preserving monotonicity in `y` (requires increasing `x`).
    MonotoneX,
}

impl FromStr for Curve {
    type Err = CurveError;

    /// Accepts d3-style names (`curveStepAfter`) as well as plain ones (`step_after`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        let name = normalized.strip_prefix("curve").unwrap_or(&normalized);
        match name {
            "linear" => Ok(Curve::Linear),
            "step" => Ok(Curve::Step),
            "stepbefore" => Ok(Curve::StepBefore),
            "stepafter" => Ok(Curve::StepAfter),
            "monotonex" => Ok(Curve::MonotoneX),
            _ => Err(CurveError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Curve::Linear => "curveLinear",
            Curve::Step => "curveStep",
            Curve::StepBefore => "curveStepBefore",
            Curve::StepAfter => "curveStepAfter",
            Curve::MonotoneX => "curveMonotoneX",
        };
        f.write_str(name)
    }
}

impl Curve {
    /// Expand vertices into the polyline this curve describes.
    pub fn flatten(&self, vertices: &[Point]) -> Vec<Point> {
        if vertices.len() < 2 {
            return vertices.to_vec();
        }
        match self {
            Curve::Linear => vertices.to_vec(),
            Curve::Step => steps(vertices, |a, b| {
                let mid = (a.x + b.x) * 0.5;
                vec![Point::new(mid, a.y), Point::new(mid, b.y)]
            }),
            Curve::StepBefore => steps(vertices, |a, b| vec![Point::new(a.x, b.y)]),
            Curve::StepAfter => steps(vertices, |a, b| vec![Point::new(b.x, a.y)]),
            Curve::MonotoneX => monotone_x(vertices),
        }
    }
}

fn steps(vertices: &[Point], corner: impl Fn(Point, Point) -> Vec<Point>) -> Vec<Point> {
    let mut out = Vec::with_capacity(vertices.len() * 3);
    for pair in vertices.windows(2) {
        out.push(pair[0]);
        out.extend(corner(pair[0], pair[1]));
    }
    if let Some(last) = vertices.last() {
        out.push(*last);
    }
    out
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

fn secant(a: Point, b: Point) -> f64 {
    let h = b.x - a.x;
    if h == 0.0 { 0.0 } else { (b.y - a.y) / h }
}

/// Fritsch-Carlson tangent at the middle vertex.
fn interior_tangent(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = secant(p0, p1);
    let s1 = secant(p1, p2);
    if h0 + h1 == 0.0 {
        return 0.0;
    }
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// One-sided tangent at an end vertex given the neighbouring tangent.
fn end_tangent(a: Point, b: Point, neighbour: f64) -> f64 {
    if b.x == a.x {
        neighbour
    } else {
        (3.0 * secant(a, b) - neighbour) / 2.0
    }
}

fn monotone_x(vertices: &[Point]) -> Vec<Point> {
    let n = vertices.len();
    if n < 3 {
        return vertices.to_vec();
    }
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(vertices[i - 1], vertices[i], vertices[i + 1]);
    }
    tangents[0] = end_tangent(vertices[0], vertices[1], tangents[1]);
    tangents[n - 1] = end_tangent(vertices[n - 2], vertices[n - 1], tangents[n - 2]);

    let mut out = Vec::with_capacity((n - 1) * MONOTONE_SAMPLES + 1);
    out.push(vertices[0]);
    for i in 0..n - 1 {
        let (a, b) = (vertices[i], vertices[i + 1]);
        let (t0, t1) = (tangents[i], tangents[i + 1]);
        let dx = b.x - a.x;
        for k in 1..=MONOTONE_SAMPLES {
            let s = k as f64 / MONOTONE_SAMPLES as f64;
            let s2 = s * s;
            let s3 = s2 * s;
            let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
            let h10 = s3 - 2.0 * s2 + s;
            let h01 = -2.0 * s3 + 3.0 * s2;
            let h11 = s3 - s2;
            let y = h00 * a.y + h10 * dx * t0 + h01 * b.y + h11 * dx * t1;
            out.push(Point::new(a.x + s * dx, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn parses_d3_and_plain_names() {
        assert_eq!("curveLinear".parse(), Ok(Curve::Linear));
        assert_eq!("curveStepAfter".parse(), Ok(Curve::StepAfter));
        assert_eq!("step_before".parse(), Ok(Curve::StepBefore));
        assert_eq!("monotoneX".parse(), Ok(Curve::MonotoneX));
        assert!("curveBasis".parse::<Curve>().is_err());
        assert_eq!(Curve::StepAfter.to_string().parse(), Ok(Curve::StepAfter));
    }

    #[test]
    fn step_after_holds_value_until_next_vertex() {
        let flat = Curve::StepAfter.flatten(&pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 2.0)]));
        assert_eq!(
            flat,
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (20.0, 5.0), (20.0, 2.0)])
        );
    }

    #[test]
    fn step_before_jumps_at_previous_vertex() {
        let flat = Curve::StepBefore.flatten(&pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 2.0)]));
        assert_eq!(
            flat,
            pts(&[(0.0, 0.0), (0.0, 5.0), (10.0, 5.0), (10.0, 2.0), (20.0, 2.0)])
        );
    }

    #[test]
    fn step_turns_at_midpoint() {
        let flat = Curve::Step.flatten(&pts(&[(0.0, 0.0), (10.0, 4.0)]));
        assert_eq!(flat, pts(&[(0.0, 0.0), (5.0, 0.0), (5.0, 4.0), (10.0, 4.0)]));
    }

    #[test]
    fn monotone_curve_does_not_overshoot() {
        let input = pts(&[(0.0, 0.0), (1.0, 10.0), (2.0, 10.0), (3.0, 20.0)]);
        let flat = Curve::MonotoneX.flatten(&input);
        assert_eq!(flat.first(), input.first());
        assert_eq!(flat.last(), input.last());
        for pair in flat.windows(2) {
            assert!(pair[1].y >= pair[0].y - 1e-9, "non-monotone at {:?}", pair);
        }
    }
}
