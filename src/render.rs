//! plotters back end for retained scenes.
//!
//! Coordinates are pixels relative to the drawing area's top-left corner.
//! Elements with non-finite geometry are skipped.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::Color as _;

use crate::chart::{Color, Element, Point, Scene, Shape, Style};

/// Font size of text elements, in pixels.
const TEXT_SIZE: f64 = 14.0;

/// Pick a font family available on the host platform.
pub fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn pixel(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn all_finite(points: &[Point]) -> bool {
    points.iter().all(Point::is_finite)
}

fn stroke_style(style: &Style) -> ShapeStyle {
    let color = style.stroke.or(style.fill).unwrap_or(Color::BLACK);
    ShapeStyle::from(&rgb(color)).stroke_width(style.stroke_width.max(1.0).round() as u32)
}

fn fill_style(style: &Style) -> ShapeStyle {
    match style.fill {
        Some(fill) => rgb(fill).filled(),
        None => stroke_style(style),
    }
}

/// Draw every element of `scene` in order. Returns how many elements were drawn.
pub fn draw_scene<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene,
) -> Result<usize, DrawingAreaErrorKind<DB::ErrorType>> {
    let font = select_font_family();
    let mut drawn = 0;
    for element in scene.elements() {
        if draw_element(area, element, font)? {
            drawn += 1;
        }
    }
    tracing::debug!(drawn, total = scene.len(), "scene rendered");
    Ok(drawn)
}

fn draw_element<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    element: &Element,
    font: FontFamily<'static>,
) -> Result<bool, DrawingAreaErrorKind<DB::ErrorType>> {
    let style = &element.style;
    match &element.shape {
        Shape::Path { vertices, curve } => {
            let points = curve.flatten(vertices);
            if points.len() < 2 || !all_finite(&points) {
                return Ok(false);
            }
            let path: Vec<(i32, i32)> = points.into_iter().map(pixel).collect();
            area.draw(&PathElement::new(path, stroke_style(style)))?;
        }
        Shape::Area {
            lower,
            upper,
            curve,
        } => {
            let mut outline = curve.flatten(lower);
            let mut top = curve.flatten(upper);
            top.reverse();
            outline.extend(top);
            if outline.len() < 3 || !all_finite(&outline) {
                return Ok(false);
            }
            let polygon: Vec<(i32, i32)> = outline.into_iter().map(pixel).collect();
            area.draw(&Polygon::new(polygon, fill_style(style)))?;
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => {
            let corner = Point::new(*x, *y);
            let opposite = Point::new(x + width, y + height);
            if !corner.is_finite() || !opposite.is_finite() {
                return Ok(false);
            }
            area.draw(&Rectangle::new(
                [pixel(corner), pixel(opposite)],
                fill_style(style),
            ))?;
        }
        Shape::Text { position, content } => {
            if !position.is_finite() {
                return Ok(false);
            }
            let color = style.fill.or(style.stroke).unwrap_or(Color::BLACK);
            let text_style = FontDesc::new(font, TEXT_SIZE, FontStyle::Normal).color(&rgb(color));
            area.draw(&Text::new(content.clone(), pixel(*position), text_style))?;
        }
        Shape::Circle { center, radius } => {
            if !center.is_finite() || !radius.is_finite() {
                return Ok(false);
            }
            area.draw(&Circle::new(
                pixel(*center),
                radius.round().max(1.0) as i32,
                fill_style(style),
            ))?;
        }
        Shape::Line { from, to } => {
            if !from.is_finite() || !to.is_finite() {
                return Ok(false);
            }
            area.draw(&PathElement::new(
                vec![pixel(*from), pixel(*to)],
                stroke_style(style),
            ))?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{DrawCommand, DrawSurface};

    #[test]
    fn non_finite_shapes_are_skipped() {
        let mut buffer = vec![0u8; 40 * 30 * 3];
        let area = BitMapBackend::with_buffer(&mut buffer, (40, 30)).into_drawing_area();
        let mut scene = Scene::new();
        scene.execute_all([
            DrawCommand::append(
                "g",
                "curve",
                Shape::Line {
                    from: Point::ORIGIN,
                    to: Point::new(10.0, 10.0),
                },
                Style::default(),
            ),
            DrawCommand::append(
                "g",
                "rect",
                Shape::Rect {
                    x: f64::NAN,
                    y: 0.0,
                    width: 5.0,
                    height: 5.0,
                },
                Style::fill(Color::BLACK),
            ),
        ]);
        let drawn = draw_scene(&area, &scene).unwrap();
        assert_eq!(drawn, 1);
    }
}
