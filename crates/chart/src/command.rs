//! Declarative draw commands and the surfaces that consume them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::Curve;

/// A position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid colour '{0}' (expected #rrggbb)")]
pub struct ColorError(pub String);

/// An opaque RGB colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(0x99, 0x99, 0x99);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError(s.to_string()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Stroke and fill applied to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub stroke_width: f64,
}

impl Style {
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(color),
            fill: None,
            stroke_width: width,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            stroke: None,
            fill: Some(color),
            stroke_width: 0.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::stroke(Color::BLACK, 1.0)
    }
}

/// Geometry of a drawn element, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Path {
        vertices: Vec<Point>,
        curve: Curve,
    },
    /// Band between `lower` and `upper`, matched vertex by vertex.
    Area {
        lower: Vec<Point>,
        upper: Vec<Point>,
        curve: Curve,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Text {
        position: Point,
        content: String,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Line {
        from: Point,
        to: Point,
    },
}

/// A shape with its classes and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Space separated class names.
    pub class: String,
    pub shape: Shape,
    pub style: Style,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

/// A single instruction for a drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Append { group: String, element: Element },
    /// Remove every element of `group` carrying `class`.
    Remove { group: String, class: String },
}

impl DrawCommand {
    pub fn append(group: &str, class: impl Into<String>, shape: Shape, style: Style) -> Self {
        DrawCommand::Append {
            group: group.to_string(),
            element: Element {
                class: class.into(),
                shape,
                style,
            },
        }
    }

    pub fn remove(group: &str, class: &str) -> Self {
        DrawCommand::Remove {
            group: group.to_string(),
            class: class.to_string(),
        }
    }

    pub fn group(&self) -> &str {
        match self {
            DrawCommand::Append { group, .. } | DrawCommand::Remove { group, .. } => group,
        }
    }
}

/// Anything that can interpret draw commands.
pub trait DrawSurface {
    fn execute(&mut self, command: DrawCommand);

    fn execute_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = DrawCommand>,
        Self: Sized,
    {
        for command in commands {
            self.execute(command);
        }
    }
}

/// Records commands without interpreting them.
impl DrawSurface for Vec<DrawCommand> {
    fn execute(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Named container of elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: String,
    pub elements: Vec<Element>,
}

/// Retained scene: groups in creation order, each holding its elements in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    groups: Vec<Group>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// All elements in draw order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.groups.iter().flat_map(|g| g.elements.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn group_mut(&mut self, id: &str) -> &mut Group {
        let index = match self.groups.iter().position(|g| g.id == id) {
            Some(index) => index,
            None => {
                self.groups.push(Group {
                    id: id.to_string(),
                    elements: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }
}

impl DrawSurface for Scene {
    fn execute(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Append { group, element } => self.group_mut(&group).elements.push(element),
            DrawCommand::Remove { group, class } => {
                if let Some(g) = self.groups.iter_mut().find(|g| g.id == group) {
                    g.elements.retain(|e| !e.has_class(&class));
                }
            }
        }
    }
}
