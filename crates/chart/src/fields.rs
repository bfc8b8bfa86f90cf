//! Named numeric fields of plotted records.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Lower bound field of area segments.
pub const VALUE0: &str = "value0";
/// Upper bound field of area segments.
pub const VALUE1: &str = "value1";

/// A record exposing numeric fields by name.
pub trait Fields {
    fn field(&self, key: &str) -> Option<f64>;

    /// Field value, `NaN` when missing.
    fn value(&self, key: &str) -> f64 {
        self.field(key).unwrap_or(f64::NAN)
    }
}

impl<T: Fields + ?Sized> Fields for &T {
    fn field(&self, key: &str) -> Option<f64> {
        (**self).field(key)
    }
}

impl Fields for BTreeMap<String, f64> {
    fn field(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl Fields for HashMap<String, f64> {
    fn field(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

/// Simulation sample produced by the train simulation backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationPoint {
    /// Seconds since midnight.
    pub time: f64,
    /// Metres along the path.
    pub position: f64,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub gradient: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl SimulationPoint {
    pub fn new(time: f64, position: f64) -> Self {
        Self {
            time,
            position,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

impl Fields for SimulationPoint {
    fn field(&self, key: &str) -> Option<f64> {
        match key {
            "time" => Some(self.time),
            "position" => Some(self.position),
            "speed" => self.speed,
            "gradient" => self.gradient,
            "radius" => self.radius,
            _ => None,
        }
    }
}

/// The two field names plotted against each other.
///
/// Without rotation `first` maps to X and `second` to Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisKeys<'a> {
    pub first: &'a str,
    pub second: &'a str,
}

impl<'a> AxisKeys<'a> {
    pub fn new(first: &'a str, second: &'a str) -> Self {
        Self { first, second }
    }

    pub fn x_key(&self, rotate: bool) -> &'a str {
        if rotate { self.second } else { self.first }
    }

    pub fn y_key(&self, rotate: bool) -> &'a str {
        if rotate { self.first } else { self.second }
    }
}
