//! Configuration models and loaders for the railway chart toolkit.

use std::fs::File;
use std::path::{Path, PathBuf};

use rail_chart::{AxisKeys, Chart, Color, Curve};
use serde::Deserialize;
use thiserror::Error;

/// Pixel margins around the plot area.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

/// Colours used for the drawn series.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    pub curve: Color,
    #[serde(default = "default_area_color")]
    pub area: Color,
    #[serde(default = "default_label_color")]
    pub label: Color,
}

fn default_area_color() -> Color {
    Color::rgb(0xc6, 0xdb, 0xef)
}

fn default_label_color() -> Color {
    Color::BLACK
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            curve: Color::rgb(0x1f, 0x77, 0xb4),
            area: default_area_color(),
            label: default_label_color(),
        }
    }
}

/// Layout and styling of one chart, parsed from chart manifests.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub name: String,
    /// Full image width in pixels, margins included.
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub margin: Margin,
    /// Interpolation name, d3-style (`curveStepAfter`) or plain (`step_after`).
    #[serde(default = "default_curve")]
    pub curve: String,
    #[serde(default)]
    pub rotate: bool,
    /// The two plotted field names, first one on X unless rotated.
    pub keys: [String; 2],
    #[serde(default)]
    pub colors: SeriesColors,
}

fn default_curve() -> String {
    "curveLinear".to_string()
}

impl ChartConfig {
    /// Reject charts that cannot be laid out or interpolated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Margin {
            top,
            right,
            bottom,
            left,
        } = self.margin;
        if [top, right, bottom, left].iter().any(|m| m.is_nan() || *m < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "chart '{}' has a negative margin ({top}/{right}/{bottom}/{left})",
                self.name
            )));
        }
        let (w, h) = self.plot_size();
        if w <= 0.0 || h <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "chart '{}' leaves no plot area ({}x{} with margins)",
                self.name, self.width, self.height
            )));
        }
        self.interpolation()?;
        Ok(())
    }

    pub fn interpolation(&self) -> Result<Curve, ConfigError> {
        self.curve
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("chart '{}': {e}", self.name)))
    }

    pub fn axis_keys(&self) -> AxisKeys<'_> {
        AxisKeys::new(&self.keys[0], &self.keys[1])
    }

    /// Plot area size once margins are removed.
    pub fn plot_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) - self.margin.left - self.margin.right,
            f64::from(self.height) - self.margin.top - self.margin.bottom,
        )
    }

    /// Chart mapping the given domains onto the plot area.
    pub fn chart(&self, x_domain: (f64, f64), y_domain: (f64, f64)) -> Chart {
        let (w, h) = self.plot_size();
        Chart::new(w, h, x_domain, y_domain)
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load and validate chart configurations from a YAML list, a TOML file or a directory of TOML files.
pub fn load_chart_configs<P: AsRef<Path>>(path: P) -> Result<Vec<ChartConfig>, ConfigError> {
    let charts: Vec<ChartConfig> = load_records(path)?;
    for chart in &charts {
        chart.validate()?;
    }
    Ok(charts)
}

/// Pick a chart configuration by name (case-insensitive).
pub fn find_chart<'a>(charts: &'a [ChartConfig], name: &str) -> Option<&'a ChartConfig> {
    charts.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
