//! Domain-to-pixel scales and the chart handle built from them.

/// Capability to map domain values to pixel coordinates.
pub trait CoordinateMapper {
    fn to_pixel_x(&self, value: f64) -> f64;
    fn to_pixel_y(&self, value: f64) -> f64;
}

/// Affine mapping from a domain interval to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    /// Map a domain value to the pixel range. A collapsed domain maps every
    /// number to `range_min`; `NaN` stays `NaN`.
    pub fn map(&self, value: f64) -> f64 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            if value.is_nan() {
                return f64::NAN;
            }
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let r = self.range_max - self.range_min;
        if r.abs() < 1e-12 {
            return self.domain_min;
        }
        let t = (px - self.range_min) / r;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

/// Minimum and maximum of the finite values, or `None` when there are none.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Plot area of a chart: two scales and the pixel size they span.
///
/// Pixel `y` grows downward, so the `y` scale maps the domain minimum to
/// `height` and the maximum to `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chart {
    pub x: LinearScale,
    pub y: LinearScale,
    pub width: f64,
    pub height: f64,
}

impl Chart {
    pub fn new(width: f64, height: f64, x_domain: (f64, f64), y_domain: (f64, f64)) -> Self {
        Self {
            x: LinearScale::new(x_domain, (0.0, width)),
            y: LinearScale::new(y_domain, (height, 0.0)),
            width,
            height,
        }
    }
}

impl CoordinateMapper for Chart {
    fn to_pixel_x(&self, value: f64) -> f64 {
        self.x.map(value)
    }

    fn to_pixel_y(&self, value: f64) -> f64 {
        self.y.map(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_axis_grows_downward() {
        let chart = Chart::new(200.0, 100.0, (0.0, 1000.0), (0.0, 50.0));
        assert_eq!(chart.to_pixel_x(500.0), 100.0);
        assert_eq!(chart.to_pixel_y(0.0), 100.0);
        assert_eq!(chart.to_pixel_y(50.0), 0.0);
        assert_eq!(chart.y.invert(100.0), 0.0);
    }

    #[test]
    fn collapsed_domain_maps_to_range_start() {
        let scale = LinearScale::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(scale.map(5.0), 10.0);
        assert_eq!(scale.map(-3.0), 10.0);
        assert!(scale.map(f64::NAN).is_nan());
    }

    #[test]
    fn extent_ignores_non_finite_values() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 8.0]), Some((-1.0, 8.0)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }
}
