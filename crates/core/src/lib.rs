//! Core units, constants, and shared primitives for the railway chart toolkit.

/// Conversion constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Joules per kilowatt-hour.
    pub const JOULES_PER_KWH: f64 = 3_600_000.0;
    /// Ratio between km/h and m/s.
    pub const KMH_PER_MS: f64 = 3.6;
    /// Metres per kilometre (and millimetres per metre).
    pub const METRES_PER_KM: f64 = 1_000.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
///
/// All helpers are total over `f64`: invalid input propagates as `NaN`.
pub mod units {
    use std::fmt;

    use super::constants::{JOULES_PER_KWH, KMH_PER_MS, METRES_PER_KM};

    /// Convert joules to kilowatt-hours, optionally rounding up to the next whole kWh.
    #[inline]
    pub fn joule_to_kwh(joules: f64, round_up: bool) -> f64 {
        let kwh = joules / JOULES_PER_KWH;
        if round_up { kwh.ceil() } else { kwh }
    }

    /// Convert kilometres per hour to metres per second. The sign is dropped.
    #[inline]
    pub fn kmh_to_ms(v: f64) -> f64 {
        v.abs() / KMH_PER_MS
    }

    /// Convert metres per second to kilometres per hour.
    #[inline]
    pub fn ms_to_kmh(v: f64) -> f64 {
        v * KMH_PER_MS
    }

    /// Convert millimetres to metres.
    #[inline]
    pub fn mm_to_m(length: f64) -> f64 {
        length / METRES_PER_KM
    }

    /// Display unit picked by [`km_or_m`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DistanceUnit {
        Metre,
        Kilometre,
    }

    impl DistanceUnit {
        pub fn symbol(self) -> &'static str {
            match self {
                DistanceUnit::Metre => "m",
                DistanceUnit::Kilometre => "km",
            }
        }
    }

    /// A distance scaled for display.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Distance {
        pub value: f64,
        pub unit: DistanceUnit,
    }

    impl fmt::Display for Distance {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} {}", self.value, self.unit.symbol())
        }
    }

    /// Pick kilometres for values of 1000 m and above, metres otherwise.
    ///
    /// Returns `None` for `NaN`.
    pub fn km_or_m(value: f64) -> Option<Distance> {
        if value.is_nan() {
            return None;
        }
        if value >= METRES_PER_KM {
            Some(Distance {
                value: value / METRES_PER_KM,
                unit: DistanceUnit::Kilometre,
            })
        } else {
            Some(Distance {
                value,
                unit: DistanceUnit::Metre,
            })
        }
    }
}

/// Time-of-day helpers used by timetable and space-time views.
pub mod time {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
    use thiserror::Error;

    use super::constants::SECONDS_PER_DAY;

    /// Errors raised while parsing time strings.
    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum TimeError {
        #[error("invalid time string '{0}' (expected HH:MM or HH:MM:SS)")]
        Invalid(String),
    }

    /// Parse `HH:MM` or `HH:MM:SS` into seconds since midnight.
    pub fn time_to_sec(time: &str) -> Result<f64, TimeError> {
        let trimmed = time.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| TimeError::Invalid(time.to_string()))?;
        Ok(f64::from(parsed.num_seconds_from_midnight()))
    }

    fn split_day(seconds: f64) -> Option<(u32, u32, u32)> {
        if !seconds.is_finite() {
            return None;
        }
        let in_day = seconds.floor().rem_euclid(SECONDS_PER_DAY) as u32;
        Some((in_day / 3600, (in_day % 3600) / 60, in_day % 60))
    }

    /// Format seconds as `HH:MM:SS`, wrapping around midnight.
    pub fn sec_to_time(seconds: f64) -> Option<String> {
        let (h, m, s) = split_day(seconds)?;
        Some(format!("{h:02}:{m:02}:{s:02}"))
    }

    /// Format seconds as `HH:MM`, wrapping around midnight.
    pub fn sec_to_hours_string(seconds: f64) -> Option<String> {
        let (h, m, _) = split_day(seconds)?;
        Some(format!("{h:02}:{m:02}"))
    }

    /// Seconds elapsed since midnight of the date-time's own day.
    pub fn datetime_to_sec(datetime: &NaiveDateTime) -> f64 {
        let time = datetime.time();
        f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9
    }

    /// Anchor a number of seconds since midnight on `day`.
    ///
    /// Values beyond one day roll over to the following days.
    pub fn sec_to_datetime(seconds: f64, day: NaiveDate) -> Option<NaiveDateTime> {
        if !seconds.is_finite() {
            return None;
        }
        let delta = TimeDelta::try_milliseconds((seconds * 1_000.0).round() as i64)?;
        day.and_time(NaiveTime::MIN).checked_add_signed(delta)
    }

    /// Duration between two times of day, assuming `end` is on the next day when earlier than `start`.
    pub fn duration_in_seconds(start: f64, end: f64) -> f64 {
        if end < start {
            end + SECONDS_PER_DAY - start
        } else {
            end - start
        }
    }
}

/// Display formatting helpers.
pub mod format {
    /// Thousands separator used by French number formatting (narrow no-break space).
    const GROUP_SEPARATOR: char = '\u{202f}';

    /// Format a euro amount without decimals, grouped by thousands (`1 234 567 €`).
    pub fn budget(amount: f64) -> Option<String> {
        if !amount.is_finite() {
            return None;
        }
        let rounded = amount.round();
        let digits = format!("{:.0}", rounded.abs());
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(c);
        }
        let sign = if rounded < 0.0 { "-" } else { "" };
        Some(format!("{sign}{grouped}\u{a0}€"))
    }
}
