use serde::Serialize;

use crate::metric::Metric;

/// One value per tracked metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SensorValues {
    pub co2: f64,
    pub pm25: f64,
    pub temp: f64,
    pub humidity: f64,
    pub fan: f64,
}

impl SensorValues {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Co2 => self.co2,
            Metric::Pm25 => self.pm25,
            Metric::Temp => self.temp,
            Metric::Humidity => self.humidity,
            Metric::Fan => self.fan,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Co2 => self.co2 = value,
            Metric::Pm25 => self.pm25 = value,
            Metric::Temp => self.temp = value,
            Metric::Humidity => self.humidity = value,
            Metric::Fan => self.fan = value,
        }
    }
}

/// The most recently received value per metric, written on every inbound
/// message and read only when the view is reconciled.
#[derive(Debug, Clone, Default)]
pub struct LatestReading {
    values: SensorValues,
}

impl LatestReading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, metric: Metric, value: f64) {
        self.values.set(metric, value);
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.values.get(metric)
    }

    pub fn snapshot(&self) -> SensorValues {
        self.values
    }
}

/// Parses a plain-text sensor payload.
///
/// Leading whitespace is skipped and the longest decimal prefix is taken, so
/// `"21.5 C"` reads as `21.5`. A payload without any numeric prefix yields
/// `NaN` instead of an error.
pub fn parse_payload(payload: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(payload);
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let integer_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = skip_digits(bytes, end + 1);
        mantissa_digits += fraction_end - (end + 1);
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = skip_digits(bytes, exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    index
}
