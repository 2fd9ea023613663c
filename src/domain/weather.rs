//! Weather result and temperature scale conversion.

use serde::{Deserialize, Serialize};

/// Offset between Celsius and Kelvin.
const KELVIN_OFFSET: f64 = 273.15;

/// Fahrenheit as produced by this service: `celsius * 1.8`.
///
/// NOTE: there is no `+ 32` offset. Clients already depend on these values,
/// so the formula is kept as-is rather than corrected to the standard
/// `celsius * 1.8 + 32`.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8
}

pub fn to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Current temperature for a city in three scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherResult {
    /// Build a result from a Celsius reading, deriving the other scales.
    pub fn from_celsius(city: impl Into<String>, celsius: f64) -> Self {
        Self {
            city: city.into(),
            temp_c: celsius,
            temp_f: to_fahrenheit(celsius),
            temp_k: to_kelvin(celsius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fahrenheit_has_no_offset() {
        assert!(approx(to_fahrenheit(25.0), 45.0));
        assert!(approx(to_fahrenheit(0.0), 0.0));
        assert!(approx(to_fahrenheit(-10.0), -18.0));
        // The standard formula would give 77.0 here.
        assert!(!approx(to_fahrenheit(25.0), 77.0));
    }

    #[test]
    fn test_kelvin() {
        assert!(approx(to_kelvin(25.0), 298.15));
        assert!(approx(to_kelvin(0.0), 273.15));
        assert!(approx(to_kelvin(-273.15), 0.0));
    }

    #[test]
    fn test_conversion_over_range() {
        let mut t = -60.0;
        while t <= 60.0 {
            let r = WeatherResult::from_celsius("X", t);
            assert!(approx(r.temp_f, t * 1.8));
            assert!(approx(r.temp_k, t + 273.15));
            t += 0.25;
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let r = WeatherResult::from_celsius("São Paulo", 25.0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["city"], "São Paulo");
        assert_eq!(json["temp_C"], 25.0);
        assert_eq!(json["temp_F"], 45.0);
        assert_eq!(json["temp_K"], 298.15);
    }
}
