//! Weather observation and interpolation result types.

use crate::core_types::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A single station reading used as interpolation input.
///
/// Produced by the sampling layer each refresh cycle; read-only to the
/// core. `wind_direction_deg` is a circular quantity (0-360, 0 = north)
/// and must be averaged as a vector, never as a scalar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherStation {
    pub point: GeoPoint,
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Precipitation (mm)
    pub precipitation_mm: f64,
    /// Relative humidity (0-100 %)
    pub humidity_pct: f64,
    /// Wind speed (km/h)
    pub wind_speed_kmh: f64,
    /// Wind bearing (degrees, 0 = north, 90 = east)
    pub wind_direction_deg: f64,
}

/// Interpolated weather values at a query point or cell center.
///
/// Same fields as a station reading minus the location; embedded in
/// [`crate::grid::GridCell`] rather than owned separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedWeather {
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
}

impl InterpolatedWeather {
    /// Documented no-data default: mild conditions, calm northerly wind.
    ///
    /// Returned whenever no station is within interpolation range so the
    /// interpolator stays total. Always paired with confidence 0.
    pub fn baseline() -> Self {
        InterpolatedWeather {
            temperature_c: 20.0,
            precipitation_mm: 0.0,
            humidity_pct: 60.0,
            wind_speed_kmh: 10.0,
            wind_direction_deg: 0.0,
        }
    }

    /// Copy the measured fields of a station reading.
    pub fn from_station(station: &WeatherStation) -> Self {
        InterpolatedWeather {
            temperature_c: station.temperature_c,
            precipitation_mm: station.precipitation_mm,
            humidity_pct: station.humidity_pct,
            wind_speed_kmh: station.wind_speed_kmh,
            wind_direction_deg: station.wind_direction_deg,
        }
    }
}

/// Long-run climate averages for a biome, used as fallback context when
/// no grid cell covers a query point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClimateStats {
    pub avg_temperature_c: f64,
    pub avg_precipitation_mm: f64,
    pub avg_humidity_pct: f64,
    pub avg_wind_speed_kmh: f64,
    /// Prevailing wind bearing (degrees)
    pub prevailing_wind_deg: f64,
}

impl ClimateStats {
    /// Present climate averages in the same shape as an interpolation
    /// result, for the context fallback chain.
    pub fn as_weather(&self) -> InterpolatedWeather {
        InterpolatedWeather {
            temperature_c: self.avg_temperature_c,
            precipitation_mm: self.avg_precipitation_mm,
            humidity_pct: self.avg_humidity_pct,
            wind_speed_kmh: self.avg_wind_speed_kmh,
            wind_direction_deg: self.prevailing_wind_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_fixed() {
        let b = InterpolatedWeather::baseline();
        assert_eq!(b.temperature_c, 20.0);
        assert_eq!(b.humidity_pct, 60.0);
        assert_eq!(b.wind_direction_deg, 0.0);
    }

    #[test]
    fn from_station_copies_all_fields() {
        let s = WeatherStation {
            point: GeoPoint::new(-10.0, -50.0).unwrap(),
            temperature_c: 31.5,
            precipitation_mm: 2.0,
            humidity_pct: 78.0,
            wind_speed_kmh: 14.0,
            wind_direction_deg: 135.0,
        };
        let w = InterpolatedWeather::from_station(&s);
        assert_eq!(w.temperature_c, 31.5);
        assert_eq!(w.wind_direction_deg, 135.0);
    }
}
