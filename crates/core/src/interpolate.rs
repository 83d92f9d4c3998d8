//! Inverse-distance-weighted spatial interpolation.
//!
//! Estimates weather at an arbitrary point from nearby station readings.
//! Scalar fields use the classic IDW accumulation `Σ(value·w) / Σw` with
//! `w = 1/distance^power`. Wind bearing is a circular quantity and is
//! averaged as a unit vector: naively averaging 350° and 10° gives 180°,
//! the exact opposite of the true mean bearing, so each reading
//! contributes `(cos θ, sin θ)·w` and the mean angle is recovered with
//! `atan2`.
//!
//! The interpolator is total: every input, including an empty station
//! slice, yields a well-formed result and a confidence in [0, 1].

use crate::core_types::geo::{haversine_km, normalize_deg, GeoPoint};
use crate::core_types::weather::{InterpolatedWeather, WeatherStation};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Exponent used when the kriging stub degrades to IDW.
const KRIGING_FALLBACK_POWER: f64 = 1.5;

/// Interpolation method selector.
///
/// Only IDW is implemented. The other variants are deliberate, documented
/// degradations rather than silent fallbacks; each variant states what it
/// actually computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationStrategy {
    /// Inverse distance weighting with the configured power exponent.
    #[default]
    Idw,
    /// Not implemented; degrades to IDW with a gentler exponent (1.5),
    /// which spreads influence wider, vaguely imitating kriging's
    /// smoother surfaces.
    Kriging,
    /// Not implemented; degrades to plain IDW. The regular grid the
    /// caller draws already approximates a cell tessellation.
    Voronoi,
}

impl InterpolationStrategy {
    fn effective_power(self, configured: f64) -> f64 {
        match self {
            InterpolationStrategy::Idw | InterpolationStrategy::Voronoi => configured,
            InterpolationStrategy::Kriging => KRIGING_FALLBACK_POWER,
        }
    }
}

/// Tuning knobs for IDW interpolation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdwConfig {
    /// Distance exponent. 2.0 is the conventional default; higher values
    /// localize influence more sharply.
    pub power: f64,
    /// Stations farther than this (km) are ignored.
    pub max_distance_km: f64,
    /// Below this distance (km) a station counts as an exact match and
    /// short-circuits the weighted sum (also guards the 1/d^p division).
    pub epsilon_km: f64,
}

impl Default for IdwConfig {
    fn default() -> Self {
        IdwConfig {
            power: 2.0,
            max_distance_km: 500.0,
            epsilon_km: 0.001,
        }
    }
}

/// An interpolation result plus its reliability score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedSample {
    pub weather: InterpolatedWeather,
    /// Proximity-driven reliability in [0, 1]: 1 at a station, decaying
    /// linearly to 0 at `max_distance_km` from the nearest station.
    /// Independent of how many stations contributed.
    pub confidence: f64,
}

/// IDW interpolator over station snapshots.
#[derive(Debug, Clone, Default)]
pub struct SpatialInterpolator {
    config: IdwConfig,
    strategy: InterpolationStrategy,
}

impl SpatialInterpolator {
    pub fn new(config: IdwConfig) -> Self {
        SpatialInterpolator {
            config,
            strategy: InterpolationStrategy::Idw,
        }
    }

    pub fn with_strategy(config: IdwConfig, strategy: InterpolationStrategy) -> Self {
        SpatialInterpolator { config, strategy }
    }

    pub fn config(&self) -> &IdwConfig {
        &self.config
    }

    /// Interpolate weather at `query` from `stations`.
    ///
    /// Never fails: with no station in range the documented baseline is
    /// returned with confidence 0.
    pub fn interpolate(&self, query: &GeoPoint, stations: &[WeatherStation]) -> InterpolatedSample {
        let power = self.strategy.effective_power(self.config.power);

        let mut nearest_km = f64::INFINITY;
        let mut weight_sum = 0.0;
        let mut temperature = 0.0;
        let mut precipitation = 0.0;
        let mut humidity = 0.0;
        let mut wind_speed = 0.0;
        let mut wind_vec: Vector2<f64> = Vector2::zeros();

        for station in stations {
            let distance_km = haversine_km(query, &station.point);
            if distance_km < nearest_km {
                nearest_km = distance_km;
            }
            if distance_km < self.config.epsilon_km {
                // Station sits at the query point: exact match.
                return InterpolatedSample {
                    weather: InterpolatedWeather::from_station(station),
                    confidence: 1.0,
                };
            }
            if distance_km > self.config.max_distance_km {
                continue;
            }

            let w = 1.0 / distance_km.powf(power);
            weight_sum += w;
            temperature += station.temperature_c * w;
            precipitation += station.precipitation_mm * w;
            humidity += station.humidity_pct * w;
            wind_speed += station.wind_speed_kmh * w;

            let theta = station.wind_direction_deg.to_radians();
            wind_vec += Vector2::new(theta.cos(), theta.sin()) * w;
        }

        let confidence = self.confidence_at(nearest_km);

        if weight_sum <= 0.0 {
            tracing::debug!(
                lat = query.lat,
                lng = query.lng,
                "no station within range, returning baseline"
            );
            return InterpolatedSample {
                weather: InterpolatedWeather::baseline(),
                confidence,
            };
        }

        let wind_direction_deg = normalize_deg(wind_vec.y.atan2(wind_vec.x).to_degrees());

        InterpolatedSample {
            weather: InterpolatedWeather {
                temperature_c: temperature / weight_sum,
                precipitation_mm: precipitation / weight_sum,
                humidity_pct: humidity / weight_sum,
                wind_speed_kmh: wind_speed / weight_sum,
                wind_direction_deg,
            },
            confidence,
        }
    }

    /// Linear confidence decay from the nearest-station distance.
    fn confidence_at(&self, nearest_km: f64) -> f64 {
        if !nearest_km.is_finite() {
            return 0.0;
        }
        (1.0 - nearest_km / self.config.max_distance_km).clamp(0.0, 1.0)
    }
}
