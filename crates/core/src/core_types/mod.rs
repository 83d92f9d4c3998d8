//! Core types and geographic math shared by every component.

pub mod geo;
pub mod reference;
pub mod weather;

pub use geo::{
    haversine_km, normalize_deg, GeoBounds, GeoPoint, ValidationError, EARTH_RADIUS_KM,
    KM_PER_DEGREE,
};
pub use reference::{Biome, City, ReferenceTables, RegionSpec, TowerRecord, WeightedAnchor};
pub use weather::{ClimateStats, InterpolatedWeather, WeatherStation};
