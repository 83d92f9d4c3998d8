//! Geospatial core for the tower-network weather dashboard.
//!
//! Everything the map UI needs that is more than presentation glue:
//! - Synthetic tower coordinates constrained to stay on land and cluster
//!   around real cities ([`pointgen`])
//! - Inverse-distance-weighted interpolation of station readings, with
//!   vector averaging for wind bearing ([`interpolate`])
//! - Regular weather grids tiling a bounding rectangle ([`grid`])
//! - Level-of-detail selection and "what is here" contextual lookup
//!   across biome, city, tower, and grid tiers ([`layers`])
//!
//! The core is synchronous and allocation-light: pure functions over
//! immutable snapshots, with [`layers::LayerManager`] as the single
//! mutable aggregate (refreshed by wholesale snapshot swap). All map
//! rendering, HTTP, and export concerns live with the callers.

// Core types and geographic math
pub mod core_types;

// Algorithm components
pub mod grid;
pub mod interpolate;
pub mod layers;
pub mod pointgen;

// Re-export core types
pub use core_types::{
    haversine_km, normalize_deg, Biome, City, ClimateStats, GeoBounds, GeoPoint,
    InterpolatedWeather, ReferenceTables, RegionSpec, TowerRecord, ValidationError,
    WeatherStation, WeightedAnchor, EARTH_RADIUS_KM, KM_PER_DEGREE,
};

// Re-export component types
pub use grid::{GridCell, GridCellGenerator, GridLayout};
pub use interpolate::{IdwConfig, InterpolatedSample, InterpolationStrategy, SpatialInterpolator};
pub use layers::{
    zoom_to_granularity, ContextualData, Granularity, GranularityMode, GridSnapshot, LayerManager,
    DEBOUNCE_WINDOW_MS, MAX_TOWER_SCAN,
};
pub use pointgen::{ConstrainedPointGenerator, PointGenConfig, RectWaterMask, WaterTest};
