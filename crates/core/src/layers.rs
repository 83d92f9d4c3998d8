//! Level-of-detail layer management and contextual point lookup.
//!
//! Owns every granularity tier the dashboard can draw, from biome
//! rectangles down to the interpolated weather grid, and answers two
//! questions: which tier should be visible at the current zoom, and what
//! is at a given point. The grid tier is replaced wholesale on refresh
//! (build a new snapshot, then swap the `Arc`); readers holding the old
//! snapshot keep a fully consistent view, never a half-updated one.
//! Debouncing rapid refresh triggers is the caller's job; a suggested
//! coalescing window is exported as [`DEBOUNCE_WINDOW_MS`].

use crate::core_types::geo::{haversine_km, GeoBounds, GeoPoint};
use crate::core_types::reference::{Biome, City, ReferenceTables, TowerRecord};
use crate::core_types::weather::{InterpolatedWeather, WeatherStation};
use crate::grid::{GridCell, GridCellGenerator, GridLayout};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Nearest-tower queries scan only this many records, front of the list
/// first. An explicit approximation: the tower list is sampled and
/// unordered, and a spatial index is not worth it for tooltip lookups.
pub const MAX_TOWER_SCAN: usize = 500;

/// Suggested debounce window (ms) for callers coalescing rapid
/// zoom/viewport events before invoking a refresh. The core itself never
/// debounces.
pub const DEBOUNCE_WINDOW_MS: u64 = 250;

/// Geographic detail tiers, ordered coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Biome,
    State,
    City,
    Tower,
    Grid,
}

/// Tier selection mode: follow the zoom level, or pin one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GranularityMode {
    Auto,
    Pinned(Granularity),
}

/// Map a viewport zoom level to a detail tier.
///
/// A fixed step function, monotonic non-decreasing in detail: zooming in
/// never produces a coarser tier.
pub fn zoom_to_granularity(zoom: u8) -> Granularity {
    match zoom {
        0..=5 => Granularity::Biome,
        6..=7 => Granularity::State,
        8..=10 => Granularity::City,
        11..=13 => Granularity::Tower,
        _ => Granularity::Grid,
    }
}

/// Fused answer to "what is at this point".
///
/// Every layer field degrades to `None` where no layer has data; the
/// aggregated weather falls back from grid cell to biome climate to the
/// interpolation baseline, in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualData {
    pub biome: Option<Biome>,
    pub nearest_city: Option<City>,
    pub nearest_tower: Option<TowerRecord>,
    pub grid_cell: Option<GridCell>,
    pub weather: InterpolatedWeather,
}

/// One immutable generation of the weather grid.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    bounds: GeoBounds,
    layout: GridLayout,
    cells: Vec<GridCell>,
}

impl GridSnapshot {
    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// The cell containing `point`, if the point is inside the gridded
    /// bounds. Arithmetic row/column lookup, no scan.
    pub fn cell_at(&self, point: &GeoPoint) -> Option<&GridCell> {
        self.layout
            .index_of(&self.bounds, point)
            .map(|idx| &self.cells[idx])
    }
}

/// Owner of all granularity tiers and the active-tier state machine.
///
/// The single mutable aggregate in the core. Reference tables are loaded
/// once; towers and the grid are replaced wholesale, never patched in
/// place, so any held snapshot stays internally consistent.
pub struct LayerManager {
    tables: ReferenceTables,
    generator: GridCellGenerator,
    towers: Vec<TowerRecord>,
    grid: Option<Arc<GridSnapshot>>,
    zoom: u8,
    mode: GranularityMode,
}

impl LayerManager {
    pub fn new(tables: ReferenceTables, generator: GridCellGenerator) -> Self {
        LayerManager {
            tables,
            generator,
            towers: Vec::new(),
            grid: None,
            zoom: 4,
            mode: GranularityMode::Auto,
        }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn towers(&self) -> &[TowerRecord] {
        &self.towers
    }

    /// Replace the tower set wholesale.
    pub fn set_towers(&mut self, towers: Vec<TowerRecord>) {
        tracing::debug!(count = towers.len(), "replacing tower set");
        self.towers = towers;
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom;
    }

    pub fn set_mode(&mut self, mode: GranularityMode) {
        self.mode = mode;
    }

    /// The tier the UI should draw right now.
    pub fn active_granularity(&self) -> Granularity {
        match self.mode {
            GranularityMode::Auto => zoom_to_granularity(self.zoom),
            GranularityMode::Pinned(tier) => tier,
        }
    }

    /// Current grid snapshot, if one has been generated.
    pub fn grid(&self) -> Option<Arc<GridSnapshot>> {
        self.grid.clone()
    }

    /// Regenerate the weather grid and swap it in atomically.
    ///
    /// The new snapshot is fully built before the reference is replaced;
    /// clones of the previous `Arc` remain valid and unchanged.
    pub fn refresh_grid(
        &mut self,
        bounds: &GeoBounds,
        cell_size_km: f64,
        stations: &[WeatherStation],
    ) -> Arc<GridSnapshot> {
        let cells = self.generator.generate_grid(bounds, cell_size_km, stations);
        let snapshot = Arc::new(GridSnapshot {
            bounds: *bounds,
            layout: GridLayout::for_bounds(bounds, cell_size_km),
            cells,
        });
        tracing::info!(
            cells = snapshot.cells.len(),
            stations = stations.len(),
            "weather grid refreshed"
        );
        self.grid = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Answer "what is here" for any valid point.
    ///
    /// Runs the independent per-tier lookups and fuses them; total over
    /// the whole coordinate range, even where no layer has data.
    pub fn resolve(&self, point: &GeoPoint) -> ContextualData {
        let biome = self.tables.biome_at(point).cloned();
        let nearest_city = self.nearest_city(point).cloned();
        let nearest_tower = self.nearest_tower(point).cloned();
        let grid_cell = self
            .grid
            .as_ref()
            .and_then(|snapshot| snapshot.cell_at(point))
            .cloned();

        let weather = grid_cell
            .as_ref()
            .map(|cell| cell.weather)
            .or_else(|| biome.as_ref().map(|b| b.climate.as_weather()))
            .unwrap_or_else(InterpolatedWeather::baseline);

        ContextualData {
            biome,
            nearest_city,
            nearest_tower,
            grid_cell,
            weather,
        }
    }

    fn nearest_city(&self, point: &GeoPoint) -> Option<&City> {
        self.tables
            .cities()
            .iter()
            .min_by(|a, b| {
                haversine_km(point, &a.point).total_cmp(&haversine_km(point, &b.point))
            })
    }

    fn nearest_tower(&self, point: &GeoPoint) -> Option<&TowerRecord> {
        // Capped prefix scan, see MAX_TOWER_SCAN.
        self.towers
            .iter()
            .take(MAX_TOWER_SCAN)
            .min_by(|a, b| {
                haversine_km(point, &a.point).total_cmp(&haversine_km(point, &b.point))
            })
    }
}
