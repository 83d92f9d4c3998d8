//! Regular weather grid generation.
//!
//! Tiles a bounding rectangle into approximately-equal-area cells at a
//! target edge length in kilometers and interpolates weather at each cell
//! center. The km→degree conversion uses the flat 111 km/degree constant;
//! cells are therefore slightly narrower on the ground at high latitudes,
//! which is acceptable for a dashboard overlay.
//!
//! The cells exactly tile the input bounds: `ceil(span/step)` rows and
//! columns, with the last row and column clipped to the bounds' edges
//! instead of overshooting. Cell ids are positional (`grid-cell-<index>`,
//! row-major); regeneration reassigns them even when geometry is
//! unchanged.

use crate::core_types::geo::{GeoBounds, GeoPoint, KM_PER_DEGREE};
use crate::core_types::weather::{InterpolatedWeather, WeatherStation};
use crate::interpolate::SpatialInterpolator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One tile of the weather overlay grid.
///
/// Immutable after creation; the whole grid is regenerated wholesale
/// when the station sample set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    pub id: String,
    pub center: GeoPoint,
    pub bounds: GeoBounds,
    /// Corner points in SW, SE, NE, NW order (Leaflet polygon order).
    pub vertices: [GeoPoint; 4],
    pub weather: InterpolatedWeather,
    /// Interpolation confidence at the cell center, in [0, 1].
    pub confidence: f64,
}

/// Row/column layout of a grid over some bounds.
///
/// A pure function of the bounds and cell size, independent of station
/// data; kept alongside the cells so point→cell lookup is arithmetic
/// instead of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    /// Degree step per cell edge (same for both axes).
    pub step_deg: f64,
}

impl GridLayout {
    /// Compute the layout for `bounds` at `cell_size_km` per edge.
    ///
    /// `cell_size_km` must be positive and finite; a non-positive edge
    /// length has no meaningful tiling and would explode the row count.
    pub fn for_bounds(bounds: &GeoBounds, cell_size_km: f64) -> Self {
        debug_assert!(
            cell_size_km > 0.0 && cell_size_km.is_finite(),
            "cell_size_km must be positive and finite, got {cell_size_km}"
        );
        let step_deg = cell_size_km / KM_PER_DEGREE;
        GridLayout {
            rows: (bounds.lat_span() / step_deg).ceil() as usize,
            cols: (bounds.lng_span() / step_deg).ceil() as usize,
            step_deg,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major index of the cell containing `point`, or `None` if the
    /// point lies outside `bounds`. The last row/column absorbs points on
    /// the clipped north/east edges.
    pub fn index_of(&self, bounds: &GeoBounds, point: &GeoPoint) -> Option<usize> {
        if !bounds.contains(point) {
            return None;
        }
        let row = (((point.lat - bounds.south) / self.step_deg) as usize).min(self.rows - 1);
        let col = (((point.lng - bounds.west) / self.step_deg) as usize).min(self.cols - 1);
        Some(row * self.cols + col)
    }
}

/// Generates the weather overlay grid by interpolating at cell centers.
#[derive(Debug, Clone, Default)]
pub struct GridCellGenerator {
    interpolator: SpatialInterpolator,
}

impl GridCellGenerator {
    pub fn new(interpolator: SpatialInterpolator) -> Self {
        GridCellGenerator { interpolator }
    }

    pub fn interpolator(&self) -> &SpatialInterpolator {
        &self.interpolator
    }

    /// Tile `bounds` into cells of roughly `cell_size_km` per edge and
    /// interpolate weather from `stations` at each cell center.
    ///
    /// The returned cells cover `bounds` exactly with disjoint interiors.
    /// Cell count depends only on `bounds` and `cell_size_km`, which must
    /// be positive (see [`GridLayout::for_bounds`]).
    pub fn generate_grid(
        &self,
        bounds: &GeoBounds,
        cell_size_km: f64,
        stations: &[WeatherStation],
    ) -> Vec<GridCell> {
        let layout = GridLayout::for_bounds(bounds, cell_size_km);
        tracing::debug!(
            rows = layout.rows,
            cols = layout.cols,
            stations = stations.len(),
            "generating weather grid"
        );

        (0..layout.cell_count())
            .into_par_iter()
            .map(|idx| self.build_cell(idx, bounds, &layout, stations))
            .collect()
    }

    fn build_cell(
        &self,
        idx: usize,
        bounds: &GeoBounds,
        layout: &GridLayout,
        stations: &[WeatherStation],
    ) -> GridCell {
        let row = idx / layout.cols;
        let col = idx % layout.cols;

        let south = bounds.south + row as f64 * layout.step_deg;
        let west = bounds.west + col as f64 * layout.step_deg;
        // Clip the last row/column to the outer bounds instead of
        // overshooting past them.
        let north = (south + layout.step_deg).min(bounds.north);
        let east = (west + layout.step_deg).min(bounds.east);

        let cell_bounds = GeoBounds::new_unchecked(north, south, east, west);
        let center = cell_bounds.center();
        let sample = self.interpolator.interpolate(&center, stations);

        GridCell {
            id: format!("grid-cell-{idx}"),
            center,
            bounds: cell_bounds,
            vertices: [
                GeoPoint::new_unchecked(south, west),
                GeoPoint::new_unchecked(south, east),
                GeoPoint::new_unchecked(north, east),
                GeoPoint::new_unchecked(north, west),
            ],
            weather: sample.weather,
            confidence: sample.confidence,
        }
    }
}
