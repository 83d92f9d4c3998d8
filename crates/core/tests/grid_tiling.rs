//! Grid tiling invariants, including the country-scale scenario.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use towermap_core::{GeoBounds, GeoPoint, GridCellGenerator, GridLayout, WeatherStation};

#[test]
fn cell_count_matches_ceil_formula() {
    let bounds = GeoBounds::new(2.5, 0.0, 3.0, 0.0).unwrap();
    let cell_size_km = 75.0;
    let cells = GridCellGenerator::default().generate_grid(&bounds, cell_size_km, &[]);

    let step = cell_size_km / towermap_core::KM_PER_DEGREE;
    let expected = (bounds.lat_span() / step).ceil() as usize * (bounds.lng_span() / step).ceil() as usize;
    assert_eq!(cells.len(), expected);
    assert_eq!(cells.len(), GridLayout::for_bounds(&bounds, cell_size_km).cell_count());
}

#[test]
fn cells_tile_bounds_without_gaps_or_overlaps() {
    let bounds = GeoBounds::new(1.7, 0.0, 2.3, 0.0).unwrap();
    let cells = GridCellGenerator::default().generate_grid(&bounds, 60.0, &[]);

    // Union covers the bounds exactly: clipped tiling means the cell
    // areas (in degree space) sum to the bounds area.
    let total_area: f64 = cells
        .iter()
        .map(|c| c.bounds.lat_span() * c.bounds.lng_span())
        .sum();
    assert_relative_eq!(
        total_area,
        bounds.lat_span() * bounds.lng_span(),
        epsilon = 1e-9
    );

    // Random interior points fall in exactly one cell (edges are shared,
    // but random draws never hit them).
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..300 {
        let p = GeoPoint::new(
            rng.random_range(bounds.south..bounds.north),
            rng.random_range(bounds.west..bounds.east),
        )
        .unwrap();
        let holders = cells.iter().filter(|c| c.bounds.contains(&p)).count();
        assert_eq!(holders, 1, "point {p:?} contained by {holders} cells");
    }
}

#[test]
fn brazil_scale_grid_with_single_station() {
    // Country bounds at 50 km cells: a few thousand cells.
    let bounds = GeoBounds::new(5.0, -34.0, -34.0, -74.0).unwrap();
    let generator = GridCellGenerator::default();

    let layout = GridLayout::for_bounds(&bounds, 50.0);
    let probe = generator.generate_grid(&bounds, 50.0, &[]);
    assert_eq!(probe.len(), layout.cell_count());
    assert!(
        (2_000..20_000).contains(&probe.len()),
        "expected low thousands of cells, got {}",
        probe.len()
    );

    // One station at cell 0's centroid: that cell is an exact match,
    // confidence decays with distance and reaches zero out of range.
    let station = WeatherStation {
        point: probe[0].center,
        temperature_c: 28.0,
        precipitation_mm: 3.0,
        humidity_pct: 80.0,
        wind_speed_kmh: 9.0,
        wind_direction_deg: 120.0,
    };
    let cells = generator.generate_grid(&bounds, 50.0, &[station]);

    assert_eq!(cells[0].confidence, 1.0);
    assert_eq!(cells[0].weather.temperature_c, 28.0);

    // Same row, marching east away from cell 0
    let near = &cells[2];
    let far = &cells[20];
    assert!(near.confidence > far.confidence);

    // Opposite corner of the country is far outside the 500 km radius
    let last = cells.last().unwrap();
    assert_eq!(last.confidence, 0.0);
    assert_eq!(
        last.weather,
        towermap_core::InterpolatedWeather::baseline()
    );
}

#[test]
fn single_cell_grid_when_bounds_smaller_than_cell() {
    let bounds = GeoBounds::new(0.1, 0.0, 0.1, 0.0).unwrap();
    let cells = GridCellGenerator::default().generate_grid(&bounds, 200.0, &[]);
    assert_eq!(cells.len(), 1);
    let cell = &cells[0];
    assert_relative_eq!(cell.bounds.north, bounds.north);
    assert_relative_eq!(cell.bounds.south, bounds.south);
    assert_relative_eq!(cell.bounds.east, bounds.east);
    assert_relative_eq!(cell.bounds.west, bounds.west);
}
