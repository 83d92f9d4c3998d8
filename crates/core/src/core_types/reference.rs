//! Static reference entities: biomes, cities, towers, and region specs.
//!
//! Loaded once at process start and treated as immutable snapshots for
//! the process lifetime. Biome rectangles and the water mask are coarse,
//! hand-tuned bounding boxes, not real polygons; they exist to keep
//! synthetic towers plausibly on land and to provide fallback climate
//! context, not to trace coastlines.

use crate::core_types::geo::{GeoBounds, GeoPoint};
use crate::core_types::weather::ClimateStats;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A biome with a coarse bounding rectangle and climate averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biome {
    pub id: String,
    pub name: String,
    pub bounds: GeoBounds,
    pub climate: ClimateStats,
}

/// A city reference point used as a sampling anchor and LOD layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub point: GeoPoint,
    pub population: u64,
    /// Coastal cities get a tighter jitter disk during point generation.
    pub coastal: bool,
}

/// A tower position, either fetched from the tower API or synthesized
/// at startup by the point generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerRecord {
    pub id: String,
    pub point: GeoPoint,
}

/// A weighted sampling anchor derived from a city.
///
/// Weights for anchors sharing a region need not sum to 1; roulette
/// selection walks the raw cumulative sum and falls back to the last
/// anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightedAnchor {
    pub point: GeoPoint,
    pub weight: f64,
    pub coastal: bool,
}

impl WeightedAnchor {
    /// Derive an anchor from a city, weighted by population share.
    pub fn from_city(city: &City, total_population: u64) -> Self {
        let weight = if total_population == 0 {
            0.0
        } else {
            city.population as f64 / total_population as f64
        };
        WeightedAnchor {
            point: city.point,
            weight,
            coastal: city.coastal,
        }
    }
}

/// Per-region inputs to constrained point generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    pub bounds: GeoBounds,
    pub anchors: Vec<WeightedAnchor>,
    /// Compass bearing (degrees) pointing toward the region interior,
    /// used by the forced-fallback relocation.
    pub interior_bearing_deg: f64,
}

/// The full static reference data set for one country.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    biomes: Vec<Biome>,
    cities: Vec<City>,
    city_index: FxHashMap<String, usize>,
    water: Vec<GeoBounds>,
    country_bounds: GeoBounds,
}

impl ReferenceTables {
    /// Assemble tables from raw collections, indexing cities by name.
    pub fn new(
        biomes: Vec<Biome>,
        cities: Vec<City>,
        water: Vec<GeoBounds>,
        country_bounds: GeoBounds,
    ) -> Self {
        let city_index = cities
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        ReferenceTables {
            biomes,
            cities,
            city_index,
            water,
            country_bounds,
        }
    }

    /// Built-in Brazilian reference data: six biomes with coarse
    /// rectangles, the major metro areas, and Atlantic exclusion boxes.
    pub fn brazil() -> Self {
        let country_bounds = GeoBounds::new_unchecked(5.3, -33.8, -34.7, -73.9);

        // (id, name, [north, south, east, west],
        //  [temp °C, precip mm, humidity %, wind km/h, wind bearing °])
        let biomes = [
            ("amazonia", "Amazônia", [5.3, -12.0, -46.0, -73.9], [27.0, 7.5, 85.0, 8.0, 90.0]),
            ("cerrado", "Cerrado", [-2.0, -20.0, -42.0, -60.0], [25.0, 3.0, 60.0, 12.0, 70.0]),
            ("caatinga", "Caatinga", [-3.0, -15.0, -35.0, -44.0], [28.0, 0.5, 45.0, 16.0, 120.0]),
            ("mata-atlantica", "Mata Atlântica", [-5.0, -30.0, -34.7, -52.0], [21.0, 4.0, 75.0, 14.0, 150.0]),
            ("pampa", "Pampa", [-28.0, -33.8, -49.0, -58.0], [18.0, 3.0, 70.0, 18.0, 180.0]),
            ("pantanal", "Pantanal", [-15.0, -22.0, -55.0, -59.0], [26.0, 3.5, 70.0, 9.0, 100.0]),
        ]
        .into_iter()
        .map(|(id, name, edges, climate)| Biome {
            id: id.to_string(),
            name: name.to_string(),
            bounds: GeoBounds::new_unchecked(edges[0], edges[1], edges[2], edges[3]),
            climate: ClimateStats {
                avg_temperature_c: climate[0],
                avg_precipitation_mm: climate[1],
                avg_humidity_pct: climate[2],
                avg_wind_speed_kmh: climate[3],
                prevailing_wind_deg: climate[4],
            },
        })
        .collect();

        let cities = vec![
            city("sao-paulo", "São Paulo", -23.5505, -46.6333, 12_300_000, false),
            city("rio-de-janeiro", "Rio de Janeiro", -22.9068, -43.1729, 6_700_000, true),
            city("brasilia", "Brasília", -15.7939, -47.8828, 3_000_000, false),
            city("salvador", "Salvador", -12.9777, -38.5016, 2_900_000, true),
            city("fortaleza", "Fortaleza", -3.7319, -38.5267, 2_700_000, true),
            city("belo-horizonte", "Belo Horizonte", -19.9167, -43.9345, 2_500_000, false),
            city("manaus", "Manaus", -3.1190, -60.0217, 2_200_000, false),
            city("curitiba", "Curitiba", -25.4284, -49.2733, 1_900_000, false),
            city("recife", "Recife", -8.0476, -34.8770, 1_650_000, true),
            city("belem", "Belém", -1.4558, -48.4902, 1_500_000, true),
            city("goiania", "Goiânia", -16.6869, -49.2648, 1_500_000, false),
            city("porto-alegre", "Porto Alegre", -30.0346, -51.2177, 1_480_000, true),
        ];

        // Hand-tuned Atlantic boxes hugging the coastline. Heuristic by
        // intent; accuracy is "right side of the box", not coastline.
        let water = vec![
            GeoBounds::new_unchecked(1.0, -8.0, -25.0, -34.6),
            GeoBounds::new_unchecked(-8.0, -18.0, -25.0, -34.5),
            GeoBounds::new_unchecked(-18.0, -26.0, -25.0, -40.0),
            GeoBounds::new_unchecked(-26.0, -33.8, -30.0, -47.5),
        ];

        ReferenceTables::new(biomes, cities, water, country_bounds)
    }

    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Water-exclusion rectangles for the point generator.
    pub fn water_boxes(&self) -> &[GeoBounds] {
        &self.water
    }

    /// Country-level outer bounding box.
    pub fn country_bounds(&self) -> &GeoBounds {
        &self.country_bounds
    }

    /// Look up a city by display name.
    pub fn city(&self, name: &str) -> Option<&City> {
        self.city_index.get(name).map(|&i| &self.cities[i])
    }

    /// First biome whose rectangle contains the point. Rectangles may
    /// overlap; table order is the tie-break.
    pub fn biome_at(&self, point: &GeoPoint) -> Option<&Biome> {
        self.biomes.iter().find(|b| b.bounds.contains(point))
    }

    /// Build a country-wide region spec with every city as a
    /// population-weighted anchor. The interior bearing points northwest,
    /// away from the Atlantic coast.
    pub fn default_region(&self) -> RegionSpec {
        let total: u64 = self.cities.iter().map(|c| c.population).sum();
        RegionSpec {
            name: "country".to_string(),
            bounds: self.country_bounds,
            anchors: self
                .cities
                .iter()
                .map(|c| WeightedAnchor::from_city(c, total))
                .collect(),
            interior_bearing_deg: 315.0,
        }
    }
}

fn city(id: &str, name: &str, lat: f64, lng: f64, population: u64, coastal: bool) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        point: GeoPoint::new_unchecked(lat, lng),
        population,
        coastal,
    }
}
