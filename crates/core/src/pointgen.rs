//! Constrained synthetic coordinate generation.
//!
//! Synthesizes plausible tower positions at startup: points cluster
//! around population-weighted city anchors, stay inside the region and
//! country rectangles, and avoid known water boxes. Sampling around an
//! anchor uses area-uniform polar jitter: the radius is drawn as
//! `sqrt(u) * max_radius`, which makes density uniform over the disk
//! area. Drawing the radius uniformly (without the square root) would
//! pile points up near the anchor center, a visibly wrong distribution
//! on the map.
//!
//! Water avoidance is reject-and-retry against a pluggable predicate,
//! bounded at a fixed attempt count. When every attempt is rejected the
//! last candidate is relocated deterministically toward the region
//! interior, so generation never fails, only degrades.

use crate::core_types::geo::{GeoBounds, GeoPoint};
use crate::core_types::reference::{RegionSpec, TowerRecord, WeightedAnchor};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Land/water oracle over candidate points.
///
/// Implementations are coarse rectangular masks or test closures;
/// correctness means staying on the right side of known boxes, not
/// coastline accuracy.
pub trait WaterTest {
    fn is_water(&self, point: &GeoPoint) -> bool;
}

impl<F> WaterTest for F
where
    F: Fn(&GeoPoint) -> bool,
{
    fn is_water(&self, point: &GeoPoint) -> bool {
        self(point)
    }
}

/// Water mask backed by hand-tuned exclusion rectangles.
#[derive(Debug, Clone, Default)]
pub struct RectWaterMask {
    boxes: Vec<GeoBounds>,
}

impl RectWaterMask {
    pub fn new(boxes: Vec<GeoBounds>) -> Self {
        RectWaterMask { boxes }
    }
}

impl WaterTest for RectWaterMask {
    fn is_water(&self, point: &GeoPoint) -> bool {
        self.boxes.iter().any(|b| b.contains(point))
    }
}

/// Tuning knobs for constrained point generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointGenConfig {
    /// Probability of sampling around a city anchor instead of the
    /// region centroid.
    pub anchor_probability: f64,
    /// Jitter disk radius (degrees) around interior anchors.
    pub interior_radius_deg: f64,
    /// Tighter disk (degrees) around coastal anchors, to keep samples
    /// out of the sea.
    pub coastal_radius_deg: f64,
    /// Scale (degrees) of the small noise added after the polar jitter
    /// to break perfect circularity.
    pub jitter_sigma_deg: f64,
    /// Water-rejection retry budget per generated point.
    pub max_attempts: u32,
    /// Degrees to shift toward the region interior when every attempt
    /// was rejected.
    pub fallback_shift_deg: f64,
}

impl Default for PointGenConfig {
    fn default() -> Self {
        PointGenConfig {
            anchor_probability: 0.7,
            interior_radius_deg: 1.5,
            coastal_radius_deg: 0.6,
            jitter_sigma_deg: 0.05,
            max_attempts: 150,
            fallback_shift_deg: 1.0,
        }
    }
}

/// Stateless generator of land-constrained coordinates.
///
/// Pure function of its inputs plus the caller's RNG; holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct ConstrainedPointGenerator {
    outer_bounds: GeoBounds,
    config: PointGenConfig,
}

impl ConstrainedPointGenerator {
    pub fn new(outer_bounds: GeoBounds, config: PointGenConfig) -> Self {
        ConstrainedPointGenerator {
            outer_bounds,
            config,
        }
    }

    pub fn config(&self) -> &PointGenConfig {
        &self.config
    }

    /// Generate one coordinate inside `region`, avoiding water.
    ///
    /// Retries up to `max_attempts` fresh samples against `water`; if all
    /// are rejected, relocates the last candidate toward the region
    /// interior and returns it regardless. Never fails and never spins.
    pub fn generate<W, R>(&self, region: &RegionSpec, water: &W, rng: &mut R) -> GeoPoint
    where
        W: WaterTest,
        R: Rng,
    {
        let mut candidate = self.sample(region, rng);
        for _ in 0..self.config.max_attempts {
            if !water.is_water(&candidate) {
                return candidate;
            }
            candidate = self.sample(region, rng);
        }

        // Every attempt landed in water: shift deterministically toward
        // the interior and accept the result, crude as it may be.
        tracing::warn!(
            region = %region.name,
            attempts = self.config.max_attempts,
            "water rejection budget exhausted, forcing interior fallback"
        );
        let rad = region.interior_bearing_deg.to_radians();
        let forced = GeoPoint::new_unchecked(
            candidate.lat + self.config.fallback_shift_deg * rad.cos(),
            candidate.lng + self.config.fallback_shift_deg * rad.sin(),
        );
        self.clamp(region, forced)
    }

    /// Generate a batch of tower records with sequential positional ids.
    pub fn generate_towers<W, R>(
        &self,
        region: &RegionSpec,
        count: usize,
        water: &W,
        rng: &mut R,
    ) -> Vec<TowerRecord>
    where
        W: WaterTest,
        R: Rng,
    {
        (0..count)
            .map(|i| TowerRecord {
                id: format!("tower-{i}"),
                point: self.generate(region, water, rng),
            })
            .collect()
    }

    /// Draw one candidate: anchor branch with probability
    /// `anchor_probability`, centroid branch otherwise, both clamped
    /// into the region and outer rectangles.
    fn sample<R: Rng>(&self, region: &RegionSpec, rng: &mut R) -> GeoPoint {
        let picked = if !region.anchors.is_empty()
            && rng.random::<f64>() < self.config.anchor_probability
        {
            roulette(&region.anchors, rng)
        } else {
            None
        };
        let raw = match picked {
            Some(anchor) => {
                let radius = if anchor.coastal {
                    self.config.coastal_radius_deg
                } else {
                    self.config.interior_radius_deg
                };
                self.jitter(anchor.point, radius, rng)
            }
            None => {
                let radius = region.bounds.lat_span().min(region.bounds.lng_span()) / 2.0;
                self.jitter(region.bounds.center(), radius, rng)
            }
        };
        self.clamp(region, raw)
    }

    /// Area-uniform polar offset around `center`, plus a little noise so
    /// the clusters don't render as perfect circles.
    fn jitter<R: Rng>(&self, center: GeoPoint, max_radius_deg: f64, rng: &mut R) -> GeoPoint {
        let angle = rng.random_range(0.0..TAU);
        // sqrt keeps density uniform per unit area, not per unit radius
        let radius = rng.random::<f64>().sqrt() * max_radius_deg;

        let sigma = self.config.jitter_sigma_deg;
        // Sum of two uniforms: triangular, close enough to a small gaussian
        let noise_lat = (rng.random::<f64>() + rng.random::<f64>() - 1.0) * sigma;
        let noise_lng = (rng.random::<f64>() + rng.random::<f64>() - 1.0) * sigma;

        GeoPoint::new_unchecked(
            center.lat + radius * angle.cos() + noise_lat,
            center.lng + radius * angle.sin() + noise_lng,
        )
    }

    /// Clamp into the region rectangle, then the outer rectangle.
    fn clamp(&self, region: &RegionSpec, point: GeoPoint) -> GeoPoint {
        self.outer_bounds.clamp(&region.bounds.clamp(&point))
    }
}

/// Weighted roulette over the raw cumulative sum.
///
/// Tolerates weights that do not sum to exactly 1 by falling back to the
/// last anchor when the walk runs off the end. `None` only for an empty
/// slice; no panic path.
fn roulette<'a, R: Rng>(anchors: &'a [WeightedAnchor], rng: &mut R) -> Option<&'a WeightedAnchor> {
    let (last, rest) = anchors.split_last()?;
    let u = rng.random::<f64>();
    let mut cumulative = 0.0;
    for anchor in rest {
        cumulative += anchor.weight;
        if cumulative >= u {
            return Some(anchor);
        }
    }
    Some(last)
}
