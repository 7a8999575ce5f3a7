//! Scatter placement: rejection-sampled instance positions over the height field.
//!
//! A pass places `count` instances inside the square `[-spread, spread]²`, keeping
//! each one outside a clear zone around the origin (and optionally inside an outer
//! ring). Variant assignment is shuffled with the same stream, so the whole pass is
//! reproducible from the stream's seed.
//!
//! Draw order within a pass is fixed:
//! 1. Fisher–Yates shuffle of the variant tags (only when there is more than one variant).
//! 2. Per instance: `x`, `z` pairs until one is accepted, then yaw, then scale.

use std::f64::consts::{SQRT_2, TAU};

use glam::{DMat4, DQuat, DVec3};

use crate::heightfield::HeightField;
use crate::random::RandomStream;

/// Default cap on rejected candidates per instance.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Index of a variant within the [`ScatterParams::variants`] list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(pub u32);

/// One visual kind sharing a scatter pass.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantSpec {
    /// Human-readable name (e.g. `"pine"`).
    pub name: String,
    /// Uniform scale multiplier range: \[min, max\).
    pub scale_range: (f64, f64),
}

impl VariantSpec {
    /// Create a variant definition.
    pub fn new(name: impl Into<String>, scale_range: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            scale_range,
        }
    }
}

/// A placed instance on the terrain surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedInstance {
    /// World-space anchor; `y` is the terrain height at `(x, z)`.
    pub position: DVec3,
    /// Rotation about +Y in radians, in `[0, 2π)`.
    pub yaw: f64,
    /// Uniform scale multiplier.
    pub scale: f64,
    /// Which variant this instance renders as.
    pub variant: VariantId,
}

impl PlacedInstance {
    /// Distance from the origin in the XZ plane.
    pub fn planar_distance(&self) -> f64 {
        self.position.x.hypot(self.position.z)
    }

    /// Model matrix for this instance.
    ///
    /// Every part of one object (trunk and foliage, stem and cap) uses this same
    /// matrix so the parts stay aligned.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            DVec3::splat(self.scale),
            DQuat::from_rotation_y(self.yaw),
            self.position,
        )
    }
}

/// Errors raised when a scatter pass cannot be satisfied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// The spread must be a positive finite number.
    #[error("spread must be positive and finite, got {0}")]
    InvalidSpread(f64),

    /// The minimum distance must be a non-negative finite number.
    #[error("minimum distance must be non-negative and finite, got {0}")]
    InvalidMinDistance(f64),

    /// The outer ring lies inside the clear zone.
    #[error("maximum distance {max} must exceed minimum distance {min}")]
    InvertedDistances {
        /// Requested minimum distance.
        min: f64,
        /// Requested maximum distance.
        max: f64,
    },

    /// No point of the square can satisfy the distance constraint.
    #[error("minimum distance {min} leaves no room inside reachable extent {extent}")]
    Unsatisfiable {
        /// Requested minimum distance.
        min: f64,
        /// Farthest distance a candidate can reach.
        extent: f64,
    },

    /// Instances were requested but no variants were given.
    #[error("{0} instances requested but no variants defined")]
    NoVariants(usize),

    /// A variant's scale range is inverted or not finite.
    #[error("variant '{name}' has invalid scale range [{min}, {max}]")]
    InvalidScaleRange {
        /// Variant name.
        name: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Too many candidates were rejected for a single instance.
    #[error("gave up after {attempts} rejected candidates for instance {index}")]
    AttemptsExhausted {
        /// Instance index within the pass.
        index: usize,
        /// Attempts made.
        attempts: u32,
    },
}

/// Parameters for one scatter pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterParams {
    /// Total instances across all variants.
    pub count: usize,
    /// Half-width of the square candidates are drawn from.
    pub spread: f64,
    /// Minimum planar distance from the origin (inclusive).
    pub min_distance: f64,
    /// Optional maximum planar distance from the origin (inclusive).
    pub max_distance: Option<f64>,
    /// Variants sharing this pass, in priority order for remainder distribution.
    pub variants: Vec<VariantSpec>,
    /// Rejected candidates tolerated per instance before giving up.
    pub max_attempts: u32,
}

impl ScatterParams {
    /// Two tree kinds kept clear of the center, no outer bound.
    pub fn trees(count: usize, spread: f64, min_distance: f64) -> Self {
        Self {
            count,
            spread,
            min_distance,
            max_distance: None,
            variants: vec![
                VariantSpec::new("pine", (0.8, 1.2)),
                VariantSpec::new("broadleaf", (0.7, 1.1)),
            ],
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Three mushroom shapes clustered within `max_distance_factor * spread`.
    pub fn mushrooms(
        count: usize,
        spread: f64,
        min_distance: f64,
        max_distance_factor: f64,
    ) -> Self {
        let shared = (0.5, 1.5);
        Self {
            count,
            spread,
            min_distance,
            max_distance: Some(max_distance_factor * spread),
            variants: vec![
                VariantSpec::new("cap", shared),
                VariantSpec::new("bell", shared),
                VariantSpec::new("button", shared),
            ],
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Farthest planar distance a candidate can satisfy.
    pub fn reachable_extent(&self) -> f64 {
        let corner = self.spread * SQRT_2;
        match self.max_distance {
            Some(max) => max.min(corner),
            None => corner,
        }
    }

    /// Check that the pass can terminate before drawing anything.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if !(self.spread.is_finite() && self.spread > 0.0) {
            return Err(PlacementError::InvalidSpread(self.spread));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(PlacementError::InvalidMinDistance(self.min_distance));
        }
        if let Some(max) = self.max_distance
            && !(max > self.min_distance)
        {
            return Err(PlacementError::InvertedDistances {
                min: self.min_distance,
                max,
            });
        }
        let extent = self.reachable_extent();
        if self.min_distance >= extent {
            return Err(PlacementError::Unsatisfiable {
                min: self.min_distance,
                extent,
            });
        }
        if self.count > 0 && self.variants.is_empty() {
            return Err(PlacementError::NoVariants(self.count));
        }
        for v in &self.variants {
            let (min, max) = v.scale_range;
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(PlacementError::InvalidScaleRange {
                    name: v.name.clone(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn accepts(&self, distance: f64) -> bool {
        distance >= self.min_distance && self.max_distance.is_none_or(|max| distance <= max)
    }
}

/// Split `total` across `variants` buckets; the remainder goes to the earliest ones.
pub fn variant_counts(total: usize, variants: usize) -> Vec<usize> {
    if variants == 0 {
        return Vec::new();
    }
    let base = total / variants;
    let remainder = total % variants;
    (0..variants)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

/// In-place Fisher–Yates shuffle, walking `i` from the last index down to 1 and
/// swapping with `floor(next() * (i + 1))`.
pub fn shuffle<T>(items: &mut [T], stream: &mut RandomStream) {
    for i in (1..items.len()).rev() {
        let j = (stream.next() * (i + 1) as f64).floor() as usize;
        items.swap(i, j);
    }
}

/// Result of one scatter pass.
#[derive(Clone, Debug, Default)]
pub struct PlacementSet {
    /// Variant names, indexed by [`VariantId`].
    pub variant_names: Vec<String>,
    /// Instances in generation order.
    pub instances: Vec<PlacedInstance>,
}

impl PlacementSet {
    /// Total instances placed.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances of one variant, in generation order.
    pub fn of_variant(&self, variant: VariantId) -> impl Iterator<Item = &PlacedInstance> {
        self.instances.iter().filter(move |i| i.variant == variant)
    }

    /// Number of instances of each variant, indexed by [`VariantId`].
    ///
    /// Instances whose variant has no entry in `variant_names` are not counted.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.variant_names.len()];
        for inst in &self.instances {
            if let Some(count) = counts.get_mut(inst.variant.0 as usize) {
                *count += 1;
            }
        }
        counts
    }

    /// Per-variant model matrices for instanced rendering. Instances with an unknown
    /// variant are skipped, as in [`PlacementSet::counts`].
    ///
    /// Entry `k` of a variant's list is the shared transform for every mesh part of
    /// that variant's `k`-th object.
    pub fn grouped_transforms(&self) -> Vec<Vec<DMat4>> {
        let mut groups = vec![Vec::new(); self.variant_names.len()];
        for inst in &self.instances {
            if let Some(group) = groups.get_mut(inst.variant.0 as usize) {
                group.push(inst.transform());
            }
        }
        groups
    }
}

/// Run one scatter pass.
///
/// Validates `params` first and fails fast on a configuration that could never
/// terminate. On success the stream has advanced by exactly the draws the pass used.
pub fn scatter(
    params: &ScatterParams,
    field: &HeightField,
    stream: &mut RandomStream,
) -> Result<PlacementSet, PlacementError> {
    params.validate()?;

    let counts = variant_counts(params.count, params.variants.len());
    let mut tags: Vec<VariantId> = counts
        .iter()
        .enumerate()
        .flat_map(|(v, &c)| std::iter::repeat_n(VariantId(v as u32), c))
        .collect();
    if params.variants.len() > 1 {
        shuffle(&mut tags, stream);
    }

    let spread = params.spread;
    let mut instances = Vec::with_capacity(tags.len());
    let mut rejected_total = 0_u64;

    for (index, &variant) in tags.iter().enumerate() {
        let mut attempts = 0_u32;
        let (x, z) = loop {
            let x = stream.next_in_range(-spread, spread);
            let z = stream.next_in_range(-spread, spread);
            if params.accepts(x.hypot(z)) {
                break (x, z);
            }
            attempts += 1;
            if attempts >= params.max_attempts {
                return Err(PlacementError::AttemptsExhausted { index, attempts });
            }
        };
        rejected_total += u64::from(attempts);

        let y = field.height(x, z);
        let yaw = stream.next_in_range(0.0, TAU);
        let (smin, smax) = params.variants[variant.0 as usize].scale_range;
        let scale = stream.next_in_range(smin, smax);

        instances.push(PlacedInstance {
            position: DVec3::new(x, y, z),
            yaw,
            scale,
            variant,
        });
    }

    tracing::debug!(
        placed = instances.len(),
        rejected = rejected_total,
        ?counts,
        "scatter pass complete"
    );

    Ok(PlacementSet {
        variant_names: params.variants.iter().map(|v| v.name.clone()).collect(),
        instances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> HeightField {
        HeightField::default()
    }

    #[test]
    fn test_variant_counts_even_split() {
        assert_eq!(variant_counts(150, 3), vec![50, 50, 50]);
    }

    #[test]
    fn test_variant_counts_remainder_goes_first() {
        assert_eq!(variant_counts(151, 3), vec![51, 50, 50]);
        assert_eq!(variant_counts(152, 3), vec![51, 51, 50]);
        assert_eq!(variant_counts(2, 3), vec![1, 1, 0]);
        assert!(variant_counts(5, 0).is_empty());
    }

    #[test]
    fn test_shuffle_draw_order() {
        let mut items = [0, 1, 2, 3];
        let mut stream = RandomStream::new(42);
        let mut reference = RandomStream::new(42);
        shuffle(&mut items, &mut stream);

        let mut expected = [0, 1, 2, 3];
        for i in (1..4).rev() {
            let j = (reference.next() * (i + 1) as f64).floor() as usize;
            expected.swap(i, j);
        }
        assert_eq!(items, expected);
        assert_eq!(stream, reference, "shuffle must consume exactly len-1 draws");
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..100).collect();
        shuffle(&mut items, &mut RandomStream::new(9));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_trees_respect_min_distance_across_seeds() {
        let params = ScatterParams::trees(200, 20.0, 5.0);
        for seed in [1, 42, 1234, 99_999, u32::MAX] {
            let set = scatter(&params, &field(), &mut RandomStream::new(seed)).unwrap();
            assert_eq!(set.len(), 200);
            for inst in &set.instances {
                let d = inst.planar_distance();
                assert!(d >= 5.0, "seed {seed}: tree at distance {d} inside clear zone");
                assert!(inst.position.x.abs() <= 20.0 && inst.position.z.abs() <= 20.0);
            }
        }
    }

    #[test]
    fn test_mushrooms_stay_inside_ring_across_seeds() {
        let params = ScatterParams::mushrooms(150, 20.0, 5.0, 0.9);
        assert_eq!(params.max_distance, Some(18.0));
        for seed in [3, 17, 2024, 65_535] {
            let set = scatter(&params, &field(), &mut RandomStream::new(seed)).unwrap();
            for inst in &set.instances {
                let d = inst.planar_distance();
                assert!(
                    (5.0..=18.0).contains(&d),
                    "seed {seed}: mushroom at distance {d} outside [5, 18]"
                );
            }
        }
    }

    #[test]
    fn test_instances_sit_on_terrain() {
        let f = field();
        let set = scatter(&ScatterParams::trees(50, 20.0, 5.0), &f, &mut RandomStream::new(8))
            .unwrap();
        for inst in &set.instances {
            let expected = f.height(inst.position.x, inst.position.z);
            assert_eq!(inst.position.y, expected);
        }
    }

    #[test]
    fn test_yaw_and_scale_ranges() {
        let set = scatter(
            &ScatterParams::trees(300, 20.0, 5.0),
            &field(),
            &mut RandomStream::new(11),
        )
        .unwrap();
        for inst in &set.instances {
            assert!((0.0..TAU).contains(&inst.yaw), "yaw out of range: {}", inst.yaw);
            let (lo, hi) = if inst.variant == VariantId(0) {
                (0.8, 1.2)
            } else {
                (0.7, 1.1)
            };
            assert!(
                inst.scale >= lo && inst.scale < hi,
                "scale {} outside [{lo}, {hi}) for {:?}",
                inst.scale,
                inst.variant
            );
        }
    }

    #[test]
    fn test_count_conservation_even_and_uneven() {
        for (total, expected) in [(150, vec![50, 50, 50]), (151, vec![51, 50, 50])] {
            let params = ScatterParams::mushrooms(total, 20.0, 5.0, 0.9);
            let set = scatter(&params, &field(), &mut RandomStream::new(5)).unwrap();
            assert_eq!(set.len(), total);
            assert_eq!(set.counts(), expected);
        }
    }

    #[test]
    fn test_zero_count_variant_contributes_nothing() {
        let params = ScatterParams::mushrooms(2, 20.0, 5.0, 0.9);
        let set = scatter(&params, &field(), &mut RandomStream::new(5)).unwrap();
        assert_eq!(set.counts(), vec![1, 1, 0]);
        assert_eq!(set.of_variant(VariantId(2)).count(), 0);
        assert_eq!(set.grouped_transforms()[2].len(), 0);
    }

    #[test]
    fn test_empty_pass_is_ok() {
        let set = scatter(
            &ScatterParams::trees(0, 20.0, 5.0),
            &field(),
            &mut RandomStream::new(1),
        )
        .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_same_seed_same_placement() {
        let params = ScatterParams::mushrooms(120, 20.0, 4.0, 0.9);
        let a = scatter(&params, &field(), &mut RandomStream::new(777)).unwrap();
        let b = scatter(&params, &field(), &mut RandomStream::new(777)).unwrap();
        assert_eq!(a.instances, b.instances);
    }

    #[test]
    fn test_different_seed_different_placement() {
        let params = ScatterParams::trees(20, 20.0, 5.0);
        let a = scatter(&params, &field(), &mut RandomStream::new(1)).unwrap();
        let b = scatter(&params, &field(), &mut RandomStream::new(2)).unwrap();
        assert_ne!(a.instances, b.instances);
    }

    #[test]
    fn test_first_instance_follows_documented_draw_order() {
        // Single variant: no shuffle, so the first draws are x and z directly.
        let params = ScatterParams {
            count: 1,
            spread: 20.0,
            min_distance: 0.0,
            max_distance: None,
            variants: vec![VariantSpec::new("rock", (1.0, 2.0))],
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };
        let set = scatter(&params, &field(), &mut RandomStream::new(42)).unwrap();

        let mut reference = RandomStream::new(42);
        let x = reference.next_in_range(-20.0, 20.0);
        let z = reference.next_in_range(-20.0, 20.0);
        let yaw = reference.next_in_range(0.0, TAU);
        let scale = reference.next_in_range(1.0, 2.0);

        let inst = set.instances[0];
        assert_eq!(inst.position.x, x);
        assert_eq!(inst.position.z, z);
        assert_eq!(inst.yaw, yaw);
        assert_eq!(inst.scale, scale);
    }

    #[test]
    fn test_variant_assignment_is_shuffled() {
        let params = ScatterParams::mushrooms(90, 20.0, 5.0, 0.9);
        let set = scatter(&params, &field(), &mut RandomStream::new(31)).unwrap();
        let first_thirty_all_zero = set.instances[..30]
            .iter()
            .all(|i| i.variant == VariantId(0));
        assert!(!first_thirty_all_zero, "variant tags should be shuffled");
    }

    #[test]
    fn test_shared_transform_keeps_parts_aligned() {
        let set = scatter(
            &ScatterParams::trees(10, 20.0, 5.0),
            &field(),
            &mut RandomStream::new(4),
        )
        .unwrap();
        let groups = set.grouped_transforms();
        let pines: Vec<_> = set.of_variant(VariantId(0)).collect();
        assert_eq!(groups[0].len(), pines.len());
        for (m, inst) in groups[0].iter().zip(&pines) {
            assert_eq!(*m, inst.transform());
            let origin = m.transform_point3(DVec3::ZERO);
            assert!((origin - inst.position).length() < 1e-9);
        }
    }

    #[test]
    fn test_unsatisfiable_min_distance_rejected() {
        let params = ScatterParams::trees(10, 20.0, 20.0 * SQRT_2);
        assert!(matches!(
            scatter(&params, &field(), &mut RandomStream::new(1)),
            Err(PlacementError::Unsatisfiable { .. })
        ));
    }

    #[test]
    fn test_min_beyond_max_rejected() {
        let params = ScatterParams::mushrooms(10, 20.0, 19.0, 0.9);
        assert_eq!(
            params.validate(),
            Err(PlacementError::InvertedDistances { min: 19.0, max: 18.0 })
        );
    }

    #[test]
    fn test_invalid_spread_rejected() {
        let params = ScatterParams::trees(10, 0.0, 0.0);
        assert_eq!(params.validate(), Err(PlacementError::InvalidSpread(0.0)));
        let params = ScatterParams::trees(10, f64::NAN, 0.0);
        assert!(matches!(params.validate(), Err(PlacementError::InvalidSpread(_))));
    }

    #[test]
    fn test_no_variants_rejected() {
        let mut params = ScatterParams::trees(10, 20.0, 5.0);
        params.variants.clear();
        assert_eq!(params.validate(), Err(PlacementError::NoVariants(10)));
    }

    #[test]
    fn test_inverted_scale_range_rejected() {
        let mut params = ScatterParams::trees(10, 20.0, 5.0);
        params.variants[1].scale_range = (1.5, 0.5);
        assert!(matches!(
            params.validate(),
            Err(PlacementError::InvalidScaleRange { .. })
        ));
    }

    #[test]
    fn test_failed_validation_consumes_no_draws() {
        let params = ScatterParams::trees(10, -1.0, 5.0);
        let mut stream = RandomStream::new(12);
        assert!(scatter(&params, &field(), &mut stream).is_err());
        assert_eq!(stream.state(), 12);
    }

    #[test]
    fn test_attempt_cap_reports_exhaustion() {
        let mut params = ScatterParams::trees(5, 20.0, 28.0);
        params.max_attempts = 1;
        match scatter(&params, &field(), &mut RandomStream::new(1)) {
            Err(PlacementError::AttemptsExhausted { attempts, .. }) => assert_eq!(attempts, 1),
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_variant_ids_are_skipped() {
        let known = PlacedInstance {
            position: DVec3::new(1.0, 0.0, 2.0),
            yaw: 0.0,
            scale: 1.0,
            variant: VariantId(0),
        };
        let stray = PlacedInstance {
            variant: VariantId(7),
            ..known
        };
        let set = PlacementSet {
            variant_names: vec!["pine".to_string()],
            instances: vec![known, stray],
        };
        assert_eq!(set.counts(), vec![1]);
        let groups = set.grouped_transforms();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![known.transform()]);
    }
}
