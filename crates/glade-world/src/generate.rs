//! One-shot world generation.
//!
//! A single [`RandomStream`] drives both scatter passes in a fixed order: trees first,
//! then mushrooms. The height field takes no seed, so the stream is the only input
//! that varies between worlds built from the same config.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glade_config::{Config, CycleConfig, PlacementConfig, TerrainConfig};
use glade_sky::{Phase, SkyParams};
use glade_terrain::{
    GroundMesh, HeightField, HeightFieldParams, PlacementSet, RandomStream, ScatterParams, scatter,
};
use tracing::info;

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Config mapping
// ---------------------------------------------------------------------------

/// Height field parameters from the terrain section.
pub fn terrain_params(cfg: &TerrainConfig) -> HeightFieldParams {
    HeightFieldParams {
        octaves: cfg.octaves,
        lacunarity: cfg.lacunarity,
        persistence: cfg.persistence,
        base_frequency: cfg.base_frequency,
        max_height: cfg.max_height,
    }
}

/// Tree scatter pass from the placement section.
pub fn tree_params(cfg: &PlacementConfig) -> ScatterParams {
    ScatterParams::trees(cfg.tree_count, cfg.spread, cfg.min_distance_trees)
}

/// Mushroom scatter pass from the placement section.
pub fn mushroom_params(cfg: &PlacementConfig) -> ScatterParams {
    ScatterParams::mushrooms(
        cfg.mushroom_count,
        cfg.spread,
        cfg.min_distance_mushrooms,
        cfg.mushroom_max_distance_factor,
    )
}

/// Sky parameters from the cycle section.
pub fn sky_params(cfg: &CycleConfig) -> SkyParams {
    SkyParams {
        orbit_radius: cfg.light_orbit_radius,
        day_duration: cfg.day_duration,
        night_duration: cfg.night_duration,
        start_phase: if cfg.start_at_night {
            Phase::Night
        } else {
            Phase::Day
        },
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Everything produced by one generation pass.
#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    /// Seed the placement stream started from. Re-using it reproduces this world.
    pub seed: u32,
    /// Elevation function shared by the mesh and all placements.
    pub height_field: HeightField,
    /// Ground surface.
    pub ground: GroundMesh,
    /// Tree population (pine, broadleaf).
    pub trees: PlacementSet,
    /// Mushroom population (cap, bell, button).
    pub mushrooms: PlacementSet,
}

impl GeneratedWorld {
    /// Validate `config` and build the world.
    ///
    /// Without a configured seed the stream is clock-seeded; the chosen seed is still
    /// recorded in [`GeneratedWorld::seed`].
    pub fn generate(config: &Config) -> Result<Self, WorldError> {
        config.validate()?;
        let mut stream = RandomStream::from_optional_seed(config.world.seed);
        Self::generate_with_stream(config, &mut stream)
    }

    /// Build the world from a caller-owned stream.
    pub fn generate_with_stream(
        config: &Config,
        stream: &mut RandomStream,
    ) -> Result<Self, WorldError> {
        let seed = stream.state();
        let height_field = HeightField::new(terrain_params(&config.terrain));
        let ground = GroundMesh::build(
            &height_field,
            config.terrain.ground_size,
            config.terrain.ground_segments,
        );

        let trees = scatter(&tree_params(&config.placement), &height_field, stream).map_err(
            |source| WorldError::Placement {
                group: "trees",
                source,
            },
        )?;
        let mushrooms = scatter(&mushroom_params(&config.placement), &height_field, stream)
            .map_err(|source| WorldError::Placement {
                group: "mushrooms",
                source,
            })?;

        let (lo, hi) = ground.height_range();
        info!(
            seed,
            trees = trees.len(),
            mushrooms = mushrooms.len(),
            ground_vertices = ground.vertex_count(),
            min_height = lo,
            max_height = hi,
            "world generated"
        );

        Ok(Self {
            seed,
            height_field,
            ground,
            trees,
            mushrooms,
        })
    }

    /// Terrain elevation at `(x, z)`.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        self.height_field.height(x, z)
    }

    /// Digest of both populations for determinism comparison.
    ///
    /// Uses `DefaultHasher`, whose algorithm may change between Rust releases, so
    /// digests are only comparable between runs of the same build. Reproduce a world
    /// across builds by its seed, not its fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_placements(&self.trees, &mut hasher);
        hash_placements(&self.mushrooms, &mut hasher);
        hasher.finish()
    }
}

/// Feed every instance's exact bits into `hasher`.
pub fn hash_placements(set: &PlacementSet, hasher: &mut impl Hasher) {
    set.instances.len().hash(hasher);
    for inst in &set.instances {
        inst.position.x.to_bits().hash(hasher);
        inst.position.y.to_bits().hash(hasher);
        inst.position.z.to_bits().hash(hasher);
        inst.yaw.to_bits().hash(hasher);
        inst.scale.to_bits().hash(hasher);
        inst.variant.hash(hasher);
    }
}
