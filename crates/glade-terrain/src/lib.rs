//! Procedural terrain: seeded random stream, value-noise height field, ground mesh,
//! and scatter placement of instanced vegetation.

mod ground;
mod heightfield;
mod random;
pub mod scatter;
mod spawn;

pub use ground::GroundMesh;
pub use heightfield::{HeightField, HeightFieldParams, lattice_hash, value_noise};
pub use random::RandomStream;
pub use scatter::{
    PlacedInstance, PlacementError, PlacementSet, ScatterParams, VariantId, VariantSpec, scatter,
    variant_counts,
};
pub use spawn::{SpawnParams, SpawnedDrop, spawn_burst};
