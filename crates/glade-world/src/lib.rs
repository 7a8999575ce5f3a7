//! World assembly: turns a [`glade_config::Config`] into terrain, vegetation, and a
//! running day/night sky.

mod error;
mod generate;
mod scene;

pub use error::WorldError;
pub use generate::{
    GeneratedWorld, hash_placements, mushroom_params, sky_params, terrain_params, tree_params,
};
pub use scene::Scene;
