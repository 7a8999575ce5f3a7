//! Configuration system for Glade.
//!
//! Every tunable of world generation and the day/night cycle lives here, persisted to
//! disk as a RON file. Supports CLI overrides via clap, hot-reload detection, and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, CycleConfig, DebugConfig, PlacementConfig, TerrainConfig, WorldConfig,
    default_config_dir,
};
pub use error::ConfigError;
