//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World identity.
    pub world: WorldConfig,
    /// Height field and ground mesh.
    pub terrain: TerrainConfig,
    /// Tree and mushroom populations.
    pub placement: PlacementConfig,
    /// Day/night cycle.
    pub cycle: CycleConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every placement pass. `None` seeds from the clock, which makes the
    /// world different on every run.
    pub seed: Option<u32>,
}

/// Height field and ground mesh configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Edge length of the square ground plane.
    pub ground_size: f64,
    /// Quads along each edge of the ground mesh.
    pub ground_segments: u32,
    /// Elevation of a normalized noise value of 1.0.
    pub max_height: f64,
    /// Frequency of the first noise octave.
    pub base_frequency: f64,
    /// Number of noise octaves.
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
}

/// Scatter placement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Trees across both tree kinds.
    pub tree_count: usize,
    /// Mushrooms across all three shapes.
    pub mushroom_count: usize,
    /// Candidates are drawn from `[-spread, spread]` on both axes.
    pub spread: f64,
    /// Clear radius around the origin for trees.
    pub min_distance_trees: f64,
    /// Clear radius around the origin for mushrooms.
    pub min_distance_mushrooms: f64,
    /// Mushrooms stay within this fraction of `spread` from the origin.
    pub mushroom_max_distance_factor: f64,
}

/// Day/night cycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleConfig {
    /// Radius of the sun/moon orbit.
    pub light_orbit_radius: f64,
    /// Day length in seconds.
    pub day_duration: f64,
    /// Night length in seconds.
    pub night_duration: f64,
    /// Start in the night phase instead of the day phase.
    pub start_at_night: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            ground_size: 60.0,
            ground_segments: 128,
            max_height: 3.5,
            base_frequency: 0.04,
            octaves: 5,
            persistence: 0.45,
            lacunarity: 2.1,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            tree_count: 120,
            mushroom_count: 150,
            spread: 20.0,
            min_distance_trees: 5.0,
            min_distance_mushrooms: 3.0,
            mushroom_max_distance_factor: 0.9,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            light_orbit_radius: 25.0,
            day_duration: 120.0,
            night_duration: 60.0,
            start_at_night: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for Glade, falling back to the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glade"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Validation ---

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be non-negative and finite, got {value}"),
        })
    }
}

impl Config {
    /// Highest octave count accepted.
    pub const MAX_OCTAVES: u32 = 16;

    /// Highest ground mesh resolution accepted. Keeps `(segments + 1)²` vertex indices
    /// well inside `u32`.
    pub const MAX_GROUND_SEGMENTS: u32 = 4096;

    /// Check value ranges that every consumer relies on.
    ///
    /// Placement feasibility (clear zone vs. spread) is checked by the scatter pass
    /// itself, which knows the exact constraint region.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        positive("terrain.ground_size", t.ground_size)?;
        if t.ground_segments == 0 {
            return Err(ConfigError::Invalid {
                field: "terrain.ground_segments",
                reason: "must be at least 1".to_string(),
            });
        }
        if t.ground_segments > Self::MAX_GROUND_SEGMENTS {
            return Err(ConfigError::Invalid {
                field: "terrain.ground_segments",
                reason: format!(
                    "must be at most {}, got {}",
                    Self::MAX_GROUND_SEGMENTS,
                    t.ground_segments
                ),
            });
        }
        if t.octaves > Self::MAX_OCTAVES {
            return Err(ConfigError::Invalid {
                field: "terrain.octaves",
                reason: format!("must be at most {}, got {}", Self::MAX_OCTAVES, t.octaves),
            });
        }
        non_negative("terrain.max_height", t.max_height)?;
        positive("terrain.base_frequency", t.base_frequency)?;
        positive("terrain.lacunarity", t.lacunarity)?;
        positive("terrain.persistence", t.persistence)?;

        let p = &self.placement;
        positive("placement.spread", p.spread)?;
        non_negative("placement.min_distance_trees", p.min_distance_trees)?;
        non_negative("placement.min_distance_mushrooms", p.min_distance_mushrooms)?;
        positive(
            "placement.mushroom_max_distance_factor",
            p.mushroom_max_distance_factor,
        )?;

        let c = &self.cycle;
        positive("cycle.light_orbit_radius", c.light_orbit_radius)?;
        positive("cycle.day_duration", c.day_duration)?;
        positive("cycle.night_duration", c.night_duration)?;
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
