//! Command-line argument parsing for Glade.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Glade command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "glade", about = "Deterministic glade generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Number of trees.
    #[arg(long)]
    pub trees: Option<usize>,

    /// Number of mushrooms.
    #[arg(long)]
    pub mushrooms: Option<usize>,

    /// Half-width of the placement square.
    #[arg(long)]
    pub spread: Option<f64>,

    /// Day length in seconds.
    #[arg(long)]
    pub day_duration: Option<f64>,

    /// Night length in seconds.
    #[arg(long)]
    pub night_duration: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulated seconds of day/night cycle to run after generation.
    #[arg(long, default_value_t = 0.0)]
    pub simulate_seconds: f64,

    /// Simulation tick length in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub tick: f64,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(trees) = args.trees {
            self.placement.tree_count = trees;
        }
        if let Some(mushrooms) = args.mushrooms {
            self.placement.mushroom_count = mushrooms;
        }
        if let Some(spread) = args.spread {
            self.placement.spread = spread;
        }
        if let Some(day) = args.day_duration {
            self.cycle.day_duration = day;
        }
        if let Some(night) = args.night_duration {
            self.cycle.night_duration = night;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(99),
            trees: Some(10),
            night_duration: Some(15.0),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, Some(99));
        assert_eq!(config.placement.tree_count, 10);
        assert_eq!(config.cycle.night_duration, 15.0);
        // Non-overridden fields retain defaults
        assert_eq!(config.placement.mushroom_count, 150);
        assert_eq!(config.cycle.day_duration, 120.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "glade",
            "--seed",
            "7",
            "--spread",
            "30",
            "--simulate-seconds",
            "90",
        ]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.spread, Some(30.0));
        assert_eq!(args.simulate_seconds, 90.0);
        assert!((args.tick - 1.0 / 60.0).abs() < 1e-12);
    }
}
