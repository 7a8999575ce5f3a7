//! Headless demo: generates a glade and runs its day/night cycle.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p glade-demo -- --seed 42 --simulate-seconds 300`.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use glade_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigError, default_config_dir};
use glade_sky::Phase;
use glade_terrain::{PlacementSet, VariantId};
use glade_world::Scene;
use tracing::{error, info};

fn log_population(label: &str, set: &PlacementSet) {
    for (i, name) in set.variant_names.iter().enumerate() {
        let count = set.of_variant(VariantId(i as u32)).count();
        info!("{label}/{name}: {count} instances");
    }
}

/// Run the cycle for `seconds` of simulated time, logging each phase change.
fn simulate(scene: &mut Scene, seconds: f64, tick: f64) {
    if seconds <= 0.0 || tick <= 0.0 {
        return;
    }
    let mut elapsed = 0.0;
    let mut days = 0_u32;
    while elapsed < seconds {
        let step = scene.tick(tick);
        elapsed += tick;
        if step.transitioned {
            if step.phase == Phase::Day {
                days += 1;
            }
            let light = &scene.sky.lighting;
            info!(
                elapsed,
                phase = ?step.phase,
                ambient = light.ambient_intensity,
                directional = light.light.intensity,
                "phase transition"
            );
        }
    }

    let active = scene.sky.active_body();
    info!(
        "Simulated {elapsed:.1}s ({days} full days): {:?} at progress {:.3}, body y={:.2} opacity={:.2}",
        scene.sky.cycle.phase(),
        scene.sky.cycle.progress(),
        active.position.y,
        active.opacity,
    );
}

/// Load or create the config, returning it with a description of where it came from.
fn load_config(config_dir: &Path) -> Result<(Config, String), ConfigError> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let existed = config_path.exists();
    let config = Config::load_or_create(config_dir)?;
    let source = if existed {
        format!("Loaded config from {}", config_path.display())
    } else {
        format!("Created default config at {}", config_path.display())
    };
    Ok((config, source))
}

fn run(args: &CliArgs, config_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (mut config, source) = load_config(config_dir)?;
    config.apply_cli_overrides(args);

    glade_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    // Config loading runs before the subscriber exists; report its outcome now.
    info!("{source}");

    let mut scene = Scene::new(&config)?;
    info!(
        "Generated world with seed {} (rerun with --seed {} to reproduce)",
        scene.world.seed, scene.world.seed
    );
    log_population("trees", &scene.world.trees);
    log_population("mushrooms", &scene.world.mushrooms);
    info!(
        "World fingerprint {:016x} (comparable within this build only)",
        scene.world.fingerprint()
    );

    simulate(&mut scene, args.simulate_seconds, args.tick);
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    match run(&args, &config_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The subscriber may not be up yet if config loading failed.
            error!("{err}");
            eprintln!("glade: {err}");
            ExitCode::FAILURE
        }
    }
}
