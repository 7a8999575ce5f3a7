//! Running scene: a generated world plus its live sky and spawn stream.

use glade_config::Config;
use glade_sky::{CycleStep, SkyState};
use glade_terrain::{RandomStream, SpawnParams, SpawnedDrop, spawn_burst};

use crate::error::WorldError;
use crate::generate::{GeneratedWorld, sky_params};

/// Offset folded into the world seed for the runtime spawn stream, keeping spawn
/// draws independent of the generation stream.
const SPAWN_STREAM_SALT: u32 = 0x5EED_D20B;

/// A generated world together with the state that changes every frame.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Static terrain and vegetation.
    pub world: GeneratedWorld,
    /// Day/night state.
    pub sky: SkyState,
    spawn_stream: RandomStream,
}

impl Scene {
    /// Generate the world described by `config` and start its sky.
    pub fn new(config: &Config) -> Result<Self, WorldError> {
        let world = GeneratedWorld::generate(config)?;
        let sky = SkyState::new(sky_params(&config.cycle));
        let spawn_stream = RandomStream::new(world.seed ^ SPAWN_STREAM_SALT);
        Ok(Self {
            world,
            sky,
            spawn_stream,
        })
    }

    /// Advance the sky by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> CycleStep {
        self.sky.tick(dt)
    }

    /// Force a day/night switch.
    pub fn toggle_phase(&mut self) -> CycleStep {
        self.sky.toggle()
    }

    /// Drop `count` objects according to `params`, drawing from the scene's spawn stream.
    pub fn drop_burst(&mut self, params: &SpawnParams, count: usize) -> Vec<SpawnedDrop> {
        let drops = spawn_burst(params, count, &self.world.height_field, &mut self.spawn_stream);
        tracing::debug!(count = drops.len(), "spawned drop burst");
        drops
    }
}
