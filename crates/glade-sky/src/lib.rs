//! Day/night cycle: phase machine, sun and moon transforms, and per-phase lighting.

mod celestial;
mod cycle;
mod light;
pub mod palette;
mod state;

pub use celestial::{Body, CelestialTransform, celestial_transform, orbit_position};
pub use cycle::{CyclePhase, CycleStep, DayNightCycle, Phase};
pub use light::{DirectionalLight, DirectionalLightUniform, SceneLighting};
pub use palette::{FogSettings, MaterialPalette, PhaseSettings, phase_snapshot};
pub use state::{SkyParams, SkyState};
