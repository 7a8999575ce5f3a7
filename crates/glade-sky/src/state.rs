//! Aggregate sky state updated once per frame.

use tracing::info;

use crate::celestial::{Body, CelestialTransform, celestial_transform};
use crate::cycle::{CycleStep, DayNightCycle, Phase};
use crate::light::SceneLighting;
use crate::palette::phase_snapshot;

/// Timing and geometry of the cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct SkyParams {
    /// Radius of the sun/moon orbit around the origin.
    pub orbit_radius: f64,
    /// Length of the day phase in seconds.
    pub day_duration: f64,
    /// Length of the night phase in seconds.
    pub night_duration: f64,
    /// Phase the cycle starts in.
    pub start_phase: Phase,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            orbit_radius: 25.0,
            day_duration: 120.0,
            night_duration: 60.0,
            start_phase: Phase::Day,
        }
    }
}

/// Cycle bookkeeping plus everything derived from it.
#[derive(Clone, Debug)]
pub struct SkyState {
    /// Timing and geometry.
    pub params: SkyParams,
    /// Phase machine.
    pub cycle: DayNightCycle,
    /// Current sun transform.
    pub sun: CelestialTransform,
    /// Current moon transform.
    pub moon: CelestialTransform,
    /// Lighting written to the scene.
    pub lighting: SceneLighting,
}

impl SkyState {
    /// Create a state at the start of `params.start_phase` with its snapshot applied.
    pub fn new(params: SkyParams) -> Self {
        let cycle = DayNightCycle::new(params.start_phase);
        let lighting = SceneLighting::from_settings(phase_snapshot(params.start_phase));
        let mut state = Self {
            sun: celestial_transform(Body::Sun, cycle.phase(), 0.0, params.orbit_radius),
            moon: celestial_transform(Body::Moon, cycle.phase(), 0.0, params.orbit_radius),
            params,
            cycle,
            lighting,
        };
        state.update_bodies();
        state
    }

    /// Advance by `dt` seconds and refresh bodies and lighting.
    pub fn tick(&mut self, dt: f64) -> CycleStep {
        let step = self
            .cycle
            .advance(dt, self.params.day_duration, self.params.night_duration);
        if step.transitioned {
            self.enter_phase(step.phase);
        }
        self.update_bodies();
        step
    }

    /// Switch phase now, with the same effect as an automatic transition.
    pub fn toggle(&mut self) -> CycleStep {
        let step = self.cycle.toggle();
        self.enter_phase(step.phase);
        self.update_bodies();
        step
    }

    /// Transform of the body active in the current phase.
    pub fn active_body(&self) -> &CelestialTransform {
        match Body::active_in(self.cycle.phase()) {
            Body::Sun => &self.sun,
            Body::Moon => &self.moon,
        }
    }

    fn enter_phase(&mut self, phase: Phase) {
        info!(?phase, "day/night phase changed");
        self.lighting.apply_snapshot(phase_snapshot(phase));
    }

    fn update_bodies(&mut self) {
        let phase = self.cycle.phase();
        let progress = self.cycle.progress();
        let radius = self.params.orbit_radius;
        self.sun = celestial_transform(Body::Sun, phase, progress, radius);
        self.moon = celestial_transform(Body::Moon, phase, progress, radius);
        self.lighting.light.set_position(self.active_body().position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DAY_SETTINGS, NIGHT_SETTINGS};

    fn params() -> SkyParams {
        SkyParams {
            orbit_radius: 25.0,
            day_duration: 100.0,
            night_duration: 50.0,
            start_phase: Phase::Day,
        }
    }

    #[test]
    fn test_new_state_applies_start_snapshot() {
        let state = SkyState::new(params());
        assert_eq!(state.lighting.background, DAY_SETTINGS.background);
        assert!(!state.moon.visible);

        let night = SkyState::new(SkyParams {
            start_phase: Phase::Night,
            ..params()
        });
        assert_eq!(night.lighting.background, NIGHT_SETTINGS.background);
        assert!(!night.sun.visible);
    }

    #[test]
    fn test_transition_flips_bodies_and_palette_same_tick() {
        let mut state = SkyState::new(params());
        state.tick(98.0);
        assert_eq!(state.cycle.phase(), Phase::Day);

        let step = state.tick(5.0);
        assert!(step.transitioned);
        assert_eq!(step.phase, Phase::Night);
        assert_eq!(step.progress, 0.0);
        assert!(!state.sun.visible, "sun must be hidden once night begins");
        assert!(state.moon.visible, "moon becomes eligible on the same call");
        assert_eq!(state.lighting.ambient_intensity, NIGHT_SETTINGS.ambient_intensity);
        assert_eq!(state.lighting.fog, NIGHT_SETTINGS.fog);
    }

    #[test]
    fn test_light_follows_active_body() {
        let mut state = SkyState::new(params());
        state.tick(50.0);
        let sun = state.sun.position.as_vec3();
        assert!((state.lighting.light.position - sun).length() < 1e-5);
        assert!(state.lighting.light.position.y > 24.0);
    }

    #[test]
    fn test_toggle_matches_natural_transition() {
        let mut manual = SkyState::new(params());
        manual.tick(30.0);
        manual.toggle();

        let mut natural = SkyState::new(params());
        natural.tick(100.0);

        assert_eq!(manual.cycle, natural.cycle);
        assert_eq!(manual.lighting, natural.lighting);
        assert_eq!(manual.sun, natural.sun);
        assert_eq!(manual.moon, natural.moon);
    }

    #[test]
    fn test_full_cycle_returns_to_day() {
        // Power-of-two durations keep every progress increment exact.
        let mut state = SkyState::new(SkyParams {
            day_duration: 64.0,
            night_duration: 32.0,
            ..params()
        });
        let mut transitions = 0;
        for _ in 0..100 {
            if state.tick(1.0).transitioned {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 2, "one day plus one night is two transitions");
        assert_eq!(state.cycle.phase(), Phase::Day);
        assert_eq!(state.cycle.progress(), 4.0 / 64.0);
        assert_eq!(state.lighting.background, DAY_SETTINGS.background);
        assert!(!state.moon.visible);
    }
}
