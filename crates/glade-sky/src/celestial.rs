//! Sun and moon placement along a fixed-radius arc.
//!
//! Both bodies follow the same path as a function of the active phase's progress:
//! rising at progress 0, overhead at 0.5, setting as progress approaches 1. Position
//! is continuous in progress; only visibility flips with the phase.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;

use crate::cycle::Phase;

/// Normalized height at which the active body starts fading in.
const FADE_START: f64 = 0.05;
/// Normalized height at which the active body is fully opaque.
const FADE_END: f64 = 0.15;
/// Normalized height at or below which the active body is hidden outright.
const HIDE_BELOW: f64 = -0.1;
/// Smallest scale a visible body is drawn at.
const MIN_SCALE: f64 = 0.5;

/// A celestial body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Body {
    /// Active during [`Phase::Day`].
    Sun,
    /// Active during [`Phase::Night`].
    Moon,
}

impl Body {
    /// The body that is active during `phase`.
    pub fn active_in(phase: Phase) -> Self {
        match phase {
            Phase::Day => Body::Sun,
            Phase::Night => Body::Moon,
        }
    }

    /// How fast the body's drawn size grows with height.
    fn scale_factor(self) -> f64 {
        match self {
            Body::Sun => 1.2,
            Body::Moon => 1.0,
        }
    }
}

/// Render-facing state of one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialTransform {
    /// World-space position on the orbit.
    pub position: DVec3,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform mesh scale.
    pub scale: f64,
    /// Whether the mesh should be drawn at all.
    pub visible: bool,
}

/// Position on the orbit of radius `radius` for `progress`.
///
/// With `alpha = (1 - progress) * π`, the orbit-local point is
/// `(R cos α, R sin α, R cos(α − π/2))`, mapped to world axes as `(z', y', x')`.
pub fn orbit_position(progress: f64, radius: f64) -> DVec3 {
    let alpha = (1.0 - progress) * PI;
    let x = radius * alpha.cos();
    let y = radius * alpha.sin();
    let z = radius * (alpha - FRAC_PI_2).cos();
    DVec3::new(z, y, x)
}

/// Transform of `body` while `phase` is active at `progress`.
///
/// The inactive body is always hidden. The active one fades in between normalized
/// heights 0.05 and 0.15, grows with height (never below 0.5), and is hidden once its
/// normalized height drops to −0.1 or lower.
pub fn celestial_transform(
    body: Body,
    phase: Phase,
    progress: f64,
    radius: f64,
) -> CelestialTransform {
    let position = orbit_position(progress, radius);
    let height = if radius != 0.0 {
        position.y / radius
    } else {
        0.0
    };
    let scale = (height * body.scale_factor()).max(MIN_SCALE);

    if Body::active_in(phase) != body || height <= HIDE_BELOW {
        return CelestialTransform {
            position,
            opacity: 0.0,
            scale,
            visible: false,
        };
    }

    CelestialTransform {
        position,
        opacity: smoothstep(FADE_START, FADE_END, height),
        scale,
        visible: true,
    }
}

pub(crate) fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
