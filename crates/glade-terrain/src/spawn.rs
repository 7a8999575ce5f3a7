//! Runtime spawn bursts: objects dropped onto the terrain after world generation.
//!
//! A burst draws positions around a point from its own stream and reports where each
//! object starts and where the ground under it is. Animating the fall is left to the
//! caller; this module only answers "where" and "how high is the ground there".

use std::f64::consts::TAU;

use glam::DVec3;

use crate::heightfield::HeightField;
use crate::random::RandomStream;

/// Parameters for a spawn burst.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnParams {
    /// Center of the burst in the XZ plane.
    pub center: (f64, f64),
    /// Objects are placed uniformly over a disc of this radius.
    pub radius: f64,
    /// Height above the terrain at which objects appear.
    pub drop_height: f64,
    /// Uniform scale range: \[min, max\).
    pub scale_range: (f64, f64),
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            center: (0.0, 0.0),
            radius: 3.0,
            drop_height: 6.0,
            scale_range: (0.5, 1.5),
        }
    }
}

/// An object dropped by a burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnedDrop {
    /// Starting position, `drop_height` above the ground.
    pub start: DVec3,
    /// Terrain elevation directly below `start`.
    pub ground_y: f64,
    /// Rotation about +Y in radians.
    pub yaw: f64,
    /// Uniform scale multiplier.
    pub scale: f64,
}

impl SpawnedDrop {
    /// Returns `true` once `y` has reached the ground under this drop.
    pub fn has_landed(&self, y: f64) -> bool {
        y <= self.ground_y
    }

    /// Resting position on the terrain.
    pub fn landing_position(&self) -> DVec3 {
        DVec3::new(self.start.x, self.ground_y, self.start.z)
    }
}

/// Drop `count` objects over a disc.
///
/// Each object draws, in order: angle, radial fraction (square-rooted for uniform area
/// density), yaw, scale.
pub fn spawn_burst(
    params: &SpawnParams,
    count: usize,
    field: &HeightField,
    stream: &mut RandomStream,
) -> Vec<SpawnedDrop> {
    (0..count)
        .map(|_| {
            let angle = stream.next_in_range(0.0, TAU);
            let r = params.radius * stream.next().sqrt();
            let x = params.center.0 + r * angle.cos();
            let z = params.center.1 + r * angle.sin();
            let ground_y = field.height(x, z);
            let yaw = stream.next_in_range(0.0, TAU);
            let scale = stream.next_in_range(params.scale_range.0, params.scale_range.1);
            SpawnedDrop {
                start: DVec3::new(x, ground_y + params.drop_height, z),
                ground_y,
                yaw,
                scale,
            }
        })
        .collect()
}
