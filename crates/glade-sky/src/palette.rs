//! Per-phase lighting and palette settings.
//!
//! Applying a phase is a wholesale overwrite of the scene's background, fog, light,
//! and material colors. There is no blending between the day and night records.

use glam::Vec3;

use crate::cycle::Phase;

/// Linear-ish RGB from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Linear distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogSettings {
    /// Fog color.
    pub color: Vec3,
    /// Distance at which fog starts.
    pub near: f32,
    /// Distance at which fog is opaque.
    pub far: f32,
}

/// Base colors of the scene's shared materials.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialPalette {
    /// Ground plane.
    pub ground: Vec3,
    /// Tree trunks and mushroom stems.
    pub trunk: Vec3,
    /// Primary foliage (pines).
    pub foliage: Vec3,
    /// Secondary foliage (broadleaf trees).
    pub foliage_alt: Vec3,
}

/// Everything a phase sets on the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSettings {
    /// Clear color behind everything.
    pub background: Vec3,
    /// Fog parameters.
    pub fog: FogSettings,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Directional (sun/moon) light intensity.
    pub directional_intensity: f32,
    /// Directional light color.
    pub directional_color: Vec3,
    /// Material base colors.
    pub materials: MaterialPalette,
}

/// Daytime record.
pub const DAY_SETTINGS: PhaseSettings = PhaseSettings {
    background: rgb(0x87ceeb),
    fog: FogSettings {
        color: rgb(0x87ceeb),
        near: 30.0,
        far: 90.0,
    },
    ambient_intensity: 0.6,
    directional_intensity: 1.0,
    directional_color: rgb(0xfff4e0),
    materials: MaterialPalette {
        ground: rgb(0x4a7c3a),
        trunk: rgb(0x6b4423),
        foliage: rgb(0x2d6a2d),
        foliage_alt: rgb(0x4f9a3c),
    },
};

/// Nighttime record.
pub const NIGHT_SETTINGS: PhaseSettings = PhaseSettings {
    background: rgb(0x0b1026),
    fog: FogSettings {
        color: rgb(0x0b1026),
        near: 15.0,
        far: 60.0,
    },
    ambient_intensity: 0.15,
    directional_intensity: 0.35,
    directional_color: rgb(0x9db4ff),
    materials: MaterialPalette {
        ground: rgb(0x1f3320),
        trunk: rgb(0x2e1f14),
        foliage: rgb(0x143018),
        foliage_alt: rgb(0x1f4a26),
    },
};

/// Settings record for `phase`.
pub fn phase_snapshot(phase: Phase) -> &'static PhaseSettings {
    match phase {
        Phase::Day => &DAY_SETTINGS,
        Phase::Night => &NIGHT_SETTINGS,
    }
}
