//! Scene lighting target: the state a renderer reads each frame.
//!
//! [`SceneLighting`] collects everything the day/night cycle writes: background,
//! fog, ambient level, the directional light, and material colors. The renderer
//! copies it onto its own scene objects; [`DirectionalLightUniform`] is the
//! GPU-side form of the light.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};

use crate::palette::{DAY_SETTINGS, FogSettings, MaterialPalette, PhaseSettings};

/// CPU-side directional light (sun or moon).
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// World-space position of the light on its orbit.
    pub position: Vec3,
    /// Normalized direction pointing FROM the light toward the scene origin.
    pub direction: Vec3,
    /// Color of the light (not premultiplied by intensity).
    pub color: Vec3,
    /// Scalar intensity multiplier.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::Y,
            direction: Vec3::NEG_Y,
            color: DAY_SETTINGS.directional_color,
            intensity: DAY_SETTINGS.directional_intensity,
        }
    }
}

impl DirectionalLight {
    /// Move the light and aim it at the origin.
    ///
    /// A position at the origin keeps the previous direction.
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position.as_vec3();
        let len = self.position.length();
        if len > 1e-6 {
            self.direction = -self.position / len;
        }
    }

    /// Build the GPU-side uniform from this light's properties.
    pub fn to_uniform(&self) -> DirectionalLightUniform {
        DirectionalLightUniform {
            direction_intensity: [
                self.direction.x,
                self.direction.y,
                self.direction.z,
                self.intensity,
            ],
            color_padding: [self.color.x, self.color.y, self.color.z, 0.0],
        }
    }
}

/// GPU-side representation, 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DirectionalLightUniform {
    /// xyz = direction (normalized), w = intensity.
    pub direction_intensity: [f32; 4],
    /// xyz = color, w = padding.
    pub color_padding: [f32; 4],
}

/// Lighting and palette state owned by the consuming scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLighting {
    /// Clear color.
    pub background: Vec3,
    /// Fog parameters.
    pub fog: FogSettings,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Sun/moon light.
    pub light: DirectionalLight,
    /// Material base colors.
    pub materials: MaterialPalette,
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self::from_settings(&DAY_SETTINGS)
    }
}

impl SceneLighting {
    /// Scene state initialized from a phase record.
    pub fn from_settings(settings: &PhaseSettings) -> Self {
        let mut scene = Self {
            background: Vec3::ZERO,
            fog: settings.fog,
            ambient_intensity: 0.0,
            light: DirectionalLight::default(),
            materials: settings.materials,
        };
        scene.apply_snapshot(settings);
        scene
    }

    /// Overwrite every phase-controlled property with `settings`.
    ///
    /// The light's position and direction are left alone; they follow the orbit.
    pub fn apply_snapshot(&mut self, settings: &PhaseSettings) {
        self.background = settings.background;
        self.fog = settings.fog;
        self.ambient_intensity = settings.ambient_intensity;
        self.light.intensity = settings.directional_intensity;
        self.light.color = settings.directional_color;
        self.materials = settings.materials;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::NIGHT_SETTINGS;

    #[test]
    fn test_uniform_buffer_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<DirectionalLightUniform>(), 32);
        assert_eq!(
            std::mem::offset_of!(DirectionalLightUniform, direction_intensity),
            0
        );
        assert_eq!(std::mem::offset_of!(DirectionalLightUniform, color_padding), 16);
    }

    #[test]
    fn test_set_position_aims_at_origin() {
        let mut light = DirectionalLight::default();
        light.set_position(DVec3::new(25.0, 25.0, 0.0));
        assert!((light.direction.length() - 1.0).abs() < 1e-6);
        assert!(light.direction.x < 0.0 && light.direction.y < 0.0);
        assert!((light.direction.x - light.direction.y).abs() < 1e-6);
    }

    #[test]
    fn test_set_position_at_origin_keeps_direction() {
        let mut light = DirectionalLight::default();
        let before = light.direction;
        light.set_position(DVec3::ZERO);
        assert_eq!(light.direction, before);
    }

    #[test]
    fn test_to_uniform_packs_correctly() {
        let light = DirectionalLight {
            position: Vec3::new(0.0, 10.0, 0.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::new(1.0, 0.5, 0.25),
            intensity: 2.0,
        };
        let u = light.to_uniform();
        assert_eq!(u.direction_intensity, [0.0, -1.0, 0.0, 2.0]);
        assert_eq!(u.color_padding, [1.0, 0.5, 0.25, 0.0]);
        assert_eq!(bytemuck::bytes_of(&u).len(), 32);
    }

    #[test]
    fn test_apply_snapshot_overwrites_everything() {
        let mut scene = SceneLighting::from_settings(&DAY_SETTINGS);
        scene.background = Vec3::splat(0.5);
        scene.apply_snapshot(&NIGHT_SETTINGS);
        assert_eq!(scene.background, NIGHT_SETTINGS.background);
        assert_eq!(scene.fog, NIGHT_SETTINGS.fog);
        assert_eq!(scene.ambient_intensity, NIGHT_SETTINGS.ambient_intensity);
        assert_eq!(scene.light.intensity, NIGHT_SETTINGS.directional_intensity);
        assert_eq!(scene.light.color, NIGHT_SETTINGS.directional_color);
        assert_eq!(scene.materials, NIGHT_SETTINGS.materials);
    }

    #[test]
    fn test_apply_snapshot_keeps_light_position() {
        let mut scene = SceneLighting::default();
        scene.light.set_position(DVec3::new(0.0, 25.0, -3.0));
        let pos = scene.light.position;
        scene.apply_snapshot(&NIGHT_SETTINGS);
        assert_eq!(scene.light.position, pos);
    }
}
