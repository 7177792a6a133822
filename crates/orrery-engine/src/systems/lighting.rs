/// Point lights and ambient color for the scene.
///
/// Lights are persistent: they stay until explicitly removed.
/// Each frame, the runner serializes them into the frame buffer
/// for the host's lighting pass.

use glam::Vec3;
use crate::components::mesh::Color;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light falls off to zero. 0 = infinite.
    pub range: f32,
}

impl PointLight {
    pub fn new(pos: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_floats(&self) -> [f32; 8] {
        [self.x, self.y, self.z, self.r, self.g, self.b, self.intensity, self.range]
    }
}

/// Manages active lights and ambient color for the scene.
///
/// The ambient color defaults to black: without lights, Phong meshes render dark
/// and only unlit (basic) meshes are visible.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: Color::BLACK,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = color;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_new() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), Color::WHITE, 2.0, 300.0);
        assert_eq!(light.pos(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.to_floats(), [1.0, 2.0, 3.0, 1.0, 1.0, 1.0, 2.0, 300.0]);
    }

    #[test]
    fn light_state_add_and_clear() {
        let mut state = LightState::new();
        state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 1.0, 0.0));
        state.add(PointLight::new(Vec3::X, Color::WHITE, 1.0, 0.0));
        assert_eq!(state.count(), 2);
        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn ambient_defaults_to_black() {
        let mut state = LightState::new();
        assert_eq!(state.ambient(), Color::BLACK);
        state.set_ambient(Color::from_hex(0x404040));
        assert!((state.ambient().r - 64.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
