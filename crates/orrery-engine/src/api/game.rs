use glam::Vec2;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::systems::lighting::LightState;
use crate::systems::overlay::OverlayState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Viewport size in pixels until the host reports a resize.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Background color, 0xRRGGBB.
    pub clear_color: u32,
    /// Maximum number of mesh instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Maximum number of screen labels (default: 32).
    pub max_labels: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            fov_y_deg: 60.0,
            near: 0.1,
            far: 1000.0,
            clear_color: 0x000000,
            max_instances: 64,
            max_lights: 4,
            max_labels: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply a JSON configuration override. Called before init, if at all.
    fn configure(&mut self, _json: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One simulation tick: apply input, move things, update the overlay.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Static description of the scene for the host UI (built once after init).
    fn describe(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub lights: LightState,
    pub textures: TextureRegistry,
    pub overlay: OverlayState,
    pub events: Vec<GameEvent>,
    /// Viewport size in pixels, kept current by the runner.
    pub viewport: Vec2,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let mut camera = Camera3D::new(config.fov_y_deg, 1.0, config.near, config.far);
        camera.set_viewport(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::with_capacity(config.max_instances),
            camera,
            lights: LightState::new(),
            textures: TextureRegistry::new(),
            overlay: OverlayState::new(),
            events: Vec::with_capacity(config.max_events),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Apply a viewport resize. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !self.camera.set_viewport(width, height) {
            log::warn!("ignoring resize to {width}x{height}");
            return false;
        }
        self.viewport = Vec2::new(width, height);
        true
    }

    /// Convert a viewport pixel position to normalized device coordinates.
    /// x runs -1..1 left to right, y runs -1..1 bottom to top.
    pub fn pixel_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x / self.viewport.x * 2.0 - 1.0, -(y / self.viewport.y) * 2.0 + 1.0)
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn center_pixel_is_ndc_origin() {
        let mut ctx = EngineContext::new();
        ctx.resize(800.0, 600.0);
        assert_eq!(ctx.pixel_to_ndc(400.0, 300.0), Vec2::ZERO);
        assert_eq!(ctx.pixel_to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(ctx.pixel_to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut ctx = EngineContext::new();
        assert!(ctx.resize(1000.0, 500.0));
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
        assert!(!ctx.resize(1000.0, 0.0));
        assert_eq!(ctx.viewport, Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
