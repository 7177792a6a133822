/// Solar System: sun, eight planets on pivots, orbit rings, hover info.
///
/// Per tick: advance the clock, turn pivots and spin planets, place the
/// camera for the current mode, then pick under the pointer and refresh the
/// labels and info panel.

use std::f64::consts::TAU;

use glam::{Quat, Vec3};
use orrery_engine::*;

use crate::bodies::PlanetTable;
use crate::config::SolarConfig;
use crate::hud;
use crate::scene_builder::{self, SolarScene};
use crate::state::{CameraMode, SimulationState};

// ── Custom event kinds from the host ─────────────────────────────────

const CUSTOM_SET_SPEED: u32 = 1;
const CUSTOM_SET_CAMERA_MODE: u32 = 2;
const CUSTOM_SHOW_ORBITS: u32 = 3;
const CUSTOM_FOLLOW_TARGET: u32 = 4;

// ── Game event kinds to the host ─────────────────────────────────────

const EVENT_HOVER: u32 = 1;
const EVENT_SPEED: u32 = 2;
const EVENT_CAMERA_MODE: u32 = 3;

pub struct SolarSystem {
    config: SolarConfig,
    table: PlanetTable,
    state: SimulationState,
    scene: Option<SolarScene>,
    /// Planet meshes in table order, cached for picking.
    pick_targets: Vec<EntityId>,
    hovered: Option<usize>,
}

impl SolarSystem {
    pub fn new() -> Self {
        let table = match PlanetTable::builtin() {
            Ok(table) => table,
            Err(e) => {
                log::error!("built-in planet table is invalid: {e}");
                panic!("built-in planet table is invalid: {e}");
            }
        };
        Self::with_table(table)
    }

    /// Start from a custom planet table.
    pub fn with_table(table: PlanetTable) -> Self {
        let config = SolarConfig::default();
        let state = SimulationState::new(config.base_step, config.initial_speed, table.len());
        Self {
            config,
            table,
            state,
            scene: None,
            pick_targets: Vec::new(),
            hovered: None,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn scene(&self) -> Option<&SolarScene> {
        self.scene.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            CUSTOM_SET_SPEED => {
                if self.state.set_speed(a as f64) {
                    self.publish_speed(ctx);
                }
            }
            CUSTOM_SET_CAMERA_MODE => {
                let Some(code) = as_index(a) else {
                    log::warn!("ignoring camera mode {a}");
                    return;
                };
                if self.state.set_camera_mode(code as u32) {
                    self.publish_mode(ctx);
                }
            }
            CUSTOM_SHOW_ORBITS => {
                let show = a != 0.0;
                self.state.set_show_orbits(show);
                if let Some(scene) = &self.scene {
                    ctx.scene.set_visible(&scene.ring_ids(), show);
                }
            }
            CUSTOM_FOLLOW_TARGET => match as_index(a) {
                Some(index) => {
                    self.state.set_follow_target(index);
                }
                None => log::warn!("ignoring follow target {a}"),
            },
            other => log::debug!("unhandled custom event {other}"),
        }
    }

    fn publish_speed(&self, ctx: &mut EngineContext) {
        ctx.overlay.set_text(hud::SPEED_SLOT, TextBlock::new(self.state.speed_readout()));
        ctx.emit_event(GameEvent::new(EVENT_SPEED, self.state.speed() as f32, 0.0, 0.0));
    }

    fn publish_mode(&self, ctx: &mut EngineContext) {
        let visible = self.state.follow_selector_visible();
        ctx.overlay.set_toggle(hud::FOLLOW_SELECTOR_SLOT, visible);
        ctx.emit_event(GameEvent::new(
            EVENT_CAMERA_MODE,
            self.state.mode().code() as f32,
            if visible { 1.0 } else { 0.0 },
            0.0,
        ));
    }

    // ── Per-tick steps ─────────────────────────────────────────────

    /// Turn pivots, spin meshes, propagate, and re-anchor labels.
    fn move_bodies(scene: &mut SolarScene, ctx: &mut EngineContext, time: f64, spin: f64) {
        for body in &scene.bodies {
            let angle = (time / body.descriptor.period).rem_euclid(TAU) as f32;
            scene.graph.set_rotation(body.pivot, Quat::from_rotation_y(angle));
            if spin != 0.0 {
                scene.graph.rotate_local(body.mesh, Quat::from_rotation_y(spin as f32));
            }
        }
        scene.graph.propagate(&mut ctx.scene);

        for body in &mut scene.bodies {
            let Some(world) = ctx.scene.get(body.mesh).map(|e| e.pos) else { continue };
            let at = hud::label_position(world, ctx.viewport);
            body.label.x = at.x;
            body.label.y = at.y;
            body.label.opacity = 1.0;
        }
    }

    fn place_camera(&self, ctx: &mut EngineContext, time: f64) {
        match self.state.mode() {
            CameraMode::Orbit => ctx.camera.look_at(self.config.orbit_eye(time), Vec3::ZERO),
            CameraMode::Top => ctx.camera.look_at(self.config.top_eye(), Vec3::ZERO),
            CameraMode::Follow { target: Some(index) } => {
                let Some(scene) = &self.scene else { return };
                let Some(world) = scene
                    .bodies
                    .get(index)
                    .and_then(|b| ctx.scene.get(b.mesh))
                    .map(|e| e.pos)
                else {
                    return;
                };
                ctx.camera.look_at(world + self.config.follow_offset(), world);
            }
            CameraMode::Follow { target: None } => {}
        }
    }

    /// Pick under the pointer; update labels, info panel, and hover event.
    fn hover(&mut self, ctx: &mut EngineContext) {
        let Some(scene) = self.scene.as_mut() else { return };

        let ray = ctx.camera.ray_from_ndc(self.state.pointer());
        let hovered = pick_nearest(&ctx.scene, &self.pick_targets, &ray).and_then(|hit| scene.body_index(hit.id));

        for (i, body) in scene.bodies.iter_mut().enumerate() {
            body.label.opacity = if hovered == Some(i) { 1.0 } else { 0.0 };
        }
        ctx.overlay.labels.clear();
        ctx.overlay.labels.extend(scene.bodies.iter().map(|b| b.label));

        let descriptor = hovered.and_then(|i| scene.bodies.get(i)).map(|b| &b.descriptor);
        ctx.overlay.set_text(hud::INFO_SLOT, hud::info_panel(descriptor));

        if hovered != self.hovered {
            let a = hovered.map_or(-1.0, |i| i as f32);
            ctx.emit_event(GameEvent::new(EVENT_HOVER, a, 0.0, 0.0));
            self.hovered = hovered;
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-negative whole number carried in an event float.
fn as_index(value: f32) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as usize)
    } else {
        None
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        let planets = self.table.len();
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            // Sun plus a sphere and a ring per planet; pivots draw nothing.
            max_instances: 1 + 2 * planets,
            max_lights: 2,
            max_labels: planets,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), Box<dyn std::error::Error>> {
        let config = SolarConfig::from_json(json)?;
        self.state = SimulationState::new(config.base_step, config.initial_speed, self.table.len());
        self.config = config;
        log::info!("config override applied");
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let scene = scene_builder::build(ctx, &self.table, &self.config);
        self.pick_targets = scene.mesh_ids();
        self.scene = Some(scene);
        self.state = SimulationState::new(self.config.base_step, self.config.initial_speed, self.table.len());
        self.hovered = None;

        ctx.overlay.set_text(hud::INFO_SLOT, hud::info_panel(None));
        self.publish_speed(ctx);
        self.publish_mode(ctx);

        log::info!("solar system ready: {} planets", self.table.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y } => {
                    let ndc = ctx.pixel_to_ndc(x, y);
                    self.state.set_pointer(ndc);
                }
                InputEvent::Custom { kind, a, .. } => self.handle_custom(ctx, kind, a),
                _ => {}
            }
        }

        let time = self.state.clock.advance();
        let spin = self.config.spin_step * self.state.speed();

        if let Some(scene) = self.scene.as_mut() {
            Self::move_bodies(scene, ctx, time, spin);
        }
        self.place_camera(ctx, time);
        self.hover(ctx);
    }

    fn describe(&self) -> serde_json::Value {
        self.scene.as_ref().map_or(serde_json::Value::Null, SolarScene::describe)
    }
}
