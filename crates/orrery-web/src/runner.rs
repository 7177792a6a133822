use orrery_engine::{
    build_render_buffer, EngineContext, FixedTimestep, FrameBuffer, FrameData, Game, GameConfig,
    InputEvent, InputQueue, ProtocolLayout, RenderBuffer, TextureId,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game keeps a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    frame: FrameBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    frame_counter: u32,
    /// Cached `Game::describe` output; the scene does not change after init.
    scene_json: String,
    /// Overlay JSON from the most recent publish.
    overlay_json: String,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            frame: FrameBuffer::new(layout),
            timestep: FixedTimestep::new(config.fixed_dt),
            game,
            config,
            initialized: false,
            frame_counter: 0,
            scene_json: String::from("null"),
            overlay_json: String::from("{}"),
        }
    }

    /// Apply a JSON config override. Must run before `init`; errors leave defaults in place.
    pub fn configure(&mut self, json: &str) -> bool {
        if self.initialized {
            log::warn!("configuration ignored: game already initialized");
            return false;
        }
        match self.game.configure(json) {
            Ok(()) => true,
            Err(err) => {
                log::error!("invalid configuration, keeping defaults: {err}");
                false
            }
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx = EngineContext::from_config(&self.config);
        self.frame = FrameBuffer::new(ProtocolLayout::from_config(&self.config));
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.scene_json = self.game.describe().to_string();
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue. Resizes also update the camera right away.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.ctx.resize(width, height);
        }
        self.input.push(event);
    }

    /// Host finished loading texture `slot`.
    pub fn texture_loaded(&mut self, slot: u32) {
        self.ctx.textures.mark_ready(TextureId(slot));
    }

    /// Host failed to load texture `slot`. Non-fatal: the mesh stays untextured.
    pub fn texture_failed(&mut self, slot: u32) {
        self.ctx.textures.mark_failed(TextureId(slot));
    }

    /// Run one host frame: fixed-step updates, then pack the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        self.ctx.clear_frame_data();
        if steps == 0 {
            // Queued input waits for the next tick that runs an update;
            // events already delivered must not be reported twice.
            self.publish();
            return;
        }

        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
        }

        self.publish();
    }

    fn publish(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &self.ctx.textures, &mut self.render_buffer);

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.frame.pack(&FrameData {
            frame: self.frame_counter,
            camera: self.ctx.camera.uniform(),
            instances: &self.render_buffer.instances,
            lights: &self.ctx.lights,
            labels: &self.ctx.overlay.labels,
            events: &self.ctx.events,
            viewport: (self.ctx.viewport.x, self.ctx.viewport.y),
            clear_color: self.config.clear_color,
        });

        match self.ctx.overlay.to_json() {
            Ok(json) => self.overlay_json = json,
            Err(err) => log::error!("failed to serialize overlay: {err}"),
        }
    }

    // ---- Accessors read by the host via wasm_bindgen exports ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.as_slice().len() as u32
    }

    pub fn frame_slice(&self) -> &[f32] {
        self.frame.as_slice()
    }

    pub fn overlay_json(&self) -> &str {
        &self.overlay_json
    }

    pub fn scene_json(&self) -> &str {
        &self.scene_json
    }

    pub fn asset_manifest_json(&self) -> String {
        match self.ctx.textures.manifest().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize asset manifest: {err}");
                String::from("{\"textures\":[]}")
            }
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.frame.layout()
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::bridge::protocol::{HEADER_EVENT_COUNT, HEADER_FRAME_COUNTER};
    use orrery_engine::{Color, Entity, GameEvent, MeshComponent};

    /// Counts ticks and echoes the last custom event back as a game event.
    struct Echo {
        ticks: u32,
    }

    impl Game for Echo {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            let tex = ctx.textures.register("marker", "marker.png");
            ctx.scene.spawn(
                Entity::new(id).with_mesh(MeshComponent::sphere(1.0, Color::WHITE).with_texture(tex)),
            );
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.ticks += 1;
            for event in input.iter() {
                if let InputEvent::Custom { kind, a, .. } = *event {
                    ctx.emit_event(GameEvent::new(kind, a, 0.0, 0.0));
                }
            }
        }
    }

    fn runner() -> GameRunner<Echo> {
        let mut r = GameRunner::new(Echo { ticks: 0 });
        r.init();
        r
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut r = GameRunner::new(Echo { ticks: 0 });
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().ticks, 0);
    }

    #[test]
    fn input_survives_short_frames() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: 4, a: 2.0, b: 0.0, c: 0.0 });
        r.tick(0.001);
        assert_eq!(r.game().ticks, 0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().ticks, 1);
        assert_eq!(r.context().events, vec![GameEvent::new(4, 2.0, 0.0, 0.0)]);
    }

    #[test]
    fn events_reported_once_across_short_frames() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: 2, a: 1.5, b: 0.0, c: 0.0 });
        r.tick(1.0 / 60.0);
        assert_eq!(r.frame_slice()[HEADER_EVENT_COUNT], 1.0);
        let counter = r.frame_slice()[HEADER_FRAME_COUNTER];

        r.push_input(InputEvent::Custom { kind: 3, a: 0.0, b: 0.0, c: 0.0 });
        r.tick(0.001);
        assert_eq!(r.game().ticks, 1);
        assert_eq!(r.frame_slice()[HEADER_EVENT_COUNT], 0.0);
        assert!(r.context().events.is_empty());
        assert_eq!(r.frame_slice()[HEADER_FRAME_COUNTER], counter + 1.0);

        // The queued event is still delivered by the next full step.
        r.tick(1.0 / 60.0);
        assert_eq!(r.context().events, vec![GameEvent::new(3, 0.0, 0.0, 0.0)]);
        assert_eq!(r.frame_slice()[HEADER_EVENT_COUNT], 1.0);
    }

    #[test]
    fn resize_applies_immediately() {
        let mut r = runner();
        r.push_input(InputEvent::Resize { width: 400.0, height: 200.0 });
        assert!((r.context().camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn texture_state_reaches_frame() {
        let mut r = runner();
        let offset = r.layout().instance_data_offset;
        assert_eq!(r.frame_slice()[offset + 24], -1.0);
        r.texture_loaded(0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.frame_slice()[offset + 24], 0.0);
        assert!(r.asset_manifest_json().contains("marker.png"));
    }

    #[test]
    fn configure_after_init_is_rejected() {
        let mut r = runner();
        assert!(!r.configure("{}"));
    }
}
