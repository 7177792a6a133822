/// Frame buffer layout shared with the host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]            view_proj (16) + eye (4)
/// [Instances: max_instances × 32 floats]
/// [Lights: max_lights × 8 floats]
/// [Labels: max_labels × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame so the host can
/// compute offsets without hardcoding them.

use bytemuck::cast_slice;
use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::MeshInstance;
use crate::systems::lighting::LightState;
use crate::systems::overlay::LabelInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LIGHTS: usize = 4;
pub const HEADER_LIGHT_COUNT: usize = 5;
pub const HEADER_MAX_LABELS: usize = 6;
pub const HEADER_LABEL_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_AMBIENT_R: usize = 10;
pub const HEADER_AMBIENT_G: usize = 11;
pub const HEADER_AMBIENT_B: usize = 12;
pub const HEADER_VIEWPORT_W: usize = 13;
pub const HEADER_VIEWPORT_H: usize = 14;
/// Clear color packed as 0xRRGGBB (exact in f32).
pub const HEADER_CLEAR_COLOR: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per camera block (wire format: never changes).
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per mesh instance (wire format: never changes).
pub const INSTANCE_FLOATS: usize = MeshInstance::FLOATS;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per label: x, y, opacity, index.
pub const LABEL_FLOATS: usize = LabelInstance::FLOATS;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_labels: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub instance_data_offset: usize,
    pub light_data_offset: usize,
    pub label_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize, max_labels: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let light_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let label_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let event_data_offset = label_data_offset + max_labels * LABEL_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_lights,
            max_labels,
            max_events,
            camera_offset,
            instance_data_offset,
            light_data_offset,
            label_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_lights,
            config.max_labels,
            config.max_events,
        )
    }
}

/// Everything that goes into one frame.
pub struct FrameData<'a> {
    pub frame: u32,
    pub camera: CameraUniform,
    pub instances: &'a [MeshInstance],
    pub lights: &'a LightState,
    pub labels: &'a [LabelInstance],
    pub events: &'a [GameEvent],
    pub viewport: (f32, f32),
    pub clear_color: u32,
}

/// Flat f32 buffer the host reads after each tick.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn header(&self, field: usize) -> f32 {
        self.data[field]
    }

    /// Write a whole frame. Sections over capacity are truncated with a warning.
    pub fn pack(&mut self, frame: &FrameData<'_>) {
        let l = self.layout.clone();

        let instance_count = write_section(
            &mut self.data[l.instance_data_offset..l.light_data_offset],
            cast_slice(frame.instances),
            INSTANCE_FLOATS,
            "instances",
        );

        let light_floats: Vec<f32> = frame.lights.iter().flat_map(|p| p.to_floats()).collect();
        let light_count = write_section(
            &mut self.data[l.light_data_offset..l.label_data_offset],
            &light_floats,
            LIGHT_FLOATS,
            "lights",
        );

        let label_count = write_section(
            &mut self.data[l.label_data_offset..l.event_data_offset],
            cast_slice(frame.labels),
            LABEL_FLOATS,
            "labels",
        );

        let event_count = write_section(
            &mut self.data[l.event_data_offset..l.buffer_total_floats],
            cast_slice(frame.events),
            EVENT_FLOATS,
            "events",
        );

        self.data[l.camera_offset..l.instance_data_offset]
            .copy_from_slice(cast_slice(std::slice::from_ref(&frame.camera)));

        let ambient = frame.lights.ambient();
        let h = &mut self.data[..HEADER_FLOATS];
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_FRAME_COUNTER] = frame.frame as f32;
        h[HEADER_MAX_INSTANCES] = l.max_instances as f32;
        h[HEADER_INSTANCE_COUNT] = instance_count as f32;
        h[HEADER_MAX_LIGHTS] = l.max_lights as f32;
        h[HEADER_LIGHT_COUNT] = light_count as f32;
        h[HEADER_MAX_LABELS] = l.max_labels as f32;
        h[HEADER_LABEL_COUNT] = label_count as f32;
        h[HEADER_MAX_EVENTS] = l.max_events as f32;
        h[HEADER_EVENT_COUNT] = event_count as f32;
        h[HEADER_AMBIENT_R] = ambient.r;
        h[HEADER_AMBIENT_G] = ambient.g;
        h[HEADER_AMBIENT_B] = ambient.b;
        h[HEADER_VIEWPORT_W] = frame.viewport.0;
        h[HEADER_VIEWPORT_H] = frame.viewport.1;
        h[HEADER_CLEAR_COLOR] = (frame.clear_color & 0x00ff_ffff) as f32;
    }
}

/// Copy whole records into `dst`, returning how many fit.
fn write_section(dst: &mut [f32], src: &[f32], stride: usize, what: &str) -> usize {
    let capacity = dst.len() / stride;
    let count = src.len() / stride;
    if count > capacity {
        log::warn!("{what}: {count} records exceed capacity {capacity}; truncating");
    }
    let n = count.min(capacity);
    dst[..n * stride].copy_from_slice(&src[..n * stride]);
    n
}
