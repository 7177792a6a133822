use bytemuck::{Pod, Zeroable};

/// Per-mesh render data written to the frame buffer for the host renderer.
/// Must match the host protocol: 32 floats = 128 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Base color (rgb) and opacity.
    pub color: [f32; 4],
    /// 0 = sphere, 1 = ring.
    pub shape: f32,
    /// Sphere radius, or ring inner radius.
    pub param_a: f32,
    /// Ring outer radius (0 for spheres).
    pub param_b: f32,
    /// Tessellation hint (ring segments; 0 = host default).
    pub segments: f32,
    /// Texture slot, or -1 when untextured (none, pending or failed).
    pub texture: f32,
    /// 0 = basic (unlit), 1 = phong.
    pub lit: f32,
    /// Phong shininess exponent.
    pub shininess: f32,
    /// Bit 0: double sided.
    pub flags: f32,
    /// Phong specular color; w unused.
    pub specular: [f32; 4],
}

impl MeshInstance {
    pub const FLOATS: usize = 32;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_TEXTURE: f32 = -1.0;
    pub const FLAG_DOUBLE_SIDED: u32 = 1;
}

const _: () = assert!(std::mem::size_of::<MeshInstance>() == MeshInstance::STRIDE_BYTES);

/// Render buffer containing all mesh instances for one frame, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<MeshInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
