pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, TextureId};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, Shape, Material, Color};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, SimClock};
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, TextureDescriptor};
pub use assets::registry::{TextureRegistry, LoadState};
pub use bridge::protocol::{ProtocolLayout, FrameBuffer, FrameData};
pub use systems::lighting::{PointLight, LightState};
pub use systems::overlay::{LabelInstance, OverlayState, TextBlock};
pub use systems::picking::{Ray, Hit, pick_nearest};
pub use systems::render::build_render_buffer;

// Extensions: decoupled optional systems
pub use extensions::{TransformGraph, LocalTransform};
