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
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, TextureId, GameEvent, InfoCard};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshShape, MeshColor, Material};
pub use crate::core::scene::Scene;
pub use crate::core::frame::{FrameLoop, FrameHandle};
pub use crate::core::ray::{Ray, RayHit};
pub use renderer::instance::{BodyInstance, RenderBuffer};
pub use renderer::camera::{PerspectiveCamera, CameraConfig, CameraUniform};
pub use renderer::controls::{OrbitControls, ControlsConfig};
pub use input::queue::{InputEvent, InputQueue};
pub use input::pointer::{SurfaceRect, PointerState, to_ndc};
pub use assets::manifest::TextureManifest;
pub use assets::registry::{TextureRegistry, TextureRequest, TextureState};
pub use bridge::protocol::{ProtocolLayout, FrameCounts, HEADER_FLOATS};
pub use systems::lighting::{PointLight, LightState};
pub use systems::rings::{RingGeometry, RingMeshes, RingVertex};
pub use systems::rng::Rng;
pub use systems::starfield::{Starfield, StarfieldConfig, StarVertex};

// Extensions: decoupled optional systems
pub use extensions::{compose, TransformGraph, LocalTransform};
