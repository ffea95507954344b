use glam::Vec2;
use crate::api::types::{EntityId, GameEvent, InfoCard};
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{CameraConfig, PerspectiveCamera};
use crate::renderer::controls::{ControlsConfig, OrbitControls};
use crate::renderer::instance::RenderBuffer;
use crate::systems::lighting::LightState;
use crate::systems::rings::RingMeshes;
use crate::systems::rng::Rng;
use crate::systems::starfield::{Starfield, StarfieldConfig};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport size in CSS pixels, until the host reports a resize.
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub starfield: StarfieldConfig,
    /// Maximum number of body instances (default: 64).
    pub max_bodies: usize,
    /// Maximum number of ring vertices across all rings (default: 4096).
    pub max_ring_vertices: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for every random draw in the scene.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            starfield: StarfieldConfig::default(),
            max_bodies: 64,
            max_ring_vertices: 4096,
            max_lights: 8,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, request textures.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Once per frame, before camera controls and transform propagation.
    /// `input` holds the events queued since the previous frame, in order.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Card describing the current selection, if any.
    fn info_card(&self) -> Option<InfoCard> {
        None
    }

    /// The view is being torn down. Release game-held resources. If the
    /// view is mounted again, `init` runs on a fresh context.
    fn teardown(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub lights: LightState,
    pub textures: TextureRegistry,
    pub rings: RingMeshes,
    pub stars: Starfield,
    pub rng: Rng,
    pub events: Vec<GameEvent>,
    /// Current viewport size in CSS pixels.
    pub viewport: Vec2,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    /// Build the context for `config`. The starfield is generated here, so
    /// it takes the first draws from the seeded generator.
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let stars = Starfield::generate(&config.starfield, &mut rng);
        Self {
            scene: Scene::with_capacity(config.max_bodies),
            graph: TransformGraph::new(),
            camera: PerspectiveCamera::new(&config.camera, config.viewport_width, config.viewport_height),
            controls: OrbitControls::new(config.controls, config.viewport_height),
            lights: LightState::with_capacity(config.max_lights),
            textures: TextureRegistry::new(),
            rings: RingMeshes::new(config.max_ring_vertices),
            stars,
            rng,
            events: Vec::with_capacity(config.max_events),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host. Events past the
    /// per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("events: per-frame capacity {} reached, event dropped", self.max_events);
            return;
        }
        self.events.push(event);
    }

    /// Apply a viewport resize to the camera and controls. Zero sizes are
    /// ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.camera.resize(width, height) {
            self.controls.set_viewport_height(height);
            self.viewport = Vec2::new(width, height);
        }
    }

    /// Engine-level handling of one input event: viewport resizes and
    /// camera gestures. Clicks are left to the game.
    pub fn apply_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::PointerDown { x, y, button } => {
                self.controls.on_pointer_down(Vec2::new(x, y), button)
            }
            InputEvent::PointerMove { x, y, .. } => {
                self.controls.on_pointer_move(Vec2::new(x, y), &self.camera)
            }
            InputEvent::PointerUp { .. } => self.controls.on_pointer_up(),
            InputEvent::Wheel { delta_y } => self.controls.on_wheel(delta_y),
            InputEvent::Click { .. } => {}
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub camera: &'a PerspectiveCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::default();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn events_respect_capacity_and_clear() {
        let config = GameConfig { max_events: 2, ..Default::default() };
        let mut ctx = EngineContext::new(&config);
        for i in 0..5 {
            ctx.emit_event(GameEvent::new(1.0, i as f32));
        }
        assert_eq!(ctx.events.len(), 2);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn resize_updates_camera_and_viewport() {
        let mut ctx = EngineContext::default();
        ctx.resize(1000.0, 500.0);
        assert_eq!(ctx.viewport, Vec2::new(1000.0, 500.0));
        assert_eq!(ctx.camera.aspect, 2.0);
        ctx.resize(0.0, 0.0);
        assert_eq!(ctx.viewport, Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn drag_input_reaches_controls() {
        let mut ctx = EngineContext::default();
        let before = ctx.camera.position;
        ctx.apply_input(&InputEvent::PointerDown { x: 100.0, y: 100.0, button: 0 });
        ctx.apply_input(&InputEvent::PointerMove { x: 200.0, y: 100.0, ndc: None });
        ctx.apply_input(&InputEvent::PointerUp { x: 200.0, y: 100.0 });
        assert!(ctx.controls.update(&mut ctx.camera));
        assert_ne!(ctx.camera.position, before);
    }

    #[test]
    fn starfield_follows_seed() {
        let a = EngineContext::new(&GameConfig { seed: 5, ..Default::default() });
        let b = EngineContext::new(&GameConfig { seed: 5, ..Default::default() });
        assert_eq!(a.stars.count(), 1000);
        assert_eq!(a.stars.stars(), b.stars.stars());
    }
}
