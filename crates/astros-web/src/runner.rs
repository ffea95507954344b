use astros_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform,
    FrameLoop, FrameHandle, FrameCounts, ProtocolLayout, TextureId, TextureManifest,
    HEADER_FLOATS,
};
use astros_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `astros`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    header: [f32; HEADER_FLOATS],
    frames: FrameLoop,
    handle: Option<FrameHandle>,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::new(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_bodies),
            camera_uniform,
            header: [0.0; HEADER_FLOATS],
            frames: FrameLoop::new(),
            handle: None,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue a click at the last reported pointer position.
    pub fn push_click(&mut self) {
        self.input.push_click();
    }

    /// Apply a JSON texture manifest. Malformed manifests are logged and
    /// ignored.
    pub fn load_manifest(&mut self, json: &str) {
        match TextureManifest::from_json(json) {
            Ok(manifest) => {
                self.ctx.textures.apply_manifest(&manifest);
            }
            Err(e) => log::warn!("manifest: ignoring malformed JSON: {}", e),
        }
    }

    pub fn texture_loaded(&mut self, id: u32) {
        self.ctx.textures.mark_loaded(TextureId(id));
    }

    pub fn texture_failed(&mut self, id: u32) {
        self.ctx.textures.mark_failed(TextureId(id));
    }

    /// Texture ids, keys, paths and states as a JSON array.
    pub fn texture_requests_json(&self) -> String {
        self.ctx.textures.requests_json().unwrap_or_else(|e| {
            log::warn!("textures: could not serialize requests: {}", e);
            "[]".to_string()
        })
    }

    // ---- Frame-loop lifecycle ----

    /// Begin driving frames. Returns `false` if already running. A runner
    /// that was torn down rebuilds its scene before the first frame.
    pub fn start(&mut self) -> bool {
        if self.frames.is_running() {
            return false;
        }
        if !self.initialized {
            self.rebuild();
        }
        match self.frames.start() {
            Some(handle) => {
                self.handle = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Stop driving frames. Returns `false` if no run was active.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => self.frames.stop(handle),
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Stop the loop and let the game release its resources. The next
    /// `start` rebuilds the scene.
    pub fn teardown(&mut self) {
        self.stop();
        self.game.teardown(&mut self.ctx);
        self.input.drain();
        self.initialized = false;
    }

    /// Fresh engine context followed by `Game::init`. The texture registry
    /// carries over so textures the host already loaded stay bound.
    fn rebuild(&mut self) {
        let textures = std::mem::take(&mut self.ctx.textures);
        self.ctx = EngineContext::new(&self.config);
        self.ctx.textures = textures;
        log::info!("runner: rebuilding scene");
        self.init();
    }

    /// Run one frame: route input, update the game, apply camera controls,
    /// propagate transforms and rebuild the render buffers. Returns `false`
    /// when the frame was skipped because the loop is not running.
    pub fn tick(&mut self) -> bool {
        if !self.initialized || !self.frames.begin_frame() {
            return false;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Engine-level input (resize, camera gestures) before the game sees it
        for event in self.input.iter() {
            self.ctx.apply_input(event);
        }

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.ctx.controls.update(&mut self.ctx.camera);
        self.ctx.graph.propagate(&mut self.ctx.scene);

        build_render_buffer(self.ctx.scene.iter(), &self.ctx.textures, &mut self.render_buffer);

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }

        self.camera_uniform = self.ctx.camera.uniform();
        self.layout.write_header(&mut self.header, &FrameCounts {
            frame: self.frames.frame_count(),
            bodies: self.render_buffer.instances.len(),
            stars: self.ctx.stars.count(),
            ring_vertices: self.ctx.rings.vertex_count(),
            lights: self.ctx.lights.count(),
            events: self.ctx.events.len(),
            viewport_width: self.ctx.viewport.x,
            viewport_height: self.ctx.viewport.y,
            star_size: self.ctx.stars.size(),
        });
        true
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Current info card as JSON, `null` when nothing is selected.
    pub fn info_card_json(&self) -> String {
        serde_json::to_string(&self.game.info_card()).unwrap_or_else(|e| {
            log::warn!("info card: could not serialize: {}", e);
            "null".to_string()
        })
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn transparent_split(&self) -> u32 {
        self.render_buffer.transparent_split
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.ctx.stars.buffer_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.ctx.stars.count() as u32
    }

    pub fn star_size(&self) -> f32 {
        self.ctx.stars.size()
    }

    pub fn ring_vertices_ptr(&self) -> *const f32 {
        self.ctx.rings.buffer_ptr()
    }

    pub fn ring_vertex_count(&self) -> u32 {
        self.ctx.rings.vertex_count() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient_radiance()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame_count(&self) -> u32 {
        self.frames.frame_count() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_stars(&self) -> u32 {
        self.layout.max_stars as u32
    }

    pub fn max_ring_vertices(&self) -> u32 {
        self.layout.max_ring_vertices as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
