pub mod browser;
pub mod runner;

pub use browser::{AnimationHandle, AnimationLoop, InputSink, ListenerSet, Mount};
pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner and the mounted view
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, input handlers, assets, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use astros_engine::*;
///
/// mod game;
/// use game::MyScene;
///
/// astros_web::export_game!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `astros_engine::Game`
///   and provides `fn new(seed: u64) -> Self`
/// - `$game_name`: A string literal used in lifecycle log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static MOUNT: RefCell<Option<$crate::Mount>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        // ---- Lifecycle ----

        #[wasm_bindgen]
        pub fn game_init(seed: u32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new(seed as u64);
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized (seed {})", $game_name, seed);
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        /// Attach to the canvas, start the frame loop and call `render` once
        /// per frame after the engine has updated. `dispose` runs on unmount.
        #[wasm_bindgen]
        pub fn game_mount(
            canvas_id: &str,
            render: js_sys::Function,
            dispose: Option<js_sys::Function>,
        ) -> Result<(), JsValue> {
            if MOUNT.with(|m| m.borrow().is_some()) {
                log::warn!("{}: already mounted", $game_name);
                return Ok(());
            }

            let canvas = $crate::browser::canvas_by_id(canvas_id)?;
            let listeners = $crate::browser::attach_input(&canvas, $crate::InputSink {
                event: Box::new(|e| with_runner(|r| r.push_input(e))),
                click: Box::new(|| with_runner(|r| r.push_click())),
            })?;
            let size = $crate::browser::window_size_event()?;
            with_runner(|r| {
                r.push_input(size);
                r.start()
            });

            let animation = $crate::AnimationLoop::start(move || {
                if !with_runner(|r| r.tick()) {
                    return;
                }
                if let Err(e) = render.call0(&JsValue::NULL) {
                    log::warn!("render callback failed: {:?}", e);
                }
            })?;

            MOUNT.with(|m| {
                *m.borrow_mut() = Some($crate::Mount::new(animation, listeners, dispose));
            });
            log::info!("{}: mounted on #{}", $game_name, canvas_id);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_unmount() -> Result<(), JsValue> {
            let Some(mount) = MOUNT.with(|m| m.borrow_mut().take()) else {
                return Ok(());
            };
            with_runner(|r| r.teardown());
            mount.teardown()?;
            log::info!("{}: unmounted", $game_name);
            Ok(())
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn game_pointer_move(client_x: f32, client_y: f32, ndc_x: f32, ndc_y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove {
                x: client_x,
                y: client_y,
                ndc: Some((ndc_x, ndc_y)),
            }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_click() {
            with_runner(|r| r.push_click());
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        // ---- Assets ----

        #[wasm_bindgen]
        pub fn get_texture_requests_json() -> String {
            with_runner(|r| r.texture_requests_json())
        }

        #[wasm_bindgen]
        pub fn game_texture_loaded(id: u32) {
            with_runner(|r| r.texture_loaded(id));
        }

        #[wasm_bindgen]
        pub fn game_texture_failed(id: u32) {
            with_runner(|r| r.texture_failed(id));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_bodies_ptr() -> *const f32 {
            with_runner(|r| r.bodies_ptr())
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count())
        }

        #[wasm_bindgen]
        pub fn get_transparent_split() -> u32 {
            with_runner(|r| r.transparent_split())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_stars_ptr() -> *const f32 {
            with_runner(|r| r.stars_ptr())
        }

        #[wasm_bindgen]
        pub fn get_star_count() -> u32 {
            with_runner(|r| r.star_count())
        }

        #[wasm_bindgen]
        pub fn get_star_size() -> f32 {
            with_runner(|r| r.star_size())
        }

        #[wasm_bindgen]
        pub fn get_ring_vertices_ptr() -> *const f32 {
            with_runner(|r| r.ring_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_ring_vertex_count() -> u32 {
            with_runner(|r| r.ring_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.ambient()[0])
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.ambient()[1])
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.ambient()[2])
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_info_card_json() -> String {
            with_runner(|r| r.info_card_json())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(|r| r.max_bodies())
        }

        #[wasm_bindgen]
        pub fn get_max_stars() -> u32 {
            with_runner(|r| r.max_stars())
        }

        #[wasm_bindgen]
        pub fn get_max_ring_vertices() -> u32 {
            with_runner(|r| r.max_ring_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
