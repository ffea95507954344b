//! Browser plumbing: the `requestAnimationFrame` loop, DOM listeners and the
//! mount that owns both until teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use astros_engine::{to_ndc, InputEvent, SurfaceRect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

struct AnimationState {
    request_id: Cell<i32>,
    cancelled: Cell<bool>,
    closure: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl AnimationState {
    fn request(&self) -> Result<(), JsValue> {
        let closure = self.closure.borrow();
        let Some(closure) = closure.as_ref() else {
            return Err(JsValue::from_str("animation closure already released"));
        };
        let id = window()?.request_animation_frame(closure.as_ref().unchecked_ref())?;
        self.request_id.set(id);
        Ok(())
    }
}

/// Repeating per-refresh callback driven by `requestAnimationFrame`.
pub struct AnimationLoop;

impl AnimationLoop {
    /// Schedule `callback` once per display refresh until the returned
    /// handle is cancelled.
    pub fn start(mut callback: impl FnMut() + 'static) -> Result<AnimationHandle, JsValue> {
        let state = Rc::new(AnimationState {
            request_id: Cell::new(0),
            cancelled: Cell::new(false),
            closure: RefCell::new(None),
        });

        // The closure keeps the state alive; cancel() breaks the cycle.
        let inner = state.clone();
        let closure = Closure::wrap(Box::new(move || {
            if inner.cancelled.get() {
                return;
            }
            callback();
            if inner.cancelled.get() {
                return;
            }
            if let Err(e) = inner.request() {
                log::warn!("animation: could not schedule next frame: {:?}", e);
            }
        }) as Box<dyn FnMut()>);
        *state.closure.borrow_mut() = Some(closure);

        state.request()?;
        Ok(AnimationHandle { state })
    }
}

/// Proof of a running animation loop. Cancelling consumes it, so a loop is
/// cancelled exactly once.
#[must_use = "dropping the handle leaves the animation loop running"]
pub struct AnimationHandle {
    state: Rc<AnimationState>,
}

impl AnimationHandle {
    pub fn cancel(self) {
        self.state.cancelled.set(true);
        if let Ok(window) = window() {
            if let Err(e) = window.cancel_animation_frame(self.state.request_id.get()) {
                log::warn!("animation: cancel failed: {:?}", e);
            }
        }
        // Must not run from inside the callback: this drops the closure.
        self.state.closure.borrow_mut().take();
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Event listeners registered on DOM targets, removed together.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    /// Remove every listener. Failures are logged; the closures are dropped
    /// regardless.
    pub fn remove_all(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(listener.kind, listener.closure.as_ref().unchecked_ref())
            {
                log::warn!("listeners: could not remove '{}': {:?}", listener.kind, e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Where attached listeners deliver input.
pub struct InputSink {
    pub event: Box<dyn Fn(InputEvent)>,
    pub click: Box<dyn Fn()>,
}

pub fn canvas_by_id(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("'{}' is not a canvas", canvas_id)))
}

/// Current window size as a resize event.
pub fn window_size_event() -> Result<InputEvent, JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
    let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
    Ok(InputEvent::Resize { width, height })
}

/// Attach pointer listeners to `canvas` and a resize listener to the window.
/// Pointer NDC is recomputed from the canvas's bounding rectangle on every
/// move.
pub fn attach_input(canvas: &HtmlCanvasElement, sink: InputSink) -> Result<ListenerSet, JsValue> {
    let sink = Rc::new(sink);
    let mut listeners = ListenerSet::new();
    let target: &EventTarget = canvas.as_ref();

    {
        let sink = sink.clone();
        let canvas = canvas.clone();
        listeners.add(target, "mousemove", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            let x = e.client_x() as f32;
            let y = e.client_y() as f32;
            let r = canvas.get_bounding_client_rect();
            let rect = SurfaceRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32);
            let ndc = to_ndc(x, y, &rect).map(|v| (v.x, v.y));
            (sink.event)(InputEvent::PointerMove { x, y, ndc });
        })?;
    }
    {
        let sink = sink.clone();
        listeners.add(target, "mousedown", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            (sink.event)(InputEvent::PointerDown {
                x: e.client_x() as f32,
                y: e.client_y() as f32,
                button: e.button().max(0) as u32,
            });
        })?;
    }
    {
        let sink = sink.clone();
        listeners.add(target, "mouseup", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            (sink.event)(InputEvent::PointerUp { x: e.client_x() as f32, y: e.client_y() as f32 });
        })?;
    }
    {
        let sink = sink.clone();
        listeners.add(target, "click", move |_| (sink.click)())?;
    }
    {
        let sink = sink.clone();
        listeners.add(target, "wheel", move |e| {
            let Some(e) = e.dyn_ref::<WheelEvent>() else { return };
            e.prevent_default();
            (sink.event)(InputEvent::Wheel { delta_y: e.delta_y() as f32 });
        })?;
    }
    // Secondary-button drag pans; keep the browser menu out of the way.
    listeners.add(target, "contextmenu", |e| e.prevent_default())?;

    {
        let sink = sink.clone();
        let window = window()?;
        listeners.add(window.as_ref(), "resize", move |_| match window_size_event() {
            Ok(event) => (sink.event)(event),
            Err(e) => log::warn!("resize: {:?}", e),
        })?;
    }

    Ok(listeners)
}

/// Everything a mounted view owns: its frame loop, its listeners and the
/// host's `dispose` callback for the graphics context.
pub struct Mount {
    animation: AnimationHandle,
    listeners: ListenerSet,
    dispose: Option<js_sys::Function>,
}

impl Mount {
    pub fn new(animation: AnimationHandle, listeners: ListenerSet, dispose: Option<js_sys::Function>) -> Self {
        Self { animation, listeners, dispose }
    }

    /// Cancel the loop, remove every listener, then release the graphics
    /// context. Consumes the mount.
    pub fn teardown(self) -> Result<(), JsValue> {
        let Mount { animation, mut listeners, dispose } = self;
        animation.cancel();
        listeners.remove_all();
        if let Some(dispose) = dispose {
            dispose.call0(&JsValue::NULL)?;
        }
        Ok(())
    }
}
