use glam::Vec2;
use crate::input::pointer::PointerState;

/// Input event types the engine understands.
/// Generic: no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to client coordinates (x, y). `ndc` is `None` when
    /// the surface rectangle was degenerate at the time of the move.
    PointerMove { x: f32, y: f32, ndc: Option<(f32, f32)> },
    /// A button was pressed at client coordinates (x, y).
    /// `button` follows DOM numbering: 0 primary, 1 middle, 2 secondary.
    PointerDown { x: f32, y: f32, button: u32 },
    /// A button was released at client coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A click completed. Carries the pointer NDC current when it was
    /// queued, so clicks and moves interleave correctly within a frame.
    Click { ndc_x: f32, ndc_y: f32 },
    /// Wheel scrolled; positive `delta_y` scrolls down.
    Wheel { delta_y: f32 },
    /// The render surface changed size (CSS pixels).
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Host listeners push events; the runner hands them to the game on the next
/// frame and then drains them.
pub struct InputQueue {
    events: Vec<InputEvent>,
    /// Pointer as of the most recently queued move.
    pointer: PointerState,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            pointer: PointerState::default(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::PointerMove { x, y, ndc } = event {
            self.pointer.moved(Vec2::new(x, y), ndc.map(|(nx, ny)| Vec2::new(nx, ny)));
        }
        self.events.push(event);
    }

    /// Queue a click at the current pointer position.
    pub fn push_click(&mut self) {
        let ndc = self.pointer.ndc;
        self.events.push(InputEvent::Click { ndc_x: ndc.x, ndc_y: ndc.y });
    }

    /// Pointer as of the most recently queued move. Survives draining.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: 0 });
        q.push_click();
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 2.0, ndc: Some((0.5, -0.5)) });
        q.push_click();
        q.push(InputEvent::Wheel { delta_y: -3.0 });
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerMove { x: 1.0, y: 2.0, ndc: Some((0.5, -0.5)) });
        assert_eq!(events[1], InputEvent::Click { ndc_x: 0.5, ndc_y: -0.5 });
        match events[2] {
            InputEvent::Wheel { delta_y } => assert_eq!(delta_y, -3.0),
            _ => panic!("Expected Wheel event"),
        }
    }

    #[test]
    fn click_uses_pointer_at_queue_time() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 0.0, y: 0.0, ndc: Some((0.1, 0.2)) });
        q.push_click();
        q.push(InputEvent::PointerMove { x: 5.0, y: 5.0, ndc: Some((0.9, 0.9)) });
        // Degenerate surface: the click keeps the last good NDC.
        q.push(InputEvent::PointerMove { x: 6.0, y: 6.0, ndc: None });
        q.push_click();
        let events = q.drain();
        assert_eq!(events[1], InputEvent::Click { ndc_x: 0.1, ndc_y: 0.2 });
        assert_eq!(events[4], InputEvent::Click { ndc_x: 0.9, ndc_y: 0.9 });
        assert_eq!(q.pointer().client, Vec2::new(6.0, 6.0));
    }
}
