/// Most recent resolved pointer location, in surface-local pixels.
///
/// Continuously overwritten by whichever input source is active and read on
/// demand by the simulation through its accessor imports. Never unset: a
/// session starts at the origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

impl PointerState {
    #[inline]
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

/// Platform-agnostic pointer event emitted by the runtime's translation layer.
///
/// Button-press coordinates are attached at translation time from the current
/// resolved position, so the unifier never has to ask the window system.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    MouseMoved { x: f64, y: f64 },
    MousePressed { x: f64, y: f64 },
    MouseReleased,
    TouchStarted { id: u64, x: f64, y: f64 },
    TouchMoved { id: u64, x: f64, y: f64 },
    TouchEnded { id: u64 },
}

/// Edge-triggered activation signal for the simulation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerAction {
    Down { x: f64, y: f64 },
    Up,
}
