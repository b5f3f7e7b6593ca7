use crate::input::{PointerAction, PointerEvent, PointerState, PointerUnifier};
use crate::module::Simulation;
use crate::time::{FrameClock, FrameTime};

/// Outcome of one frame tick.
#[derive(Debug, Copy, Clone)]
pub enum FrameStatus {
    /// Baseline tick: the clock warmed up, the simulation was not driven.
    WarmUp,
    /// The simulation advanced by `update(dt)` followed by `render()`.
    Ticked(FrameTime),
}

/// A running simulation session.
///
/// Owns the simulation handle, the frame clock and the pointer unifier, and
/// guarantees the contract's ordering: per driven tick, `update` is called
/// strictly before `render`, never skipped, never reordered. The loop itself
/// has no stop condition; [`request_stop`] is the explicit handle the shell
/// (and tests) use to terminate it deterministically.
///
/// [`request_stop`]: Session::request_stop
pub struct Session {
    sim: Simulation,
    clock: FrameClock,
    unifier: PointerUnifier,
    stop_requested: bool,
}

impl Session {
    pub fn new(sim: Simulation, clock: FrameClock) -> Self {
        Self {
            sim,
            clock,
            unifier: PointerUnifier::new(),
            stop_requested: false,
        }
    }

    /// Tells the simulation its surface dimensions. Called once, after the
    /// buffers hold their initial size.
    pub fn start(&mut self) -> anyhow::Result<()> {
        let (w, h) = self.surface_size();
        self.sim.start(w, h)
    }

    /// Drives one tick: warm-up on the first call, `update` then `render`
    /// on every later one.
    pub fn frame(&mut self) -> anyhow::Result<FrameStatus> {
        let Some(ft) = self.clock.tick() else {
            return Ok(FrameStatus::WarmUp);
        };

        self.sim.update(ft.dt)?;
        self.sim.render()?;
        Ok(FrameStatus::Ticked(ft))
    }

    /// Routes one pointer event: the unifier resolves the shared position,
    /// which is published to the guest's accessors, and any activation edge
    /// becomes the matching guest call.
    pub fn pointer(&mut self, event: PointerEvent) -> anyhow::Result<()> {
        let action = self.unifier.apply(event);

        let resolved = self.unifier.position();
        self.sim.host_mut().pointer = resolved;

        match action {
            Some(PointerAction::Down { x, y }) => self.sim.mouse_down(x as i32, y as i32),
            Some(PointerAction::Up) => self.sim.mouse_up(),
            None => Ok(()),
        }
    }

    /// Resizes both surface buffers, then notifies the guest exactly once.
    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        self.sim.host_mut().surface.resize(width, height);
        self.sim.resize(width, height)
    }

    /// Current resolved pointer position, for the shell's event translation.
    pub fn pointer_position(&self) -> PointerState {
        self.unifier.position()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        let surface = &self.sim.host().surface;
        (surface.width(), surface.height())
    }

    /// Pixels the user currently sees.
    pub fn screen(&self) -> &crate::surface::PixelBuffer {
        self.sim.host().surface.screen()
    }

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}
