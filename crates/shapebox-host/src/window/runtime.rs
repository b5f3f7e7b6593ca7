use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use softbuffer::{Context, Surface};
use wasmtime::Engine;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, OwnedDisplayHandle};
use winit::keyboard::{Key, ModifiersState};
use winit::window::{Window, WindowId};

use crate::config::HostConfig;
use crate::core::Session;
use crate::error::HostError;
use crate::input::PointerEvent;
use crate::module::{probe_engine, HostEnv, ModuleLoader, Simulation};
use crate::notice::Notice;
use crate::time::FrameClock;

/// Entry point for the host runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the full lifecycle: capability check, module load concurrent with
    /// surface acquisition, instantiation, then the frame loop until the
    /// window closes or the session's stop handle fires.
    pub fn run(config: HostConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Lifecycle phase. Linear with one fatal branch: boot either reaches
/// `Running` or parks in `Halted` with a terminal notice on display.
enum Phase {
    Boot,
    Running(Session),
    Halted(Notice),
}

/// Window plus OS framebuffer.
///
/// Field order matters: the surface drops before the context, the context
/// before the window.
struct View {
    surface: Surface<OwnedDisplayHandle, Arc<Window>>,
    _context: Context<OwnedDisplayHandle>,
    window: Arc<Window>,
}

struct HostState {
    config: HostConfig,
    engine: Option<Engine>,
    loader: Option<ModuleLoader>,
    phase: Phase,
    view: Option<View>,
    modifiers: ModifiersState,
    fatal: Option<anyhow::Error>,
}

impl HostState {
    fn new(config: HostConfig) -> Self {
        // Capability check first. When it fails, the module file is never
        // read; when it passes, the load starts immediately so it overlaps
        // window and framebuffer acquisition.
        let (engine, loader, phase) = match probe_engine() {
            Ok(engine) => {
                let loader = ModuleLoader::spawn(engine.clone(), config.module_path.clone());
                (Some(engine), Some(loader), Phase::Boot)
            }
            Err(err) => {
                log::warn!("{err}");
                (None, None, Phase::Halted(Notice::Unsupported))
            }
        };

        Self {
            config,
            engine,
            loader,
            phase,
            view: None,
            modifiers: ModifiersState::empty(),
            fatal: None,
        }
    }

    fn acquire_view(&self, event_loop: &ActiveEventLoop) -> Result<View> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|err| HostError::Surface(format!("creating window: {err}")))?,
        );

        let context = Context::new(event_loop.owned_display_handle())
            .map_err(|err| HostError::Surface(format!("acquiring display context: {err}")))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|err| HostError::Surface(format!("acquiring framebuffer: {err}")))?;

        Ok(View {
            surface,
            _context: context,
            window,
        })
    }

    /// Loading → Initializing → Running, or an error for the fatal branch.
    fn bootstrap(&mut self) -> Result<()> {
        let engine = self.engine.take().context("engine missing at bootstrap")?;
        let loader = self.loader.take().context("module loader missing at bootstrap")?;

        self.apply_notice(Notice::Loading);
        let module = loader.join(self.config.load_timeout)?;

        let view = self.view.as_ref().context("window missing at bootstrap")?;
        let size = view.window.inner_size();

        let env = HostEnv::new(size.width, size.height);
        let sim = Simulation::instantiate(&engine, &module, env, self.config.min_memory_pages)?;

        let clock = match self.config.max_frame_delta {
            Some(max) => FrameClock::with_max_delta(max),
            None => FrameClock::new(),
        };

        let mut session = Session::new(sim, clock);
        session.start()?;

        // Dismiss the loading notice.
        view.window.set_title(&self.config.title);
        log::info!("simulation running at {}x{}", size.width, size.height);

        self.phase = Phase::Running(session);
        Ok(())
    }

    fn apply_notice(&self, notice: Notice) {
        notice.log();
        if let Some(view) = &self.view {
            view.window
                .set_title(&format!("{}: {}", self.config.title, notice.title()));
        }
    }

    fn halt(&mut self, notice: Notice) {
        self.apply_notice(notice);
        self.phase = Phase::Halted(notice);
        if let Some(view) = &self.view {
            view.window.request_redraw();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn resize_session(&mut self, width: u32, height: u32) {
        // Zero-sized (minimized) viewports are skipped, as is the duplicate
        // event winit delivers alongside a scale change.
        if width == 0 || height == 0 {
            return;
        }

        let Phase::Running(session) = &mut self.phase else {
            return;
        };
        if session.surface_size() == (width, height) {
            return;
        }

        if let Err(err) = session.resize(width, height) {
            log::error!("resize failed: {err:#}");
            self.halt(Notice::Fault);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        let mut fault = false;
        let mut exit = false;

        match &mut self.phase {
            Phase::Boot => {}

            Phase::Running(session) => {
                match session.frame() {
                    Ok(_) => {
                        let (w, h) = session.surface_size();
                        present_pixels(view, session.screen().pixels(), w, h);
                    }
                    Err(err) => {
                        log::error!("simulation frame trapped: {err:#}");
                        fault = true;
                    }
                }

                if session.stop_requested() {
                    exit = true;
                } else if !fault {
                    // The loop is perpetual: each presented frame schedules
                    // the next.
                    view.window.request_redraw();
                }
            }

            Phase::Halted(notice) => {
                let notice = *notice;
                let size = view.window.inner_size();
                paint_backdrop(view, notice.backdrop(), size.width, size.height);
            }
        }

        if fault {
            self.halt(Notice::Fault);
        }
        if exit {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }

        match self.acquire_view(event_loop) {
            Ok(view) => self.view = Some(view),
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }

        if matches!(self.phase, Phase::Boot) {
            if let Err(err) = self.bootstrap() {
                log::error!("bootstrap failed: {err:#}");
                self.halt(Notice::Fault);
            }
        } else if let Phase::Halted(notice) = &self.phase {
            self.apply_notice(*notice);
        }

        if let Some(view) = &self.view {
            view.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::ModifiersChanged(m) => self.modifiers = m.state(),

            WindowEvent::KeyboardInput { event: key, .. } => {
                let quit = key.state == ElementState::Pressed
                    && !key.repeat
                    && self.modifiers.control_key()
                    && matches!(&key.logical_key, Key::Character(c) if c.as_str() == "q");

                if quit {
                    match &mut self.phase {
                        Phase::Running(session) => session.request_stop(),
                        _ => event_loop.exit(),
                    }
                }
            }

            WindowEvent::Resized(size) => {
                self.resize_session(size.width, size.height);
                if let Some(view) = &self.view {
                    view.window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.view.as_ref().map(|v| v.window.inner_size()) {
                    self.resize_session(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            other => {
                if let Phase::Running(session) = &mut self.phase {
                    if let Some(ev) = translate_pointer_event(session, &other) {
                        if let Err(err) = session.pointer(ev) {
                            log::error!("pointer dispatch failed: {err:#}");
                            self.halt(Notice::Fault);
                        }
                    }
                }
            }
        }
    }
}

/// Maps window-system pointer events onto the unifier's platform-agnostic
/// stream. Button events carry the current resolved position; any button
/// activates, since the single-pointer contract has no notion of which one.
fn translate_pointer_event(session: &Session, event: &WindowEvent) -> Option<PointerEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(PointerEvent::MouseMoved {
            x: position.x,
            y: position.y,
        }),

        WindowEvent::MouseInput { state, .. } => {
            let pos = session.pointer_position();
            Some(match state {
                ElementState::Pressed => PointerEvent::MousePressed { x: pos.x, y: pos.y },
                ElementState::Released => PointerEvent::MouseReleased,
            })
        }

        WindowEvent::Touch(Touch {
            id,
            phase,
            location,
            ..
        }) => Some(match phase {
            TouchPhase::Started => PointerEvent::TouchStarted {
                id: *id,
                x: location.x,
                y: location.y,
            },
            TouchPhase::Moved => PointerEvent::TouchMoved {
                id: *id,
                x: location.x,
                y: location.y,
            },
            // A cancelled touch is retired like an ended one.
            TouchPhase::Ended | TouchPhase::Cancelled => PointerEvent::TouchEnded { id: *id },
        }),

        _ => None,
    }
}

fn present_pixels(view: &mut View, pixels: &[u32], width: u32, height: u32) {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return;
    };
    if view.surface.resize(w, h).is_err() {
        return;
    }

    let Ok(mut buffer) = view.surface.buffer_mut() else {
        return;
    };
    if buffer.len() != pixels.len() {
        return;
    }

    buffer.copy_from_slice(pixels);
    view.window.pre_present_notify();
    let _ = buffer.present();
}

fn paint_backdrop(view: &mut View, color: u32, width: u32, height: u32) {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return;
    };
    if view.surface.resize(w, h).is_err() {
        return;
    }

    let Ok(mut buffer) = view.surface.buffer_mut() else {
        return;
    };
    buffer.fill(color);
    view.window.pre_present_notify();
    let _ = buffer.present();
}
