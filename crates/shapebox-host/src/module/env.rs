use wasmtime::{Caller, Linker};

use crate::input::PointerState;
use crate::surface::{DrawColor, SurfacePair};

/// The callable environment bound into the guest: the presentation surface's
/// primitives and the resolved pointer position.
///
/// Lives as the wasm store's data, so every host import works on it directly
/// and all mutation stays on the event-loop thread.
#[derive(Debug)]
pub struct HostEnv {
    pub surface: SurfacePair,
    pub pointer: PointerState,
}

impl HostEnv {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: SurfacePair::new(width, height),
            pointer: PointerState::default(),
        }
    }
}

/// Defines the `"env"` host imports the guest ABI expects.
///
/// Pointer accessors truncate to the guest's integer contract; drawing calls
/// forward to the off-screen buffer and `renderAll` is the explicit present.
pub(crate) fn link_host_imports(linker: &mut Linker<HostEnv>) -> anyhow::Result<()> {
    linker.func_wrap(
        "env",
        "setDrawColor",
        |mut caller: Caller<'_, HostEnv>, r: i32, g: i32, b: i32, a: i32| {
            caller
                .data_mut()
                .surface
                .set_color(DrawColor::from_channels(r, g, b, a));
        },
    )?;

    linker.func_wrap(
        "env",
        "fillRect",
        |mut caller: Caller<'_, HostEnv>, x: i32, y: i32, w: i32, h: i32| {
            caller.data_mut().surface.fill_rect(x, y, w, h);
        },
    )?;

    linker.func_wrap("env", "clear", |mut caller: Caller<'_, HostEnv>| {
        caller.data_mut().surface.clear();
    })?;

    linker.func_wrap("env", "renderAll", |mut caller: Caller<'_, HostEnv>| {
        caller.data_mut().surface.present();
    })?;

    linker.func_wrap("env", "mouseX", |caller: Caller<'_, HostEnv>| -> i32 {
        caller.data().pointer.x as i32
    })?;

    linker.func_wrap("env", "mouseY", |caller: Caller<'_, HostEnv>| -> i32 {
        caller.data().pointer.y as i32
    })?;

    Ok(())
}
