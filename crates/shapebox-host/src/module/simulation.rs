use wasmtime::{Engine, ExternType, Instance, Linker, Memory, MemoryType, Module, Store, TypedFunc};

use crate::error::HostError;

use super::env::{link_host_imports, HostEnv};

/// The instantiated simulation: the store owning the host environment plus
/// the guest's imperative contract resolved as typed exports.
///
/// One per session; it is never copied and lives for the process lifetime.
pub struct Simulation {
    store: Store<HostEnv>,
    #[allow(dead_code)]
    instance: Instance,
    memory: Option<Memory>,

    start: TypedFunc<(u32, u32), ()>,
    resize: TypedFunc<(u32, u32), ()>,
    mouse_down: TypedFunc<(i32, i32), ()>,
    mouse_up: TypedFunc<(), ()>,
    update: TypedFunc<f32, ()>,
    render: TypedFunc<(), ()>,
}

impl Simulation {
    /// Binds the host environment and instantiates the module.
    ///
    /// If the guest imports `env.memory`, the provided memory is sized from
    /// the guest's declared minimum raised to `memory_floor_pages` and capped
    /// by the declared maximum — never a bare constant.
    pub fn instantiate(
        engine: &Engine,
        module: &Module,
        env: HostEnv,
        memory_floor_pages: u64,
    ) -> Result<Self, HostError> {
        let mut store = Store::new(engine, env);
        let mut linker = Linker::new(engine);

        link_host_imports(&mut linker)
            .map_err(|err| HostError::ModuleInit(format!("host imports: {err:#}")))?;

        let memory = provide_imported_memory(&mut store, &mut linker, module, memory_floor_pages)?;

        let instance = linker
            .instantiate(&mut store, module)
            .map_err(|err| HostError::ModuleInit(format!("{err:#}")))?;

        let start = typed_export(&instance, &mut store, "start")?;
        let resize = typed_export(&instance, &mut store, "resize")?;
        let mouse_down = typed_export(&instance, &mut store, "mouseDown")?;
        let mouse_up = typed_export(&instance, &mut store, "mouseUp")?;
        let update = typed_export(&instance, &mut store, "update")?;
        let render = typed_export(&instance, &mut store, "render")?;

        Ok(Self {
            store,
            instance,
            memory,
            start,
            resize,
            mouse_down,
            mouse_up,
            update,
            render,
        })
    }

    pub fn start(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        self.start.call(&mut self.store, (width, height))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        self.resize.call(&mut self.store, (width, height))
    }

    pub fn mouse_down(&mut self, x: i32, y: i32) -> anyhow::Result<()> {
        self.mouse_down.call(&mut self.store, (x, y))
    }

    pub fn mouse_up(&mut self) -> anyhow::Result<()> {
        self.mouse_up.call(&mut self.store, ())
    }

    pub fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        self.update.call(&mut self.store, dt)
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        self.render.call(&mut self.store, ())
    }

    /// The host environment the guest draws into and reads the pointer from.
    pub fn host(&self) -> &HostEnv {
        self.store.data()
    }

    pub fn host_mut(&mut self) -> &mut HostEnv {
        self.store.data_mut()
    }

    /// Current size of the guest's imported memory, in pages, when it
    /// imports one.
    pub fn memory_pages(&self) -> Option<u64> {
        self.memory.map(|m| m.size(&self.store))
    }

    /// Calls a nullary `i32`-returning guest export. Test instrumentation for
    /// fixture guests that expose counters.
    #[cfg(test)]
    pub(crate) fn probe_i32(&mut self, name: &str) -> i32 {
        let func = self
            .instance
            .get_typed_func::<(), i32>(&mut self.store, name)
            .expect("fixture probe export");
        func.call(&mut self.store, ()).expect("fixture probe call")
    }
}

fn typed_export<P, R>(
    instance: &Instance,
    store: &mut Store<HostEnv>,
    name: &str,
) -> Result<TypedFunc<P, R>, HostError>
where
    P: wasmtime::WasmParams,
    R: wasmtime::WasmResults,
{
    instance
        .get_typed_func::<P, R>(&mut *store, name)
        .map_err(|err| HostError::ModuleInit(format!("export `{name}`: {err:#}")))
}

/// Provides `env.memory` when the guest imports it.
fn provide_imported_memory(
    store: &mut Store<HostEnv>,
    linker: &mut Linker<HostEnv>,
    module: &Module,
    floor_pages: u64,
) -> Result<Option<Memory>, HostError> {
    let imported = module.imports().find_map(|import| {
        if import.module() != "env" || import.name() != "memory" {
            return None;
        }
        match import.ty() {
            ExternType::Memory(mt) => Some(mt),
            _ => None,
        }
    });

    let Some(mem_ty) = imported else {
        return Ok(None);
    };

    let mut pages = mem_ty.minimum().max(floor_pages);
    if let Some(max) = mem_ty.maximum() {
        pages = pages.min(max);
    }

    let ty = MemoryType::new(pages as u32, mem_ty.maximum().map(|m| m as u32));
    let memory = Memory::new(&mut *store, ty)
        .map_err(|err| HostError::ModuleInit(format!("providing memory: {err:#}")))?;

    linker
        .define(&*store, "env", "memory", memory)
        .map_err(|err| HostError::ModuleInit(format!("defining memory: {err:#}")))?;

    Ok(Some(memory))
}
