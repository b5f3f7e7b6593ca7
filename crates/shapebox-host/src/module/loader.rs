use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;
use std::{fs, thread};

use wasmtime::{Config, Engine, Module};

use crate::error::HostError;

/// Capability check: can this target execute the module format at all?
///
/// Constructing the engine is the probe; on targets without a compiler
/// backend this is the point where execution support is absent. When it
/// fails, the module file is never read.
pub fn probe_engine() -> Result<Engine, HostError> {
    Engine::new(&Config::new()).map_err(|err| HostError::Unsupported(format!("{err:#}")))
}

/// Background module load.
///
/// Reading and compiling the module proceeds on its own thread so surface
/// acquisition happens concurrently; [`join`] is the single point where both
/// must have completed.
///
/// [`join`]: ModuleLoader::join
pub struct ModuleLoader {
    rx: mpsc::Receiver<Result<Module, HostError>>,
}

impl ModuleLoader {
    pub fn spawn(engine: Engine, path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();

        let result_tx = tx.clone();
        let spawned = thread::Builder::new()
            .name("module-loader".to_string())
            .spawn(move || {
                let _ = tx.send(load(&engine, &path));
            });

        if let Err(err) = spawned {
            let _ = result_tx.send(Err(HostError::ModuleLoad(format!(
                "loader thread failed to start: {err}"
            ))));
        }

        Self { rx }
    }

    /// Waits for the compiled module, bounded by `timeout` when given.
    pub fn join(self, timeout: Option<Duration>) -> Result<Module, HostError> {
        let received = match timeout {
            Some(limit) => self.rx.recv_timeout(limit).map_err(|err| match err {
                RecvTimeoutError::Timeout => {
                    HostError::ModuleLoad(format!("load timed out after {limit:?}"))
                }
                RecvTimeoutError::Disconnected => disconnected(),
            }),
            None => self.rx.recv().map_err(|_| disconnected()),
        }?;

        received
    }
}

fn disconnected() -> HostError {
    HostError::ModuleLoad("loader thread terminated without a result".to_string())
}

fn load(engine: &Engine, path: &Path) -> Result<Module, HostError> {
    let bytes = fs::read(path)
        .map_err(|err| HostError::ModuleLoad(format!("reading {}: {err}", path.display())))?;

    Module::new(engine, &bytes)
        .map_err(|err| HostError::ModuleLoad(format!("compiling {}: {err:#}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("shapebox-loader-{name}-{}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_a_valid_module() {
        let engine = probe_engine().unwrap();
        let path = scratch_file("ok.wat", b"(module)");

        let module = ModuleLoader::spawn(engine, path.clone()).join(None);
        fs::remove_file(&path).ok();
        assert!(module.is_ok());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let engine = probe_engine().unwrap();
        let loader = ModuleLoader::spawn(engine, PathBuf::from("no-such-module.wasm"));

        match loader.join(Some(Duration::from_secs(5))) {
            Err(HostError::ModuleLoad(_)) => {}
            other => panic!("expected ModuleLoad, got {other:?}"),
        }
    }

    #[test]
    fn garbage_bytes_are_a_load_error() {
        let engine = probe_engine().unwrap();
        let path = scratch_file("bad.wasm", b"definitely not wasm");

        let result = ModuleLoader::spawn(engine, path.clone()).join(Some(Duration::from_secs(5)));
        fs::remove_file(&path).ok();
        match result {
            Err(HostError::ModuleLoad(_)) => {}
            other => panic!("expected ModuleLoad, got {other:?}"),
        }
    }
}
