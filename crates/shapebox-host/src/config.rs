use std::path::PathBuf;
use std::time::Duration;

use winit::dpi::LogicalSize;

/// Host configuration.
///
/// The binary fills this in `main`; the library never reads the environment.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Path of the pre-compiled simulation module.
    pub module_path: PathBuf,

    /// Window title while the simulation is running.
    pub title: String,

    /// Initial window size.
    pub initial_size: LogicalSize<f64>,

    /// Floor for the guest's imported linear memory, in 64 KiB pages. The
    /// guest's own declared minimum always wins when it is larger; its
    /// declared maximum always caps the result.
    pub min_memory_pages: u64,

    /// Bound on the module load + compile. `None` waits forever.
    pub load_timeout: Option<Duration>,

    /// Optional cap on the per-frame delta fed to the simulation. `None`
    /// passes the measured gap through unmodified.
    pub max_frame_delta: Option<Duration>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            module_path: PathBuf::from("shapebox.wasm"),
            title: "Shapebox".to_string(),
            initial_size: LogicalSize::new(512.0, 512.0),
            min_memory_pages: 2,
            load_timeout: Some(Duration::from_secs(30)),
            max_frame_delta: None,
        }
    }
}
