use std::fmt::{self, Display};

use crate::notice::Notice;

/// Failure taxonomy for the bootstrap sequence.
///
/// `Unsupported` is the one non-fatal kind: the environment simply cannot
/// execute the module format, no error was thrown, and the host shows an
/// informational notice and does nothing further. Everything else is fatal
/// and terminal for the session — there is no retry.
#[derive(Debug)]
pub enum HostError {
    /// The host cannot execute WebAssembly on this target.
    Unsupported(String),
    /// A window or framebuffer could not be acquired.
    Surface(String),
    /// Reading or compiling the module failed (including a load timeout).
    ModuleLoad(String),
    /// Instantiating the module or resolving its exports failed.
    ModuleInit(String),
}

impl HostError {
    /// The user-facing notice this failure surfaces as.
    pub fn notice(&self) -> Notice {
        match self {
            HostError::Unsupported(_) => Notice::Unsupported,
            _ => Notice::Fault,
        }
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Unsupported(s) => write!(f, "wasm execution unavailable: {s}"),
            HostError::Surface(s) => write!(f, "surface acquisition failed: {s}"),
            HostError::ModuleLoad(s) => write!(f, "module load failed: {s}"),
            HostError::ModuleInit(s) => write!(f, "module instantiation failed: {s}"),
        }
    }
}

impl std::error::Error for HostError {}
