//! Simulation module embedding.
//!
//! Responsibilities:
//! - probe whether this target can execute the module format at all;
//! - read and compile the module on a background thread, joined with a bound;
//! - define the host imports under module `"env"` matching the guest ABI;
//! - instantiate and expose the guest's imperative contract as typed calls.

mod env;
mod loader;
mod simulation;

pub use env::HostEnv;
pub use loader::{probe_engine, ModuleLoader};
pub use simulation::Simulation;
