//! Core session contract.
//!
//! [`Session`] is the stable seam between the platform shell (window, event
//! loop, presentation to the OS) and the instantiated simulation: it owns the
//! frame ordering, the pointer routing, and the stop handle, and is fully
//! drivable without a window.

mod session;

pub use session::{FrameStatus, Session};
