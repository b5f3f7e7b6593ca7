//! Platform runtime shell.
//!
//! Owns the window, the OS-facing framebuffer, and the lifecycle sequencing
//! from capability check through the perpetual frame loop, including
//! fatal-condition surfacing.

mod runtime;

pub use runtime::Runtime;
