//! Shapebox host crate.
//!
//! Everything the embedded simulation cannot own itself: the double-buffered
//! presentation surface, the frame-timing loop, the pointer-unification
//! layer, and the lifecycle sequencing that loads and drives the module.

pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod module;
pub mod notice;
pub mod surface;
pub mod time;
pub mod window;
