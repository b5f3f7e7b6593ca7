//! Pointer unification.
//!
//! Collapses mouse and multi-touch streams into one logical pointer position
//! plus discrete down/up activation events — the single-pointer model the
//! simulation contract expects. The runtime translates window-system events
//! into [`PointerEvent`]s; the unifier resolves them.

mod types;
mod unifier;

pub use types::{PointerAction, PointerEvent, PointerState};
pub use unifier::PointerUnifier;
