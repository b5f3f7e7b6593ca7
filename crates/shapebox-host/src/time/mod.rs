//! Frame timing.
//!
//! One [`FrameClock`] per render loop. The first tick only establishes the
//! baseline timestamp; every tick after that yields a [`FrameTime`] whose
//! delta is measured against the previous tick.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
