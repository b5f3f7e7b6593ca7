//! Presentation surface.
//!
//! Two equally-sized raster buffers: an off-screen `draw` side the simulation
//! paints into and an on-screen `screen` side the OS window shows. Nothing
//! becomes visible until an explicit [`SurfacePair::present`] blit; there is
//! no implicit swap.

mod buffer;
mod color;
mod pair;

pub use buffer::PixelBuffer;
pub use color::DrawColor;
pub use pair::SurfacePair;
