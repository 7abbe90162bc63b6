//! Small value types shared by the renderer and the frame loop.
//!
//! Viewports are in physical pixels, origin top-left.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
