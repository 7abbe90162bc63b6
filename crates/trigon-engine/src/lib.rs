//! Trigon engine crate.
//!
//! Window and graphics-context bootstrap, a small WGSL shader compiler and
//! linker, and the frame loop that redraws a single triangle until quit.

pub mod coords;
pub mod device;
pub mod frame;
pub mod input;
pub mod logging;
pub mod render;
pub mod shader;
pub mod window;
