//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, and wires them to the graphics
//! context and the frame loop.

mod config;
mod runtime;

pub use config::{RuntimeConfig, WindowConfig};
pub use runtime::Runtime;
