//! Frame loop.
//!
//! Two states: running and stopped. Each iteration drains every pending
//! event, then (if still running) clears, sets the viewport, binds the
//! program, pushes the triangle's positions, draws, and presents.
//!
//! There is no pacing of its own; presentation mode decides the frame rate.

mod frame_loop;
mod settings;

pub use frame_loop::{FrameLoop, LoopEvent, LoopState};
pub use settings::{FrameSettings, TRIANGLE};
