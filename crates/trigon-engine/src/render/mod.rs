//! GPU rendering.
//!
//! `FrameTarget` is the seam between the frame loop and the GPU. The wgpu
//! implementation records one frame's commands and encodes them into a single
//! render pass on `present`.

mod gpu_target;
mod program;
mod target;

pub use gpu_target::{GpuFrameTarget, VertexStream};
pub use program::GpuProgram;
pub use target::{FrameTarget, Position};
