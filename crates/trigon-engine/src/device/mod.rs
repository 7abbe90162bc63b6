//! Graphics context creation and presentation.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for the window
//! - creating & configuring the Surface (the double-buffered swapchain)
//! - acquiring frames and presenting them

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::{ContextInfo, Gpu};
pub use init::{ColorBits, GpuInit};
