use crate::coords::{ColorRgba, Viewport};
use crate::input::Key;
use crate::render::Position;

/// Fixed positions of the triangle, in clip space.
pub const TRIANGLE: [Position; 3] = [
    [0.0, 0.5, 0.0],
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
];

/// Per-frame constants.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSettings {
    pub clear_color: ColorRgba,
    pub viewport: Viewport,
    /// Stops the loop when held at the time a key press is drained.
    pub cancel_key: Key,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            clear_color: ColorRgba::gray(0.2),
            viewport: Viewport::sized(512, 512),
            cancel_key: Key::Escape,
        }
    }
}
