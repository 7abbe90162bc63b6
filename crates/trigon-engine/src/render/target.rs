use crate::coords::{ColorRgba, Viewport};

/// Vertex position, three `f32` components.
pub type Position = [f32; 3];

/// Receiver of one frame's draw commands.
///
/// The frame loop only talks to this trait, so the same loop drives the GPU
/// and the recording target used in tests. Calls arrive in submission order;
/// `present` ends the frame.
pub trait FrameTarget {
    /// Program handle type bound by `use_program`.
    type Program;

    /// Clears the color buffer.
    fn clear(&mut self, color: ColorRgba);

    fn set_viewport(&mut self, viewport: Viewport);

    fn use_program(&mut self, program: &Self::Program);

    /// Uploads positions for the single vertex attribute from client memory.
    fn upload_positions(&mut self, positions: &[Position]);

    /// Draws `count` vertices starting at `first` as a triangle list.
    fn draw_triangles(&mut self, first: u32, count: u32);

    /// Presents (swaps) the frame.
    fn present(&mut self);
}
