use std::ops::Range;

use crate::coords::{ColorRgba, Viewport};
use crate::device::{Gpu, GpuFrame};

use super::program::GpuProgram;
use super::target::{FrameTarget, Position};

/// Vertex buffer that client-side positions are copied into every frame.
pub struct VertexStream {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl VertexStream {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trigon position stream"),
            size: (capacity * std::mem::size_of::<Position>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity }
    }

    fn write(&self, queue: &wgpu::Queue, positions: &[Position]) {
        let n = positions.len().min(self.capacity);
        if n < positions.len() {
            log::warn!(
                "position upload truncated: {} vertices, stream holds {}",
                positions.len(),
                self.capacity
            );
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&positions[..n]));
    }
}

/// `FrameTarget` over an acquired surface frame.
///
/// Commands are collected until `present`, which encodes a single render pass
/// (load-op clear, viewport, pipeline, draws), submits it, and presents.
pub struct GpuFrameTarget<'a, 'w> {
    gpu: &'a Gpu<'w>,
    stream: &'a VertexStream,
    frame: Option<GpuFrame>,

    clear: Option<wgpu::Color>,
    viewport: Option<Viewport>,
    pipeline: Option<wgpu::RenderPipeline>,
    draws: Vec<Range<u32>>,
}

impl<'a, 'w> GpuFrameTarget<'a, 'w> {
    pub fn new(gpu: &'a Gpu<'w>, stream: &'a VertexStream, frame: GpuFrame) -> Self {
        Self {
            gpu,
            stream,
            frame: Some(frame),
            clear: None,
            viewport: None,
            pipeline: None,
            draws: Vec::new(),
        }
    }
}

impl FrameTarget for GpuFrameTarget<'_, '_> {
    type Program = GpuProgram;

    fn clear(&mut self, color: ColorRgba) {
        self.clear = Some(color.into());
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn use_program(&mut self, program: &GpuProgram) {
        self.pipeline = Some(program.pipeline().clone());
    }

    fn upload_positions(&mut self, positions: &[Position]) {
        self.stream.write(self.gpu.queue(), positions);
    }

    fn draw_triangles(&mut self, first: u32, count: u32) {
        self.draws.push(first..first + count);
    }

    fn present(&mut self) {
        let Some(mut frame) = self.frame.take() else {
            log::warn!("present called twice for one frame");
            return;
        };

        let max_dimension = self.gpu.device().limits().max_texture_dimension_2d;
        let viewport = self.viewport.filter(|vp| {
            let usable = !vp.is_empty() && vp.within_limit(max_dimension);
            if !usable {
                log::warn!("viewport {vp:?} unusable on this device, skipping draw");
            }
            usable
        });

        // Pass is dropped before the encoder is moved into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trigon frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: match self.clear {
                            Some(c) => wgpu::LoadOp::Clear(c),
                            None => wgpu::LoadOp::Load,
                        },
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let (Some(pipeline), Some(vp)) = (self.pipeline.as_ref(), viewport) {
                rpass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    0.0,
                    1.0,
                );
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, self.stream.buffer.slice(..));
                for range in self.draws.drain(..) {
                    rpass.draw(range, 0..1);
                }
            }
        }

        self.gpu.submit(frame);
    }
}
