use crate::shader::LinkedProgram;

use super::target::Position;

/// A linked program uploaded to the GPU as a render pipeline.
///
/// Not `Clone`; the program lives as long as the window entry that owns it.
pub struct GpuProgram {
    pipeline: wgpu::RenderPipeline,
}

impl GpuProgram {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Creates the pipeline for `program`.
    ///
    /// Per-stage shader modules only live for the duration of this call;
    /// they are released as soon as the pipeline exists.
    pub fn create(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        program: &LinkedProgram,
    ) -> Self {
        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon vertex stage"),
            source: wgpu::ShaderSource::Wgsl(program.vertex().source.as_str().into()),
        });

        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon fragment stage"),
            source: wgpu::ShaderSource::Wgsl(program.fragment().source.as_str().into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trigon program"),
            layout: None,

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(&program.vertex().entry_point),
                compilation_options: Default::default(),
                buffers: &[Self::position_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(&program.fragment().entry_point),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        drop(vertex_module);
        drop(fragment_module);
        log::debug!("program pipeline created for {target_format:?}");

        Self { pipeline }
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    fn position_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Position>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::POSITION_ATTRIBUTE;

    #[test]
    fn position_layout_matches_attribute_slot() {
        let layout = GpuProgram::position_layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, POSITION_ATTRIBUTE);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }
}
