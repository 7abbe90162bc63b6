/// Per-channel color depth requested for the default framebuffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ColorBits {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl ColorBits {
    pub const RGBA8: Self = Self { red: 8, green: 8, blue: 8, alpha: 8 };

    fn is_rgba8(self) -> bool {
        self == Self::RGBA8
    }
}

/// Initialization parameters for the graphics context.
///
/// Channel depths are set explicitly; left to the platform, some
/// configurations hand back fewer than 8 bits per channel.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick an adapter from.
    ///
    /// Defaults to GL, i.e. a GLES-class context.
    pub backends: wgpu::Backends,

    /// Requested color channel depths.
    pub color_bits: ColorBits,

    /// Double buffering. Maps to FIFO presentation when enabled.
    pub double_buffer: bool,

    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// The defaults are the GLES3-class downlevel limits, clamped to the
    /// adapter's supported resolution at device creation.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.double_buffer {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::Immediate
        }
    }

    /// Surface formats matching `color_bits`, best first.
    pub(crate) fn preferred_formats(&self) -> &'static [wgpu::TextureFormat] {
        if self.color_bits.is_rgba8() {
            &[wgpu::TextureFormat::Rgba8Unorm, wgpu::TextureFormat::Bgra8Unorm]
        } else {
            &[]
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::GL,
            color_bits: ColorBits::RGBA8,
            double_buffer: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
