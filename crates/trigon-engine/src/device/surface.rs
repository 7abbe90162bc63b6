use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks the first supported format from `preferred`, else the first
/// non-sRGB format, else whatever the surface lists first.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    preferred: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    preferred
        .iter()
        .copied()
        .find(|f| formats.contains(f))
        .or_else(|| formats.iter().copied().find(|f| !f.is_srgb()))
        .or_else(|| formats.first().copied())
}

pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    let opaque = wgpu::CompositeAlphaMode::Opaque;
    if caps.alpha_modes.contains(&opaque) {
        opaque
    } else {
        caps.alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

pub(crate) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        // FIFO is the one mode every surface must support.
        wgpu::PresentMode::Fifo
    }
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;

    // A 0x0 surface cannot be configured; defer until the size is non-zero.
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = classify_surface_error(&err);
    if action == SurfaceErrorAction::Reconfigured && size.width > 0 && size.height > 0 {
        surface.configure(device, config);
    }
    action
}

pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    const RGBA8: [F; 2] = [F::Rgba8Unorm, F::Bgra8Unorm];

    #[test]
    fn preferred_format_wins() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm, F::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, &RGBA8), Some(F::Rgba8Unorm));
    }

    #[test]
    fn falls_back_to_first_linear_format() {
        let formats = [F::Bgra8UnormSrgb, F::Rgb10a2Unorm];
        assert_eq!(choose_surface_format(&formats, &RGBA8), Some(F::Rgb10a2Unorm));
    }

    #[test]
    fn srgb_only_surface_still_gets_a_format() {
        let formats = [F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, &RGBA8), Some(F::Rgba8UnormSrgb));
    }

    #[test]
    fn empty_caps_have_no_format() {
        assert_eq!(choose_surface_format(&[], &RGBA8), None);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError as E;
        use SurfaceErrorAction as A;
        assert_eq!(classify_surface_error(&E::Lost), A::Reconfigured);
        assert_eq!(classify_surface_error(&E::Outdated), A::Reconfigured);
        assert_eq!(classify_surface_error(&E::Timeout), A::SkipFrame);
        assert_eq!(classify_surface_error(&E::OutOfMemory), A::Fatal);
    }
}
