use winit::dpi::{PhysicalPosition, PhysicalSize};

use crate::frame::FrameSettings;
use crate::shader::ProgramSource;

/// Window parameters.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Inner size in physical pixels, so that it matches the surface and the
    /// fixed viewport at any display scale.
    pub size: PhysicalSize<u32>,
    /// Center on the primary monitor; otherwise the platform picks.
    pub centered: bool,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Test".to_string(),
            size: PhysicalSize::new(512, 512),
            centered: true,
            resizable: false,
        }
    }
}

/// Everything the runtime needs besides the graphics context parameters.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub window: WindowConfig,
    pub frame: FrameSettings,
    pub program: ProgramSource,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            frame: FrameSettings::default(),
            program: ProgramSource::triangle(),
        }
    }
}

/// Top-left position that centers `window` on a monitor.
///
/// A window larger than the monitor is pinned to the monitor origin.
pub(crate) fn centered_position(
    monitor_pos: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let dx = monitor_size.width.saturating_sub(window.width) / 2;
    let dy = monitor_size.height.saturating_sub(window.height) / 2;
    PhysicalPosition::new(monitor_pos.x + dx as i32, monitor_pos.y + dy as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_fixed_512_square() {
        let w = WindowConfig::default();
        assert_eq!(w.title, "Test");
        assert_eq!(w.size, PhysicalSize::new(512, 512));
        assert!(w.centered);
        assert!(!w.resizable);
    }

    #[test]
    fn default_window_matches_fixed_viewport() {
        let config = RuntimeConfig::default();
        let vp = config.frame.viewport;
        assert_eq!((vp.x, vp.y), (0, 0));
        assert_eq!(PhysicalSize::new(vp.width, vp.height), config.window.size);
    }

    #[test]
    fn centers_on_primary_monitor() {
        let p = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(512, 512),
        );
        assert_eq!(p, PhysicalPosition::new(704, 284));
    }

    #[test]
    fn centers_on_offset_monitor() {
        let p = centered_position(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(1024, 768),
            PhysicalSize::new(512, 512),
        );
        assert_eq!(p, PhysicalPosition::new(2176, -72));
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let p = centered_position(
            PhysicalPosition::new(10, 20),
            PhysicalSize::new(400, 300),
            PhysicalSize::new(512, 512),
        );
        assert_eq!(p, PhysicalPosition::new(10, 20));
    }
}
