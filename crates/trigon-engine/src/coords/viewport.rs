/// Viewport rectangle in physical pixels, origin top-left.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport anchored at the origin.
    #[inline]
    pub const fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a render pass accepts this viewport on a device whose largest
    /// 2D texture is `max_dimension` pixels on a side.
    ///
    /// The viewport may extend past the attachment. Fragments outside the
    /// attachment are clipped, so the clip-space mapping stays the same.
    pub fn within_limit(self, max_dimension: u32) -> bool {
        let range = u64::from(max_dimension) * 2;
        self.width <= max_dimension
            && self.height <= max_dimension
            && u64::from(self.x) + u64::from(self.width) < range
            && u64::from(self.y) + u64::from(self.height) < range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_larger_than_target_keeps_its_size() {
        // A 300px surface still gets the full 512 viewport; the rest is cropped.
        let vp = Viewport::sized(512, 512);
        assert!(vp.within_limit(2048));
        assert_eq!(vp, Viewport::new(0, 0, 512, 512));
    }

    #[test]
    fn viewport_wider_than_device_limit_is_rejected() {
        assert!(!Viewport::sized(4096, 512).within_limit(2048));
    }

    #[test]
    fn viewport_reaching_past_double_limit_is_rejected() {
        assert!(Viewport::new(3000, 0, 1000, 1000).within_limit(2048));
        assert!(!Viewport::new(3100, 0, 1000, 1000).within_limit(2048));
    }

    #[test]
    fn zero_sized_viewport_is_empty() {
        assert!(Viewport::sized(0, 512).is_empty());
        assert!(!Viewport::sized(512, 512).is_empty());
    }
}
