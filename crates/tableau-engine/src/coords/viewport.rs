/// Viewport size in logical pixels.
///
/// Read once per frame from the window; model transforms are computed against it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Half extents: the pixel distance from the viewport center to its edges.
    #[inline]
    pub fn half_extent(self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}
