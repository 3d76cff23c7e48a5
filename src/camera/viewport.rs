/// Current framebuffer size in physical pixels.
///
/// Both dimensions are kept at least 1 so the aspect ratio is always
/// finite, even while a window is minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a viewport, clamping zero dimensions to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Update the size. Returns `true` if it changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let next = Self::new(width, height);
        let changed = next != *self;
        *self = next;
        changed
    }

    /// Width in physical pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in physical pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
