use crate::error::ShadingError;
use crate::math::Viewport;
use crate::paint::Color;

/// Cleared depth value; the depth test is `Less`.
pub const DEPTH_CLEAR: f32 = 1.0;

/// CPU color + depth attachment pair.
///
/// Storage is row-major with (0, 0) at the top-left.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    width: u32,
    height: u32,
    color: Vec<Color>,
    depth: Vec<f32>,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Result<Self, ShadingError> {
        if width == 0 || height == 0 {
            return Err(ShadingError::EmptyTarget);
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![Color::TRANSPARENT; len],
            depth: vec![DEPTH_CLEAR; len],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills color with `color` and depth with [`DEPTH_CLEAR`].
    pub fn clear(&mut self, color: Color) {
        self.color.fill(color);
        self.depth.fill(DEPTH_CLEAR);
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.color[self.index(x, y)]
    }

    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.color
    }

    /// Number of pixels whose color differs from `background`.
    pub fn count_not(&self, background: Color) -> usize {
        self.color.iter().filter(|&&c| c != background).count()
    }

    /// Packs the color attachment as sRGB-encoded RGBA8, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color.iter().flat_map(|c| c.to_srgb_u8()).collect()
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub(crate) fn depth_mut(&mut self) -> &mut [f32] {
        &mut self.depth
    }

    #[inline]
    pub(crate) fn color_mut(&mut self) -> &mut [Color] {
        &mut self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_is_rejected() {
        assert_eq!(RenderTarget::new(0, 4).unwrap_err(), ShadingError::EmptyTarget);
        assert_eq!(RenderTarget::new(4, 0).unwrap_err(), ShadingError::EmptyTarget);
    }

    #[test]
    fn clear_resets_color_and_depth() {
        let mut target = RenderTarget::new(3, 2).unwrap();
        target.depth_mut()[4] = 0.25;
        target.clear(Color::WHITE);
        assert_eq!(target.pixel(2, 1), Color::WHITE);
        assert_eq!(target.depth_at(1, 1), DEPTH_CLEAR);
        assert_eq!(target.count_not(Color::WHITE), 0);
    }

    #[test]
    fn rgba8_is_row_major() {
        let mut target = RenderTarget::new(2, 2).unwrap();
        target.clear(Color::BLACK);
        let i = target.index(1, 0);
        target.color_mut()[i] = Color::WHITE;
        let bytes = target.to_rgba8();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
        assert_eq!(&bytes[4..8], &[255, 255, 255, 255]);
    }
}
