use crate::error::ShadingError;
use crate::paint::Color;

/// CPU-side 2D texture holding linear RGBA texels, row-major from the top row.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Texture2D {
    /// Wraps existing texels. `texels.len()` must equal `width * height` and
    /// both dimensions must be non-zero.
    pub fn new(width: u32, height: u32, texels: Vec<Color>) -> Result<Self, ShadingError> {
        if width == 0 || height == 0 || texels.len() != width as usize * height as usize {
            return Err(ShadingError::TextureSize {
                width,
                height,
                actual: texels.len(),
            });
        }
        Ok(Self { width, height, texels })
    }

    /// Decodes tightly packed sRGB RGBA8 data.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self, ShadingError> {
        if data.len() % 4 != 0 {
            return Err(ShadingError::TextureSize {
                width,
                height,
                actual: data.len() / 4,
            });
        }
        let texels = data
            .chunks_exact(4)
            .map(|p| Color::from_srgb_u8(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, texels)
    }

    /// Single-texel texture.
    pub fn solid(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// `size x size` checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32, a: Color, b: Color) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let texels = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| if ((x / cell) ^ (y / cell)) & 1 == 0 { a } else { b })
            .collect();
        Self {
            width: size,
            height: size,
            texels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel fetch with integer coordinates; callers handle addressing.
    #[inline]
    pub fn load(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height);
        self.texels[y as usize * self.width as usize + x as usize]
    }

    /// Encodes the texels as tightly packed sRGB RGBA8, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.texels.iter().flat_map(|c| c.to_srgb_u8()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        let err = Texture2D::new(2, 2, vec![Color::WHITE; 3]).unwrap_err();
        assert_eq!(err, ShadingError::TextureSize { width: 2, height: 2, actual: 3 });
    }

    #[test]
    fn to_rgba8_keeps_row_order() {
        let tex = Texture2D::checkerboard(2, 2, Color::WHITE, Color::BLACK);
        assert_eq!(
            tex.to_rgba8(),
            vec![255, 255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 255]
        );
        assert_eq!(Texture2D::from_rgba8(2, 2, &tex.to_rgba8()).unwrap(), tex);
    }

    #[test]
    fn new_rejects_zero_dimension() {
        assert!(Texture2D::new(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn from_rgba8_decodes_rows_top_first() {
        let data = [255, 0, 0, 255, 0, 0, 255, 255];
        let tex = Texture2D::from_rgba8(1, 2, &data).unwrap();
        let close = |a: Color, b: Color| (a.to_vec4() - b.to_vec4()).abs().max_element() < 1e-5;
        assert!(close(tex.load(0, 0), Color::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(tex.load(0, 1), Color::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = Texture2D::checkerboard(4, 2, Color::WHITE, Color::BLACK);
        assert_eq!(tex.load(0, 0), Color::WHITE);
        assert_eq!(tex.load(2, 0), Color::BLACK);
        assert_eq!(tex.load(2, 2), Color::WHITE);
        assert_eq!(tex.load(1, 3), Color::BLACK);
    }
}
