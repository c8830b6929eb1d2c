use glam::Vec2;

use crate::paint::Color;

use super::Texture2D;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    Point,
    #[default]
    Linear,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AddressMode {
    #[default]
    Wrap,
    Clamp,
}

/// Sampler state bound at `s0`.
///
/// Defaults to bilinear filtering with wrap addressing on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Sampler {
    pub filter: Filter,
    pub address: AddressMode,
}

impl Sampler {
    pub const fn new(filter: Filter, address: AddressMode) -> Self {
        Self { filter, address }
    }

    /// Samples `texture` at normalized `uv` (origin top-left).
    pub fn sample(&self, texture: &Texture2D, uv: Vec2) -> Color {
        let (w, h) = (texture.width() as i64, texture.height() as i64);
        // Texel centres sit at (i + 0.5) / size.
        let x = uv.x * w as f32 - 0.5;
        let y = uv.y * h as f32 - 0.5;

        match self.filter {
            Filter::Point => {
                let tx = self.address_texel((x + 0.5).floor(), w);
                let ty = self.address_texel((y + 0.5).floor(), h);
                texture.load(tx, ty)
            }
            Filter::Linear => {
                let (x0, y0) = (x.floor(), y.floor());
                let (fx, fy) = (x - x0, y - y0);
                let tx0 = self.address_texel(x0, w);
                let tx1 = self.address_texel(x0 + 1.0, w);
                let ty0 = self.address_texel(y0, h);
                let ty1 = self.address_texel(y0 + 1.0, h);

                let top = texture.load(tx0, ty0) * (1.0 - fx) + texture.load(tx1, ty0) * fx;
                let bottom = texture.load(tx0, ty1) * (1.0 - fx) + texture.load(tx1, ty1) * fx;
                top * (1.0 - fy) + bottom * fy
            }
        }
    }

    fn address_texel(&self, coord: f32, size: i64) -> u32 {
        // Non-finite uv collapses to texel 0.
        let i = if coord.is_finite() { coord as i64 } else { 0 };
        let i = match self.address {
            AddressMode::Wrap => i.rem_euclid(size),
            AddressMode::Clamp => i.clamp(0, size - 1),
        };
        i as u32
    }
}
