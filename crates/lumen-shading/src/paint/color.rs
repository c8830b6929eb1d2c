use core::ops::{Add, Mul};

use glam::{Vec3, Vec4};

/// Linear RGBA color with straight alpha.
///
/// This is what pixel stages return. Channels are not clamped on construction;
/// shading math may legitimately exceed 1.0 before a program clamps its output.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey with all color channels set to `v`.
    #[inline]
    pub const fn grey(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    #[inline]
    pub fn rgb(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Creates a color from straight sRGB-encoded bytes, decoding to linear.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Encodes to sRGB bytes. Channels are clamped to [0, 1] first.
    #[inline]
    pub fn to_srgb_u8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            quantize(linear_to_srgb(c.r)),
            quantize(linear_to_srgb(c.g)),
            quantize(linear_to_srgb(c.b)),
            quantize(c.a),
        ]
    }

    /// Clamps every channel, alpha included, to [0, 1].
    ///
    /// NaN channels become 0.
    #[inline]
    pub fn clamped(self) -> Self {
        fn sat(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self::new(sat(self.r), sat(self.g), sat(self.b), sat(self.a))
    }
}

/// Component-wise modulation.
impl Mul for Color {
    type Output = Color;
    #[inline]
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    #[inline]
    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Add for Color {
    type Output = Color;
    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v * 255.0 + 0.5) as u8
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
