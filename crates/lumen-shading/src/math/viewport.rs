use glam::{Vec3, Vec4};

/// Viewport in physical pixels.
///
/// Mirrors the D3D12 viewport the host sets with `RSSetViewports`: NDC x/y in
/// [-1, 1] map to [0, width] x [0, height] with +Y down, NDC z in [0, 1] maps to
/// [min_depth, max_depth].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        self.width / self.height.max(f32::MIN_POSITIVE)
    }

    /// Perspective-divides a clip-space position and maps it to window space.
    ///
    /// The caller guarantees `clip.w > 0` (near-plane clipping runs first).
    #[inline]
    pub fn clip_to_window(self, clip: Vec4) -> Vec3 {
        let inv_w = 1.0 / clip.w;
        let ndc = clip.truncate() * inv_w;
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
            self.min_depth + ndc.z * (self.max_depth - self.min_depth),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners_map_to_window_corners() {
        let vp = Viewport::new(200.0, 100.0);
        let top_left = vp.clip_to_window(Vec4::new(-1.0, 1.0, 0.0, 1.0));
        let bottom_right = vp.clip_to_window(Vec4::new(2.0, -2.0, 2.0, 2.0));
        assert_eq!(top_left, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bottom_right, Vec3::new(200.0, 100.0, 1.0));
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert_eq!(Viewport::new(640.0, 480.0).aspect_ratio(), 640.0 / 480.0);
        assert!(Viewport::new(10.0, 0.0).aspect_ratio().is_finite());
    }
}
