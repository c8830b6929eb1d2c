//! Lighting terms shared by the Lambert family.

use core::f32::consts::PI;

use glam::Vec3;

/// Light-to-surface distances below this are treated as this distance.
pub const MIN_LIGHT_DISTANCE: f32 = 1e-3;

/// `clamp(dot(normalize(l), normalize(n)), 0, 1)`.
///
/// Degenerate vectors (zero length or non-finite) yield 0.
#[inline]
pub fn lambert_term(light_dir: Vec3, normal: Vec3) -> f32 {
    let d = light_dir.normalize_or_zero().dot(normal.normalize_or_zero());
    if d.is_nan() { 0.0 } else { d.clamp(0.0, 1.0) }
}

/// Lambertian BRDF normalization: `albedo / π`.
#[inline]
pub fn lambert_brdf(albedo: Vec3) -> Vec3 {
    albedo / PI
}

/// Distance law of a point light.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Falloff {
    /// `1 / d²`.
    #[default]
    InverseSquare,
    /// `1 / d`.
    InverseLinear,
}

impl Falloff {
    #[inline]
    pub fn denominator(self, distance: f32) -> f32 {
        let d = distance.max(MIN_LIGHT_DISTANCE);
        match self {
            Falloff::InverseSquare => d * d,
            Falloff::InverseLinear => d,
        }
    }
}

/// Point light evaluated at a world-space position.
///
/// `attenuation(d) = 1 / (falloff(d) / divisor)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Vec3,
    pub falloff: Falloff,
    pub divisor: f32,
}

impl PointLight {
    /// Light at `(2, 2, -1)` with intensity 20 and inverse-square falloff.
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(2.0, 2.0, -1.0);
    pub const DEFAULT_INTENSITY: Vec3 = Vec3::splat(20.0);

    pub const fn new(position: Vec3, intensity: Vec3) -> Self {
        Self {
            position,
            intensity,
            falloff: Falloff::InverseSquare,
            divisor: 1.0,
        }
    }

    pub const fn with_falloff(mut self, falloff: Falloff, divisor: f32) -> Self {
        self.falloff = falloff;
        self.divisor = divisor;
        self
    }

    /// Unnormalized direction from `world` toward the light.
    #[inline]
    pub fn direction_from(&self, world: Vec3) -> Vec3 {
        self.position - world
    }

    #[inline]
    pub fn attenuation(&self, distance: f32) -> f32 {
        self.divisor / self.falloff.denominator(distance)
    }

    /// Incoming light color at `world`: `intensity * attenuation(|light - world|)`.
    #[inline]
    pub fn radiance_at(&self, world: Vec3) -> Vec3 {
        self.intensity * self.attenuation(self.direction_from(world).length())
    }

    /// `ldotn * radiance / π` for a surface at `world` with normal `normal`.
    #[inline]
    pub fn diffuse_at(&self, world: Vec3, normal: Vec3) -> Vec3 {
        let ldotn = lambert_term(self.direction_from(world), normal);
        lambert_brdf(self.radiance_at(world) * ldotn)
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION, Self::DEFAULT_INTENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic spread of unit vectors over the sphere (Fibonacci lattice).
    fn sphere_dirs(n: usize) -> Vec<Vec3> {
        let golden = PI * (3.0 - 5f32.sqrt());
        (0..n)
            .map(|i| {
                let y = 1.0 - 2.0 * (i as f32 + 0.5) / n as f32;
                let r = (1.0 - y * y).sqrt();
                let theta = golden * i as f32;
                Vec3::new(r * theta.cos(), y, r * theta.sin())
            })
            .collect()
    }

    #[test]
    fn lambert_term_stays_in_unit_interval() {
        let dirs = sphere_dirs(64);
        for &l in &dirs {
            for &n in &dirs {
                let t = lambert_term(l, n);
                assert!((0.0..=1.0).contains(&t), "ldotn {t} for {l:?} / {n:?}");
            }
        }
    }

    #[test]
    fn lambert_term_antiparallel_is_zero() {
        for &d in &sphere_dirs(16) {
            assert_eq!(lambert_term(d, -d), 0.0);
        }
    }

    #[test]
    fn lambert_term_parallel_is_one() {
        assert!((lambert_term(Vec3::Y * 4.0, Vec3::Y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lambert_term_degenerate_is_zero() {
        assert_eq!(lambert_term(Vec3::ZERO, Vec3::Y), 0.0);
        assert_eq!(lambert_term(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::Y), 0.0);
    }

    #[test]
    fn attenuation_decreases_with_distance() {
        for falloff in [Falloff::InverseSquare, Falloff::InverseLinear] {
            for divisor in [1.0, 2.0] {
                let light = PointLight::default().with_falloff(falloff, divisor);
                let mut prev = f32::INFINITY;
                for step in 1..200 {
                    let a = light.attenuation(step as f32 * 0.1);
                    assert!(a < prev, "{falloff:?} not decreasing at step {step}");
                    prev = a;
                }
            }
        }
    }

    #[test]
    fn inverse_square_matches_formula() {
        let light = PointLight::default();
        assert!((light.attenuation(2.0) - 0.25).abs() < 1e-6);
        let linear = light.with_falloff(Falloff::InverseLinear, 1.0);
        assert!((linear.attenuation(2.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn radiance_scales_intensity() {
        let light = PointLight::new(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(20.0));
        let r = light.radiance_at(Vec3::ZERO);
        assert!((r - Vec3::splat(5.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn diffuse_applies_brdf_normalization() {
        let light = PointLight::new(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(PI));
        let d = light.diffuse_at(Vec3::ZERO, Vec3::Y);
        assert!((d - Vec3::ONE).abs().max_element() < 1e-5);
    }
}
