use glam::{Mat4, Vec3};

/// `M · [p, 1]`: object-space point to world space.
#[inline]
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    (m * p.extend(1.0)).truncate()
}

/// `M · [n, 0]`: bivector-style normal transform.
///
/// The zero w component discards translation. Correct for rotation and uniform
/// scale only; the result is not renormalized.
#[inline]
pub fn transform_normal(m: Mat4, n: Vec3) -> Vec3 {
    (m * n.extend(0.0)).truncate()
}

/// Procedural per-instance displacement: `(2k, 0, k)`.
///
/// The instanced program subtracts this from the object-space position before
/// applying any matrix, so instance 0 is left in place.
#[inline]
pub fn instance_offset(instance_id: u32) -> Vec3 {
    let k = instance_id as f32;
    Vec3::new(2.0 * k, 0.0, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn instance_zero_is_identity() {
        assert_eq!(instance_offset(0), Vec3::ZERO);
    }

    #[test]
    fn instance_k_offsets_two_k_zero_k() {
        for k in [1u32, 2, 7, 100] {
            let kf = k as f32;
            assert_eq!(instance_offset(k), Vec3::new(2.0 * kf, 0.0, kf));
        }
    }

    #[test]
    fn normal_transform_ignores_translation() {
        let rot = Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::splat(2.0));
        let n = Vec3::new(0.3, -0.5, 0.8);
        let base = transform_normal(rot, n);
        for t in [Vec3::new(5.0, 0.0, 0.0), Vec3::new(-3.0, 9.0, 1.5), Vec3::splat(1e3)] {
            let moved = Mat4::from_translation(t) * rot;
            assert!(approx(transform_normal(moved, n), base));
        }
    }

    #[test]
    fn normal_transform_follows_rotation() {
        let m = Mat4::from_rotation_z(core::f32::consts::FRAC_PI_2);
        assert!(approx(transform_normal(m, Vec3::X), Vec3::Y));
    }

    #[test]
    fn point_transform_applies_translation() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(approx(transform_point(m, Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0)));
    }
}
