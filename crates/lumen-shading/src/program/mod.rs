//! Shading programs.
//!
//! A program is a (vertex stage, pixel stage) pair with a fixed
//! [`ProgramSignature`]. Stages are pure functions of their inputs plus the
//! constants and resources bound for the current draw.
//!
//! Programs:
//! - [`FlatProgram`]: constant grey.
//! - [`LambertPerVertex`] / [`LambertPerPixel`]: single-light diffuse.
//! - [`TexturedLambert`]: point light with inverse-square falloff times a
//!   statically bound texture.
//! - [`BindlessInstanced`]: procedural instancing, bindless texture lookup,
//!   ambient + point light, clamped output.

/// Implements [`Interpolate`] for a varyings struct field by field.
macro_rules! impl_interpolate {
    ($name:ident { $($field:ident),* $(,)? }) => {
        impl $crate::program::Interpolate for $name {
            #[inline]
            fn blend(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self {
                Self {
                    $($field: $crate::program::Interpolate::blend(&a.$field, &b.$field, &c.$field, w),)*
                }
            }
        }
    };
}

mod bindless_instanced;
mod flat;
mod lambert;
pub mod lighting;
mod mode;
mod resources;
mod textured_lambert;

use glam::{Vec2, Vec3, Vec4};

use crate::bindings::ProgramSignature;
use crate::error::ShadingError;
use crate::mesh::Vertex;
use crate::paint::Color;

pub use bindless_instanced::{BindlessConstants, BindlessInstanced, BindlessVaryings};
pub use flat::{FLAT_COLOR, FlatProgram};
pub use lambert::{LambertColor, LambertPerPixel, LambertPerVertex, LambertVariant, SurfaceVaryings};
pub use mode::ShadingMode;
pub use resources::ShaderResources;
pub use textured_lambert::{TexturedLambert, TexturedVaryings};

/// Per-invocation vertex-stage input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexInput {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    /// `SV_InstanceID`.
    pub instance_id: u32,
}

impl VertexInput {
    #[inline]
    pub fn from_vertex(vertex: &Vertex, instance_id: u32) -> Self {
        Self {
            position: vertex.position(),
            normal: vertex.normal(),
            uv: vertex.uv(),
            instance_id,
        }
    }
}

/// Vertex-stage output: clip-space position plus interpolated attributes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput<V> {
    pub clip: Vec4,
    pub varyings: V,
}

/// Attributes the rasterizer can interpolate across a triangle.
pub trait Interpolate: Copy {
    /// Weighted sum `a * w[0] + b * w[1] + c * w[2]`.
    fn blend(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self;

    #[inline]
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self::blend(a, b, b, [1.0 - t, t, 0.0])
    }
}

impl Interpolate for () {
    #[inline]
    fn blend(_: &(), _: &(), _: &(), _: [f32; 3]) {}
}

macro_rules! impl_interpolate_vector {
    ($($t:ty),*) => {$(
        impl Interpolate for $t {
            #[inline]
            fn blend(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self {
                *a * w[0] + *b * w[1] + *c * w[2]
            }
        }
    )*};
}

impl_interpolate_vector!(f32, Vec2, Vec3, Vec4);

/// A vertex/pixel stage pair.
pub trait ShadingProgram {
    /// Constant buffers read by both stages.
    type Constants;
    /// Vertex-stage outputs consumed by the pixel stage.
    type Varyings: Interpolate;

    fn signature(&self) -> &'static ProgramSignature;

    fn vertex(&self, constants: &Self::Constants, input: &VertexInput) -> VertexOutput<Self::Varyings>;

    fn pixel(
        &self,
        constants: &Self::Constants,
        resources: &ShaderResources<'_>,
        input: &Self::Varyings,
    ) -> Result<Color, ShadingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq)]
    struct Pair {
        x: f32,
        v: Vec2,
    }
    impl_interpolate!(Pair { x, v });

    #[test]
    fn derived_blend_is_fieldwise() {
        let a = Pair { x: 1.0, v: Vec2::new(2.0, 0.0) };
        let b = Pair { x: 3.0, v: Vec2::new(0.0, 2.0) };
        let c = Pair { x: 5.0, v: Vec2::ZERO };
        let m = Pair::blend(&a, &b, &c, [0.5, 0.5, 0.0]);
        assert_eq!(m, Pair { x: 2.0, v: Vec2::new(1.0, 1.0) });
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(<f32 as Interpolate>::lerp(&2.0, &6.0, 0.0), 2.0);
        assert_eq!(<f32 as Interpolate>::lerp(&2.0, &6.0, 1.0), 6.0);
        assert_eq!(<f32 as Interpolate>::lerp(&2.0, &6.0, 0.25), 3.0);
    }
}
