use core::fmt;

use glam::{Vec3, Vec4};

use crate::bindings::{ModelProjection, ProgramSignature, Register, Semantic};
use crate::error::ShadingError;
use crate::math::{transform_normal, transform_point};
use crate::mesh::Vertex;
use crate::paint::Color;

use super::lighting::lambert_term;
use super::{ShaderResources, ShadingProgram, VertexInput, VertexOutput};

/// Where the diffuse term is evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LambertVariant {
    /// Lit in the vertex stage; color interpolated. Light at `(2, 2, 0)`.
    PerVertex,
    /// Lit in the pixel stage from interpolated position and normal. Light at `(2, 2, -1)`.
    PerPixel,
}

impl LambertVariant {
    pub const fn light_position(self) -> Vec3 {
        match self {
            LambertVariant::PerVertex => Vec3::new(2.0, 2.0, 0.0),
            LambertVariant::PerPixel => Vec3::new(2.0, 2.0, -1.0),
        }
    }
}

impl fmt::Display for LambertVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LambertVariant::PerVertex => f.write_str("per-vertex"),
            LambertVariant::PerPixel => f.write_str("per-pixel"),
        }
    }
}

pub static LAMBERT_VERTEX_SIGNATURE: ProgramSignature = ProgramSignature {
    label: "lambert (per-vertex)",
    registers: &[Register::ConstantBuffer(0)],
    inputs: &Vertex::INPUT_LAYOUT,
    uses_instance_id: false,
    vertex_outputs: &[Semantic::Color],
    pixel_inputs: &[Semantic::Color],
};

pub static LAMBERT_PIXEL_SIGNATURE: ProgramSignature = ProgramSignature {
    label: "lambert (per-pixel)",
    registers: &[Register::ConstantBuffer(0)],
    inputs: &Vertex::INPUT_LAYOUT,
    uses_instance_id: false,
    vertex_outputs: &[Semantic::WorldPosition, Semantic::Normal],
    pixel_inputs: &[Semantic::WorldPosition, Semantic::Normal],
};

/// `tint * ldotn` with alpha 1.
#[inline]
fn shade(tint: Vec3, light_position: Vec3, world: Vec3, normal: Vec3) -> Vec4 {
    let ldotn = lambert_term(light_position - world, normal);
    (tint * ldotn).extend(1.0)
}

/// Interpolated vertex color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LambertColor {
    pub color: Vec4,
}
impl_interpolate!(LambertColor { color });

/// World-space surface attributes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceVaryings {
    pub world_position: Vec3,
    pub normal: Vec3,
}
impl_interpolate!(SurfaceVaryings { world_position, normal });

/// Diffuse lighting evaluated once per vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LambertPerVertex {
    pub light_position: Vec3,
    pub tint: Vec3,
}

impl Default for LambertPerVertex {
    fn default() -> Self {
        Self {
            light_position: LambertVariant::PerVertex.light_position(),
            tint: Vec3::ONE,
        }
    }
}

impl ShadingProgram for LambertPerVertex {
    type Constants = ModelProjection;
    type Varyings = LambertColor;

    fn signature(&self) -> &'static ProgramSignature {
        &LAMBERT_VERTEX_SIGNATURE
    }

    fn vertex(&self, camera: &ModelProjection, input: &VertexInput) -> VertexOutput<LambertColor> {
        let world = transform_point(camera.m, input.position);
        let normal = transform_normal(camera.m, input.normal);
        VertexOutput {
            clip: camera.p * world.extend(1.0),
            varyings: LambertColor {
                color: shade(self.tint, self.light_position, world, normal),
            },
        }
    }

    #[inline]
    fn pixel(
        &self,
        _: &ModelProjection,
        _: &ShaderResources<'_>,
        input: &LambertColor,
    ) -> Result<Color, ShadingError> {
        Ok(Color::from_vec4(input.color))
    }
}

/// Diffuse lighting evaluated per pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LambertPerPixel {
    pub light_position: Vec3,
    pub tint: Vec3,
}

impl Default for LambertPerPixel {
    fn default() -> Self {
        Self {
            light_position: LambertVariant::PerPixel.light_position(),
            tint: Vec3::ONE,
        }
    }
}

impl ShadingProgram for LambertPerPixel {
    type Constants = ModelProjection;
    type Varyings = SurfaceVaryings;

    fn signature(&self) -> &'static ProgramSignature {
        &LAMBERT_PIXEL_SIGNATURE
    }

    fn vertex(&self, camera: &ModelProjection, input: &VertexInput) -> VertexOutput<SurfaceVaryings> {
        let world = transform_point(camera.m, input.position);
        VertexOutput {
            clip: camera.p * world.extend(1.0),
            varyings: SurfaceVaryings {
                world_position: world,
                normal: transform_normal(camera.m, input.normal),
            },
        }
    }

    fn pixel(
        &self,
        _: &ModelProjection,
        _: &ShaderResources<'_>,
        input: &SurfaceVaryings,
    ) -> Result<Color, ShadingError> {
        Ok(Color::from_vec4(shade(
            self.tint,
            self.light_position,
            input.world_position,
            input.normal,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Interpolate;
    use glam::{Mat4, Vec2};

    fn input(position: Vec3, normal: Vec3) -> VertexInput {
        VertexInput { position, normal, uv: Vec2::ZERO, instance_id: 0 }
    }

    #[test]
    fn surface_facing_light_is_fully_lit() {
        let prog = LambertPerVertex::default();
        // Normal pointing straight at (2, 2, 0) from (2, 0, 0).
        let out = prog.vertex(&ModelProjection::default(), &input(Vec3::new(2.0, 0.0, 0.0), Vec3::Y));
        assert!((out.varyings.color - Vec4::ONE).abs().max_element() < 1e-6);
    }

    #[test]
    fn surface_facing_away_is_black() {
        let prog = LambertPerVertex::default();
        let out = prog.vertex(&ModelProjection::default(), &input(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Y));
        assert_eq!(out.varyings.color, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn tint_scales_output() {
        let prog = LambertPerPixel { tint: Vec3::new(1.0, 0.5, 0.0), ..Default::default() };
        let v = SurfaceVaryings { world_position: Vec3::new(2.0, 0.0, -1.0), normal: Vec3::Y * 3.0 };
        let c = prog.pixel(&ModelProjection::default(), &ShaderResources::new(), &v).unwrap();
        assert!((c.rgb() - Vec3::new(1.0, 0.5, 0.0)).abs().max_element() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn lighting_ignores_model_translation_of_normal() {
        let prog = LambertPerPixel::default();
        let cam = ModelProjection { m: Mat4::from_translation(Vec3::new(0.0, 0.0, 50.0)), ..Default::default() };
        let out = prog.vertex(&cam, &input(Vec3::ZERO, Vec3::Y));
        assert_eq!(out.varyings.normal, Vec3::Y);
        assert_eq!(out.varyings.world_position, Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn per_pixel_renormalizes_interpolated_normal() {
        // Two opposite-ish normals average to a short vector; lighting must not dim.
        let prog = LambertPerPixel::default();
        let p = Vec3::new(2.0, 0.0, -1.0);
        let a = SurfaceVaryings { world_position: p, normal: Vec3::new(0.6, 0.8, 0.0) };
        let b = SurfaceVaryings { world_position: p, normal: Vec3::new(-0.6, 0.8, 0.0) };
        let mid = SurfaceVaryings::lerp(&a, &b, 0.5);
        let c = prog.pixel(&ModelProjection::default(), &ShaderResources::new(), &mid).unwrap();
        assert!((c.r - 1.0).abs() < 1e-5);
    }

    #[test]
    fn variants_use_distinct_lights() {
        assert_eq!(LambertVariant::PerVertex.light_position(), Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(LambertVariant::PerPixel.light_position(), Vec3::new(2.0, 2.0, -1.0));
        assert!(LAMBERT_VERTEX_SIGNATURE.validate().is_ok());
        assert!(LAMBERT_PIXEL_SIGNATURE.validate().is_ok());
    }
}
