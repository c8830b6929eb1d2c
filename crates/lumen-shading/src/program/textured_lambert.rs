use glam::{Vec2, Vec4};

use crate::bindings::{ModelViewProjection, ProgramSignature, Register, Semantic};
use crate::error::ShadingError;
use crate::math::{transform_normal, transform_point};
use crate::mesh::Vertex;
use crate::paint::Color;

use super::lighting::PointLight;
use super::{ShaderResources, ShadingProgram, VertexInput, VertexOutput};

pub static TEXTURED_LAMBERT_SIGNATURE: ProgramSignature = ProgramSignature {
    label: "textured lambert",
    registers: &[Register::ConstantBuffer(0), Register::Texture(0), Register::Sampler(0)],
    inputs: &Vertex::INPUT_LAYOUT,
    uses_instance_id: false,
    vertex_outputs: &[Semantic::Color, Semantic::TexCoord],
    pixel_inputs: &[Semantic::Color, Semantic::TexCoord],
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedVaryings {
    pub color: Vec4,
    pub uv: Vec2,
}
impl_interpolate!(TexturedVaryings { color, uv });

/// Point-lit Lambert shading modulated by the texture at `t0`.
///
/// Lighting runs per vertex; the pixel stage only samples and multiplies.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TexturedLambert {
    pub light: PointLight,
}

impl ShadingProgram for TexturedLambert {
    type Constants = ModelViewProjection;
    type Varyings = TexturedVaryings;

    fn signature(&self) -> &'static ProgramSignature {
        &TEXTURED_LAMBERT_SIGNATURE
    }

    fn vertex(&self, camera: &ModelViewProjection, input: &VertexInput) -> VertexOutput<TexturedVaryings> {
        let world = transform_point(camera.m, input.position);
        let normal = transform_normal(camera.m, input.normal);
        VertexOutput {
            clip: camera.p * (camera.v * world.extend(1.0)),
            varyings: TexturedVaryings {
                color: self.light.diffuse_at(world, normal).extend(1.0),
                uv: input.uv,
            },
        }
    }

    fn pixel(
        &self,
        _: &ModelViewProjection,
        resources: &ShaderResources<'_>,
        input: &TexturedVaryings,
    ) -> Result<Color, ShadingError> {
        let texture = resources.static_texture()?;
        let texel = resources.sampler.sample(texture, input.uv);
        Ok(Color::from_vec4(input.color) * texel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture2D;
    use core::f32::consts::PI;
    use glam::Vec3;

    fn lit_vertex(prog: &TexturedLambert, position: Vec3) -> TexturedVaryings {
        let input = VertexInput { position, normal: Vec3::Y, uv: Vec2::new(0.5, 0.5), instance_id: 0 };
        prog.vertex(&ModelViewProjection::default(), &input).varyings
    }

    #[test]
    fn falloff_is_inverse_square_over_pi() {
        let prog = TexturedLambert::default();
        // Directly below the light at distance 2.
        let v = lit_vertex(&prog, Vec3::new(2.0, 0.0, -1.0));
        let expected = 20.0 / 4.0 / PI;
        assert!((v.color.x - expected).abs() < 1e-5);
        assert_eq!(v.color.w, 1.0);
    }

    #[test]
    fn farther_vertices_are_darker() {
        let prog = TexturedLambert::default();
        let near = lit_vertex(&prog, Vec3::new(2.0, 1.0, -1.0));
        let far = lit_vertex(&prog, Vec3::new(2.0, -3.0, -1.0));
        assert!(far.color.x < near.color.x);
    }

    #[test]
    fn pixel_modulates_by_texel() {
        let tex = Texture2D::solid(Color::new(0.5, 0.25, 1.0, 1.0));
        let res = ShaderResources::new().with_texture(&tex);
        let v = TexturedVaryings { color: Vec4::new(2.0, 2.0, 2.0, 1.0), uv: Vec2::ZERO };
        let c = TexturedLambert::default()
            .pixel(&ModelViewProjection::default(), &res, &v)
            .unwrap();
        assert_eq!(c, Color::new(1.0, 0.5, 2.0, 1.0));
    }

    #[test]
    fn pixel_without_texture_is_unbound() {
        let v = TexturedVaryings { color: Vec4::ONE, uv: Vec2::ZERO };
        let err = TexturedLambert::default()
            .pixel(&ModelViewProjection::default(), &ShaderResources::new(), &v)
            .unwrap_err();
        assert_eq!(err, ShadingError::Unbound(Register::Texture(0)));
    }

    #[test]
    fn view_matrix_does_not_affect_lighting() {
        let prog = TexturedLambert::default();
        let input = VertexInput { position: Vec3::ZERO, normal: Vec3::Y, uv: Vec2::ZERO, instance_id: 0 };
        let a = prog.vertex(&ModelViewProjection::default(), &input);
        let moved = ModelViewProjection { v: glam::Mat4::from_translation(Vec3::splat(3.0)), ..Default::default() };
        let b = prog.vertex(&moved, &input);
        assert_eq!(a.varyings, b.varyings);
        assert_ne!(a.clip, b.clip);
    }
}
