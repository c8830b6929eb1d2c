use crate::bindings::{ModelProjection, ProgramSignature, Register};
use crate::error::ShadingError;
use crate::mesh::Vertex;
use crate::paint::Color;

use super::{ShaderResources, ShadingProgram, VertexInput, VertexOutput};

/// Output of every flat-shaded pixel.
pub const FLAT_COLOR: Color = Color::grey(0.2);

pub static FLAT_SIGNATURE: ProgramSignature = ProgramSignature {
    label: "flat",
    registers: &[Register::ConstantBuffer(0)],
    inputs: &Vertex::INPUT_LAYOUT,
    uses_instance_id: false,
    vertex_outputs: &[],
    pixel_inputs: &[],
};

/// Transform-only program with a constant grey output.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FlatProgram;

impl ShadingProgram for FlatProgram {
    type Constants = ModelProjection;
    type Varyings = ();

    fn signature(&self) -> &'static ProgramSignature {
        &FLAT_SIGNATURE
    }

    #[inline]
    fn vertex(&self, camera: &ModelProjection, input: &VertexInput) -> VertexOutput<()> {
        VertexOutput {
            clip: camera.p * (camera.m * input.position.extend(1.0)),
            varyings: (),
        }
    }

    #[inline]
    fn pixel(&self, _: &ModelProjection, _: &ShaderResources<'_>, _: &()) -> Result<Color, ShadingError> {
        Ok(FLAT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec2, Vec3, Vec4};

    #[test]
    fn pixel_is_constant_grey() {
        let cams = [
            ModelProjection::default(),
            ModelProjection {
                m: Mat4::from_translation(Vec3::splat(9.0)),
                p: Mat4::perspective_lh(1.2, 1.5, 0.1, 100.0),
            },
        ];
        for cam in &cams {
            let c = FlatProgram.pixel(cam, &ShaderResources::new(), &()).unwrap();
            assert_eq!(c, Color::new(0.2, 0.2, 0.2, 1.0));
        }
    }

    #[test]
    fn vertex_applies_projection_after_model() {
        let cam = ModelProjection {
            m: Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0)),
            p: Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0)),
        };
        let input = VertexInput {
            position: Vec3::new(1.0, 1.0, 0.0),
            normal: Vec3::Y,
            uv: Vec2::ZERO,
            instance_id: 0,
        };
        let out = FlatProgram.vertex(&cam, &input);
        assert_eq!(out.clip, Vec4::new(2.0, 2.0, 1.0, 1.0));
    }

    #[test]
    fn signature_links() {
        assert!(FLAT_SIGNATURE.validate().is_ok());
        assert_eq!(FLAT_SIGNATURE.input_stride(), 32);
    }
}
