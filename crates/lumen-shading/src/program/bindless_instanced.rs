use glam::{Vec2, Vec3};

use crate::bindings::{Material, Model, ProgramSignature, Register, Semantic, ViewProjection};
use crate::error::ShadingError;
use crate::math::{instance_offset, transform_normal, transform_point};
use crate::mesh::Vertex;
use crate::paint::Color;

use super::lighting::{Falloff, PointLight, lambert_brdf, lambert_term};
use super::{ShaderResources, ShadingProgram, VertexInput, VertexOutput};

pub static BINDLESS_INSTANCED_SIGNATURE: ProgramSignature = ProgramSignature {
    label: "bindless instanced",
    registers: &[
        Register::ConstantBuffer(0),
        Register::ConstantBuffer(1),
        Register::ConstantBuffer(2),
        Register::DescriptorTable,
        Register::Sampler(0),
    ],
    inputs: &Vertex::INPUT_LAYOUT,
    uses_instance_id: true,
    vertex_outputs: &[Semantic::WorldPosition, Semantic::Normal, Semantic::TexCoord],
    pixel_inputs: &[Semantic::WorldPosition, Semantic::Normal, Semantic::TexCoord],
};

/// Everything bound at `b0..b2` for one bindless draw.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct BindlessConstants {
    pub camera: ViewProjection,
    pub material: Material,
    pub model: Model,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BindlessVaryings {
    pub world_position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}
impl_interpolate!(BindlessVaryings { world_position, normal, uv });

/// Instanced draw that picks its texture from the descriptor table by
/// `Material::texture_index`.
///
/// Each instance is displaced by `-(2i, 0, i)` in object space. The light
/// falls off as `2 / d`. Output is `ambient * texel + diffuse`, clamped to
/// [0, 1] on every channel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BindlessInstanced {
    pub light: PointLight,
    pub ambient: Vec3,
}

impl BindlessInstanced {
    pub const DEFAULT_AMBIENT: Vec3 = Vec3::splat(0.05);
    pub const DEFAULT_FALLOFF: Falloff = Falloff::InverseLinear;
    pub const DEFAULT_DIVISOR: f32 = 2.0;
}

impl Default for BindlessInstanced {
    fn default() -> Self {
        Self {
            light: PointLight::default().with_falloff(Self::DEFAULT_FALLOFF, Self::DEFAULT_DIVISOR),
            ambient: Self::DEFAULT_AMBIENT,
        }
    }
}

impl ShadingProgram for BindlessInstanced {
    type Constants = BindlessConstants;
    type Varyings = BindlessVaryings;

    fn signature(&self) -> &'static ProgramSignature {
        &BINDLESS_INSTANCED_SIGNATURE
    }

    fn vertex(&self, constants: &BindlessConstants, input: &VertexInput) -> VertexOutput<BindlessVaryings> {
        let m = constants.model.m;
        let position = input.position - instance_offset(input.instance_id);
        let world = transform_point(m, position);
        let camera = &constants.camera;
        VertexOutput {
            clip: camera.p * (camera.v * world.extend(1.0)),
            varyings: BindlessVaryings {
                world_position: world,
                normal: transform_normal(m, input.normal),
                uv: input.uv,
            },
        }
    }

    fn pixel(
        &self,
        constants: &BindlessConstants,
        resources: &ShaderResources<'_>,
        input: &BindlessVaryings,
    ) -> Result<Color, ShadingError> {
        let texture = resources.bindless(constants.material.texture_index)?;
        let texel = resources.sampler.sample(texture, input.uv);

        let world = input.world_position;
        let ldotn = lambert_term(self.light.direction_from(world), input.normal);
        let diffuse = lambert_brdf(texel.rgb() * ldotn * self.light.radiance_at(world));
        let rgb = self.ambient * texel.rgb() + diffuse;

        Ok(Color::new(rgb.x, rgb.y, rgb.z, texel.a).clamped())
    }
}
