use std::f32::consts::PI;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use lumen_shading::bindings::{Material, Model, ModelProjection, ModelViewProjection, ViewProjection};
use lumen_shading::mesh::Mesh;
use lumen_shading::paint::Color;
use lumen_shading::program::{
    BindlessConstants, BindlessInstanced, FlatProgram, LambertPerPixel, LambertPerVertex, LambertVariant,
    ShaderResources, ShadingMode, TexturedLambert,
};
use lumen_shading::raster::{DrawCall, DrawStats, RasterState, Rasterizer, RenderTarget};
use lumen_shading::texture::{DescriptorTable, Sampler, Texture2D};

/// Yaw applied to every object on top of its translation.
const OBJECT_YAW: f32 = PI * -0.9;

/// One bindless draw: where the mesh goes and which table slot it samples.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    pub texture_index: u32,
}

impl SceneObject {
    /// `translate(position) · rotate_y(-0.9π)`.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(OBJECT_YAW)
    }
}

/// Camera, objects and textures shared by every mode.
///
/// The single-draw modes render one object at the origin with `texture`;
/// the bindless mode draws each of `objects` with its own table slot.
pub struct Scene {
    pub mesh: Mesh,
    pub view: Mat4,
    pub projection: Mat4,
    pub texture: Texture2D,
    pub table: DescriptorTable,
    pub objects: Vec<SceneObject>,
    pub sampler: Sampler,
    pub instances: u32,
    pub clear_color: Color,
}

impl Scene {
    /// Camera 1.5 units behind the origin looking back at it, 90° vertical FOV.
    pub fn new(mesh: Mesh, aspect_ratio: f32, instances: u32) -> Self {
        let texture = Texture2D::checkerboard(
            256,
            8,
            Color::from_srgb_u8(230, 230, 220, 255),
            Color::from_srgb_u8(40, 90, 160, 255),
        );
        let warm = Texture2D::checkerboard(
            256,
            4,
            Color::from_srgb_u8(240, 200, 120, 255),
            Color::from_srgb_u8(150, 50, 30, 255),
        );

        let mut table = DescriptorTable::new();
        let cool_index = table.insert(texture.clone());
        let warm_index = table.insert(warm);

        Self {
            mesh,
            view: Mat4::from_translation(Vec3::new(0.0, -0.8, 1.5)) * Mat4::from_rotation_y(PI),
            projection: Mat4::perspective_lh(PI / 2.0, aspect_ratio, 0.1, 100.0),
            texture,
            table,
            objects: vec![
                SceneObject {
                    position: Vec3::ZERO,
                    texture_index: cool_index,
                },
                SceneObject {
                    position: Vec3::new(-1.0, 0.0, -1.0),
                    texture_index: warm_index,
                },
            ],
            sampler: Sampler::default(),
            instances,
            clear_color: Color::BLACK,
        }
    }

    /// Model matrix of the single-draw modes.
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(OBJECT_YAW)
    }

    /// Constants of one bindless draw of `object`.
    pub fn bindless_constants(&self, object: &SceneObject) -> BindlessConstants {
        BindlessConstants {
            camera: ViewProjection {
                v: self.view,
                p: self.projection,
            },
            material: Material::new(object.texture_index),
            model: Model { m: object.model() },
        }
    }

    /// Renders `mode` into a fresh `width` x `height` target.
    pub fn render(
        &self,
        mode: ShadingMode,
        state: RasterState,
        width: u32,
        height: u32,
    ) -> Result<(RenderTarget, DrawStats)> {
        let mut target = RenderTarget::new(width, height).context("creating render target")?;
        target.clear(self.clear_color);
        let raster = Rasterizer::new(state);

        let model_view = ModelProjection {
            m: self.view * self.model(),
            p: self.projection,
        };

        let stats = match mode {
            ShadingMode::Flat => raster.draw(&mut target, DrawCall::new(&FlatProgram, &model_view, &self.mesh)),
            ShadingMode::Lambert(LambertVariant::PerVertex) => raster.draw(
                &mut target,
                DrawCall::new(&LambertPerVertex::default(), &model_view, &self.mesh),
            ),
            ShadingMode::Lambert(LambertVariant::PerPixel) => raster.draw(
                &mut target,
                DrawCall::new(&LambertPerPixel::default(), &model_view, &self.mesh),
            ),
            ShadingMode::TexturedLambert => {
                let camera = ModelViewProjection {
                    m: self.model(),
                    v: self.view,
                    p: self.projection,
                };
                let resources = ShaderResources::new()
                    .with_texture(&self.texture)
                    .with_sampler(self.sampler);
                raster.draw(
                    &mut target,
                    DrawCall::new(&TexturedLambert::default(), &camera, &self.mesh).with_resources(resources),
                )
            }
            ShadingMode::BindlessInstanced => self.draw_objects(&raster, &mut target),
        }
        .with_context(|| format!("drawing `{mode}`"))?;

        Ok((target, stats))
    }

    /// One draw per object; material and model constants change between draws.
    fn draw_objects(
        &self,
        raster: &Rasterizer,
        target: &mut RenderTarget,
    ) -> Result<DrawStats, lumen_shading::ShadingError> {
        let program = BindlessInstanced::default();
        let mut total = DrawStats::default();
        for object in &self.objects {
            let constants = self.bindless_constants(object);
            let resources = ShaderResources::new()
                .with_descriptor_table(&self.table)
                .with_sampler(self.sampler);
            total += raster.draw(
                target,
                DrawCall::new(&program, &constants, &self.mesh)
                    .with_resources(resources)
                    .instanced(self.instances),
            )?;
        }
        Ok(total)
    }
}
