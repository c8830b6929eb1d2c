use anyhow::{Context, Result};

use lumen_shading::bindings::{Material, Model, ModelProjection, ModelViewProjection, Register};
use lumen_shading::gpu::{
    MAX_BINDLESS_TEXTURES, MeshBuffers, ProgramPipeline, RenderCtx, create_bindless_views, create_sampler,
    create_texture,
};
use lumen_shading::paint::Color;
use lumen_shading::program::ShadingMode;

use crate::scene::Scene;

const CHECK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Builds the `wgpu` pipeline of every mode in `modes` on a headless device
/// and draws `scene` with it into an offscreen `width` x `height` target.
///
/// Modes whose features the adapter lacks are skipped with a warning.
/// Returns the modes that were drawn.
pub async fn check_pipelines(
    scene: &Scene,
    modes: &[ShadingMode],
    width: u32,
    height: u32,
) -> Result<Vec<ShadingMode>> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a suitable GPU adapter")?;

    let info = adapter.get_info();
    log::info!("adapter: {} ({:?})", info.name, info.backend);

    let supported = adapter.features();
    let adapter_limits = adapter.limits();
    let (usable, skipped): (Vec<ShadingMode>, Vec<ShadingMode>) = modes.iter().copied().partition(|mode| {
        let features_ok = supported.contains(mode.required_features());
        let limits_ok = *mode != ShadingMode::BindlessInstanced
            || adapter_limits.max_binding_array_elements_per_shader_stage >= MAX_BINDLESS_TEXTURES;
        features_ok && limits_ok
    });
    for mode in &skipped {
        log::warn!("{mode}: adapter lacks {:?}; skipped", mode.required_features());
    }

    let required_features = usable
        .iter()
        .fold(wgpu::Features::empty(), |acc, mode| acc | mode.required_features());
    let required_limits = usable
        .iter()
        .fold(wgpu::Limits::default(), |acc, mode| mode.required_limits(acc));

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("lumen-studio device"),
            required_features,
            required_limits,
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    let ctx = RenderCtx::new(&device, &queue, CHECK_FORMAT);
    let frame = Frame::new(&ctx, scene, width, height)?;

    for &mode in &usable {
        let pipeline = ProgramPipeline::new(&ctx, mode);
        let depth = pipeline
            .create_depth_texture(&ctx, width, height)
            .create_view(&wgpu::TextureViewDescriptor::default());
        frame.draw(&ctx, &pipeline, &depth)?;
        log::info!("{}: drew {width}x{height} ({:?})", pipeline.mode(), pipeline.format());
    }

    Ok(usable)
}

/// Scene resources shared by every mode, plus the offscreen color target.
struct Frame<'s> {
    scene: &'s Scene,
    mesh: MeshBuffers,
    texture: wgpu::TextureView,
    sampler: wgpu::Sampler,
    color: wgpu::TextureView,
}

impl<'s> Frame<'s> {
    fn new(ctx: &RenderCtx<'_>, scene: &'s Scene, width: u32, height: u32) -> Result<Self> {
        let color = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lumen-studio offscreen"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ctx.surface_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        Ok(Self {
            scene,
            mesh: MeshBuffers::new(ctx, &scene.mesh).context("uploading mesh")?,
            texture: create_texture(ctx, &scene.texture).create_view(&wgpu::TextureViewDescriptor::default()),
            sampler: create_sampler(ctx, &scene.sampler),
            color: color.create_view(&wgpu::TextureViewDescriptor::default()),
        })
    }

    fn draw(&self, ctx: &RenderCtx<'_>, pipeline: &ProgramPipeline, depth: &wgpu::TextureView) -> Result<()> {
        let scene = self.scene;

        match pipeline.mode() {
            ShadingMode::Flat | ShadingMode::Lambert(_) => {
                let camera = pipeline.create_uniform(
                    ctx,
                    &ModelProjection {
                        m: scene.view * scene.model(),
                        p: scene.projection,
                    },
                );
                let bind_group = self.bind_group(ctx, pipeline, &[uniform(Register::ConstantBuffer(0), &camera)]);
                self.submit_pass(ctx, pipeline, &bind_group, depth, true, 1);
            }
            ShadingMode::TexturedLambert => {
                let camera = pipeline.create_uniform(
                    ctx,
                    &ModelViewProjection {
                        m: scene.model(),
                        v: scene.view,
                        p: scene.projection,
                    },
                );
                let bind_group = self.bind_group(
                    ctx,
                    pipeline,
                    &[
                        uniform(Register::ConstantBuffer(0), &camera),
                        wgpu::BindGroupEntry {
                            binding: Register::Texture(0).binding(),
                            resource: wgpu::BindingResource::TextureView(&self.texture),
                        },
                        wgpu::BindGroupEntry {
                            binding: Register::Sampler(0).binding(),
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                    ],
                );
                self.submit_pass(ctx, pipeline, &bind_group, depth, true, 1);
            }
            ShadingMode::BindlessInstanced => {
                let Some(first) = scene.objects.first() else {
                    return Ok(());
                };
                let constants = scene.bindless_constants(first);
                let camera = pipeline.create_uniform(ctx, &constants.camera);
                let material = pipeline.create_uniform(ctx, &constants.material);
                let model = pipeline.create_uniform(ctx, &constants.model);

                let views = create_bindless_views(ctx, &scene.table).context("uploading descriptor table")?;
                let view_refs: Vec<&wgpu::TextureView> = views.iter().collect();
                let bind_group = self.bind_group(
                    ctx,
                    pipeline,
                    &[
                        uniform(Register::ConstantBuffer(0), &camera),
                        uniform(Register::ConstantBuffer(1), &material),
                        uniform(Register::ConstantBuffer(2), &model),
                        wgpu::BindGroupEntry {
                            binding: Register::Sampler(0).binding(),
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                        wgpu::BindGroupEntry {
                            binding: Register::DescriptorTable.binding(),
                            resource: wgpu::BindingResource::TextureViewArray(&view_refs),
                        },
                    ],
                );

                // Buffer writes land before the next submit, so each object
                // gets its own submission.
                for (i, object) in scene.objects.iter().enumerate() {
                    pipeline.write_uniform(ctx, &material, &Material::new(object.texture_index));
                    pipeline.write_uniform(ctx, &model, &Model { m: object.model() });
                    self.submit_pass(ctx, pipeline, &bind_group, depth, i == 0, scene.instances);
                }
            }
        }
        Ok(())
    }

    fn bind_group(
        &self,
        ctx: &RenderCtx<'_>,
        pipeline: &ProgramPipeline,
        entries: &[wgpu::BindGroupEntry<'_>],
    ) -> wgpu::BindGroup {
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(pipeline.mode().name()),
            layout: pipeline.bind_group_layout(),
            entries,
        })
    }

    fn submit_pass(
        &self,
        ctx: &RenderCtx<'_>,
        pipeline: &ProgramPipeline,
        bind_group: &wgpu::BindGroup,
        depth: &wgpu::TextureView,
        clear: bool,
        instances: u32,
    ) {
        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("lumen-studio encoder"),
        });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(pipeline.mode().name()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: if clear {
                            wgpu::LoadOp::Clear(clear_color(self.scene.clear_color))
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: if clear { wgpu::LoadOp::Clear(1.0) } else { wgpu::LoadOp::Load },
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline.pipeline());
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, self.mesh.vertex.slice(..));
            rpass.set_index_buffer(self.mesh.index.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.mesh.index_count, 0, 0..instances);
        }

        ctx.queue.submit(Some(encoder.finish()));
    }
}

fn uniform(register: Register, buffer: &wgpu::Buffer) -> wgpu::BindGroupEntry<'_> {
    wgpu::BindGroupEntry {
        binding: register.binding(),
        resource: buffer.as_entire_binding(),
    }
}

fn clear_color(c: Color) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_widens_channels() {
        let c = clear_color(Color::new(0.25, 0.5, 0.75, 1.0));
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }
}
