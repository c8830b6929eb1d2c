use wgpu::util::DeviceExt;

use crate::bindings::ConstantBuffer;
use crate::program::{LambertVariant, ShadingMode};

use super::RenderCtx;
use super::layout::{DEPTH_FORMAT, bind_group_layout_entries, vertex_buffer_layout};

/// WGSL source of `mode`.
pub fn shader_source(mode: ShadingMode) -> &'static str {
    match mode {
        ShadingMode::Flat => include_str!("shaders/flat.wgsl"),
        ShadingMode::Lambert(LambertVariant::PerVertex) => include_str!("shaders/lambert_vertex.wgsl"),
        ShadingMode::Lambert(LambertVariant::PerPixel) => include_str!("shaders/lambert_pixel.wgsl"),
        ShadingMode::TexturedLambert => include_str!("shaders/textured_lambert.wgsl"),
        ShadingMode::BindlessInstanced => include_str!("shaders/bindless_instanced.wgsl"),
    }
}

/// Render pipeline and bind group layout for one shading mode.
///
/// Targets `ctx.surface_format` with a [`DEPTH_FORMAT`] attachment, `Less`
/// depth test, triangle lists and no culling.
pub struct ProgramPipeline {
    mode: ShadingMode,
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl ProgramPipeline {
    /// Builds the pipeline. The device must expose `mode.required_features()`.
    pub fn new(ctx: &RenderCtx<'_>, mode: ShadingMode) -> Self {
        let name = mode.name();
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(shader_source(mode).into()),
        });

        let entries = bind_group_layout_entries(mode.signature());
        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(name),
            entries: &entries,
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(name),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(name),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "pipeline `{name}`: {} bindings, format {:?}",
            entries.len(),
            ctx.surface_format
        );

        Self {
            mode,
            format: ctx.surface_format,
            pipeline,
            bind_group_layout,
        }
    }

    #[inline]
    pub fn mode(&self) -> ShadingMode {
        self.mode
    }

    /// Color format the pipeline was built for.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Creates a uniform buffer holding `value`, ready to bind at its register.
    pub fn create_uniform<B: ConstantBuffer>(&self, ctx: &RenderCtx<'_>, value: &B) -> wgpu::Buffer {
        ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(self.mode.name()),
            contents: value.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Overwrites a buffer made by [`create_uniform`](Self::create_uniform).
    pub fn write_uniform<B: ConstantBuffer>(&self, ctx: &RenderCtx<'_>, buffer: &wgpu::Buffer, value: &B) {
        ctx.queue.write_buffer(buffer, 0, value.as_bytes());
    }

    /// Creates a depth attachment matching the pipeline.
    pub fn create_depth_texture(&self, ctx: &RenderCtx<'_>, width: u32, height: u32) -> wgpu::Texture {
        ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lumen depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Register;

    #[test]
    fn shader_bindings_match_signature() {
        for mode in ShadingMode::ALL {
            let src = shader_source(mode);
            for register in mode.signature().registers {
                let decl = format!("@binding({})", register.binding());
                assert!(src.contains(&decl), "{mode}: missing {decl} for {register}");
            }
        }
    }

    #[test]
    fn bindless_shader_reads_instance_index() {
        for mode in ShadingMode::ALL {
            let reads = shader_source(mode).contains("@builtin(instance_index)");
            assert_eq!(reads, mode.signature().uses_instance_id, "{mode}");
        }
    }

    #[test]
    fn bindless_array_size_matches_layout() {
        let src = shader_source(ShadingMode::BindlessInstanced);
        let decl = format!("binding_array<texture_2d<f32>, {}>", crate::gpu::MAX_BINDLESS_TEXTURES);
        assert!(src.contains(&decl));
        assert!(ShadingMode::BindlessInstanced.signature().reads(Register::DescriptorTable));
    }

    fn vec3_const(name: &str, v: glam::Vec3) -> String {
        format!("const {name}: vec3<f32> = vec3<f32>({:?}, {:?}, {:?});", v.x, v.y, v.z)
    }

    fn f32_const(name: &str, v: f32) -> String {
        format!("const {name}: f32 = {v:?};")
    }

    #[track_caller]
    fn assert_declares(mode: ShadingMode, decl: &str) {
        assert!(shader_source(mode).contains(decl), "{mode}: expected `{decl}`");
    }

    #[test]
    fn flat_color_matches_program() {
        let c = crate::program::FLAT_COLOR;
        let decl = format!("vec4<f32>({:?}, {:?}, {:?}, {:?})", c.r, c.g, c.b, c.a);
        assert_declares(ShadingMode::Flat, &decl);
    }

    #[test]
    fn lambert_constants_match_programs() {
        use crate::program::{LambertPerPixel, LambertPerVertex};

        let vertex = LambertPerVertex::default();
        let pixel = LambertPerPixel::default();
        let cases = [
            (LambertVariant::PerVertex, vertex.light_position, vertex.tint),
            (LambertVariant::PerPixel, pixel.light_position, pixel.tint),
        ];
        for (variant, light_position, tint) in cases {
            let mode = ShadingMode::Lambert(variant);
            assert_declares(mode, &vec3_const("LIGHT_POS", light_position));
            assert_declares(mode, &vec3_const("TINT", tint));
        }
    }

    #[test]
    fn textured_lambert_constants_match_program() {
        use crate::program::TexturedLambert;
        use crate::program::lighting::{Falloff, MIN_LIGHT_DISTANCE};

        let light = TexturedLambert::default().light;
        let mode = ShadingMode::TexturedLambert;
        assert_declares(mode, &vec3_const("LIGHT_POS", light.position));
        assert_declares(mode, &vec3_const("LIGHT_INTENSITY", light.intensity));
        assert_declares(mode, &f32_const("MIN_LIGHT_DISTANCE", MIN_LIGHT_DISTANCE));
        assert_eq!((light.falloff, light.divisor), (Falloff::InverseSquare, 1.0));
        assert_declares(mode, "LIGHT_INTENSITY / (distance * distance)");
    }

    #[test]
    fn bindless_constants_match_program() {
        use crate::program::BindlessInstanced;
        use crate::program::lighting::{Falloff, MIN_LIGHT_DISTANCE};

        let prog = BindlessInstanced::default();
        let mode = ShadingMode::BindlessInstanced;
        assert_declares(mode, &vec3_const("LIGHT_POS", prog.light.position));
        assert_declares(mode, &vec3_const("LIGHT_INTENSITY", prog.light.intensity));
        assert_declares(mode, &vec3_const("AMBIENT", prog.ambient));
        assert_declares(mode, &f32_const("LIGHT_DIVISOR", prog.light.divisor));
        assert_declares(mode, &f32_const("MIN_LIGHT_DISTANCE", MIN_LIGHT_DISTANCE));
        assert_eq!(prog.light.falloff, Falloff::InverseLinear);
        assert_declares(mode, "LIGHT_DIVISOR / distance)");
    }

    #[test]
    fn every_shader_has_both_entry_points() {
        for mode in ShadingMode::ALL {
            let src = shader_source(mode);
            assert!(src.contains("fn vs_main"), "{mode}");
            assert!(src.contains("fn fs_main"), "{mode}");
        }
    }
}
