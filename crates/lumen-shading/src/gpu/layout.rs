use std::num::NonZeroU32;

use crate::bindings::{ElementFormat, InputElement, ProgramSignature, Register};
use crate::mesh::Vertex;
use crate::program::ShadingMode;

/// Slots in the bindless texture array.
pub const MAX_BINDLESS_TEXTURES: u32 = 64;

const BINDLESS_COUNT: NonZeroU32 = match NonZeroU32::new(MAX_BINDLESS_TEXTURES) {
    Some(n) => n,
    None => panic!("bindless table must have at least one slot"),
};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ── vertex input ──────────────────────────────────────────────────────────

const fn vertex_format(format: ElementFormat) -> wgpu::VertexFormat {
    match format {
        ElementFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        ElementFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
        ElementFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

const fn attribute(element: InputElement, shader_location: u32) -> wgpu::VertexAttribute {
    wgpu::VertexAttribute {
        format: vertex_format(element.format),
        offset: element.offset as wgpu::BufferAddress,
        shader_location,
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] = [
    attribute(Vertex::INPUT_LAYOUT[0], 0),
    attribute(Vertex::INPUT_LAYOUT[1], 1),
    attribute(Vertex::INPUT_LAYOUT[2], 2),
];

/// Per-vertex buffer layout for [`Vertex`]: POSITION, NORMAL, TEXCOORD at
/// locations 0, 1, 2.
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

// ── bind group ────────────────────────────────────────────────────────────

fn layout_entry(register: Register) -> wgpu::BindGroupLayoutEntry {
    let (visibility, ty, count) = match register {
        Register::ConstantBuffer(_) => (
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            None,
        ),
        Register::Texture(_) => (wgpu::ShaderStages::FRAGMENT, texture_2d(), None),
        Register::DescriptorTable => (wgpu::ShaderStages::FRAGMENT, texture_2d(), Some(BINDLESS_COUNT)),
        Register::Sampler(_) => (
            wgpu::ShaderStages::FRAGMENT,
            wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            None,
        ),
    };
    wgpu::BindGroupLayoutEntry {
        binding: register.binding(),
        visibility,
        ty,
        count,
    }
}

fn texture_2d() -> wgpu::BindingType {
    wgpu::BindingType::Texture {
        sample_type: wgpu::TextureSampleType::Float { filterable: true },
        view_dimension: wgpu::TextureViewDimension::D2,
        multisampled: false,
    }
}

/// Bind group 0 entries for every register `signature` reads.
pub fn bind_group_layout_entries(signature: &ProgramSignature) -> Vec<wgpu::BindGroupLayoutEntry> {
    signature.registers.iter().copied().map(layout_entry).collect()
}

// ── device requirements ───────────────────────────────────────────────────

impl ShadingMode {
    /// Device features the mode's pipeline needs beyond the baseline.
    pub fn required_features(self) -> wgpu::Features {
        match self {
            ShadingMode::BindlessInstanced => wgpu::Features::TEXTURE_BINDING_ARRAY,
            _ => wgpu::Features::empty(),
        }
    }

    /// `base` raised to what the mode's pipeline needs.
    pub fn required_limits(self, base: wgpu::Limits) -> wgpu::Limits {
        match self {
            ShadingMode::BindlessInstanced => wgpu::Limits {
                max_binding_array_elements_per_shader_stage: base
                    .max_binding_array_elements_per_shader_stage
                    .max(MAX_BINDLESS_TEXTURES),
                ..base
            },
            _ => base,
        }
    }
}
