use wgpu::util::DeviceExt;

use crate::error::ShadingError;
use crate::mesh::Mesh;
use crate::paint::Color;
use crate::texture::{AddressMode, DescriptorTable, Filter, Sampler, Texture2D};

use super::RenderCtx;
use super::layout::MAX_BINDLESS_TEXTURES;

/// Format of uploaded textures. Texels are stored sRGB-encoded and decoded to
/// linear on sampling.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

// ── mesh ──────────────────────────────────────────────────────────────────

/// Vertex and index buffers of one [`Mesh`].
pub struct MeshBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffers {
    pub fn new(ctx: &RenderCtx<'_>, mesh: &Mesh) -> Result<Self, ShadingError> {
        mesh.validate()?;

        let vertex = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen mesh vbo"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen mesh ibo"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex,
            index,
            index_count: mesh.indices.len() as u32,
        })
    }
}

// ── textures ──────────────────────────────────────────────────────────────

/// Uploads `texture` as a sampled [`TEXTURE_FORMAT`] texture.
pub fn create_texture(ctx: &RenderCtx<'_>, texture: &Texture2D) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: texture.width(),
        height: texture.height(),
        depth_or_array_layers: 1,
    };
    let gpu = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("lumen texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &gpu,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &texture.to_rgba8(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * texture.width()),
            rows_per_image: Some(texture.height()),
        },
        size,
    );
    gpu
}

/// One view per slot of the bindless array.
///
/// Released slots and slots past the end of `table` are filled with a 1x1
/// transparent texture so the array is fully bound.
pub fn create_bindless_views(
    ctx: &RenderCtx<'_>,
    table: &DescriptorTable,
) -> Result<Vec<wgpu::TextureView>, ShadingError> {
    if table.len() > MAX_BINDLESS_TEXTURES as usize {
        return Err(ShadingError::DescriptorTableFull {
            len: table.len(),
            capacity: MAX_BINDLESS_TEXTURES,
        });
    }

    let filler = create_texture(ctx, &Texture2D::solid(Color::TRANSPARENT));
    let mut views: Vec<wgpu::TextureView> = (0..MAX_BINDLESS_TEXTURES)
        .map(|_| filler.create_view(&wgpu::TextureViewDescriptor::default()))
        .collect();
    for (index, texture) in table.iter() {
        views[index as usize] =
            create_texture(ctx, texture).create_view(&wgpu::TextureViewDescriptor::default());
    }
    Ok(views)
}

// ── samplers ──────────────────────────────────────────────────────────────

/// `wgpu` equivalent of a [`Sampler`].
pub fn sampler_descriptor(sampler: &Sampler) -> wgpu::SamplerDescriptor<'static> {
    let address = match sampler.address {
        AddressMode::Wrap => wgpu::AddressMode::Repeat,
        AddressMode::Clamp => wgpu::AddressMode::ClampToEdge,
    };
    let filter = match sampler.filter {
        Filter::Point => wgpu::FilterMode::Nearest,
        Filter::Linear => wgpu::FilterMode::Linear,
    };
    wgpu::SamplerDescriptor {
        label: Some("lumen sampler"),
        address_mode_u: address,
        address_mode_v: address,
        address_mode_w: address,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    }
}

pub fn create_sampler(ctx: &RenderCtx<'_>, sampler: &Sampler) -> wgpu::Sampler {
    ctx.device.create_sampler(&sampler_descriptor(sampler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sampler_is_linear_repeat() {
        let desc = sampler_descriptor(&Sampler::default());
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::Repeat);
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::Repeat);
    }

    #[test]
    fn point_clamp_sampler_maps_to_nearest_clamp() {
        let desc = sampler_descriptor(&Sampler::new(Filter::Point, AddressMode::Clamp));
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.address_mode_w, wgpu::AddressMode::ClampToEdge);
    }

    #[test]
    fn texture_format_decodes_srgb() {
        assert!(TEXTURE_FORMAT.is_srgb());
    }
}
