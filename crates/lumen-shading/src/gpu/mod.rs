//! `wgpu` side of the shading programs.
//!
//! Each [`ShadingMode`](crate::ShadingMode) has a WGSL module under
//! `shaders/` whose bindings follow [`Register::binding`](crate::bindings::Register::binding)
//! in bind group 0. Layouts are derived from the same [`ProgramSignature`]s
//! the software rasterizer validates against.
//!
//! Convention:
//! - Matrices are uploaded column-major as produced by `glam`.
//! - Projections are left-handed with depth in [0, 1]; outward-wound meshes
//!   appear clockwise on screen.
//!
//! [`ProgramSignature`]: crate::bindings::ProgramSignature

mod ctx;
mod layout;
mod pipeline;
mod upload;

pub use ctx::RenderCtx;
pub use layout::{
    DEPTH_FORMAT, MAX_BINDLESS_TEXTURES, bind_group_layout_entries, vertex_buffer_layout,
};
pub use pipeline::{ProgramPipeline, shader_source};
pub use upload::{
    MeshBuffers, TEXTURE_FORMAT, create_bindless_views, create_sampler, create_texture, sampler_descriptor,
};
