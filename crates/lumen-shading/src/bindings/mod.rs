//! Host-facing interface of the programs.
//!
//! Registers, constant-buffer layouts and stage signatures describe what a
//! host renderer must provide before a draw. The CPU rasterizer and the `wgpu`
//! pipeline builder both consume these descriptions.

pub mod buffers;
mod register;
mod signature;

pub use buffers::{ConstantBuffer, Material, Model, ModelProjection, ModelViewProjection, ViewProjection};
pub use register::{
    Register, DESCRIPTOR_TABLE_BINDING, SAMPLER_BINDING_BASE, TEXTURE_BINDING_BASE,
};
pub use signature::{ElementFormat, InputElement, ProgramSignature, Semantic};
