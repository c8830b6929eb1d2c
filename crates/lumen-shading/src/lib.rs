//! Lumen shading crate.
//!
//! This crate owns the four shading programs of the lumen renderer in two forms:
//! a CPU reference implementation that runs through a small software rasterizer,
//! and WGSL modules with matching `wgpu` pipeline layouts.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`bindings`] | registers, constant buffers, stage signatures |
//! | [`program`] | `ShadingProgram`, the four programs, lighting math |
//! | [`raster`] | software rasterizer and render target |
//! | [`texture`] | textures, samplers, bindless descriptor table |
//! | [`mesh`] | vertex format and procedural meshes |
//! | [`gpu`] | WGSL modules and `wgpu` pipeline construction |

pub mod bindings;
pub mod error;
pub mod gpu;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod paint;
pub mod program;
pub mod raster;
pub mod texture;

pub use error::ShadingError;
pub use program::{ShadingMode, ShadingProgram};
