//! Software rasterizer.
//!
//! Runs [`ShadingProgram`](crate::program::ShadingProgram)s on the CPU with
//! D3D conventions: clip-space depth in `[0, w]`, window +Y down, pixel
//! centres at half-integers, top-left fill rule, `Less` depth test.

mod clip;
mod rasterizer;
mod target;

pub use rasterizer::{CullMode, DrawCall, DrawStats, RasterState, Rasterizer};
pub use target::{DEPTH_CLEAR, RenderTarget};
