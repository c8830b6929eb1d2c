//! Math helpers shared by the programs.
//!
//! Vector and matrix types come from `glam`. Matrices are column-major and
//! multiply column vectors, so `P * V * M * p` here is `mul(P, mul(V, mul(M, p)))`
//! in HLSL terms.

mod transform;
mod viewport;

pub use glam::{Mat4, Vec2, Vec3, Vec4};
pub use transform::{instance_offset, transform_normal, transform_point};
pub use viewport::Viewport;
