//! Constant-buffer layouts.
//!
//! Each struct is byte-compatible with the matching `cbuffer` / WGSL uniform:
//! `#[repr(C)]`, `Pod`, and a size that is a multiple of 16 bytes.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::Register;

/// A constant buffer bound to a fixed register.
pub trait ConstantBuffer: Pod {
    const REGISTER: Register;

    /// Byte view for upload.
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Camera at `b0` for the flat and Lambert programs: view merged into `m`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelProjection {
    pub m: Mat4,
    pub p: Mat4,
}

/// Camera at `b0` for the textured Lambert program.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelViewProjection {
    pub m: Mat4,
    pub v: Mat4,
    pub p: Mat4,
}

/// Camera at `b0` for the bindless instanced program; the model is in `b2`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ViewProjection {
    pub v: Mat4,
    pub p: Mat4,
}

/// Material at `b1`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Material {
    pub texture_index: u32,
    pub _pad: [u32; 3],
}

impl Material {
    #[inline]
    pub const fn new(texture_index: u32) -> Self {
        Self {
            texture_index,
            _pad: [0; 3],
        }
    }
}

/// Per-draw model matrix at `b2`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Model {
    pub m: Mat4,
}

impl Default for ModelProjection {
    fn default() -> Self {
        Self { m: Mat4::IDENTITY, p: Mat4::IDENTITY }
    }
}

impl Default for ModelViewProjection {
    fn default() -> Self {
        Self { m: Mat4::IDENTITY, v: Mat4::IDENTITY, p: Mat4::IDENTITY }
    }
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self { v: Mat4::IDENTITY, p: Mat4::IDENTITY }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self { m: Mat4::IDENTITY }
    }
}

impl ConstantBuffer for ModelProjection {
    const REGISTER: Register = Register::ConstantBuffer(0);
}

impl ConstantBuffer for ModelViewProjection {
    const REGISTER: Register = Register::ConstantBuffer(0);
}

impl ConstantBuffer for ViewProjection {
    const REGISTER: Register = Register::ConstantBuffer(0);
}

impl ConstantBuffer for Material {
    const REGISTER: Register = Register::ConstantBuffer(1);
}

impl ConstantBuffer for Model {
    const REGISTER: Register = Register::ConstantBuffer(2);
}
