//! Vertex format and indexed meshes.

mod shapes;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::bindings::{ElementFormat, InputElement, Semantic};
use crate::error::ShadingError;

/// Interleaved vertex: position, normal, uv.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Input layout every program is compiled against.
    pub const INPUT_LAYOUT: [InputElement; 3] = [
        InputElement { semantic: Semantic::Position, format: ElementFormat::Float32x3, offset: 0 },
        InputElement { semantic: Semantic::Normal, format: ElementFormat::Float32x3, offset: 12 },
        InputElement { semantic: Semantic::TexCoord, format: ElementFormat::Float32x2, offset: 24 },
    ];

    #[inline]
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    #[inline]
    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks that indices form whole triangles and stay inside the vertex buffer.
    pub fn validate(&self) -> Result<(), ShadingError> {
        if self.indices.len() % 3 != 0 {
            return Err(ShadingError::IncompleteTriangle(self.indices.len()));
        }
        let len = self.vertices.len();
        match self.indices.iter().find(|&&i| i as usize >= len) {
            Some(&index) => Err(ShadingError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
