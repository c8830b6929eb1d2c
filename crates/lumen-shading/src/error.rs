use thiserror::Error;

use crate::bindings::{Register, Semantic};

/// Errors reported by the CPU reference pipeline.
///
/// On the GPU these conditions are host contracts with undefined results; the
/// reference implementation surfaces them instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShadingError {
    #[error("descriptor index {index} is out of range (table holds {len} slots)")]
    DescriptorOutOfRange { index: u32, len: usize },

    #[error("descriptor table holds {len} slots, the GPU array has {capacity}")]
    DescriptorTableFull { len: usize, capacity: u32 },

    #[error("descriptor index {index} does not reference a resident texture")]
    DescriptorNotResident { index: u32 },

    #[error("nothing is bound at register {0}")]
    Unbound(Register),

    #[error(
        "stage linkage mismatch at slot {slot}: vertex stage writes {vertex:?}, pixel stage reads {pixel:?}"
    )]
    LinkageMismatch {
        slot: usize,
        vertex: Option<Semantic>,
        pixel: Option<Semantic>,
    },

    #[error("index {index} addresses past the end of a {len}-vertex buffer")]
    IndexOutOfRange { index: u32, len: usize },

    #[error("index count {0} is not a multiple of three")]
    IncompleteTriangle(usize),

    #[error("texture data holds {actual} texels, expected {width}x{height}")]
    TextureSize { width: u32, height: u32, actual: usize },

    #[error("render target has zero area")]
    EmptyTarget,
}
