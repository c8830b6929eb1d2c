use core::fmt;

use crate::error::ShadingError;

use super::Register;

/// Semantic names used in vertex input layouts and stage interfaces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Semantic {
    Position,
    Normal,
    TexCoord,
    Color,
    WorldPosition,
}

impl Semantic {
    pub const fn name(self) -> &'static str {
        match self {
            Semantic::Position => "POSITION",
            Semantic::Normal => "NORMAL",
            Semantic::TexCoord => "TEXCOORD",
            Semantic::Color => "COLOR",
            Semantic::WorldPosition => "WORLDPOS",
        }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Component format of a vertex attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementFormat {
    Float32x2,
    Float32x3,
    Float32x4,
}

impl ElementFormat {
    pub const fn size(self) -> u32 {
        match self {
            ElementFormat::Float32x2 => 8,
            ElementFormat::Float32x3 => 12,
            ElementFormat::Float32x4 => 16,
        }
    }
}

/// One entry of a vertex input layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputElement {
    pub semantic: Semantic,
    pub format: ElementFormat,
    pub offset: u32,
}

/// Everything a host pipeline must agree on to run a program.
///
/// `vertex_outputs` and `pixel_inputs` list the interpolated attributes in
/// location order; `SV_Position` is implicit and not listed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProgramSignature {
    pub label: &'static str,
    pub registers: &'static [Register],
    pub inputs: &'static [InputElement],
    pub uses_instance_id: bool,
    pub vertex_outputs: &'static [Semantic],
    pub pixel_inputs: &'static [Semantic],
}

impl ProgramSignature {
    /// Checks that the vertex stage writes exactly what the pixel stage reads,
    /// in the same order.
    pub fn validate(&self) -> Result<(), ShadingError> {
        let len = self.vertex_outputs.len().max(self.pixel_inputs.len());
        for slot in 0..len {
            let vertex = self.vertex_outputs.get(slot).copied();
            let pixel = self.pixel_inputs.get(slot).copied();
            if vertex != pixel {
                log::warn!(
                    "{}: linkage mismatch at slot {slot} ({vertex:?} -> {pixel:?})",
                    self.label
                );
                return Err(ShadingError::LinkageMismatch { slot, vertex, pixel });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn reads(&self, register: Register) -> bool {
        self.registers.contains(&register)
    }

    /// Byte stride implied by the input layout.
    pub fn input_stride(&self) -> u32 {
        self.inputs
            .iter()
            .map(|e| e.offset + e.format.size())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(vs: &'static [Semantic], ps: &'static [Semantic]) -> ProgramSignature {
        ProgramSignature {
            label: "test",
            registers: &[Register::ConstantBuffer(0)],
            inputs: &[],
            uses_instance_id: false,
            vertex_outputs: vs,
            pixel_inputs: ps,
        }
    }

    #[test]
    fn identical_lists_link() {
        let s = sig(
            &[Semantic::WorldPosition, Semantic::Normal],
            &[Semantic::WorldPosition, Semantic::Normal],
        );
        assert!(s.validate().is_ok());
    }

    #[test]
    fn swapped_order_is_rejected() {
        let s = sig(
            &[Semantic::Normal, Semantic::TexCoord],
            &[Semantic::TexCoord, Semantic::Normal],
        );
        assert_eq!(
            s.validate(),
            Err(ShadingError::LinkageMismatch {
                slot: 0,
                vertex: Some(Semantic::Normal),
                pixel: Some(Semantic::TexCoord),
            })
        );
    }

    #[test]
    fn missing_pixel_input_is_rejected() {
        let s = sig(&[Semantic::Color, Semantic::TexCoord], &[Semantic::Color]);
        assert_eq!(
            s.validate(),
            Err(ShadingError::LinkageMismatch {
                slot: 1,
                vertex: Some(Semantic::TexCoord),
                pixel: None,
            })
        );
    }

    #[test]
    fn empty_interface_links() {
        assert!(sig(&[], &[]).validate().is_ok());
    }
}
