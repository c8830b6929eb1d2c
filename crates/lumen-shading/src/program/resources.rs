use crate::bindings::{ProgramSignature, Register};
use crate::error::ShadingError;
use crate::texture::{DescriptorTable, Sampler, Texture2D};

/// Non-constant resources visible to the pixel stage for one draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderResources<'a> {
    /// `t0`.
    pub texture: Option<&'a Texture2D>,
    /// `s0`.
    pub sampler: Sampler,
    /// Bindless texture table.
    pub descriptor_table: Option<&'a DescriptorTable>,
}

impl<'a> ShaderResources<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture(mut self, texture: &'a Texture2D) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_descriptor_table(mut self, table: &'a DescriptorTable) -> Self {
        self.descriptor_table = Some(table);
        self
    }

    /// The texture bound at `t0`.
    #[inline]
    pub fn static_texture(&self) -> Result<&'a Texture2D, ShadingError> {
        self.texture.ok_or(ShadingError::Unbound(Register::Texture(0)))
    }

    /// Looks up `index` in the descriptor table.
    #[inline]
    pub fn bindless(&self, index: u32) -> Result<&'a Texture2D, ShadingError> {
        self.descriptor_table
            .ok_or(ShadingError::Unbound(Register::DescriptorTable))?
            .get(index)
    }

    /// Checks that every texture register the program reads has something bound.
    ///
    /// Samplers always have a value and constant buffers are typed, so only
    /// texture slots can be missing.
    pub fn check(&self, signature: &ProgramSignature) -> Result<(), ShadingError> {
        for &register in signature.registers {
            let bound = match register {
                Register::Texture(0) => self.texture.is_some(),
                Register::Texture(_) => false,
                Register::DescriptorTable => self.descriptor_table.is_some(),
                Register::ConstantBuffer(_) | Register::Sampler(_) => true,
            };
            if !bound {
                return Err(ShadingError::Unbound(register));
            }
        }
        Ok(())
    }
}
