use core::fmt;

/// First `wgpu` binding used for `tN` registers.
pub const TEXTURE_BINDING_BASE: u32 = 8;
/// First `wgpu` binding used for `sN` registers.
pub const SAMPLER_BINDING_BASE: u32 = 12;
/// `wgpu` binding of the bindless texture array.
pub const DESCRIPTOR_TABLE_BINDING: u32 = 16;

/// A shader-visible resource slot, named the HLSL way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Register {
    /// `bN`: constant buffer.
    ConstantBuffer(u32),
    /// `tN`: statically bound 2D texture.
    Texture(u32),
    /// `sN`: sampler.
    Sampler(u32),
    /// Global texture descriptor table indexed at run time.
    DescriptorTable,
}

impl Register {
    /// Binding index inside bind group 0.
    ///
    /// `bN -> N`, `tN -> 8 + N`, `sN -> 12 + N`, descriptor table -> 16.
    pub const fn binding(self) -> u32 {
        match self {
            Register::ConstantBuffer(n) => n,
            Register::Texture(n) => TEXTURE_BINDING_BASE + n,
            Register::Sampler(n) => SAMPLER_BINDING_BASE + n,
            Register::DescriptorTable => DESCRIPTOR_TABLE_BINDING,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::ConstantBuffer(n) => write!(f, "b{n}"),
            Register::Texture(n) => write!(f, "t{n}"),
            Register::Sampler(n) => write!(f, "s{n}"),
            Register::DescriptorTable => f.write_str("descriptor table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_hlsl_names() {
        assert_eq!(Register::ConstantBuffer(2).to_string(), "b2");
        assert_eq!(Register::Texture(0).to_string(), "t0");
        assert_eq!(Register::Sampler(0).to_string(), "s0");
    }

    #[test]
    fn bindings_do_not_collide() {
        let regs = [
            Register::ConstantBuffer(0),
            Register::ConstantBuffer(1),
            Register::ConstantBuffer(2),
            Register::Texture(0),
            Register::Sampler(0),
            Register::DescriptorTable,
        ];
        let mut seen: Vec<u32> = regs.iter().map(|r| r.binding()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), regs.len());
    }
}
