use core::fmt;
use core::str::FromStr;

use crate::bindings::ProgramSignature;

use super::LambertVariant;
use super::bindless_instanced::BINDLESS_INSTANCED_SIGNATURE;
use super::flat::FLAT_SIGNATURE;
use super::lambert::{LAMBERT_PIXEL_SIGNATURE, LAMBERT_VERTEX_SIGNATURE};
use super::textured_lambert::TEXTURED_LAMBERT_SIGNATURE;

/// Selectable shading program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShadingMode {
    Flat,
    Lambert(LambertVariant),
    TexturedLambert,
    BindlessInstanced,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 5] = [
        ShadingMode::Flat,
        ShadingMode::Lambert(LambertVariant::PerVertex),
        ShadingMode::Lambert(LambertVariant::PerPixel),
        ShadingMode::TexturedLambert,
        ShadingMode::BindlessInstanced,
    ];

    /// Stable kebab-case name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            ShadingMode::Flat => "flat",
            ShadingMode::Lambert(LambertVariant::PerVertex) => "lambert-vertex",
            ShadingMode::Lambert(LambertVariant::PerPixel) => "lambert-pixel",
            ShadingMode::TexturedLambert => "textured-lambert",
            ShadingMode::BindlessInstanced => "bindless-instanced",
        }
    }

    pub fn signature(self) -> &'static ProgramSignature {
        match self {
            ShadingMode::Flat => &FLAT_SIGNATURE,
            ShadingMode::Lambert(LambertVariant::PerVertex) => &LAMBERT_VERTEX_SIGNATURE,
            ShadingMode::Lambert(LambertVariant::PerPixel) => &LAMBERT_PIXEL_SIGNATURE,
            ShadingMode::TexturedLambert => &TEXTURED_LAMBERT_SIGNATURE,
            ShadingMode::BindlessInstanced => &BINDLESS_INSTANCED_SIGNATURE,
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShadingMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = ShadingMode::ALL.iter().map(|m| m.name()).collect();
                format!("unknown shading mode `{s}` (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for mode in ShadingMode::ALL {
            assert_eq!(mode.name().parse::<ShadingMode>(), Ok(mode));
            assert_eq!(mode.to_string(), mode.name());
        }
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "phong".parse::<ShadingMode>().unwrap_err();
        assert!(err.contains("phong"));
        assert!(err.contains("bindless-instanced"));
    }

    #[test]
    fn every_signature_links() {
        for mode in ShadingMode::ALL {
            assert!(mode.signature().validate().is_ok(), "{mode}");
        }
    }

    #[test]
    fn only_bindless_reads_instance_id() {
        for mode in ShadingMode::ALL {
            assert_eq!(mode.signature().uses_instance_id, mode == ShadingMode::BindlessInstanced);
        }
    }
}
