//! Color model shared by programs, textures and render targets.
//!
//! All arithmetic happens in linear space. sRGB only appears at the edges:
//! decoding 8-bit texture data and encoding the render target for output.

pub mod color;

pub use color::Color;
