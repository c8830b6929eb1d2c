//! Textures, samplers and the bindless descriptor table.

mod descriptor_table;
mod sampler;
mod texture2d;

pub use descriptor_table::DescriptorTable;
pub use sampler::{AddressMode, Filter, Sampler};
pub use texture2d::Texture2D;
