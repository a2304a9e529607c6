//! Artifact emission - two serializers over one merged registry.
//!
//! - `module`: TypeScript module with a lazy loader per renderable item
//! - `manifest`: loader-free JSON manifest for external installers

mod manifest;
mod module;

pub use manifest::emit_manifest;
pub use module::emit_module;
