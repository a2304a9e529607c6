//! Core registry engine.
//!
//! ## Module Structure
//!
//! - `file_scanner`: enumerates unit files under the four typed roots
//! - `parsers`: swc parsing of TS/TSX sources
//! - `extract`: per-file import extraction (AST visitor, regex fallback)
//! - `sidecar`: per-file JSON overrides
//! - `resolve`: one-hop dependency expansion through hooks and utilities
//! - `assemble`: registry items and link validation
//! - `registry`: registry data model and merge
//! - `emit`: module and manifest serializers
//! - `context`: the pipeline driving all of the above

pub mod assemble;
pub mod context;
pub mod emit;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod registry;
pub mod resolve;
pub mod sidecar;

pub use context::{AnalyzedUnit, BuildContext, BuildOutput, UnitCounts};
pub use registry::{
    KindRegistries, LazyLoader, Registry, RegistryFile, RegistryItem, UnitKind,
};
