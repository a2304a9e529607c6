//! Registry builder - component registry generator for React UI libraries
//!
//! Walks a component library's four source trees (components, examples, hooks,
//! utilities), extracts what every file imports, and emits a registry in two
//! forms: a TypeScript module with lazy loaders for rendering, and a JSON
//! manifest for installers.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`build`, `check`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, extraction, resolution, assembly and emission
//! - `issues`: Diagnostic type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
