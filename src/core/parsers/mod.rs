//! Source file parser (uses swc for AST generation).

pub mod jsx;
