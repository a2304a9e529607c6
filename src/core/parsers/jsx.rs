use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// Parse a TS/TSX/JS/JSX source string into an AST module.
///
/// JSX syntax is enabled for `.tsx` and `.jsx` files only, so generic arrow
/// functions in plain `.ts` files parse correctly.
///
/// Each call owns its `SourceMap` and swc globals, so files can be parsed
/// from parallel workers.
pub fn parse_source(code: String, file_path: &str) -> Result<Module> {
    let tsx = matches!(
        Path::new(file_path).extension().and_then(|e| e.to_str()),
        Some("tsx" | "jsx")
    );

    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsx_component() {
        let code = r#"
            import { motion } from "motion/react";
            export function Button() {
                return <motion.button>Copy</motion.button>;
            }
        "#;
        let module = parse_source(code.to_string(), "Button.tsx").unwrap();
        assert_eq!(module.body.len(), 2);
    }

    #[test]
    fn test_parse_ts_generic_arrow() {
        let code = "export const identity = <T,>(value: T): T => value;\nexport const first = <T>(xs: T[]) => xs[0];";
        assert!(parse_source(code.to_string(), "identity.ts").is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_source("import { from ".to_string(), "broken.tsx");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("broken.tsx"));
    }
}
