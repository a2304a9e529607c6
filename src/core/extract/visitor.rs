use swc_ecma_ast::{
    CallExpr, Callee, ExportAll, ExportSpecifier, Expr, ImportDecl, ImportSpecifier, Lit,
    ModuleExportName, NamedExport,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{FileReferences, ImportOrigin, ImportRules};

/// AST visitor collecting import, re-export and dynamic-import sources.
///
/// # Usage
///
/// ```ignore
/// let mut visitor = ImportVisitor::new(&rules);
/// module.visit_with(&mut visitor);
/// let references = visitor.into_references();
/// ```
pub struct ImportVisitor<'a> {
    rules: &'a ImportRules,
    references: FileReferences,
}

impl<'a> ImportVisitor<'a> {
    pub fn new(rules: &'a ImportRules) -> Self {
        Self {
            rules,
            references: FileReferences::default(),
        }
    }

    pub fn into_references(self) -> FileReferences {
        self.references
    }

    fn record(&mut self, source: &str, bindings: &[String], origin: ImportOrigin) {
        self.references.record(
            self.rules,
            source,
            bindings.iter().map(String::as_str),
            origin,
        );
    }
}

impl Visit for ImportVisitor<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        // Type-only imports are recorded like value imports.
        let Some(source) = node.src.value.as_str() else {
            return;
        };
        let bindings: Vec<String> = node.specifiers.iter().filter_map(import_binding).collect();
        self.record(source, &bindings, ImportOrigin::Static);
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if let Some(src) = &node.src
            && let Some(source) = src.value.as_str()
        {
            let bindings: Vec<String> = node.specifiers.iter().filter_map(export_binding).collect();
            self.record(source, &bindings, ImportOrigin::Static);
        }
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        if let Some(source) = node.src.value.as_str() {
            self.record(source, &[], ImportOrigin::Static);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Import(_) = &node.callee
            && let Some(arg) = node.args.first()
            && let Expr::Lit(Lit::Str(s)) = &*arg.expr
            && let Some(source) = s.value.as_str()
        {
            self.record(source, &[], ImportOrigin::Deferred);
        }
        node.visit_children_with(self);
    }
}

fn import_binding(specifier: &ImportSpecifier) -> Option<String> {
    match specifier {
        ImportSpecifier::Named(named) => Some(
            named
                .imported
                .as_ref()
                .map(module_export_name)
                .unwrap_or_else(|| named.local.sym.to_string()),
        ),
        ImportSpecifier::Default(default) => Some(default.local.sym.to_string()),
        ImportSpecifier::Namespace(_) => None,
    }
}

fn export_binding(specifier: &ExportSpecifier) -> Option<String> {
    match specifier {
        ExportSpecifier::Named(named) => Some(module_export_name(&named.orig)),
        ExportSpecifier::Default(default) => Some(default.exported.sym.to_string()),
        ExportSpecifier::Namespace(_) => None,
    }
}

fn module_export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}
