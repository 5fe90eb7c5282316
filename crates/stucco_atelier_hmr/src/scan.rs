//! Top-level component discovery.
//!
//! Only module-level statements are inspected. A binding is a component when
//! its initializer is a call to one of the configured component callees or a
//! function literal.

use oxc_ast::ast::{
    BindingPatternKind, ExportDefaultDeclarationKind, Expression, ModuleExportName, Program,
    Statement, VariableDeclaration,
};
use oxc_span::GetSpan;
use serde::Serialize;
use stucco_carton::hash::hmr_id;
use stucco_carton::{CompactString, SmallVec};

/// Local binding name used for an anonymous default export.
pub const DEFAULT_LOCAL: &str = "__default__";

/// A component that receives an HMR record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotComponent {
    /// Binding name inside the module
    pub local: String,
    /// Export name, `default` for the default export
    pub exported: String,
    /// Stable record id
    pub id: String,
}

impl HotComponent {
    fn new(module_id: &str, local: &str, exported: &str) -> Self {
        Self {
            local: local.to_string(),
            exported: exported.to_string(),
            id: hmr_id(module_id, exported),
        }
    }
}

/// Offsets of the `export default` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultExport {
    /// Start of the statement
    pub start: u32,
    /// Start of the exported declaration or expression
    pub declaration_start: u32,
}

#[derive(Debug, Clone, Default)]
pub struct HotScan {
    pub components: Vec<HotComponent>,
    /// The default export is an anonymous component
    pub has_default_export: bool,
    pub default_export: Option<DefaultExport>,
}

/// Collect hot components from the top level of `program`.
pub fn scan_hot_components(
    program: &Program<'_>,
    module_id: &str,
    define_component_names: &[String],
) -> HotScan {
    let mut scan = HotScan::default();
    let mut declared: SmallVec<[CompactString; 8]> = SmallVec::new();

    for stmt in program.body.iter() {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                declared.extend(component_bindings(decl, define_component_names));
            }
            Statement::ExportNamedDeclaration(export) => {
                if let Some(oxc_ast::ast::Declaration::VariableDeclaration(decl)) =
                    &export.declaration
                {
                    scan.components.extend(
                        component_bindings(decl, define_component_names)
                            .into_iter()
                            .map(|name| HotComponent::new(module_id, &name, &name)),
                    );
                } else {
                    for spec in export.specifiers.iter() {
                        let exported = match &spec.exported {
                            ModuleExportName::IdentifierName(name) => name.name.as_str(),
                            ModuleExportName::IdentifierReference(name) => name.name.as_str(),
                            ModuleExportName::StringLiteral(_) => continue,
                        };
                        let local = match &spec.local {
                            ModuleExportName::IdentifierName(name) => name.name.as_str(),
                            ModuleExportName::IdentifierReference(name) => name.name.as_str(),
                            ModuleExportName::StringLiteral(lit) => lit.value.as_str(),
                        };
                        if declared.iter().any(|name| name.as_str() == local) {
                            scan.components
                                .push(HotComponent::new(module_id, local, exported));
                        }
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                let declaration = &export.declaration;
                if matches!(declaration, ExportDefaultDeclarationKind::TSInterfaceDeclaration(_)) {
                    continue;
                }
                scan.default_export = Some(DefaultExport {
                    start: export.span.start,
                    declaration_start: declaration.span().start,
                });

                match declaration {
                    ExportDefaultDeclarationKind::Identifier(ident) => {
                        let name = ident.name.as_str();
                        if declared.iter().any(|declared| declared.as_str() == name) {
                            scan.components
                                .push(HotComponent::new(module_id, name, "default"));
                        }
                    }
                    ExportDefaultDeclarationKind::FunctionDeclaration(_) => {
                        scan.has_default_export = true;
                    }
                    other => {
                        if other.as_expression().is_some_and(|expr| {
                            is_component_expression(expr, define_component_names)
                        }) {
                            scan.has_default_export = true;
                        }
                    }
                }
                if scan.has_default_export {
                    scan.components
                        .push(HotComponent::new(module_id, DEFAULT_LOCAL, "default"));
                }
            }
            _ => {}
        }
    }

    tracing::debug!(
        module_id,
        declared = declared.len(),
        hot = scan.components.len(),
        "scanned hot components"
    );
    scan
}

fn component_bindings(
    decl: &VariableDeclaration<'_>,
    define_component_names: &[String],
) -> SmallVec<[CompactString; 2]> {
    decl.declarations
        .iter()
        .filter_map(|declarator| {
            let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind else {
                return None;
            };
            let init = declarator.init.as_ref()?;
            is_component_expression(init, define_component_names)
                .then(|| CompactString::new(ident.name.as_str()))
        })
        .collect()
}

fn is_component_expression(expr: &Expression<'_>, define_component_names: &[String]) -> bool {
    is_define_component_call(expr, define_component_names) || is_functional_node(expr)
}

/// `defineComponent(...)` with a bare identifier callee.
pub fn is_define_component_call(expr: &Expression<'_>, define_component_names: &[String]) -> bool {
    match expr {
        Expression::CallExpression(call) => match &call.callee {
            Expression::Identifier(id) => define_component_names
                .iter()
                .any(|name| name == id.name.as_str()),
            _ => false,
        },
        _ => false,
    }
}

#[inline]
pub fn is_functional_node(expr: &Expression<'_>) -> bool {
    matches!(
        expr,
        Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_)
    )
}
