//! Macro call classification.
//!
//! Recognizes the statement shapes a macro may take:
//!
//! - `const x = defineModel()` (optionally `defineModel()!` or `$(defineModel())`)
//! - `defineExpose({ ... })` as an expression statement
//! - `defineStyle.scss(...)` member calls for the style family
//!
//! Anything else is not a macro and is left untouched by the resolver.

use oxc_ast::ast::{CallExpression, Declaration, Expression, Statement, VariableDeclaration};

use crate::MacroOptions;

/// Callee used to unwrap reactivity-transform style `$(...)` calls.
const DOLLAR: &str = "$";

/// The macro family a call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    Model,
    Slots,
    Expose,
    Style,
    Component,
}

/// A recognized macro statement.
#[derive(Debug, Clone, Copy)]
pub struct MacroCall<'s, 'a> {
    pub kind: MacroKind,
    /// The macro call itself
    pub call: &'s CallExpression<'a>,
    /// Full initializer or expression the call appears in
    pub initializer: &'s Expression<'a>,
    /// The call was non-null asserted: `defineModel()!`
    pub is_required: bool,
    /// The statement binds the result to a variable
    pub is_variable: bool,
    /// Member name for `defineStyle.<lang>(...)`
    pub lang: Option<&'s str>,
}

/// Classify a statement, returning `None` when it is not a macro.
pub fn classify_statement<'s, 'a>(
    stmt: &'s Statement<'a>,
    options: &MacroOptions,
) -> Option<MacroCall<'s, 'a>> {
    match stmt {
        Statement::VariableDeclaration(decl) => classify_variable_declaration(decl, options),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => {
                classify_variable_declaration(decl, options)
            }
            _ => None,
        },
        Statement::ExpressionStatement(expr_stmt) => {
            let (kind, call, lang) = macro_expression(&expr_stmt.expression, options)?;
            Some(MacroCall {
                kind,
                call,
                initializer: &expr_stmt.expression,
                is_required: matches!(expr_stmt.expression, Expression::TSNonNullExpression(_)),
                is_variable: false,
                lang,
            })
        }
        _ => None,
    }
}

/// The first declarator whose initializer is a macro call wins.
fn classify_variable_declaration<'s, 'a>(
    decl: &'s VariableDeclaration<'a>,
    options: &MacroOptions,
) -> Option<MacroCall<'s, 'a>> {
    decl.declarations.iter().find_map(|declarator| {
        let init = declarator.init.as_ref()?;
        let unwrapped = unwrap_dollar(init);
        let (kind, call, lang) = macro_expression(unwrapped, options)?;
        Some(MacroCall {
            kind,
            call,
            initializer: init,
            is_required: matches!(unwrapped, Expression::TSNonNullExpression(_)),
            is_variable: true,
            lang,
        })
    })
}

/// `$(expr)` → `expr`
fn unwrap_dollar<'s, 'a>(init: &'s Expression<'a>) -> &'s Expression<'a> {
    if let Expression::CallExpression(call) = init {
        if matches!(&call.callee, Expression::Identifier(id) if id.name.as_str() == DOLLAR) {
            if let Some(first) = call.arguments.first().and_then(|a| a.as_expression()) {
                return first;
            }
        }
    }
    init
}

fn macro_expression<'s, 'a>(
    expr: &'s Expression<'a>,
    options: &MacroOptions,
) -> Option<(MacroKind, &'s CallExpression<'a>, Option<&'s str>)> {
    let expr = match expr {
        Expression::TSNonNullExpression(non_null) => &non_null.expression,
        _ => expr,
    };
    let Expression::CallExpression(call) = expr else {
        return None;
    };
    let call: &'s CallExpression<'a> = call;

    match &call.callee {
        Expression::Identifier(id) => {
            let kind = macro_kind(id.name.as_str(), options)?;
            Some((kind, call, None))
        }
        Expression::StaticMemberExpression(member) => match &member.object {
            Expression::Identifier(id) if options.define_style.contains(id.name.as_str()) => {
                Some((MacroKind::Style, call, Some(member.property.name.as_str())))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Family lookup for a bare callee. Style aliases take precedence.
pub fn macro_kind(name: &str, options: &MacroOptions) -> Option<MacroKind> {
    if options.define_style.contains(name) {
        Some(MacroKind::Style)
    } else if options.define_model.contains(name) {
        Some(MacroKind::Model)
    } else if options.define_slots.contains(name) {
        Some(MacroKind::Slots)
    } else if options.define_expose.contains(name) {
        Some(MacroKind::Expose)
    } else if options.define_component.contains(name) {
        Some(MacroKind::Component)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn classify(source: &str) -> Option<(MacroKind, bool, bool, Option<String>)> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        let options = MacroOptions::default();
        let stmt = ret.program.body.first()?;
        classify_statement(stmt, &options).map(|m| {
            (
                m.kind,
                m.is_required,
                m.is_variable,
                m.lang.map(str::to_string),
            )
        })
    }

    #[test]
    fn test_variable_macro() {
        assert_eq!(
            classify("const model = defineModel()"),
            Some((MacroKind::Model, false, true, None))
        );
    }

    #[test]
    fn test_non_null_marks_required() {
        assert_eq!(
            classify("const model = defineModel<string>()!"),
            Some((MacroKind::Model, true, true, None))
        );
    }

    #[test]
    fn test_dollar_unwrap() {
        assert_eq!(
            classify("let model = $(defineModel()!)"),
            Some((MacroKind::Model, true, true, None))
        );
    }

    #[test]
    fn test_expression_statement() {
        assert_eq!(
            classify("defineExpose({ focus })"),
            Some((MacroKind::Expose, false, false, None))
        );
    }

    #[test]
    fn test_style_member_call() {
        assert_eq!(
            classify("defineStyle.scss(`.a { color: red }`)"),
            Some((MacroKind::Style, false, false, Some("scss".to_string())))
        );
    }

    #[test]
    fn test_first_macro_declarator_wins() {
        assert_eq!(
            classify("const a = 1, slots = defineSlots(), m = defineModel()"),
            Some((MacroKind::Slots, false, true, None))
        );
    }

    #[test]
    fn test_not_a_macro() {
        assert_eq!(classify("const a = ref(0)"), None);
        assert_eq!(classify("defineModel.foo()"), None);
        assert_eq!(classify("foo.defineModel()"), None);
        assert_eq!(classify("let a"), None);
        assert_eq!(classify("if (a) defineModel()"), None);
    }

    #[test]
    fn test_component_call() {
        assert_eq!(
            classify("const Comp = defineVaporComponent(() => null)"),
            Some((MacroKind::Component, false, true, None))
        );
    }
}
