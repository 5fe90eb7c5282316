//! Macro resolution.
//!
//! Walks the program once, depth-first and pre-order, keeping an explicit
//! stack of ancestor frames. Every visited statement, expression and JSX node
//! pushes exactly one frame, so "two levels up" means the same thing it does
//! in the source tree:
//!
//! ```text
//! Function(root) > Body > Statement      // statement belongs to `root`
//! Call > Function(root)                  // `root` is wrapped by the call
//! ```
//!
//! Object and class methods are walked but never become roots.
//!
//! Destructuring assignment targets (`[a = f] = xs`) are not walked.

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, ArrowFunctionExpression, BindingPattern,
    BindingPatternKind, CallExpression, ChainElement, Class, ClassElement, Declaration,
    ExportDefaultDeclarationKind, Expression, ForStatementInit, ForStatementLeft,
    FormalParameters, Function, FunctionBody, JSXAttributeItem, JSXAttributeValue, JSXChild,
    JSXElement, JSXExpressionContainer, MemberExpression, ObjectProperty, ObjectPropertyKind,
    Program, PropertyKind, Statement, TSModuleDeclaration, TSModuleDeclarationBody,
    VariableDeclaration,
};
use oxc_span::{GetSpan, Span};
use stucco_carton::ident::{is_simple_identifier, to_valid_asset_id, HELPER_PREFIX};
use stucco_carton::{Codes, CompactString};

use crate::classify::{classify_statement, MacroCall, MacroKind};
use crate::define_component::{transform_define_component, CallSite};
use crate::root_map::{DefineStyle, Root, RootId, RootKind, RootMap};
use crate::MacroOptions;

/// One entry of the ancestor stack.
#[derive(Debug, Clone, Copy)]
enum Ancestor {
    /// A function literal that can own macros
    Function(Root),
    /// The statement list of a function
    Body,
    Call(CallSite),
    ExpressionStatement,
    Node,
}

/// A component rewrite waiting for its call's arguments to be walked.
#[derive(Debug, Clone, Copy)]
struct PendingRewrite {
    site: CallSite,
    function: Span,
    is_expression_statement: bool,
}

/// Resolve every macro in `program`, recording splices into `codes`.
///
/// The pass is single-use: running it again over the same `codes` records
/// every insertion a second time, and panics as soon as a component
/// rewrite overlaps its earlier splice.
pub fn resolve_macros(
    program: &Program<'_>,
    codes: &mut Codes<'_>,
    options: &MacroOptions,
) -> RootMap {
    let mut resolver = MacroResolver {
        options,
        codes,
        ancestors: Vec::with_capacity(32),
        root_map: RootMap::new(),
        next_root: 0,
        pending: Vec::new(),
    };
    for stmt in program.body.iter() {
        resolver.walk_statement(stmt);
    }
    debug_assert!(resolver.ancestors.is_empty());
    debug_assert!(resolver.pending.is_empty());
    tracing::debug!(roots = resolver.root_map.len(), "resolved jsx macros");
    resolver.root_map
}

struct MacroResolver<'o, 'c, 's> {
    options: &'o MacroOptions,
    codes: &'c mut Codes<'s>,
    ancestors: Vec<Ancestor>,
    root_map: RootMap,
    next_root: u32,
    pending: Vec<PendingRewrite>,
}

impl MacroResolver<'_, '_, '_> {
    /// Run `f` with `ancestor` pushed; the frame is popped on every exit path.
    #[inline]
    fn with_ancestor<R>(&mut self, ancestor: Ancestor, f: impl FnOnce(&mut Self) -> R) -> R {
        self.ancestors.push(ancestor);
        let result = f(self);
        self.ancestors.pop();
        result
    }

    /// `parents[n]`, counting from the innermost frame.
    #[inline]
    fn parent(&self, n: usize) -> Option<&Ancestor> {
        self.ancestors.iter().rev().nth(n)
    }

    /// The root owning a statement at the current depth.
    fn current_root(&self) -> Option<Root> {
        match self.parent(1) {
            Some(Ancestor::Function(root)) => Some(*root),
            _ => None,
        }
    }

    fn new_root(&mut self, kind: RootKind, span: Span) -> Root {
        let id = RootId(self.next_root);
        self.next_root += 1;
        Root { id, kind, span }
    }

    // --- Macro handling ---

    fn visit_macro(&mut self, stmt: &Statement<'_>) {
        let Some(macro_call) = classify_statement(stmt, self.options) else {
            return;
        };
        let root = self.current_root();

        if macro_call.kind == MacroKind::Style {
            let call = macro_call.call;
            self.root_map.entry(root).define_style.push(DefineStyle {
                span: call.span,
                lang: macro_call.lang.map(CompactString::new),
                is_css_modules: macro_call.is_variable,
            });
            return;
        }
        if macro_call.kind == MacroKind::Component {
            // Registers the module-level entry too, so global types are emitted.
            self.root_map.entry(root);
            return;
        }

        let Some(root) = root else {
            tracing::debug!(
                kind = ?macro_call.kind,
                start = macro_call.call.span.start,
                "ignoring macro outside of a function"
            );
            return;
        };

        match macro_call.kind {
            MacroKind::Model => self.transform_model(root, &macro_call),
            MacroKind::Slots => {
                self.codes.insert(
                    macro_call.call.span.start,
                    helper_declaration("const", &helper_name("slots")),
                );
                let macros = self.root_map.entry(Some(root));
                if macros.define_slots.is_some() {
                    tracing::debug!(root = root.id.0, "duplicate slots macro, last one wins");
                }
                macros.define_slots = Some(format!("Partial<typeof {}slots>", HELPER_PREFIX));
            }
            MacroKind::Expose => {
                self.codes.insert(
                    macro_call.call.span.start,
                    helper_declaration("const", &helper_name("exposed")),
                );
                let macros = self.root_map.entry(Some(root));
                if macros.define_expose.is_some() {
                    tracing::debug!(root = root.id.0, "duplicate expose macro, last one wins");
                }
                macros.define_expose = Some(format!("typeof {}exposed", HELPER_PREFIX));
            }
            MacroKind::Style | MacroKind::Component => {}
        }
    }

    fn transform_model(&mut self, root: Root, macro_call: &MacroCall<'_, '_>) {
        let call = macro_call.call;
        let first = call.arguments.first().and_then(|a| a.as_expression());
        let literal_name = first.and_then(string_literal_value);
        let model_name = literal_name.unwrap_or("modelValue").to_string();
        let model_options = if literal_name.is_some() {
            call.arguments.get(1).and_then(|a| a.as_expression())
        } else {
            first
        };

        let mut is_required = macro_call.is_required;
        if let Some(Expression::ObjectExpression(object)) = model_options {
            let mut has_required = false;
            for prop in object.properties.iter() {
                if let ObjectPropertyKind::ObjectProperty(prop) = prop {
                    let key = prop.key.span();
                    if self.codes.slice(key.start, key.end) == "required" {
                        has_required = true;
                        is_required = matches!(&prop.value, Expression::BooleanLiteral(b) if b.value);
                    }
                }
            }
            if !has_required && is_required {
                let close_brace = object.span.end - 1;
                let needs_comma = match object.properties.last() {
                    Some(last) => !self.has_trailing_comma(last.span().end, close_brace),
                    None => false,
                };
                self.codes.insert(
                    close_brace,
                    format!("{} required: true", if needs_comma { "," } else { "" }),
                );
            }
        } else if is_required {
            let close_paren = call.span.end - 1;
            let (offset, needs_comma) = match call.arguments.last() {
                Some(last) => {
                    let end = last.span().end;
                    match self.trailing_comma_offset(end, close_paren) {
                        Some(comma) => (comma + 1, false),
                        None => (end, true),
                    }
                }
                None => (close_paren, false),
            };
            self.codes.insert(
                offset,
                format!("{} {{ required: true }}", if needs_comma { "," } else { "" }),
            );
        }

        let id = to_valid_asset_id(&model_name, &helper_name("model"));
        let type_string = format!("import('vue').UnwrapRef<typeof {}>", id);
        let key = if is_simple_identifier(&model_name) {
            model_name.clone()
        } else {
            format!("'{}'", model_name)
        };
        let mut members = vec![
            format!(
                "{}{} {}",
                key,
                if is_required { ":" } else { "?:" },
                type_string
            ),
            format!(
                "'onUpdate:{}'?: ($event: {}) => any",
                model_name, type_string
            ),
        ];
        if let Some(modifiers) = call
            .type_arguments
            .as_ref()
            .and_then(|params| params.params.get(1))
        {
            let span = modifiers.span();
            let modifiers_key = format!("{}Modifiers", model_name);
            members.push(format!(
                "{}?: Partial<Record<{}, boolean>>",
                if is_simple_identifier(&modifiers_key) {
                    modifiers_key
                } else {
                    format!("'{}'", modifiers_key)
                },
                self.codes.slice(span.start, span.end)
            ));
        }

        if macro_call.is_variable {
            self.codes.insert(
                macro_call.initializer.span().start,
                helper_declaration("let", &id),
            );
        }

        tracing::debug!(root = root.id.0, model = %model_name, required = is_required, "model macro");
        self.root_map
            .entry(Some(root))
            .define_model
            .extend(members);
    }

    fn trailing_comma_offset(&self, from: u32, to: u32) -> Option<u32> {
        let between = self.codes.slice(from, to);
        let trimmed = between.trim_start();
        trimmed
            .starts_with(',')
            .then(|| from + (between.len() - trimmed.len()) as u32)
    }

    fn has_trailing_comma(&self, from: u32, to: u32) -> bool {
        self.trailing_comma_offset(from, to).is_some()
    }

    /// Runs when entering a root whose parent may be a wrapping component call.
    fn detect_define_component(&mut self, root: Root) {
        let Some(Ancestor::Call(site)) = self.parent(0).copied() else {
            return;
        };
        if site.has_type_arguments {
            return;
        }
        let callee = self.codes.slice(site.callee.start, site.callee.end);
        if !self.options.define_component.contains(callee) {
            return;
        }
        let is_expression_statement = matches!(self.parent(1), Some(Ancestor::ExpressionStatement));

        let macros = self.root_map.entry(Some(root));
        if macros.define_component {
            return;
        }
        macros.define_component = true;
        self.pending.push(PendingRewrite {
            site,
            function: root.span,
            is_expression_statement,
        });
    }

    /// Apply the rewrites detected on `call` once its arguments are walked,
    /// so splices inside the options argument are already recorded.
    fn finish_call(&mut self, call: Span) {
        while let Some(rewrite) = self.pending.last().copied() {
            if rewrite.site.span != call {
                break;
            }
            self.pending.pop();
            transform_define_component(
                self.codes,
                &rewrite.site,
                rewrite.function,
                rewrite.is_expression_statement,
            );
        }
    }

    // --- Statements ---

    fn walk_statement(&mut self, stmt: &Statement<'_>) {
        self.visit_macro(stmt);
        let frame = match stmt {
            Statement::ExpressionStatement(_) => Ancestor::ExpressionStatement,
            _ => Ancestor::Node,
        };
        self.with_ancestor(frame, |this| this.walk_statement_children(stmt));
    }

    fn walk_statements(&mut self, stmts: &[Statement<'_>]) {
        for stmt in stmts {
            self.walk_statement(stmt);
        }
    }

    fn walk_statement_children(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                self.walk_expression(&expr_stmt.expression);
            }
            Statement::VariableDeclaration(decl) => self.walk_variable_declaration(decl),
            Statement::FunctionDeclaration(func) => {
                self.walk_function(func, Some(RootKind::FunctionDeclaration));
            }
            Statement::ClassDeclaration(class) => self.walk_class(class),
            Statement::ReturnStatement(ret) => {
                if let Some(arg) = &ret.argument {
                    self.walk_expression(arg);
                }
            }
            Statement::ThrowStatement(throw) => self.walk_expression(&throw.argument),
            Statement::BlockStatement(block) => self.walk_statements(&block.body),
            Statement::IfStatement(if_stmt) => {
                self.walk_expression(&if_stmt.test);
                self.walk_statement(&if_stmt.consequent);
                if let Some(alt) = &if_stmt.alternate {
                    self.walk_statement(alt);
                }
            }
            Statement::ForStatement(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    match init {
                        ForStatementInit::VariableDeclaration(decl) => {
                            self.with_ancestor(Ancestor::Node, |this| {
                                this.walk_variable_declaration(decl)
                            });
                        }
                        _ => {
                            if let Some(expr) = init.as_expression() {
                                self.walk_expression(expr);
                            }
                        }
                    }
                }
                if let Some(test) = &for_stmt.test {
                    self.walk_expression(test);
                }
                if let Some(update) = &for_stmt.update {
                    self.walk_expression(update);
                }
                self.walk_statement(&for_stmt.body);
            }
            Statement::ForInStatement(for_in) => {
                self.walk_for_left(&for_in.left);
                self.walk_expression(&for_in.right);
                self.walk_statement(&for_in.body);
            }
            Statement::ForOfStatement(for_of) => {
                self.walk_for_left(&for_of.left);
                self.walk_expression(&for_of.right);
                self.walk_statement(&for_of.body);
            }
            Statement::WhileStatement(while_stmt) => {
                self.walk_expression(&while_stmt.test);
                self.walk_statement(&while_stmt.body);
            }
            Statement::DoWhileStatement(do_while) => {
                self.walk_statement(&do_while.body);
                self.walk_expression(&do_while.test);
            }
            Statement::SwitchStatement(switch_stmt) => {
                self.walk_expression(&switch_stmt.discriminant);
                for case in switch_stmt.cases.iter() {
                    self.with_ancestor(Ancestor::Node, |this| {
                        if let Some(test) = &case.test {
                            this.walk_expression(test);
                        }
                        this.walk_statements(&case.consequent);
                    });
                }
            }
            Statement::TryStatement(try_stmt) => {
                self.with_ancestor(Ancestor::Node, |this| {
                    this.walk_statements(&try_stmt.block.body)
                });
                if let Some(handler) = &try_stmt.handler {
                    self.with_ancestor(Ancestor::Node, |this| {
                        if let Some(param) = &handler.param {
                            this.walk_binding_pattern(&param.pattern);
                        }
                        this.with_ancestor(Ancestor::Node, |this| {
                            this.walk_statements(&handler.body.body)
                        })
                    });
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.with_ancestor(Ancestor::Node, |this| {
                        this.walk_statements(&finalizer.body)
                    });
                }
            }
            Statement::LabeledStatement(labeled) => self.walk_statement(&labeled.body),
            Statement::WithStatement(with_stmt) => {
                self.walk_expression(&with_stmt.object);
                self.walk_statement(&with_stmt.body);
            }
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::VariableDeclaration(decl)) => {
                    self.walk_variable_declaration(decl);
                }
                Some(Declaration::FunctionDeclaration(func)) => {
                    self.walk_function(func, Some(RootKind::FunctionDeclaration));
                }
                Some(Declaration::ClassDeclaration(class)) => self.walk_class(class),
                Some(Declaration::TSModuleDeclaration(module)) => self.walk_ts_module(module),
                _ => {}
            },
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    self.walk_function(func, Some(RootKind::FunctionDeclaration));
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => self.walk_class(class),
                other => {
                    if let Some(expr) = other.as_expression() {
                        self.walk_expression(expr);
                    }
                }
            },
            Statement::TSModuleDeclaration(module) => self.walk_ts_module(module),
            _ => {}
        }
    }

    fn walk_ts_module(&mut self, module: &TSModuleDeclaration<'_>) {
        match &module.body {
            Some(TSModuleDeclarationBody::TSModuleBlock(block)) => {
                self.with_ancestor(Ancestor::Node, |this| this.walk_statements(&block.body));
            }
            Some(TSModuleDeclarationBody::TSModuleDeclaration(nested)) => {
                self.with_ancestor(Ancestor::Node, |this| this.walk_ts_module(nested));
            }
            None => {}
        }
    }

    fn walk_variable_declaration(&mut self, decl: &VariableDeclaration<'_>) {
        for declarator in decl.declarations.iter() {
            self.walk_binding_pattern(&declarator.id);
            if let Some(init) = &declarator.init {
                self.with_ancestor(Ancestor::Node, |this| this.walk_expression(init));
            }
        }
    }

    fn walk_for_left(&mut self, left: &ForStatementLeft<'_>) {
        if let ForStatementLeft::VariableDeclaration(decl) = left {
            self.with_ancestor(Ancestor::Node, |this| this.walk_variable_declaration(decl));
        }
    }

    /// Default values and computed keys inside a binding pattern.
    fn walk_binding_pattern(&mut self, pattern: &BindingPattern<'_>) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(_) => {}
            BindingPatternKind::AssignmentPattern(assign) => {
                self.with_ancestor(Ancestor::Node, |this| {
                    this.walk_binding_pattern(&assign.left);
                    this.walk_expression(&assign.right);
                });
            }
            BindingPatternKind::ObjectPattern(object) => {
                self.with_ancestor(Ancestor::Node, |this| {
                    for prop in object.properties.iter() {
                        this.with_ancestor(Ancestor::Node, |this| {
                            if prop.computed {
                                if let Some(key) = prop.key.as_expression() {
                                    this.walk_expression(key);
                                }
                            }
                            this.walk_binding_pattern(&prop.value);
                        });
                    }
                    if let Some(rest) = &object.rest {
                        this.walk_binding_pattern(&rest.argument);
                    }
                });
            }
            BindingPatternKind::ArrayPattern(array) => {
                self.with_ancestor(Ancestor::Node, |this| {
                    for element in array.elements.iter().flatten() {
                        this.walk_binding_pattern(element);
                    }
                    if let Some(rest) = &array.rest {
                        this.walk_binding_pattern(&rest.argument);
                    }
                });
            }
        }
    }

    fn walk_params(&mut self, params: &FormalParameters<'_>) {
        for param in params.items.iter() {
            self.with_ancestor(Ancestor::Node, |this| this.walk_binding_pattern(&param.pattern));
        }
        if let Some(rest) = &params.rest {
            self.with_ancestor(Ancestor::Node, |this| this.walk_binding_pattern(&rest.argument));
        }
    }

    // --- Functions ---

    fn walk_function(&mut self, func: &Function<'_>, kind: Option<RootKind>) {
        let Some(body) = &func.body else {
            return;
        };
        let root = kind.map(|kind| self.new_root(kind, func.span));
        let has_grandchildren = !params_are_empty(&func.params) || !body.statements.is_empty();
        self.enter_function(root, has_grandchildren, |this| {
            this.walk_params(&func.params);
            this.walk_body(body);
        });
    }

    fn walk_arrow(&mut self, arrow: &ArrowFunctionExpression<'_>) {
        let root = self.new_root(RootKind::ArrowFunction, arrow.span);
        let has_grandchildren = !params_are_empty(&arrow.params)
            || if arrow.expression {
                arrow.get_expression().is_some_and(has_children)
            } else {
                !arrow.body.statements.is_empty()
            };
        self.enter_function(Some(root), has_grandchildren, |this| {
            this.walk_params(&arrow.params);
            if arrow.expression {
                // Concise body: the expression hangs directly off the arrow.
                if let Some(Statement::ExpressionStatement(expr_stmt)) =
                    arrow.body.statements.first()
                {
                    this.walk_expression(&expr_stmt.expression);
                }
            } else {
                this.walk_body(&arrow.body);
            }
        });
    }

    fn enter_function(
        &mut self,
        root: Option<Root>,
        has_grandchildren: bool,
        f: impl FnOnce(&mut Self),
    ) {
        match root {
            Some(root) => {
                if has_grandchildren {
                    self.detect_define_component(root);
                }
                self.with_ancestor(Ancestor::Function(root), f);
            }
            None => self.with_ancestor(Ancestor::Node, f),
        }
    }

    fn walk_body(&mut self, body: &FunctionBody<'_>) {
        self.with_ancestor(Ancestor::Body, |this| this.walk_statements(&body.statements));
    }

    fn walk_class(&mut self, class: &Class<'_>) {
        if let Some(super_class) = &class.super_class {
            self.walk_expression(super_class);
        }
        self.with_ancestor(Ancestor::Node, |this| {
            for element in class.body.body.iter() {
                this.with_ancestor(Ancestor::Node, |this| match element {
                    ClassElement::MethodDefinition(method) => this.walk_function(&method.value, None),
                    ClassElement::PropertyDefinition(prop) => {
                        if let Some(value) = &prop.value {
                            this.walk_expression(value);
                        }
                    }
                    ClassElement::AccessorProperty(prop) => {
                        if let Some(value) = &prop.value {
                            this.walk_expression(value);
                        }
                    }
                    ClassElement::StaticBlock(block) => this.walk_statements(&block.body),
                    _ => {}
                });
            }
        });
    }

    // --- Expressions ---

    fn walk_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::ArrowFunctionExpression(arrow) => self.walk_arrow(arrow),
            Expression::FunctionExpression(func) => {
                self.walk_function(func, Some(RootKind::FunctionExpression));
            }
            Expression::CallExpression(call) => self.walk_call(call),
            _ => self.with_ancestor(Ancestor::Node, |this| this.walk_expression_children(expr)),
        }
    }

    fn walk_call(&mut self, call: &CallExpression<'_>) {
        self.with_ancestor(Ancestor::Call(CallSite::from_call(call)), |this| {
            this.walk_expression(&call.callee);
            for arg in call.arguments.iter() {
                match arg.as_expression() {
                    Some(expr) => this.walk_expression(expr),
                    None => this.walk_spread_argument(arg),
                }
            }
        });
        self.finish_call(call.span);
    }

    fn walk_spread_argument(&mut self, arg: &Argument<'_>) {
        if let Argument::SpreadElement(spread) = arg {
            self.with_ancestor(Ancestor::Node, |this| this.walk_expression(&spread.argument));
        }
    }

    fn walk_member_expression(&mut self, member: &MemberExpression<'_>) {
        match member {
            MemberExpression::ComputedMemberExpression(member) => {
                self.walk_expression(&member.object);
                self.walk_expression(&member.expression);
            }
            MemberExpression::StaticMemberExpression(member) => {
                self.walk_expression(&member.object)
            }
            MemberExpression::PrivateFieldExpression(field) => self.walk_expression(&field.object),
        }
    }

    fn walk_expression_children(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::StaticMemberExpression(member) => self.walk_expression(&member.object),
            Expression::ComputedMemberExpression(member) => {
                self.walk_expression(&member.object);
                self.walk_expression(&member.expression);
            }
            Expression::PrivateFieldExpression(field) => self.walk_expression(&field.object),
            Expression::ChainExpression(chain) => match &chain.expression {
                ChainElement::CallExpression(call) => self.walk_call(call),
                ChainElement::TSNonNullExpression(non_null) => {
                    self.walk_expression(&non_null.expression)
                }
                element => {
                    if let Some(member) = element.as_member_expression() {
                        self.walk_member_expression(member);
                    }
                }
            },
            Expression::NewExpression(new_expr) => {
                self.walk_expression(&new_expr.callee);
                for arg in new_expr.arguments.iter() {
                    match arg.as_expression() {
                        Some(expr) => self.walk_expression(expr),
                        None => self.walk_spread_argument(arg),
                    }
                }
            }
            Expression::ConditionalExpression(cond) => {
                self.walk_expression(&cond.test);
                self.walk_expression(&cond.consequent);
                self.walk_expression(&cond.alternate);
            }
            Expression::LogicalExpression(logical) => {
                self.walk_expression(&logical.left);
                self.walk_expression(&logical.right);
            }
            Expression::BinaryExpression(binary) => {
                self.walk_expression(&binary.left);
                self.walk_expression(&binary.right);
            }
            Expression::ArrayExpression(arr) => {
                for elem in arr.elements.iter() {
                    match elem {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            self.with_ancestor(Ancestor::Node, |this| {
                                this.walk_expression(&spread.argument)
                            });
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        _ => {
                            if let Some(expr) = elem.as_expression() {
                                self.walk_expression(expr);
                            }
                        }
                    }
                }
            }
            Expression::ObjectExpression(obj) => {
                for prop in obj.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(prop) => self.walk_object_property(prop),
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.with_ancestor(Ancestor::Node, |this| {
                                this.walk_expression(&spread.argument)
                            });
                        }
                    }
                }
            }
            Expression::AwaitExpression(await_expr) => self.walk_expression(&await_expr.argument),
            Expression::UnaryExpression(unary) => self.walk_expression(&unary.argument),
            Expression::YieldExpression(yield_expr) => {
                if let Some(arg) = &yield_expr.argument {
                    self.walk_expression(arg);
                }
            }
            Expression::SequenceExpression(seq) => {
                for expr in seq.expressions.iter() {
                    self.walk_expression(expr);
                }
            }
            Expression::ParenthesizedExpression(paren) => self.walk_expression(&paren.expression),
            Expression::AssignmentExpression(assign) => {
                if let Some(member) = assign
                    .left
                    .as_simple_assignment_target()
                    .and_then(|target| target.as_member_expression())
                {
                    self.with_ancestor(Ancestor::Node, |this| this.walk_member_expression(member));
                }
                self.walk_expression(&assign.right);
            }
            Expression::ImportExpression(import) => {
                self.walk_expression(&import.source);
                for option in import.options.iter() {
                    self.walk_expression(option);
                }
            }
            Expression::TemplateLiteral(template) => {
                for expr in template.expressions.iter() {
                    self.walk_expression(expr);
                }
            }
            Expression::TaggedTemplateExpression(tagged) => {
                self.walk_expression(&tagged.tag);
                for expr in tagged.quasi.expressions.iter() {
                    self.walk_expression(expr);
                }
            }
            Expression::ClassExpression(class) => self.walk_class(class),
            Expression::TSAsExpression(ts_as) => self.walk_expression(&ts_as.expression),
            Expression::TSSatisfiesExpression(ts_satisfies) => {
                self.walk_expression(&ts_satisfies.expression)
            }
            Expression::TSNonNullExpression(non_null) => self.walk_expression(&non_null.expression),
            Expression::TSTypeAssertion(assertion) => self.walk_expression(&assertion.expression),
            Expression::JSXElement(element) => self.walk_jsx_element_children(element),
            Expression::JSXFragment(fragment) => self.walk_jsx_children(&fragment.children),
            _ => {}
        }
    }

    fn walk_object_property(&mut self, prop: &ObjectProperty<'_>) {
        self.with_ancestor(Ancestor::Node, |this| {
            if prop.computed {
                if let Some(key) = prop.key.as_expression() {
                    this.walk_expression(key);
                }
            }
            let is_method = prop.method || prop.kind != PropertyKind::Init;
            match &prop.value {
                Expression::FunctionExpression(func) if is_method => this.walk_function(func, None),
                value => this.walk_expression(value),
            }
        });
    }

    // --- JSX ---

    fn walk_jsx_element(&mut self, element: &JSXElement<'_>) {
        self.with_ancestor(Ancestor::Node, |this| this.walk_jsx_element_children(element));
    }

    fn walk_jsx_element_children(&mut self, element: &JSXElement<'_>) {
        for attr in element.opening_element.attributes.iter() {
            self.with_ancestor(Ancestor::Node, |this| match attr {
                JSXAttributeItem::Attribute(attr) => match &attr.value {
                    Some(JSXAttributeValue::ExpressionContainer(container)) => {
                        this.walk_jsx_expression_container(container)
                    }
                    Some(JSXAttributeValue::Element(element)) => this.walk_jsx_element(element),
                    Some(JSXAttributeValue::Fragment(fragment)) => {
                        this.with_ancestor(Ancestor::Node, |this| {
                            this.walk_jsx_children(&fragment.children)
                        })
                    }
                    _ => {}
                },
                JSXAttributeItem::SpreadAttribute(spread) => this.walk_expression(&spread.argument),
            });
        }
        self.walk_jsx_children(&element.children);
    }

    fn walk_jsx_children(&mut self, children: &[JSXChild<'_>]) {
        for child in children {
            match child {
                JSXChild::Element(element) => self.walk_jsx_element(element),
                JSXChild::Fragment(fragment) => self.with_ancestor(Ancestor::Node, |this| {
                    this.walk_jsx_children(&fragment.children)
                }),
                JSXChild::ExpressionContainer(container) => {
                    self.walk_jsx_expression_container(container)
                }
                JSXChild::Spread(spread) => self.with_ancestor(Ancestor::Node, |this| {
                    this.walk_expression(&spread.expression)
                }),
                JSXChild::Text(_) => {}
            }
        }
    }

    fn walk_jsx_expression_container(&mut self, container: &JSXExpressionContainer<'_>) {
        self.with_ancestor(Ancestor::Node, |this| {
            if let Some(expr) = container.expression.as_expression() {
                this.walk_expression(expr);
            }
        });
    }
}

#[inline]
fn params_are_empty(params: &FormalParameters<'_>) -> bool {
    params.items.is_empty() && params.rest.is_none()
}

/// Whether a concise arrow body has any child nodes of its own.
fn has_children(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegExpLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::Identifier(_)
        | Expression::ThisExpression(_)
        | Expression::Super(_) => false,
        Expression::TemplateLiteral(template) => !template.expressions.is_empty(),
        _ => true,
    }
}

#[inline]
fn helper_name(suffix: &str) -> String {
    format!("{}{}", HELPER_PREFIX, suffix)
}

/// `// @ts-ignore` keeps the forward reference from being reported before
/// the helper is declared.
fn helper_declaration(keyword: &str, id: &str) -> String {
    format!("// @ts-ignore\n{id};\n{keyword} {id} = ")
}

/// Value of a string literal or a substitution-free template literal.
fn string_literal_value<'s>(expr: &'s Expression<'_>) -> Option<&'s str> {
    match expr {
        Expression::StringLiteral(lit) => Some(lit.value.as_str()),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => {
            let quasi = template.quasis.first()?;
            Some(
                quasi
                    .value
                    .cooked
                    .as_ref()
                    .unwrap_or(&quasi.value.raw)
                    .as_str(),
            )
        }
        _ => None,
    }
}
