//! Component definition rewriting.
//!
//! `defineComponent(fn, options)` is reshaped so the type checker infers the
//! component from `fn` itself while `options` is still checked against the
//! real `defineComponent` signature:
//!
//! ```text
//! defineComponent((props) => { ... }, { name: 'Foo' })
//! (defineComponent(() => ({}) as any, { name: 'Foo' }), (props) => { ... })
//! ```

use oxc_ast::ast::CallExpression;
use oxc_span::{GetSpan, Span};
use stucco_carton::Codes;

/// The parts of a call expression the rewriter needs, copied out of the AST
/// so they can live on the resolver's ancestor stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub span: Span,
    pub callee: Span,
    pub has_type_arguments: bool,
    pub first_argument: Option<Span>,
    pub second_argument: Option<Span>,
}

impl CallSite {
    pub fn from_call(call: &CallExpression<'_>) -> Self {
        Self {
            span: call.span,
            callee: call.callee.span(),
            has_type_arguments: call.type_arguments.is_some(),
            first_argument: call.arguments.first().map(|a| a.span()),
            second_argument: call.arguments.get(1).map(|a| a.span()),
        }
    }
}

/// Rewrite a wrapping component call whose first argument is `function`.
///
/// Returns `false` without recording any splice when the call does not have
/// that shape.
pub fn transform_define_component(
    codes: &mut Codes<'_>,
    site: &CallSite,
    function: Span,
    is_expression_statement: bool,
) -> bool {
    if site.has_type_arguments || site.first_argument != Some(function) {
        return false;
    }
    let callee = codes.slice(site.callee.start, site.callee.end);
    let Some(open_paren) = codes
        .slice(site.callee.end, function.start)
        .find('(')
        .map(|offset| site.callee.end + offset as u32)
    else {
        return false;
    };

    let close_paren = site.span.end - 1;
    // Splices already recorded inside the options move along with them.
    let moved = codes.take_within(function.end, close_paren);
    let options = site
        .second_argument
        .map(|span| codes.render_range(span.start, span.end, &moved))
        .unwrap_or_default();
    let dropped = moved
        .iter()
        .filter(|s| {
            site.second_argument
                .map_or(true, |span| s.start < span.start || span.end < s.end)
        })
        .count();
    if dropped > 0 {
        tracing::debug!(dropped, "discarding splices in extra component arguments");
    }
    if function.end < close_paren {
        codes.remove(function.end, close_paren);
    }

    let mut head = String::with_capacity(callee.len() + options.len() + 32);
    if is_expression_statement {
        // Guard against ASI joining the previous line to the new paren.
        head.push(';');
    }
    head.push('(');
    head.push_str(callee);
    head.push_str("(() => ({}) as any, ");
    head.push_str(&options);
    head.push_str("), ");
    codes.replace_range(site.span.start, open_paren + 1, head);

    tracing::debug!(
        start = site.span.start,
        end = site.span.end,
        "rewrote component definition"
    );
    true
}
