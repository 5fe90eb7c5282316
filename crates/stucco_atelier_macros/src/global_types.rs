//! Ambient declarations for the macro aliases.
//!
//! The emitted text is appended once per file so the type checker sees a
//! signature for every configured alias.

use std::fmt::Write;

use crate::root_map::RootMap;
use crate::MacroOptions;

const STYLE_LANGS: [&str; 5] = ["scss", "sass", "stylus", "less", "postcss"];

/// Component aliases that `vue` already declares.
const BUILTIN_COMPONENT_ALIASES: [&str; 2] = ["defineComponent", "defineVaporComponent"];

/// Build the global declarations for `root_map`.
///
/// An empty map only needs the style declarations, since style macros are
/// valid at module level.
pub fn get_global_types(root_map: &RootMap, options: &MacroOptions) -> String {
    if root_map.is_empty() {
        return format!("\n{}", style_declarations(options));
    }
    alias_declarations(options)
}

/// Declarations for every configured alias, regardless of usage.
pub fn alias_declarations(options: &MacroOptions) -> String {
    let define_style = style_declarations(options);

    let define_slots = options
        .define_slots
        .alias
        .iter()
        .flat_map(|alias| {
            [
                format!("declare function {alias}<T extends Record<string, any>>(): Partial<T>;"),
                format!("declare function {alias}<T extends Record<string, any>>(slots: T): T;"),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n");

    let define_expose = options
        .define_expose
        .alias
        .iter()
        .map(|alias| {
            format!(
                "declare function {alias}<Exposed extends Record<string, any> = Record<string, any>>(exposed?: Exposed): Exposed;"
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let model_aliases = options.define_model.alias.iter().map(|alias| {
        if alias == "defineModel" {
            alias.clone()
        } else {
            format!("defineModel: {alias}")
        }
    });
    let component_aliases = options
        .define_component
        .alias
        .iter()
        .filter(|alias| !BUILTIN_COMPONENT_ALIASES.contains(&alias.as_str()))
        .map(|alias| format!("defineComponent: {alias}"));
    let vue_macros = model_aliases
        .chain(component_aliases)
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::with_capacity(
        define_slots.len() + define_expose.len() + define_style.len() + vue_macros.len() + 64,
    );
    out.push('\n');
    if !vue_macros.is_empty() {
        let _ = write!(out, "declare const {{ {vue_macros} }}: typeof import('vue');");
    }
    out.push('\n');
    out.push_str(&define_slots);
    out.push('\n');
    out.push_str(&define_expose);
    out.push('\n');
    out.push_str(&define_style);
    out.push('\n');
    out
}

fn style_declarations(options: &MacroOptions) -> String {
    if options.define_style.is_empty() {
        return String::new();
    }
    let mut out = options
        .define_style
        .alias
        .iter()
        .map(|alias| {
            let mut decl = format!("declare const {alias}: {{ <T>(...args: __StyleArgs): T;");
            for lang in STYLE_LANGS {
                let _ = write!(decl, " {lang}: <T>(...args: __StyleArgs)=> T;");
            }
            decl.push_str(" };");
            decl
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str("\ntype __StyleArgs = [style: string, options?: { scoped?: boolean }];");
    out
}
