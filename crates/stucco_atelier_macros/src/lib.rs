//! Atelier Macros - JSX component macros for type checking.
//!
//! Resolves `defineModel`, `defineSlots`, `defineExpose`, `defineStyle` and
//! `defineComponent` calls inside function components and rewrites them into
//! source that a TypeScript checker can reason about.
//!
//! ## Name Origin
//!
//! **Atelier** (/ˌætəlˈjeɪ/) is an artist's workshop. The "macros" atelier
//! works on the component source itself, before any compilation happens.
//!
//! ## Pipeline
//!
//! ```text
//! source ──parse──> Program ──resolve_macros──> RootMap + Codes
//!                                                  │        │
//!                                     get_global_types    apply
//!                                                  │        │
//!                                                  v        v
//!                                         global types   spliced code
//! ```
//!
//! # Example
//!
//! ```
//! use stucco_atelier_macros::{transform_jsx_macros, MacroOptions};
//!
//! let source = "const Comp = () => { defineExpose({ a: 1 }); return <div /> }";
//! let result = transform_jsx_macros(source, "comp.tsx", &MacroOptions::default()).unwrap();
//! assert!(result.code.contains("const __MACROS_exposed = defineExpose"));
//! assert_eq!(result.root_map.len(), 1);
//! ```

pub mod classify;
pub mod define_component;
mod error;
pub mod global_types;
mod options;
pub mod resolve;
pub mod root_map;

#[cfg(test)]
mod tests;

pub use classify::MacroKind;
pub use error::MacroError;
pub use global_types::{alias_declarations, get_global_types};
pub use options::{MacroAlias, MacroOptions};
pub use resolve::resolve_macros;
pub use root_map::{DefineStyle, JsxMacros, Root, RootEntry, RootId, RootKey, RootKind, RootMap};

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use stucco_carton::Codes;

/// Output of a full macro pass over one file.
#[derive(Debug, Clone)]
pub struct MacroTransformResult {
    /// Source with every splice applied
    pub code: String,
    /// Declarations to append after `code`
    pub global_types: String,
    pub root_map: RootMap,
}

/// Parse `source`, resolve its macros and apply the resulting splices.
pub fn transform_jsx_macros(
    source: &str,
    filename: &str,
    options: &MacroOptions,
) -> Result<MacroTransformResult, MacroError> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(filename).unwrap_or_else(|_| SourceType::tsx());
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(error) = ret.errors.first() {
        return Err(MacroError::Parse {
            filename: filename.to_string(),
            message: error.to_string(),
        });
    }

    let mut codes = Codes::new(source);
    let root_map = resolve_macros(&ret.program, &mut codes, options);
    tracing::debug!(
        filename,
        splices = codes.len(),
        roots = root_map.len(),
        "transformed jsx macros"
    );

    Ok(MacroTransformResult {
        code: codes.apply(),
        global_types: get_global_types(&root_map, options),
        root_map,
    })
}
