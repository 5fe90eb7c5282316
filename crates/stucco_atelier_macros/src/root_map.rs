//! Per-root aggregation of discovered macros.
//!
//! A root is the function literal whose body directly contains a macro
//! statement, or `None` for module-level statements. Roots are identified by
//! the pre-order index the resolver assigns when it enters the function, so
//! the map never holds references into the AST.

use oxc_span::Span;
use stucco_carton::{CompactString, FxHashMap};

/// Pre-order index of a function literal within one resolver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(pub u32);

/// The kind of function literal a root was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    ArrowFunction,
    FunctionExpression,
    FunctionDeclaration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    pub id: RootId,
    pub kind: RootKind,
    pub span: Span,
}

/// Map key: `None` collects module-level macros.
pub type RootKey = Option<RootId>;

/// A scoped style macro call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineStyle {
    /// Span of the macro call expression
    pub span: Span,
    /// Language selected through member access, e.g. `defineStyle.scss(...)`
    pub lang: Option<CompactString>,
    /// Bound to a variable, so the result is a CSS modules object
    pub is_css_modules: bool,
}

/// Macros discovered for one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsxMacros {
    /// Type members generated for every model macro, in discovery order
    pub define_model: Vec<String>,
    /// Slots type reference
    pub define_slots: Option<String>,
    /// Exposed type reference
    pub define_expose: Option<String>,
    pub define_style: Vec<DefineStyle>,
    /// Set once the wrapping component call has been rewritten
    pub define_component: bool,
}

impl JsxMacros {
    pub fn is_empty(&self) -> bool {
        self.define_model.is_empty()
            && self.define_slots.is_none()
            && self.define_expose.is_none()
            && self.define_style.is_empty()
            && !self.define_component
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    pub root: Option<Root>,
    pub macros: JsxMacros,
}

/// Insertion-ordered map from root to its macros.
#[derive(Debug, Clone, Default)]
pub struct RootMap {
    index: FxHashMap<RootKey, usize>,
    entries: Vec<RootEntry>,
}

impl RootMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: RootKey) -> Option<&JsxMacros> {
        self.index.get(&key).map(|&i| &self.entries[i].macros)
    }

    /// Macros registered outside any function.
    #[inline]
    pub fn module_level(&self) -> Option<&JsxMacros> {
        self.get(None)
    }

    /// The entry for `root`, created empty on first access.
    pub fn entry(&mut self, root: Option<Root>) -> &mut JsxMacros {
        let key = root.map(|r| r.id);
        let index = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(RootEntry {
                    root,
                    macros: JsxMacros::default(),
                });
                self.index.insert(key, i);
                i
            }
        };
        &mut self.entries[index].macros
    }

    pub fn iter(&self) -> impl Iterator<Item = &RootEntry> {
        self.entries.iter()
    }

    /// Entries that belong to a function root, in discovery order.
    pub fn roots(&self) -> impl Iterator<Item = (&Root, &JsxMacros)> {
        self.entries
            .iter()
            .filter_map(|e| e.root.as_ref().map(|r| (r, &e.macros)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(id: u32) -> Root {
        Root {
            id: RootId(id),
            kind: RootKind::ArrowFunction,
            span: Span::new(id * 10, id * 10 + 5),
        }
    }

    #[test]
    fn test_entry_is_created_once() {
        let mut map = RootMap::new();
        map.entry(Some(root(0))).define_model.push("a".into());
        map.entry(Some(root(0))).define_model.push("b".into());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Some(RootId(0))).unwrap().define_model, vec!["a", "b"]);
    }

    #[test]
    fn test_insertion_order() {
        let mut map = RootMap::new();
        map.entry(Some(root(3)));
        map.entry(None);
        map.entry(Some(root(1)));
        let keys: Vec<_> = map.iter().map(|e| e.root.map(|r| r.id)).collect();
        assert_eq!(keys, vec![Some(RootId(3)), None, Some(RootId(1))]);
        assert_eq!(map.roots().count(), 2);
        assert!(map.module_level().unwrap().is_empty());
    }
}
