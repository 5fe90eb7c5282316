//! Identifier helpers for synthesized names.

/// Prefix shared by every helper binding the macro passes synthesize.
pub const HELPER_PREFIX: &str = "__MACROS_";

/// Build a helper identifier of the form `_<kind>_<name>`.
///
/// Characters outside `[A-Za-z0-9_]` are replaced: `-` becomes `_`, anything
/// else becomes its decimal character code.
pub fn to_valid_asset_id(name: &str, kind: &str) -> String {
    let mut out = String::with_capacity(name.len() + kind.len() + 2);
    out.push('_');
    out.push_str(kind);
    out.push('_');
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if c == '-' {
            out.push('_');
        } else {
            out.push_str(&(c as u32).to_string());
        }
    }
    out
}

/// Whether `name` can be written as a bare property key.
pub fn is_simple_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
