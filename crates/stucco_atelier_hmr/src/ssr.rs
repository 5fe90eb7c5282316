//! SSR module registration.

use std::path::Path;

use crate::HotComponent;

/// Produces the code that registers components with the SSR module graph.
pub trait SsrRegister {
    /// Text appended to the module when rendering on the server.
    fn register(
        &self,
        module_id: &str,
        components: &[HotComponent],
        root: Option<&str>,
    ) -> String;
}

/// Registration through the dev server's `ssrRegisterHelper`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViteSsrRegister;

pub const SSR_REGISTER_HELPER: &str = "/__vue-jsx-ssr-register-helper";

impl SsrRegister for ViteSsrRegister {
    fn register(
        &self,
        module_id: &str,
        components: &[HotComponent],
        root: Option<&str>,
    ) -> String {
        let module_path = relative_module_id(module_id, root);
        let mut out = format!(
            "\nimport {{ ssrRegisterHelper }} from \"{}\"\nconst __moduleId = {}",
            SSR_REGISTER_HELPER,
            serde_json::Value::String(module_path)
        );
        for component in components {
            out.push_str("\nssrRegisterHelper(");
            out.push_str(&component.local);
            out.push_str(", __moduleId)");
        }
        out
    }
}

/// `module_id` relative to `root` with forward slashes.
fn relative_module_id(module_id: &str, root: Option<&str>) -> String {
    let relative = root
        .and_then(|root| Path::new(module_id).strip_prefix(root).ok())
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| module_id.to_string());
    relative.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(local: &str) -> HotComponent {
        HotComponent {
            local: local.to_string(),
            exported: local.to_string(),
            id: "0".to_string(),
        }
    }

    #[test]
    fn test_register() {
        let out = ViteSsrRegister.register(
            "/app/src/App.tsx",
            &[component("A"), component("__default__")],
            Some("/app"),
        );
        insta::assert_snapshot!(out.trim(), @r#"
        import { ssrRegisterHelper } from "/__vue-jsx-ssr-register-helper"
        const __moduleId = "src/App.tsx"
        ssrRegisterHelper(A, __moduleId)
        ssrRegisterHelper(__default__, __moduleId)
        "#);
    }

    #[test]
    fn test_module_outside_root() {
        assert_eq!(relative_module_id("/other/App.tsx", Some("/app")), "/other/App.tsx");
        assert_eq!(relative_module_id("/app/App.tsx", None), "/app/App.tsx");
        assert_eq!(relative_module_id("/app/a/b.tsx", Some("/app/")), "a/b.tsx");
    }
}
