//! HMR and SSR code injection.
//!
//! Runs on compiled module output. The injected code is appended after the
//! module body; the only in-place edit is turning an anonymous default
//! export into a `__default__` binding so it can be referenced.

use std::fmt::Write;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use stucco_carton::Codes;

use crate::scan::{scan_hot_components, DEFAULT_LOCAL};
use crate::ssr::{SsrRegister, ViteSsrRegister};
use crate::{HmrError, HmrOptions, HotComponent};

/// Modules requested as the script part of an SFC are handled elsewhere.
const SFC_SCRIPT_QUERY: &str = "?vue&type=script";

pub struct HmrInjector<R = ViteSsrRegister> {
    options: HmrOptions,
    ssr_register: R,
}

impl HmrInjector {
    pub fn new(options: HmrOptions) -> Self {
        Self::with_ssr_register(options, ViteSsrRegister)
    }
}

impl<R: SsrRegister> HmrInjector<R> {
    pub fn with_ssr_register(options: HmrOptions, ssr_register: R) -> Self {
        Self {
            options,
            ssr_register,
        }
    }

    /// Inject HMR records (or SSR registration) into `code` in place.
    ///
    /// Returns the components that were registered. `code` is untouched when
    /// the module has none.
    pub fn inject(
        &self,
        code: &mut String,
        module_id: &str,
    ) -> Result<Vec<HotComponent>, HmrError> {
        let scan = {
            let allocator = Allocator::default();
            let path = module_id.split('?').next().unwrap_or(module_id);
            let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs());
            let ret = Parser::new(&allocator, code.as_str(), source_type).parse();
            if let Some(error) = ret.errors.first() {
                return Err(HmrError::Parse {
                    id: module_id.to_string(),
                    message: error.to_string(),
                });
            }
            scan_hot_components(
                &ret.program,
                module_id,
                &self.options.define_component_names,
            )
        };

        if scan.components.is_empty() {
            return Ok(Vec::new());
        }
        let ssr = self.options.ssr;

        let mut output = match scan.default_export {
            Some(default_export) if scan.has_default_export || ssr => {
                let mut codes = Codes::new(code.as_str());
                codes.replace_range(
                    default_export.start,
                    default_export.declaration_start,
                    format!("const {} = ", DEFAULT_LOCAL),
                );
                let mut output = codes.apply();
                let _ = write!(output, "\nexport default {};", DEFAULT_LOCAL);
                output
            }
            _ => std::mem::take(code),
        };

        if !ssr && !module_id.contains(SFC_SCRIPT_QUERY) {
            append_hmr_runtime(&mut output, &scan.components);
        }
        if ssr {
            output.push_str(&self.ssr_register.register(
                module_id,
                &scan.components,
                self.options.root.as_deref(),
            ));
        }

        tracing::debug!(
            module_id,
            components = scan.components.len(),
            ssr,
            "injected hot components"
        );
        *code = output;
        Ok(scan.components)
    }
}

fn append_hmr_runtime(out: &mut String, components: &[HotComponent]) {
    let mut callbacks = String::new();
    for HotComponent { local, exported, id } in components {
        let _ = write!(
            out,
            "\n{local}.__hmrId = \"{id}\";\n__VUE_HMR_RUNTIME__.createRecord(\"{id}\", {local});"
        );
        let _ = write!(
            callbacks,
            "\n    if (typeof mod['{exported}'] === 'function') {{\n      __VUE_HMR_RUNTIME__.rerender(mod['{exported}'].__hmrId, mod['{exported}']);\n    }} else {{\n      __VUE_HMR_RUNTIME__.reload(mod['{exported}'].__hmrId, mod['{exported}']);\n    }};"
        );
    }
    let _ = write!(
        out,
        "\nif (import.meta.hot) {{\n  import.meta.hot.accept(mod => {{{callbacks}\n  }});\n}}"
    );
}
