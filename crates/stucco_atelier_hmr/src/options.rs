use serde::{Deserialize, Serialize};

use crate::HmrError;

/// Injector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HmrOptions {
    /// Emit SSR registration instead of the HMR runtime calls
    pub ssr: bool,
    /// Project root that SSR module ids are made relative to
    pub root: Option<String>,
    /// Callees whose result is treated as a component
    pub define_component_names: Vec<String>,
}

impl Default for HmrOptions {
    fn default() -> Self {
        Self {
            ssr: false,
            root: None,
            define_component_names: vec![
                "defineComponent".to_string(),
                "defineVaporComponent".to_string(),
            ],
        }
    }
}

impl HmrOptions {
    pub fn from_json(json: &str) -> Result<Self, HmrError> {
        Ok(serde_json::from_str(json)?)
    }
}
