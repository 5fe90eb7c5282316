//! Macro alias configuration.
//!
//! Every macro family accepts a list of call identifiers. The lists are fixed
//! for the duration of a pass.

use serde::{Deserialize, Serialize};

use crate::MacroError;

/// Accepted spellings for one macro family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroAlias {
    pub alias: Vec<String>,
}

impl MacroAlias {
    pub fn new<I, S>(alias: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alias: alias.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.alias.iter().any(|a| a == name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alias.is_empty()
    }
}

/// Resolved alias configuration for the five macro families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MacroOptions {
    pub define_model: MacroAlias,
    pub define_slots: MacroAlias,
    pub define_style: MacroAlias,
    pub define_expose: MacroAlias,
    pub define_component: MacroAlias,
}

impl Default for MacroOptions {
    fn default() -> Self {
        Self {
            define_model: MacroAlias::new(["defineModel"]),
            define_slots: MacroAlias::new(["defineSlots"]),
            define_style: MacroAlias::new(["defineStyle"]),
            define_expose: MacroAlias::new(["defineExpose"]),
            define_component: MacroAlias::new(["defineComponent", "defineVaporComponent"]),
        }
    }
}

impl MacroOptions {
    /// Parse options from JSON, filling missing families with defaults.
    pub fn from_json(json: &str) -> Result<Self, MacroError> {
        Ok(serde_json::from_str(json)?)
    }
}
