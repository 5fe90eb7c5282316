//! Atelier HMR - Hot module replacement for JSX components.
//!
//! Finds the components a compiled module defines at the top level and
//! appends the code that registers them with the Vue HMR runtime, or with
//! the SSR module graph when compiling for the server.
//!
//! # Example
//!
//! ```
//! use stucco_atelier_hmr::{HmrInjector, HmrOptions};
//!
//! let injector = HmrInjector::new(HmrOptions::default());
//! let mut code = String::from("export const Foo = defineVaporComponent(() => null)");
//! let components = injector.inject(&mut code, "/src/Foo.tsx").unwrap();
//! assert_eq!(components[0].exported, "Foo");
//! assert!(code.contains("__VUE_HMR_RUNTIME__.createRecord"));
//! ```

mod error;
pub mod inject;
mod options;
pub mod scan;
pub mod ssr;

pub use error::HmrError;
pub use inject::HmrInjector;
pub use options::HmrOptions;
pub use scan::{scan_hot_components, HotComponent, HotScan};
pub use ssr::{SsrRegister, ViteSsrRegister};
