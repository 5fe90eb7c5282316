//! # stucco
//!
//! Stucco - JSX component macros and HMR injection in Rust.
//!
//! ## Name Origin
//!
//! **Stucco** is the fine plaster laid over a rough wall. Component sources
//! get a thin coat of generated code so the type checker and the dev server
//! see what the macros mean, while the structure underneath stays as written.
//!
//! This crate re-exports the Stucco sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`carton`] - Splice log, hashing and identifier utilities
//! - [`atelier_macros`] - JSX macro resolution and global type emission
//! - [`atelier_hmr`] - HMR and SSR registration injection

/// Splice log, hashing and identifier utilities.
pub use stucco_carton as carton;

/// JSX macro resolution and global type emission.
pub use stucco_atelier_macros as atelier_macros;

/// HMR and SSR registration injection.
pub use stucco_atelier_hmr as atelier_hmr;
