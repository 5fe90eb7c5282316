//! Carton - The plasterer's toolbox for Stucco.
//!
//! Shared utilities used by every Stucco pass: the splice log that records
//! text edits against an immutable source buffer, identifier sanitizing for
//! synthesized helper names, and fast hashing for HMR record ids.
//!
//! # Example
//!
//! ```
//! use stucco_carton::Codes;
//!
//! let mut codes = Codes::new("const a = foo()");
//! codes.replace_range(10, 10, "bar + ");
//! assert_eq!(codes.apply(), "const a = bar + foo()");
//! ```

pub mod codes;
pub mod hash;
pub mod ident;

pub use codes::{Codes, Splice};

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::SmallVec;

// Re-export rustc-hash for fast hash maps
pub use rustc_hash::FxHashMap;
