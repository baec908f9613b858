//! URL handling module for Site-Corpus
//!
//! This module provides seed URL parsing and origin derivation, which is the
//! boundary the crawler uses when deciding whether a link may be followed.

mod origin;
mod seed;

// Re-export main functions
pub use origin::{is_same_origin, origin_of};
pub use seed::parse_seed;
