//! Language code handling.
//!
//! This module provides:
//! - Normalization of language-code spelling (case and separator style)
//! - Display formatting of resolved codes (`en-us` -> `en-US`)
//! - Fallback expansion from most specific to the configured default

mod fallback;
mod normalize;

pub use fallback::fallback_chain;
pub use normalize::{display, normalize};
