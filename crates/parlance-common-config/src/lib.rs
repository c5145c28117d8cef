//! Configuration types for Parlance.
//!
//! This crate provides the configuration the translation engine is
//! constructed from (`app.locale`, `app.fallback_locale`, catalog paths and
//! namespace hints), read from `.parlance/config.yaml`.

pub mod types;
pub mod loader;
pub mod env;


pub use types::*;
pub use loader::*;
pub use env::*;
