//! Daypick Core - Domain logic for the daily-pick generation pipeline
//!
//! Pure building blocks shared by the server and provider crates:
//! - module registry (prompt templates and fallback pools)
//! - content safety filter
//! - model output parsing
//! - response types and source tags

mod module;
mod parse;
mod response;
mod safety;

pub use module::{build_prompt, generic_fallback, pick_fallback_with, ModuleKind};
pub use parse::parse_model_output;
pub use response::{GenerationResponse, Source};
pub use safety::{contains_banned, contains_banned_text};
