//! Daypick Server - HTTP surface and generation orchestrator
//!
//! Turns a `{module}` request into a validated, safety-checked, JSON-shaped
//! result: prompt lookup, one upstream call with a quota-driven model
//! downgrade, output recovery, double safety filtering, and deterministic
//! local fallbacks on every failure branch.

mod config;
mod orchestrator;
mod server;

pub use config::ServerConfig;
pub use orchestrator::{Orchestrator, PipelineError, PipelineReply};
pub use server::serve;
