//! Agent layer: six specialist workers plus the master orchestrator.
//!
//! Each worker pulls from one data source, runs an LLM analysis over the
//! rendered report (falling back to a tool-derived summary when no key is
//! configured), and emits [`AgentInsights`]. The [`MasterAgent`] fans the
//! workers out and synthesizes their combined output.

pub mod internal_docs;
pub mod market;
pub mod master;
pub mod patents;
pub mod trade;
pub mod trials;
pub mod web;
pub mod worker;

pub use master::{MasterAgent, Synthesis};
pub use worker::{AgentInsights, AgentKind, WorkerAgent};
