//! Repurposing analysis workflow.

pub mod graph;
pub mod state;

pub use graph::RepurposingWorkflow;
pub use state::WorkflowState;
