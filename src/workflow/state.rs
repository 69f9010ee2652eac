//! Per-run workflow state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agents::{AgentInsights, AgentKind};
use crate::models::{AnalysisContext, ReportData, WorkflowProgress};

/// Mutable state carried through one repurposing analysis run.
///
/// State is per-request: a fresh value is built for every run and never shared
/// between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub molecule: String,
    pub query: String,
    pub context: AnalysisContext,
    /// Insights keyed by agent, filled as each worker completes.
    pub agent_results: HashMap<AgentKind, AgentInsights>,
    pub agents_to_run: Vec<AgentKind>,
    pub agents_completed: Vec<AgentKind>,
    /// Failed agent keys with the error text recorded against them.
    pub agents_failed: Vec<(AgentKind, String)>,
    pub messages: Vec<String>,
    pub current_step: String,
    pub error: Option<String>,
    pub synthesis: Option<String>,
    pub report_data: Option<ReportData>,
}

impl WorkflowState {
    pub fn new(molecule: &str, query: &str, context: AnalysisContext) -> Self {
        Self {
            molecule: molecule.to_string(),
            query: query.to_string(),
            context,
            agent_results: HashMap::new(),
            agents_to_run: Vec::new(),
            agents_completed: Vec::new(),
            agents_failed: Vec::new(),
            messages: Vec::new(),
            current_step: "pending".to_string(),
            error: None,
            synthesis: None,
            report_data: None,
        }
    }

    pub fn enter_step(&mut self, step: &str) {
        self.current_step = step.to_string();
        self.messages.push(format!("step: {step}"));
    }

    pub fn record_completion(&mut self, kind: AgentKind, insights: AgentInsights) {
        self.messages
            .push(format!("agent {kind} completed: {}", insights.agent_name));
        self.agents_completed.push(kind);
        self.agent_results.insert(kind, insights);
    }

    pub fn record_failure(&mut self, kind: AgentKind, error: String) {
        self.messages.push(format!("agent {kind} failed: {error}"));
        self.agents_failed.push((kind, error));
    }

    /// Progress snapshot in the shape the job-status API returns.
    pub fn progress(&self) -> WorkflowProgress {
        WorkflowProgress {
            agents_completed: self.agents_completed.iter().map(|k| k.key().to_string()).collect(),
            agents_failed: self
                .agents_failed
                .iter()
                .map(|(k, _)| k.key().to_string())
                .collect(),
            current_step: self.current_step.clone(),
            messages: self.messages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_tracks_completions_and_failures() {
        let mut state = WorkflowState::new("Aspirin", "analyze", AnalysisContext::default());
        state.enter_step("executing_agents");
        state.record_failure(AgentKind::Web, "boom".to_string());
        assert_eq!(state.agents_failed.len(), 1);
        assert!(state.agent_results.is_empty());

        let progress = state.progress();
        assert_eq!(progress.current_step, "executing_agents");
        assert_eq!(progress.agents_failed, vec!["web"]);
        assert!(progress.messages.iter().any(|m| m.contains("boom")));
    }
}
