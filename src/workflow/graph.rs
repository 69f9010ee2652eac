//! The repurposing workflow: plan, fan out, synthesize.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, info};

use crate::agents::{AgentKind, MasterAgent};
use crate::config::Config;
use crate::models::{AgentReportRow, AnalysisContext, ReportData};
use crate::types::{AppError, AppResult};

use super::state::WorkflowState;

/// Fixed plan/execute/synthesize pipeline over the six specialist agents.
pub struct RepurposingWorkflow {
    master: Arc<MasterAgent>,
    config: Arc<Config>,
}

impl RepurposingWorkflow {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            master: Arc::new(MasterAgent::new()),
            config,
        }
    }

    /// Run the full workflow without progress reporting.
    pub async fn run(
        &self,
        molecule: &str,
        query: &str,
        ctx: AnalysisContext,
    ) -> AppResult<WorkflowState> {
        self.run_with_progress(molecule, query, ctx, |_| {}).await
    }

    /// Run the full workflow, invoking `on_update` after every state
    /// transition: planning, each agent completion or failure, synthesis, and
    /// the terminal step.
    pub async fn run_with_progress(
        &self,
        molecule: &str,
        query: &str,
        ctx: AnalysisContext,
        on_update: impl Fn(&WorkflowState),
    ) -> AppResult<WorkflowState> {
        let mut state = WorkflowState::new(molecule, query, ctx);

        // Plan: all six agents run for every query.
        state.enter_step("planning");
        state.agents_to_run = self.master.agents_to_run();
        on_update(&state);

        // Execute: fan out concurrently, collect results as they finish.
        // An agent failure is recorded against the run but never aborts it.
        state.enter_step("executing_agents");
        on_update(&state);

        let mut tasks: JoinSet<(AgentKind, AppResult<crate::agents::AgentInsights>)> =
            JoinSet::new();
        for kind in state.agents_to_run.clone() {
            let master = Arc::clone(&self.master);
            let config = Arc::clone(&self.config);
            let molecule = state.molecule.clone();
            let ctx = state.context.clone();
            tasks.spawn(async move {
                let result = master.execute(kind, &molecule, &ctx, &config).await;
                (kind, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((kind, Ok(insights))) => {
                    info!(agent = %kind, "Agent completed");
                    state.record_completion(kind, insights);
                }
                Ok((kind, Err(e))) => {
                    error!(agent = %kind, error = %e, "Agent failed");
                    state.record_failure(kind, e.to_string());
                }
                Err(e) => {
                    // Task panic or cancellation; the run itself is broken.
                    return Err(AppError::Workflow(format!("agent task join error: {e}")));
                }
            }
            on_update(&state);
        }

        // Synthesize: merge completed agent outputs into one assessment.
        state.enter_step("synthesizing");
        on_update(&state);

        let mut results: Vec<_> = state
            .agents_to_run
            .iter()
            .filter_map(|kind| state.agent_results.get(kind).cloned())
            .collect();
        results.sort_by(|a, b| a.agent_name.cmp(&b.agent_name));

        let failed_names: Vec<String> = state
            .agents_failed
            .iter()
            .map(|(k, _)| k.key().to_string())
            .collect();

        let synthesis = self
            .master
            .synthesize(
                &state.molecule,
                &state.query,
                &results,
                &failed_names,
                &self.config,
            )
            .await;

        let agent_rows = agent_report_rows(&state);
        state.report_data = Some(ReportData {
            molecule: state.molecule.clone(),
            query: state.query.clone(),
            synthesis: synthesis.text.clone(),
            key_findings: synthesis.key_findings,
            recommendations: synthesis.recommendations,
            summary: synthesis.summary,
            agent_results: agent_rows,
        });
        state.synthesis = Some(synthesis.text);

        state.enter_step("completed");
        on_update(&state);

        Ok(state)
    }
}

fn agent_report_rows(state: &WorkflowState) -> Vec<AgentReportRow> {
    state
        .agents_to_run
        .iter()
        .map(|kind| {
            if let Some(insights) = state.agent_results.get(kind) {
                AgentReportRow {
                    agent_name: insights.agent_name.clone(),
                    role: insights.role.clone(),
                    status: "completed".to_string(),
                }
            } else {
                AgentReportRow {
                    agent_name: kind.key().to_string(),
                    role: "unavailable".to_string(),
                    status: "failed".to_string(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn full_run_completes_offline() {
        let workflow = RepurposingWorkflow::new(Arc::new(Config::for_tests()));
        let state = workflow
            .run("Metformin", "Analyze Metformin", AnalysisContext::default())
            .await
            .unwrap();

        assert_eq!(state.current_step, "completed");
        assert_eq!(state.agents_to_run.len(), 6);
        assert_eq!(
            state.agents_completed.len() + state.agents_failed.len(),
            state.agents_to_run.len()
        );
        assert_eq!(state.agents_completed.len(), 6);
        assert!(state.synthesis.is_some());

        let report = state.report_data.unwrap();
        assert_eq!(report.molecule, "Metformin");
        assert_eq!(report.agent_results.len(), 6);
        assert_eq!(report.summary.total_agents_executed, 6);
        assert_eq!(report.summary.agents_failed, 0);
        assert!(!report.key_findings.is_empty());
    }

    #[tokio::test]
    async fn progress_callback_sees_every_transition() {
        let workflow = RepurposingWorkflow::new(Arc::new(Config::for_tests()));
        let steps: Mutex<Vec<String>> = Mutex::new(Vec::new());

        workflow
            .run_with_progress(
                "Aspirin",
                "Analyze Aspirin",
                AnalysisContext::default(),
                |state| steps.lock().unwrap().push(state.current_step.clone()),
            )
            .await
            .unwrap();

        let steps = steps.into_inner().unwrap();
        assert_eq!(steps.first().map(String::as_str), Some("planning"));
        assert_eq!(steps.last().map(String::as_str), Some("completed"));
        // Six agent updates land between execute and synthesize.
        assert_eq!(
            steps.iter().filter(|s| *s == "executing_agents").count(),
            7
        );
        assert!(steps.contains(&"synthesizing".to_string()));
    }
}
