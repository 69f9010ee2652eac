//! Master orchestrator.
//!
//! Owns the worker registry, decides which agents run for a query, and
//! synthesizes the combined findings into a strategic assessment.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::models::{AnalysisContext, SynthesisSummary};
use crate::types::{AppError, AppResult};

use super::internal_docs::InternalDocsAgent;
use super::market::MarketAgent;
use super::patents::PatentsAgent;
use super::trade::TradeAgent;
use super::trials::TrialsAgent;
use super::web::WebAgent;
use super::worker::{llm_analysis, AgentInsights, AgentKind, WorkerAgent};

const SYNTHESIS_SYSTEM_PROMPT: &str = "You are a Senior Pharmaceutical Strategy Director.

You receive analysis from six specialist agents covering market intelligence, trade flows, patents, clinical trials, internal knowledge, and web intelligence. Your job is to synthesize their findings into a coherent drug repurposing assessment.

Structure your synthesis with these sections:
1. Executive Summary
2. Unmet Clinical Needs
3. Research Momentum
4. New Indication Opportunities
5. Patent/FTO Analysis
6. Market Potential
7. Strategic Recommendations

Be decisive. Reconcile conflicting signals across agents and say which evidence you weighed most heavily.";

/// Fan-out coordinator for the six specialist agents.
pub struct MasterAgent {
    workers: Vec<Arc<dyn WorkerAgent>>,
}

impl Default for MasterAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl MasterAgent {
    pub fn new() -> Self {
        Self {
            workers: vec![
                Arc::new(MarketAgent),
                Arc::new(TradeAgent),
                Arc::new(PatentsAgent),
                Arc::new(TrialsAgent),
                Arc::new(InternalDocsAgent),
                Arc::new(WebAgent),
            ],
        }
    }

    /// Every registered agent runs for every query. The full fan-out keeps the
    /// synthesis comparable across molecules.
    pub fn agents_to_run(&self) -> Vec<AgentKind> {
        self.workers.iter().map(|w| w.kind()).collect()
    }

    pub fn worker(&self, kind: AgentKind) -> Option<Arc<dyn WorkerAgent>> {
        self.workers.iter().find(|w| w.kind() == kind).cloned()
    }

    /// Run one worker agent to completion.
    pub async fn execute(
        &self,
        kind: AgentKind,
        molecule: &str,
        ctx: &AnalysisContext,
        config: &Config,
    ) -> AppResult<AgentInsights> {
        let worker = self
            .worker(kind)
            .ok_or_else(|| AppError::Workflow(format!("no worker registered for agent {kind}")))?;
        info!(agent = %kind, molecule, "Executing worker agent");
        worker.analyze(molecule, ctx, config).await
    }

    /// Combine all completed agent outputs into one strategic assessment.
    pub async fn synthesize(
        &self,
        molecule: &str,
        query: &str,
        results: &[AgentInsights],
        failed: &[String],
        config: &Config,
    ) -> Synthesis {
        let mut key_findings = Vec::new();
        let mut recommendations = Vec::new();
        let mut sections = Vec::new();

        for insights in results {
            for finding in &insights.key_findings {
                key_findings.push(format!("{}: {}", insights.agent_name, finding));
            }
            for rec in &insights.recommendations {
                recommendations.push(format!("{}: {}", insights.agent_name, rec));
            }
            sections.push(format!(
                "=== {} ({}) ===\n{}",
                insights.agent_name, insights.role, insights.analysis
            ));
        }

        let prompt = format!(
            "User query: {query}\n\
             Molecule under assessment: {molecule}\n\n\
             Specialist agent analyses:\n\n{analyses}\n\n\
             Aggregated key findings:\n{findings}\n\n\
             Aggregated recommendations:\n{recs}\n\n\
             Produce the full seven-section repurposing synthesis for {molecule}.",
            query = query,
            molecule = molecule,
            analyses = sections.join("\n\n"),
            findings = bulleted(&key_findings),
            recs = bulleted(&recommendations),
        );

        let fallback = offline_synthesis(molecule, results, failed);
        let synthesis = llm_analysis(
            config,
            "Master Agent",
            SYNTHESIS_SYSTEM_PROMPT,
            prompt,
            fallback,
        )
        .await;

        let summary = SynthesisSummary {
            total_agents_executed: results.len(),
            agents_failed: failed.len(),
            key_insights_count: key_findings.len(),
            recommendations_count: recommendations.len(),
        };

        Synthesis {
            text: synthesis,
            key_findings,
            recommendations,
            summary,
        }
    }
}

/// Output of the synthesis step.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub text: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: SynthesisSummary,
}

fn bulleted(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deterministic synthesis used when no LLM is reachable.
fn offline_synthesis(molecule: &str, results: &[AgentInsights], failed: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Repurposing Assessment: {molecule}\n\n"));
    out.push_str("Executive Summary\n");
    out.push_str(&format!(
        "{} of {} specialist analyses completed",
        results.len(),
        results.len() + failed.len()
    ));
    if failed.is_empty() {
        out.push_str(".\n\n");
    } else {
        out.push_str(&format!(" (failed: {}).\n\n", failed.join(", ")));
    }
    for insights in results {
        out.push_str(&format!("{}\n", insights.agent_name));
        for finding in &insights.key_findings {
            out.push_str(&format!("- {finding}\n"));
        }
        out.push('\n');
    }
    out.push_str("Strategic Recommendations\n");
    for insights in results {
        for rec in &insights.recommendations {
            out.push_str(&format!("- {rec}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::AnalysisContext;

    #[test]
    fn registry_holds_all_six_agents() {
        let master = MasterAgent::new();
        let kinds = master.agents_to_run();
        assert_eq!(kinds, AgentKind::all().to_vec());
        for kind in AgentKind::all() {
            assert!(master.worker(kind).is_some());
        }
    }

    #[tokio::test]
    async fn execute_and_synthesize_offline() {
        let master = MasterAgent::new();
        let config = Config::for_tests();
        let ctx = AnalysisContext::default();

        let insights = master
            .execute(AgentKind::Market, "Metformin", &ctx, &config)
            .await
            .unwrap();
        let synthesis = master
            .synthesize(
                "Metformin",
                "Analyze Metformin",
                &[insights],
                &["web".to_string()],
                &config,
            )
            .await;

        assert_eq!(synthesis.summary.total_agents_executed, 1);
        assert_eq!(synthesis.summary.agents_failed, 1);
        assert!(synthesis.text.contains("Metformin"));
        assert!(!synthesis.key_findings.is_empty());
        assert!(synthesis.key_findings[0].starts_with("Market Insights Agent:"));
    }
}
