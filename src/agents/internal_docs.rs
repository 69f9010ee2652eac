//! Internal insights agent.
//!
//! Mines internal documents for strategy alignment and field signals.

use async_trait::async_trait;

use crate::config::Config;
use crate::models::AnalysisContext;
use crate::tools::internal_docs::{internal_docs_data, top_department, InternalDocsData};
use crate::types::{AppError, AppResult};

use super::worker::{llm_analysis, offline_summary, AgentInsights, AgentKind, WorkerAgent};

const SYSTEM_PROMPT: &str = "You are an Internal Knowledge and Strategy Analyst for a pharmaceutical company.

Your expertise includes:
- Internal document and knowledge base analysis
- Corporate strategy alignment assessment
- Field force and medical affairs insight synthesis
- Portfolio prioritization signals

When analyzing internal documents:
1. Assess alignment with corporate strategy
2. Extract field and medical affairs signals
3. Evaluate internal prioritization status
4. Connect internal knowledge to repurposing decisions

Always be specific, data-driven, and focus on what internal evidence says about repurposing.";

pub struct InternalDocsAgent;

#[async_trait]
impl WorkerAgent for InternalDocsAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Internal
    }

    fn name(&self) -> &'static str {
        "Internal Insights Agent"
    }

    fn role(&self) -> &'static str {
        "Internal Knowledge Analyst"
    }

    async fn analyze(
        &self,
        molecule: &str,
        ctx: &AnalysisContext,
        config: &Config,
    ) -> AppResult<AgentInsights> {
        let data = internal_docs_data(molecule, ctx.document_filter.as_deref());

        let prompt = format!(
            "Analyze the following internal document intelligence for {molecule}:\n\n\
             {report}\n\n\
             Based on this data, provide:\n\
             1. Strategic alignment assessment\n\
             2. Internal prioritization signals\n\
             3. Field force and medical affairs insights\n\
             4. Cross-functional knowledge synthesis\n\
             5. Internally-grounded repurposing recommendations\n\n\
             Focus on how internal evidence supports or challenges repurposing.",
            molecule = molecule,
            report = data.render(),
        );

        let fallback = offline_summary(self.name(), molecule, &data.key_insights);
        let analysis = llm_analysis(config, self.name(), SYSTEM_PROMPT, prompt, fallback).await;

        Ok(AgentInsights {
            agent_name: self.name().to_string(),
            role: self.role().to_string(),
            molecule: molecule.to_string(),
            key_findings: key_findings(&data),
            recommendations: recommendations(&data),
            raw_data: serde_json::to_value(&data)
                .map_err(|e| AppError::Internal(format!("serialize internal docs data: {e}")))?,
            analysis,
        })
    }
}

fn key_findings(data: &InternalDocsData) -> Vec<String> {
    let mut findings = Vec::new();

    findings.push(format!(
        "Strategy alignment: {} ({} internal documents)",
        data.strategy_alignment, data.total_documents
    ));
    findings.push(format!("Priority level: {}", data.priority_level));

    if !data.documents.is_empty() {
        findings.push(format!(
            "Most active department: {}",
            top_department(&data.documents)
        ));
    }

    if !data.field_insights.is_empty() {
        findings.push(format!(
            "{} field insights captured",
            data.field_insights.len()
        ));
    }

    findings
}

fn recommendations(data: &InternalDocsData) -> Vec<String> {
    let mut recommendations = Vec::new();

    match data.strategy_alignment.as_str() {
        "High" => {
            recommendations.push(
                "Strong strategic alignment - prioritize this repurposing opportunity".to_string(),
            );
        }
        "Medium" => {
            recommendations.push(
                "Moderate strategic alignment - evaluate against portfolio priorities"
                    .to_string(),
            );
        }
        _ => {
            recommendations.push(
                "Low strategic alignment - requires strategic review before investment"
                    .to_string(),
            );
        }
    }

    if data.priority_level.contains("Top Priority")
        || data.priority_level.contains("Active Development")
    {
        recommendations
            .push("High internal priority - allocate resources accordingly".to_string());
    } else if data.priority_level.contains("Medium Priority") {
        recommendations.push("Monitor progress and reassess prioritization".to_string());
    }

    if !data.field_insights.is_empty() {
        recommendations
            .push("Incorporate field force signals into indication selection".to_string());
    }

    if data.strategy_alignment == "High" && data.priority_level.contains("Top Priority") {
        recommendations
            .push("Alignment and priority both high - fast-track candidate".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_drives_first_recommendation() {
        for _ in 0..30 {
            let data = internal_docs_data("Atorvastatin", None);
            let recs = recommendations(&data);
            match data.strategy_alignment.as_str() {
                "High" => assert!(recs[0].contains("prioritize")),
                "Medium" => assert!(recs[0].contains("portfolio priorities")),
                _ => assert!(recs[0].contains("strategic review")),
            }
        }
    }

    #[tokio::test]
    async fn analyze_honors_document_filter() {
        let config = Config::for_tests();
        let ctx = AnalysisContext {
            document_filter: Some("Field Intelligence".to_string()),
            ..Default::default()
        };
        let insights = InternalDocsAgent
            .analyze("Atorvastatin", &ctx, &config)
            .await
            .unwrap();
        let docs = insights.raw_data.get("documents").unwrap().as_array().unwrap();
        assert!(!docs.is_empty());
        for doc in docs {
            assert_eq!(doc.get("doc_type").unwrap(), "Field Intelligence");
        }
    }
}
