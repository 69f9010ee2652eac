//! Web intelligence agent.
//!
//! Scans publications, news, and guidelines for repurposing signals.

use async_trait::async_trait;

use crate::config::Config;
use crate::models::AnalysisContext;
use crate::tools::{web_data, WebData};
use crate::types::{AppError, AppResult};

use super::worker::{llm_analysis, offline_summary, AgentInsights, AgentKind, WorkerAgent};

const SYSTEM_PROMPT: &str = "You are a Pharmaceutical Web Intelligence Analyst.

Your expertise includes:
- Scientific literature monitoring
- Regulatory news tracking
- Clinical guideline analysis
- External evidence synthesis

When analyzing web intelligence:
1. Weigh evidence strength across source types
2. Identify regulatory and guideline signals
3. Track research momentum in recent publications
4. Surface external validation for repurposing hypotheses

Always be specific, data-driven, and focus on external evidence quality.";

pub struct WebAgent;

#[async_trait]
impl WorkerAgent for WebAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Web
    }

    fn name(&self) -> &'static str {
        "Web Intelligence Agent"
    }

    fn role(&self) -> &'static str {
        "Web Intelligence Analyst"
    }

    async fn analyze(
        &self,
        molecule: &str,
        ctx: &AnalysisContext,
        config: &Config,
    ) -> AppResult<AgentInsights> {
        let data = web_data(molecule, ctx.target_indication.as_deref());

        let prompt = format!(
            "Analyze the following web intelligence results for {molecule}:\n\n\
             {report}\n\n\
             Based on this data, provide:\n\
             1. External evidence strength assessment\n\
             2. Scientific publication signal analysis\n\
             3. Regulatory and guideline landscape observations\n\
             4. Research momentum evaluation\n\
             5. Evidence-backed repurposing recommendations\n\n\
             Focus on how external evidence supports repurposing hypotheses.",
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
                .map_err(|e| AppError::Internal(format!("serialize web data: {e}")))?,
            analysis,
        })
    }
}

fn key_findings(data: &WebData) -> Vec<String> {
    let mut findings = Vec::new();

    let total = data.total_results;
    if total > 20 {
        findings.push(format!("Strong external evidence base: {total} results"));
    } else if total > 10 {
        findings.push(format!("Moderate external evidence base: {total} results"));
    } else {
        findings.push(format!("Limited external evidence base: {total} results"));
    }

    if let Some((source_type, count)) = data
        .by_source_type
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
    {
        findings.push(format!("Dominant source type: {source_type} ({count} results)"));
    }

    let recent = data.results.iter().filter(|r| r.date.starts_with("2024")).count();
    findings.push(format!("{recent} results published in 2024"));

    findings
}

fn recommendations(data: &WebData) -> Vec<String> {
    let mut recommendations = Vec::new();

    let publications = data
        .by_source_type
        .get("Scientific Publication")
        .copied()
        .unwrap_or(0);
    if publications > 5 {
        recommendations.push(
            "Substantial publication record - build an evidence-based repurposing dossier"
                .to_string(),
        );
    }

    if data.by_source_type.contains_key("Clinical Guideline") {
        recommendations.push(
            "Guideline mentions may support an accelerated regulatory pathway".to_string(),
        );
    }

    if data.by_source_type.contains_key("Regulatory News") {
        recommendations
            .push("Monitor regulatory developments affecting this molecule".to_string());
    }

    let recent = data.results.iter().filter(|r| r.date.starts_with("2024")).count();
    if recent > 5 {
        recommendations
            .push("Active research area - move quickly to capture first-mover value".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(
            "Sparse external signals - commission targeted evidence generation".to_string(),
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn findings_reflect_result_volume() {
        for _ in 0..30 {
            let data = web_data("Semaglutide", None);
            let findings = key_findings(&data);
            if data.total_results > 20 {
                assert!(findings[0].starts_with("Strong external evidence"));
            } else if data.total_results > 10 {
                assert!(findings[0].starts_with("Moderate external evidence"));
            } else {
                assert!(findings[0].starts_with("Limited external evidence"));
            }
        }
    }

    #[tokio::test]
    async fn analyze_completes_without_llm_key() {
        let config = Config::for_tests();
        let insights = WebAgent
            .analyze("Semaglutide", &AnalysisContext::default(), &config)
            .await
            .unwrap();
        assert_eq!(insights.agent_name, "Web Intelligence Agent");
        assert!(!insights.recommendations.is_empty());
    }
}
