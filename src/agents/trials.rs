//! Clinical trials agent.
//!
//! Analyzes trial activity, phase distribution, and emerging indications.

use async_trait::async_trait;

use crate::config::Config;
use crate::models::AnalysisContext;
use crate::tools::{trials_data, TrialsData};
use crate::types::{AppError, AppResult};

use super::worker::{llm_analysis, offline_summary, AgentInsights, AgentKind, WorkerAgent};

const SYSTEM_PROMPT: &str = "You are a Clinical Development Strategist specializing in drug repurposing.

Your expertise includes:
- Clinical trial landscape analysis
- Phase distribution and development stage assessment
- Emerging indication identification
- Clinical evidence evaluation

When analyzing clinical trial data:
1. Assess overall research activity and momentum
2. Identify emerging indications with clinical validation
3. Evaluate phase distribution for development maturity
4. Highlight whitespace opportunities

Always be specific, data-driven, and focus on clinically validated repurposing paths.";

pub struct TrialsAgent;

#[async_trait]
impl WorkerAgent for TrialsAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Trials
    }

    fn name(&self) -> &'static str {
        "Clinical Trials Agent"
    }

    fn role(&self) -> &'static str {
        "Clinical Development Strategist"
    }

    async fn analyze(
        &self,
        molecule: &str,
        ctx: &AnalysisContext,
        config: &Config,
    ) -> AppResult<AgentInsights> {
        let data = trials_data(molecule, ctx.mechanism.as_deref());

        let prompt = format!(
            "Analyze the following clinical trial data for {molecule}:\n\n\
             {report}\n\n\
             Based on this data, provide:\n\
             1. Research activity and momentum assessment\n\
             2. Emerging indication opportunities with clinical backing\n\
             3. Phase distribution and development maturity analysis\n\
             4. Geographic trial footprint observations\n\
             5. Clinical development recommendations for repurposing\n\n\
             Focus on indications with active mid-to-late-stage validation.",
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
                .map_err(|e| AppError::Internal(format!("serialize trials data: {e}")))?,
            analysis,
        })
    }
}

fn key_findings(data: &TrialsData) -> Vec<String> {
    let mut findings = Vec::new();

    let ongoing = data.ongoing_trials;
    if ongoing > 10 {
        findings.push(format!("High research activity: {ongoing} ongoing trials"));
    } else if ongoing > 5 {
        findings.push(format!("Moderate research activity: {ongoing} ongoing trials"));
    } else {
        findings.push(format!("Limited research activity: {ongoing} ongoing trials"));
    }

    findings.push(format!(
        "{} total trials ({} completed, {} terminated)",
        data.total_trials, data.completed_trials, data.terminated_trials
    ));

    if !data.emerging_indications.is_empty() {
        let top: Vec<String> = data
            .emerging_indications
            .iter()
            .take(3)
            .map(|i| i.indication.clone())
            .collect();
        findings.push(format!("Emerging indications: {}", top.join(", ")));
    }

    findings
}

fn recommendations(data: &TrialsData) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !data.emerging_indications.is_empty() {
        let top: Vec<String> = data
            .emerging_indications
            .iter()
            .take(3)
            .map(|i| i.indication.clone())
            .collect();
        recommendations.push(format!(
            "Focus repurposing efforts on emerging indications: {}",
            top.join(", ")
        ));
    }

    let has_mid_late = data
        .phase_distribution
        .keys()
        .any(|phase| phase == "Phase 2" || phase == "Phase 3");
    if has_mid_late {
        recommendations.push(
            "Mid-to-late-stage trials indicate clinical validation of new uses".to_string(),
        );
    }

    if data.emerging_indications.is_empty() && data.ongoing_trials < 5 {
        recommendations.push(
            "Limited trial activity - potential whitespace for first-mover repurposing"
                .to_string(),
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn findings_reflect_activity_bands() {
        for _ in 0..30 {
            let data = trials_data("Metformin", None);
            let findings = key_findings(&data);
            if data.ongoing_trials > 10 {
                assert!(findings[0].starts_with("High research activity"));
            } else if data.ongoing_trials > 5 {
                assert!(findings[0].starts_with("Moderate research activity"));
            } else {
                assert!(findings[0].starts_with("Limited research activity"));
            }
        }
    }

    #[tokio::test]
    async fn analyze_completes_without_llm_key() {
        let config = Config::for_tests();
        let insights = TrialsAgent
            .analyze("Metformin", &AnalysisContext::default(), &config)
            .await
            .unwrap();
        assert_eq!(insights.agent_name, "Clinical Trials Agent");
        assert!(insights.raw_data.get("phase_distribution").is_some());
    }
}
