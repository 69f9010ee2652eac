//! Patent landscape tool (USPTO-style mock search).
//!
//! Patent records plus a Freedom-To-Operate assessment for a molecule.

use chrono::{Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::DATA_PERIOD;

const ASSIGNEES: &[&str] = &[
    "PharmaCorp Inc.",
    "BioTech Solutions Ltd.",
    "Global Pharma Co.",
    "Innovation Labs",
    "Research Institute",
    "Generic Pharma LLC",
];

const PATENT_TYPES: &[&str] = &[
    "Composition of Matter",
    "Method of Use",
    "Formulation",
    "Process",
    "Dosage Form",
];

const JURISDICTIONS: &[&str] = &["US", "EP", "WO", "IN"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatentData {
    pub molecule: String,
    pub therapy_area: Option<String>,
    pub total_patents: usize,
    pub active_patents: usize,
    pub expired_patents: usize,
    pub patents: Vec<PatentRecord>,
    pub fto_assessment: FtoAssessment,
    pub upcoming_expiries: usize,
    pub key_insights: Vec<String>,
    pub data_source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatentRecord {
    pub patent_number: String,
    pub title: String,
    pub assignee: String,
    pub filing_date: String,
    pub expiry_date: String,
    pub status: String, // "Active" or "Expired"
    pub patent_type: String,
    pub jurisdiction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtoAssessment {
    pub status: String, // "Green", "Amber", "Red"
    pub risk_level: String,
    pub reason: String,
    pub blocking_patents: Vec<PatentRecord>,
}

/// Generate mock patent landscape data for a molecule.
pub fn patent_data(molecule: &str, therapy_area: Option<&str>) -> PatentData {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    let num_patents = rng.gen_range(5..=20usize);
    let mut patents = Vec::with_capacity(num_patents);

    for _ in 0..num_patents {
        // 20-year term from a filing date up to 25 years back, so the set mixes
        // active and expired patents.
        let years_ago = rng.gen_range(0..=25i64);
        let filing_date = today - Duration::days(years_ago * 365);
        let expiry_date = filing_date + Duration::days(20 * 365);
        let patent_type = PATENT_TYPES.choose(&mut rng).copied().unwrap_or("Formulation");

        patents.push(PatentRecord {
            patent_number: format!("US{}", rng.gen_range(10_000_000..=99_999_999u32)),
            title: format!("{molecule} {patent_type} Patent"),
            assignee: ASSIGNEES.choose(&mut rng).copied().unwrap_or("PharmaCorp Inc.").to_string(),
            filing_date: filing_date.format("%Y-%m-%d").to_string(),
            expiry_date: expiry_date.format("%Y-%m-%d").to_string(),
            status: if expiry_date > today { "Active" } else { "Expired" }.to_string(),
            patent_type: patent_type.to_string(),
            jurisdiction: JURISDICTIONS.choose(&mut rng).copied().unwrap_or("US").to_string(),
        });
    }

    let active: Vec<PatentRecord> = patents.iter().filter(|p| p.status == "Active").cloned().collect();
    let expired_count = patents.len() - active.len();

    let (fto_status, fto_risk, fto_reason) = match active.len() {
        0 => (
            "Green",
            "Low",
            "No active patents blocking the molecule".to_string(),
        ),
        n if n <= 3 => (
            "Amber",
            "Medium",
            format!("{n} active patents may require licensing or design-around"),
        ),
        n => (
            "Red",
            "High",
            format!("{n} active patents create significant FTO risk"),
        ),
    };

    let five_years_out = today + Duration::days(5 * 365);
    let upcoming_expiries = active
        .iter()
        .filter(|p| {
            NaiveDate::parse_from_str(&p.expiry_date, "%Y-%m-%d")
                .map(|d| d < five_years_out)
                .unwrap_or(false)
        })
        .count();

    let top_assignee = top_assignee(&patents);

    let key_insights = vec![
        format!("FTO Status: {fto_status} ({fto_risk} risk)"),
        format!("{} active patents, {expired_count} expired", active.len()),
        format!("{upcoming_expiries} patents expiring in next 5 years"),
        format!("Top assignee: {top_assignee}"),
    ];

    PatentData {
        molecule: molecule.to_string(),
        therapy_area: therapy_area.map(|s| s.to_string()),
        total_patents: num_patents,
        active_patents: active.len(),
        expired_patents: expired_count,
        fto_assessment: FtoAssessment {
            status: fto_status.to_string(),
            risk_level: fto_risk.to_string(),
            reason: fto_reason,
            blocking_patents: active.iter().take(3).cloned().collect(),
        },
        patents,
        upcoming_expiries,
        key_insights,
        data_source: "USPTO Patent Database (Mock)".to_string(),
        last_updated: DATA_PERIOD.to_string(),
    }
}

fn top_assignee(patents: &[PatentRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for patent in patents {
        *counts.entry(patent.assignee.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "None".to_string())
}

impl PatentData {
    /// Format the record as a readable report for LLM context.
    pub fn render(&self) -> String {
        let blocking = if self.fto_assessment.blocking_patents.is_empty() {
            "  - No blocking patents identified".to_string()
        } else {
            self.fto_assessment
                .blocking_patents
                .iter()
                .map(|p| {
                    format!(
                        "  - {} - {} ({}, expires {})",
                        p.patent_number, p.title, p.assignee, p.expiry_date
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        let samples = self
            .patents
            .iter()
            .take(5)
            .map(|p| {
                format!(
                    "  - {}: {} - {} (expires {})",
                    p.patent_number, p.title, p.status, p.expiry_date
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let insights = self
            .key_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let area = self
            .therapy_area
            .as_ref()
            .map(|a| format!("Therapy Area: {a}\n"))
            .unwrap_or_default();

        format!(
            "Patent Landscape Report for {molecule}\n\
             {area}{rule}\n\n\
             Patent Overview:\n\
             - Total Patents Found: {total}\n\
             - Active Patents: {active}\n\
             - Expired Patents: {expired}\n\
             - Upcoming Expiries (5 years): {upcoming}\n\n\
             FTO Assessment:\n\
             - Status: {fto_status} ({fto_risk} Risk)\n\
             - Assessment: {fto_reason}\n\n\
             Key Blocking Patents:\n{blocking}\n\n\
             Sample Patents:\n{samples}\n\n\
             Key Insights:\n{insights}\n\n\
             Data Source: {source}\n\
             Last Updated: {updated}",
            molecule = self.molecule,
            area = area,
            rule = "=".repeat(60),
            total = self.total_patents,
            active = self.active_patents,
            expired = self.expired_patents,
            upcoming = self.upcoming_expiries,
            fto_status = self.fto_assessment.status,
            fto_risk = self.fto_assessment.risk_level,
            fto_reason = self.fto_assessment.reason,
            blocking = blocking,
            samples = samples,
            insights = insights,
            source = self.data_source,
            updated = self.last_updated,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_and_expired_partition_the_set() {
        for _ in 0..30 {
            let data = patent_data("Metformin", None);
            assert!((5..=20).contains(&data.total_patents));
            assert_eq!(data.active_patents + data.expired_patents, data.total_patents);
            assert_eq!(data.patents.len(), data.total_patents);
        }
    }

    #[test]
    fn fto_status_follows_active_count() {
        for _ in 0..30 {
            let data = patent_data("Aspirin", Some("Cardiovascular"));
            let expected = match data.active_patents {
                0 => "Green",
                n if n <= 3 => "Amber",
                _ => "Red",
            };
            assert_eq!(data.fto_assessment.status, expected);
            assert!(data.fto_assessment.blocking_patents.len() <= 3);
            assert_eq!(data.therapy_area.as_deref(), Some("Cardiovascular"));
        }
    }
}
