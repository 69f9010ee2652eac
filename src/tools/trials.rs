//! Clinical trials tool (ClinicalTrials.gov-style mock registry).
//!
//! Ongoing and completed trial data plus emerging-indication signals.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::DATA_PERIOD;

const SPONSORS: &[&str] = &[
    "National Institutes of Health",
    "PharmaCorp Inc.",
    "University Medical Center",
    "BioTech Solutions",
    "Global Research Foundation",
    "Clinical Research Organization",
];

const PHASES: &[&str] = &["Phase 1", "Phase 2", "Phase 3", "Phase 4", "Not Applicable"];

const STATUSES: &[&str] = &[
    "Recruiting",
    "Active, not recruiting",
    "Completed",
    "Terminated",
    "Suspended",
];

const INDICATIONS: &[&str] = &[
    "Type 2 Diabetes",
    "Cardiovascular Disease",
    "Cancer",
    "Alzheimer's Disease",
    "Rheumatoid Arthritis",
    "Hypertension",
    "Obesity",
    "Chronic Pain",
];

const COUNTRIES: &[&str] = &["USA", "UK", "Canada", "Germany", "France", "India", "China", "Brazil"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialsData {
    pub molecule: String,
    pub mechanism: Option<String>,
    pub total_trials: usize,
    pub ongoing_trials: usize,
    pub completed_trials: usize,
    pub terminated_trials: usize,
    pub trials: Vec<TrialRecord>,
    pub phase_distribution: BTreeMap<String, usize>,
    /// Indications with active Phase 2/3 trials, highest count first.
    pub emerging_indications: Vec<IndicationCount>,
    pub key_insights: Vec<String>,
    pub data_source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial_id: String,
    pub title: String,
    pub sponsor: String,
    pub phase: String,
    pub status: String,
    pub indication: String,
    pub start_date: String,
    pub end_date: String,
    pub countries: Vec<String>,
    pub participants: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicationCount {
    pub indication: String,
    pub count: usize,
}

fn is_ongoing(status: &str) -> bool {
    matches!(status, "Recruiting" | "Active, not recruiting")
}

/// Generate mock clinical trial data for a molecule.
pub fn trials_data(molecule: &str, mechanism: Option<&str>) -> TrialsData {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    let num_trials = rng.gen_range(8..=30usize);
    let mut trials = Vec::with_capacity(num_trials);

    for _ in 0..num_trials {
        let start = today - Duration::days(rng.gen_range(0..=2000));
        let end = start + Duration::days(rng.gen_range(30..=1800));
        let status = STATUSES.choose(&mut rng).copied().unwrap_or("Completed");
        let phase = PHASES.choose(&mut rng).copied().unwrap_or("Phase 2");
        let indication = INDICATIONS.choose(&mut rng).copied().unwrap_or("Cancer");
        let country_count = rng.gen_range(1..=4);
        let countries: Vec<String> = COUNTRIES
            .choose_multiple(&mut rng, country_count)
            .map(|s| s.to_string())
            .collect();

        trials.push(TrialRecord {
            trial_id: format!("NCT{}", rng.gen_range(10_000_000..=99_999_999u32)),
            title: format!("Study of {molecule} in {indication}"),
            sponsor: SPONSORS.choose(&mut rng).copied().unwrap_or(SPONSORS[0]).to_string(),
            phase: phase.to_string(),
            status: status.to_string(),
            indication: indication.to_string(),
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: if end < today {
                end.format("%Y-%m-%d").to_string()
            } else {
                "Ongoing".to_string()
            },
            countries,
            participants: rng.gen_range(20..=5000),
        });
    }

    let ongoing = trials.iter().filter(|t| is_ongoing(&t.status)).count();
    let completed = trials.iter().filter(|t| t.status == "Completed").count();
    let terminated = trials
        .iter()
        .filter(|t| matches!(t.status.as_str(), "Terminated" | "Suspended"))
        .count();

    let mut phase_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for trial in &trials {
        *phase_distribution.entry(trial.phase.clone()).or_default() += 1;
    }

    let mut emerging: BTreeMap<String, usize> = BTreeMap::new();
    for trial in &trials {
        if matches!(trial.phase.as_str(), "Phase 2" | "Phase 3") && is_ongoing(&trial.status) {
            *emerging.entry(trial.indication.clone()).or_default() += 1;
        }
    }
    let mut emerging_indications: Vec<IndicationCount> = emerging
        .into_iter()
        .map(|(indication, count)| IndicationCount { indication, count })
        .collect();
    emerging_indications.sort_by(|a, b| b.count.cmp(&a.count).then(a.indication.cmp(&b.indication)));

    let geographic_spread = trials
        .iter()
        .flat_map(|t| t.countries.iter())
        .collect::<std::collections::HashSet<_>>()
        .len();

    let key_insights = vec![
        format!("{ongoing} ongoing trials, {completed} completed"),
        format!(
            "Phase distribution: {}",
            phase_distribution
                .iter()
                .map(|(phase, count)| format!("{phase}: {count}"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        match emerging_indications.first() {
            Some(top) => format!("Top emerging indication: {}", top.indication),
            None => "No emerging indications identified".to_string(),
        },
        format!("Geographic spread: {geographic_spread} countries"),
    ];

    TrialsData {
        molecule: molecule.to_string(),
        mechanism: mechanism.map(|s| s.to_string()),
        total_trials: num_trials,
        ongoing_trials: ongoing,
        completed_trials: completed,
        terminated_trials: terminated,
        trials,
        phase_distribution,
        emerging_indications,
        key_insights,
        data_source: "ClinicalTrials.gov / WHO ICTRP (Mock)".to_string(),
        last_updated: DATA_PERIOD.to_string(),
    }
}

impl TrialsData {
    /// Format the record as a readable report for LLM context.
    pub fn render(&self) -> String {
        let phases = self
            .phase_distribution
            .iter()
            .map(|(phase, count)| format!("  - {phase}: {count} trials"))
            .collect::<Vec<_>>()
            .join("\n");
        let emerging = if self.emerging_indications.is_empty() {
            "  - No emerging indications identified".to_string()
        } else {
            self.emerging_indications
                .iter()
                .take(5)
                .map(|e| format!("  - {}: {} trials", e.indication, e.count))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let ongoing = self
            .trials
            .iter()
            .filter(|t| is_ongoing(&t.status))
            .take(5)
            .map(|t| format!("  - {}: {} ({}, {})", t.trial_id, t.title, t.phase, t.status))
            .collect::<Vec<_>>()
            .join("\n");
        let insights = self
            .key_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mechanism = self
            .mechanism
            .as_ref()
            .map(|m| format!("Mechanism: {m}\n"))
            .unwrap_or_default();

        format!(
            "Clinical Trials Report for {molecule}\n\
             {mechanism}{rule}\n\n\
             Trial Overview:\n\
             - Total Trials: {total}\n\
             - Ongoing: {ongoing_count}\n\
             - Completed: {completed}\n\
             - Terminated/Suspended: {terminated}\n\n\
             Phase Distribution:\n{phases}\n\n\
             Emerging Indications (Phase 2/3 Active):\n{emerging}\n\n\
             Sample Ongoing Trials:\n{ongoing}\n\n\
             Key Insights:\n{insights}\n\n\
             Data Source: {source}\n\
             Last Updated: {updated}",
            molecule = self.molecule,
            mechanism = mechanism,
            rule = "=".repeat(60),
            total = self.total_trials,
            ongoing_count = self.ongoing_trials,
            completed = self.completed_trials,
            terminated = self.terminated_trials,
            phases = phases,
            emerging = emerging,
            ongoing = ongoing,
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
    fn status_counts_are_consistent() {
        for _ in 0..30 {
            let data = trials_data("Metformin", None);
            assert!((8..=30).contains(&data.total_trials));
            assert_eq!(
                data.ongoing_trials + data.completed_trials + data.terminated_trials,
                data.total_trials
            );
            let phase_total: usize = data.phase_distribution.values().sum();
            assert_eq!(phase_total, data.total_trials);
        }
    }

    #[test]
    fn emerging_indications_only_count_active_phase_2_3() {
        for _ in 0..30 {
            let data = trials_data("Aspirin", Some("COX inhibition"));
            let expected: usize = data
                .trials
                .iter()
                .filter(|t| {
                    matches!(t.phase.as_str(), "Phase 2" | "Phase 3") && is_ongoing(&t.status)
                })
                .count();
            let counted: usize = data.emerging_indications.iter().map(|e| e.count).sum();
            assert_eq!(counted, expected);
            // Sorted by count, highest first
            for pair in data.emerging_indications.windows(2) {
                assert!(pair[0].count >= pair[1].count);
            }
        }
    }
}
