//! Web intelligence tool (mock web search).
//!
//! Guidelines, publications, and news hits for a molecule.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{round2, DATA_PERIOD};

const SOURCE_TYPES: &[&str] = &[
    "Scientific Publication",
    "Clinical Guideline",
    "Regulatory News",
    "Market News",
    "Conference Abstract",
    "Review Article",
];

const SOURCES: &[&str] = &[
    "Nature Medicine",
    "The Lancet",
    "New England Journal of Medicine",
    "FDA News Release",
    "EMA Press Release",
    "Pharma Industry News",
    "Clinical Guidelines Database",
    "PubMed",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebData {
    pub molecule: String,
    pub target_indication: Option<String>,
    pub total_results: usize,
    /// Hits sorted by relevance, highest first.
    pub results: Vec<WebHit>,
    pub by_source_type: BTreeMap<String, usize>,
    pub key_insights: Vec<String>,
    pub data_source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    pub source: String,
    pub source_type: String,
    pub date: String,
    pub url: String,
    pub snippet: String,
    pub relevance_score: f64,
}

/// Generate mock web intelligence data for a molecule.
pub fn web_data(molecule: &str, target_indication: Option<&str>) -> WebData {
    let mut rng = rand::thread_rng();

    let num_results = rng.gen_range(10..=25usize);
    let mut results = Vec::with_capacity(num_results);

    for i in 0..num_results {
        let source_type = SOURCE_TYPES.choose(&mut rng).copied().unwrap_or(SOURCE_TYPES[0]);
        let source = SOURCES.choose(&mut rng).copied().unwrap_or(SOURCES[0]);
        let indication = target_indication.unwrap_or("new therapeutic areas");

        let snippets = [
            format!("{molecule} shows promise in {indication}"),
            format!("Recent study demonstrates efficacy of {molecule} in target population"),
            format!("Regulatory approval pathway for {molecule} repurposing appears feasible"),
            format!("Market analysis indicates growing demand for {molecule}-based therapies"),
            format!("Clinical evidence supports {molecule} use in expanded indications"),
        ];
        let kind = ["Analysis", "Study", "Update", "Review"]
            .choose(&mut rng)
            .copied()
            .unwrap_or("Study");

        results.push(WebHit {
            title: format!("{molecule} {source_type}: {kind}"),
            source: source.to_string(),
            source_type: source_type.to_string(),
            date: format!("2024-{:02}-{:02}", rng.gen_range(1..=12), rng.gen_range(1..=28)),
            url: format!(
                "https://example.com/{}-{}",
                molecule.to_lowercase().replace(' ', "-"),
                i + 1
            ),
            snippet: snippets.choose(&mut rng).cloned().unwrap_or_default(),
            relevance_score: round2(rng.gen_range(0.5..1.0)),
        });
    }

    results.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut by_source_type: BTreeMap<String, usize> = BTreeMap::new();
    for hit in &results {
        *by_source_type.entry(hit.source_type.clone()).or_default() += 1;
    }

    let top_source_type = by_source_type
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let recent = results.iter().filter(|r| r.date.starts_with("2024")).count();
    let evidence = ["Strong", "Moderate", "Emerging"]
        .choose(&mut rng)
        .copied()
        .unwrap_or("Moderate");

    let key_insights = vec![
        format!("{num_results} relevant sources found"),
        format!("Top source type: {top_source_type}"),
        format!("Recent publications: {recent} in 2024"),
        format!("Evidence quality: {evidence}"),
    ];

    WebData {
        molecule: molecule.to_string(),
        target_indication: target_indication.map(|s| s.to_string()),
        total_results: num_results,
        results,
        by_source_type,
        key_insights,
        data_source: "Web Intelligence Search (Mock)".to_string(),
        last_updated: DATA_PERIOD.to_string(),
    }
}

impl WebData {
    /// Format the record as a readable report for LLM context.
    pub fn render(&self) -> String {
        let by_type = self
            .by_source_type
            .iter()
            .map(|(source_type, count)| format!("  - {source_type}: {count} results"))
            .collect::<Vec<_>>()
            .join("\n");
        let top = self
            .results
            .iter()
            .take(8)
            .map(|r| format!("  - [{}] {} ({}, {})", r.source_type, r.title, r.source, r.date))
            .collect::<Vec<_>>()
            .join("\n");
        let snippets = self
            .results
            .iter()
            .take(5)
            .map(|r| format!("  - {}", r.snippet))
            .collect::<Vec<_>>()
            .join("\n");
        let insights = self
            .key_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let indication = self
            .target_indication
            .as_ref()
            .map(|t| format!("Target Indication: {t}\n"))
            .unwrap_or_default();

        format!(
            "Web Intelligence Report for {molecule}\n\
             {indication}{rule}\n\n\
             Search Overview:\n\
             - Total Results: {total}\n\
             - Source Types: {types}\n\n\
             Results by Source Type:\n{by_type}\n\n\
             Top Results:\n{top}\n\n\
             Key Evidence Snippets:\n{snippets}\n\n\
             Key Insights:\n{insights}\n\n\
             Data Source: {source}\n\
             Last Updated: {updated}",
            molecule = self.molecule,
            indication = indication,
            rule = "=".repeat(60),
            total = self.total_results,
            types = self.by_source_type.keys().cloned().collect::<Vec<_>>().join(", "),
            by_type = by_type,
            top = top,
            snippets = snippets,
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
    fn results_are_sorted_by_relevance() {
        for _ in 0..30 {
            let data = web_data("Metformin", None);
            assert!((10..=25).contains(&data.total_results));
            assert_eq!(data.results.len(), data.total_results);
            for pair in data.results.windows(2) {
                assert!(pair[0].relevance_score >= pair[1].relevance_score);
            }
            let type_total: usize = data.by_source_type.values().sum();
            assert_eq!(type_total, data.total_results);
        }
    }

    #[test]
    fn target_indication_appears_in_snippets_pool() {
        let data = web_data("Aspirin", Some("Stroke Prevention"));
        assert_eq!(data.target_indication.as_deref(), Some("Stroke Prevention"));
        assert!(data.render().contains("Target Indication: Stroke Prevention"));
    }
}
