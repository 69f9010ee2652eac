//! Internal insights tool (mock document repository).
//!
//! Strategy decks, field intelligence, and internal priority signals.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{round2, DATA_PERIOD};

const DOCUMENT_TYPES: &[&str] = &[
    "Strategy Deck",
    "Market Research Report",
    "Field Intelligence",
    "Competitive Analysis",
    "Regulatory Brief",
    "Portfolio Review",
];

const DEPARTMENTS: &[&str] = &[
    "Business Development",
    "Market Intelligence",
    "Regulatory Affairs",
    "R&D Strategy",
    "Commercial Planning",
];

const ALIGNMENT_LEVELS: &[&str] = &["High", "Medium", "Low"];

const PRIORITY_LEVELS: &[&str] = &[
    "Top Priority - Active Development",
    "Medium Priority - Under Evaluation",
    "Low Priority - On Hold",
    "Strategic Interest - Monitoring",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalDocsData {
    pub molecule: String,
    pub document_filter: Option<String>,
    pub total_documents: usize,
    pub documents: Vec<InternalDocument>,
    pub strategy_alignment: String,
    pub priority_level: String,
    pub field_insights: Vec<String>,
    pub key_insights: Vec<String>,
    pub data_source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalDocument {
    pub document_id: String,
    pub title: String,
    pub doc_type: String,
    pub department: String,
    pub date: String,
    pub key_takeaways: Vec<String>,
    pub relevance_score: f64,
}

/// Generate mock internal document data for a molecule.
pub fn internal_docs_data(molecule: &str, document_filter: Option<&str>) -> InternalDocsData {
    let mut rng = rand::thread_rng();

    let num_docs = rng.gen_range(3..=12usize);
    let mut documents = Vec::with_capacity(num_docs);

    for _ in 0..num_docs {
        // A filter pins the document type; otherwise sample across the repository.
        let doc_type = document_filter
            .unwrap_or_else(|| DOCUMENT_TYPES.choose(&mut rng).copied().unwrap_or("Strategy Deck"));
        let department = DEPARTMENTS.choose(&mut rng).copied().unwrap_or(DEPARTMENTS[0]);
        let segment = ["diabetes", "cardiovascular", "oncology"]
            .choose(&mut rng)
            .copied()
            .unwrap_or("diabetes");

        let takeaways = [
            format!("{molecule} identified as priority molecule for repurposing"),
            format!("Market opportunity in {segment} segment"),
            format!(
                "Internal strategy alignment: {}",
                ALIGNMENT_LEVELS.choose(&mut rng).copied().unwrap_or("Medium")
            ),
            format!(
                "Regulatory pathway: {}",
                ["505(b)(2)", "ANDA", "NDA"].choose(&mut rng).copied().unwrap_or("NDA")
            ),
            format!(
                "Competitive threat level: {}",
                ALIGNMENT_LEVELS.choose(&mut rng).copied().unwrap_or("Medium")
            ),
        ];
        let takeaway_count = rng.gen_range(2..=4);
        let key_takeaways: Vec<String> = takeaways
            .choose_multiple(&mut rng, takeaway_count)
            .cloned()
            .collect();

        documents.push(InternalDocument {
            document_id: format!("INT-{}", rng.gen_range(1000..=9999u32)),
            title: format!("{doc_type}: {molecule} Analysis"),
            doc_type: doc_type.to_string(),
            department: department.to_string(),
            date: format!("2024-{:02}-{:02}", rng.gen_range(1..=12), rng.gen_range(1..=28)),
            key_takeaways,
            relevance_score: round2(rng.gen_range(0.6..1.0)),
        });
    }

    let strategy_alignment = ALIGNMENT_LEVELS.choose(&mut rng).copied().unwrap_or("Medium");
    let priority_level = PRIORITY_LEVELS.choose(&mut rng).copied().unwrap_or(PRIORITY_LEVELS[1]);

    let field_pool = [
        format!("Field team reports strong physician interest in {molecule} for new indications"),
        "Market research indicates unmet need in target patient population".to_string(),
        "Competitive intelligence suggests limited market entry barriers".to_string(),
        "Regulatory team confirms feasible pathway for repurposing".to_string(),
    ];
    let field_count = rng.gen_range(2..=4);
    let field_insights: Vec<String> = field_pool
        .choose_multiple(&mut rng, field_count)
        .cloned()
        .collect();

    let key_insights = vec![
        format!("Strategy alignment: {strategy_alignment}"),
        format!("Priority level: {priority_level}"),
        format!("{num_docs} relevant internal documents found"),
        format!("Top department: {}", top_department(&documents)),
    ];

    InternalDocsData {
        molecule: molecule.to_string(),
        document_filter: document_filter.map(|s| s.to_string()),
        total_documents: num_docs,
        documents,
        strategy_alignment: strategy_alignment.to_string(),
        priority_level: priority_level.to_string(),
        field_insights,
        key_insights,
        data_source: "Internal Document Repository (Mock)".to_string(),
        last_updated: DATA_PERIOD.to_string(),
    }
}

pub(crate) fn top_department(documents: &[InternalDocument]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for doc in documents {
        *counts.entry(doc.department.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "None".to_string())
}

impl InternalDocsData {
    /// Format the record as a readable report for LLM context.
    pub fn render(&self) -> String {
        let mut by_relevance: Vec<&InternalDocument> = self.documents.iter().collect();
        by_relevance.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let docs = by_relevance
            .iter()
            .take(5)
            .map(|d| format!("  - {}: {} ({}, {})", d.document_id, d.title, d.department, d.date))
            .collect::<Vec<_>>()
            .join("\n");
        let field = self
            .field_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let takeaways = self
            .documents
            .iter()
            .take(3)
            .flat_map(|d| d.key_takeaways.iter().take(2))
            .map(|t| format!("  - {t}"))
            .collect::<Vec<_>>()
            .join("\n");
        let insights = self
            .key_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let filter = self
            .document_filter
            .as_ref()
            .map(|f| format!("Document Filter: {f}\n"))
            .unwrap_or_default();

        format!(
            "Internal Insights Report for {molecule}\n\
             {filter}{rule}\n\n\
             Document Overview:\n\
             - Total Documents: {total}\n\
             - Strategy Alignment: {alignment}\n\
             - Priority Level: {priority}\n\n\
             Key Documents:\n{docs}\n\n\
             Field Insights:\n{field}\n\n\
             Key Takeaways from Documents:\n{takeaways}\n\n\
             Key Insights:\n{insights}\n\n\
             Data Source: {source}\n\
             Last Updated: {updated}",
            molecule = self.molecule,
            filter = filter,
            rule = "=".repeat(60),
            total = self.total_documents,
            alignment = self.strategy_alignment,
            priority = self.priority_level,
            docs = docs,
            field = field,
            takeaways = takeaways,
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
    fn document_counts_and_scores_in_range() {
        for _ in 0..30 {
            let data = internal_docs_data("Metformin", None);
            assert!((3..=12).contains(&data.total_documents));
            assert_eq!(data.documents.len(), data.total_documents);
            for doc in &data.documents {
                assert!((0.6..=1.0).contains(&doc.relevance_score));
                assert!((2..=4).contains(&doc.key_takeaways.len()));
            }
            assert!((2..=4).contains(&data.field_insights.len()));
        }
    }

    #[test]
    fn filter_is_carried_through() {
        let data = internal_docs_data("Aspirin", Some("Strategy Deck"));
        assert_eq!(data.document_filter.as_deref(), Some("Strategy Deck"));
        assert!(data.render().contains("Document Filter: Strategy Deck"));
    }
}
