//! PDF rendering with lopdf.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::models::ReportData;
use crate::types::{AppError, AppResult};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LINE_HEIGHT: i64 = 14;
const WRAP_WIDTH: usize = 90;
const LINES_PER_PAGE: usize = 52;

/// Write the report as a plain multi-page text PDF.
pub fn write_pdf(report: &ReportData, path: &Path) -> AppResult<()> {
    let lines = layout_lines(report);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for chunk in lines.chunks(LINES_PER_PAGE) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 11.into()]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
        ];
        for line in chunk {
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
            operations.push(Operation::new("Td", vec![0.into(), (-LINE_HEIGHT).into()]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Report(format!("encode PDF content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path)
        .map_err(|e| AppError::Report(format!("save PDF: {e}")))?;
    Ok(())
}

/// Flatten the report into wrapped text lines.
fn layout_lines(report: &ReportData) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push_wrapped = |text: &str, out: &mut Vec<String>| {
        for raw in text.lines() {
            if raw.is_empty() {
                out.push(String::new());
                continue;
            }
            out.extend(wrap(raw, WRAP_WIDTH));
        }
    };

    lines.push(format!("Drug Repurposing Assessment: {}", report.molecule));
    lines.push(format!("Query: {}", report.query));
    lines.push(String::new());
    lines.push(format!(
        "Agents executed: {}   Failed: {}   Findings: {}   Recommendations: {}",
        report.summary.total_agents_executed,
        report.summary.agents_failed,
        report.summary.key_insights_count,
        report.summary.recommendations_count,
    ));
    lines.push(String::new());

    lines.push("Synthesis".to_string());
    lines.push("---------".to_string());
    push_wrapped(&report.synthesis, &mut lines);
    lines.push(String::new());

    lines.push("Key Findings".to_string());
    lines.push("------------".to_string());
    for finding in &report.key_findings {
        push_wrapped(&format!("- {finding}"), &mut lines);
    }
    lines.push(String::new());

    lines.push("Recommendations".to_string());
    lines.push("---------------".to_string());
    for rec in &report.recommendations {
        push_wrapped(&format!("- {rec}"), &mut lines);
    }
    lines.push(String::new());

    lines.push("Agent Status".to_string());
    lines.push("------------".to_string());
    for row in &report.agent_results {
        lines.push(format!("{} ({}): {}", row.agent_name, row.role, row.status));
    }

    lines
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentReportRow, SynthesisSummary};

    fn sample_report() -> ReportData {
        ReportData {
            molecule: "Metformin".to_string(),
            query: "Analyze Metformin".to_string(),
            synthesis: "A long synthesis paragraph. ".repeat(40),
            key_findings: vec!["Finding one".to_string(), "Finding two".to_string()],
            recommendations: vec!["Do the thing".to_string()],
            summary: SynthesisSummary {
                total_agents_executed: 6,
                agents_failed: 0,
                key_insights_count: 2,
                recommendations_count: 1,
            },
            agent_results: vec![AgentReportRow {
                agent_name: "Market Insights Agent".to_string(),
                role: "Market Intelligence Analyst".to_string(),
                status: "completed".to_string(),
            }],
        }
    }

    #[test]
    fn wrap_respects_width() {
        let wrapped = wrap(&"word ".repeat(50), 20);
        assert!(wrapped.iter().all(|l| l.len() <= 20));
        assert!(wrapped.len() > 1);
    }

    #[test]
    fn writes_a_parseable_pdf() {
        let dir = std::env::temp_dir().join(format!("pdf-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.pdf");
        write_pdf(&sample_report(), &path).unwrap();

        let doc = Document::load(&path).unwrap();
        assert!(doc.get_pages().len() >= 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
