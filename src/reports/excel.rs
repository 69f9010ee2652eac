//! Excel rendering with rust_xlsxwriter.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::models::ReportData;
use crate::types::{AppError, AppResult};

/// Write the report as a four-sheet workbook: Summary, Key Findings,
/// Recommendations, Agent Status.
pub fn write_excel(report: &ReportData, path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary").map_err(xlsx_err)?;
        sheet.set_column_width(0, 28).map_err(xlsx_err)?;
        sheet.set_column_width(1, 80).map_err(xlsx_err)?;

        sheet.write_string_with_format(0, 0, "Molecule", &bold).map_err(xlsx_err)?;
        sheet.write_string(0, 1, &report.molecule).map_err(xlsx_err)?;
        sheet.write_string_with_format(1, 0, "Query", &bold).map_err(xlsx_err)?;
        sheet.write_string(1, 1, &report.query).map_err(xlsx_err)?;
        sheet
            .write_string_with_format(2, 0, "Agents executed", &bold)
            .map_err(xlsx_err)?;
        sheet
            .write_number(2, 1, report.summary.total_agents_executed as f64)
            .map_err(xlsx_err)?;
        sheet
            .write_string_with_format(3, 0, "Agents failed", &bold)
            .map_err(xlsx_err)?;
        sheet
            .write_number(3, 1, report.summary.agents_failed as f64)
            .map_err(xlsx_err)?;
        sheet.write_string_with_format(4, 0, "Synthesis", &bold).map_err(xlsx_err)?;
        sheet.write_string(4, 1, &report.synthesis).map_err(xlsx_err)?;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Key Findings").map_err(xlsx_err)?;
        sheet.set_column_width(0, 6).map_err(xlsx_err)?;
        sheet.set_column_width(1, 110).map_err(xlsx_err)?;
        sheet.write_string_with_format(0, 0, "#", &bold).map_err(xlsx_err)?;
        sheet.write_string_with_format(0, 1, "Finding", &bold).map_err(xlsx_err)?;
        for (i, finding) in report.key_findings.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_number(row, 0, (i + 1) as f64).map_err(xlsx_err)?;
            sheet.write_string(row, 1, finding).map_err(xlsx_err)?;
        }
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Recommendations").map_err(xlsx_err)?;
        sheet.set_column_width(0, 6).map_err(xlsx_err)?;
        sheet.set_column_width(1, 110).map_err(xlsx_err)?;
        sheet.write_string_with_format(0, 0, "#", &bold).map_err(xlsx_err)?;
        sheet
            .write_string_with_format(0, 1, "Recommendation", &bold)
            .map_err(xlsx_err)?;
        for (i, rec) in report.recommendations.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_number(row, 0, (i + 1) as f64).map_err(xlsx_err)?;
            sheet.write_string(row, 1, rec).map_err(xlsx_err)?;
        }
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Agent Status").map_err(xlsx_err)?;
        sheet.set_column_width(0, 30).map_err(xlsx_err)?;
        sheet.set_column_width(1, 34).map_err(xlsx_err)?;
        sheet.set_column_width(2, 12).map_err(xlsx_err)?;
        sheet.write_string_with_format(0, 0, "Agent", &bold).map_err(xlsx_err)?;
        sheet.write_string_with_format(0, 1, "Role", &bold).map_err(xlsx_err)?;
        sheet.write_string_with_format(0, 2, "Status", &bold).map_err(xlsx_err)?;
        for (i, row_data) in report.agent_results.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, &row_data.agent_name).map_err(xlsx_err)?;
            sheet.write_string(row, 1, &row_data.role).map_err(xlsx_err)?;
            sheet.write_string(row, 2, &row_data.status).map_err(xlsx_err)?;
        }
    }

    workbook.save(path).map_err(xlsx_err)?;
    Ok(())
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::Report(format!("write Excel: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentReportRow, SynthesisSummary};

    #[test]
    fn writes_a_workbook() {
        let report = ReportData {
            molecule: "Aspirin".to_string(),
            query: "Analyze Aspirin".to_string(),
            synthesis: "Synthesis text".to_string(),
            key_findings: vec!["Finding".to_string()],
            recommendations: vec!["Recommendation".to_string()],
            summary: SynthesisSummary::default(),
            agent_results: vec![AgentReportRow {
                agent_name: "Trade Flow Agent".to_string(),
                role: "Trade & Supply Chain Analyst".to_string(),
                status: "completed".to_string(),
            }],
        };

        let dir = std::env::temp_dir().join(format!("xlsx-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.xlsx");
        write_excel(&report, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
