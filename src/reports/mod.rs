//! Report generation: PDF and Excel deliverables per completed analysis.

pub mod excel;
pub mod pdf;

use std::path::PathBuf;

use chrono::Local;
use tracing::{error, info};

use crate::models::{ReportData, ReportPaths};
use crate::types::AppResult;

/// Writes report files into the configured output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Generate both report formats. Returns the written filenames, relative
    /// to the output directory.
    pub fn generate(&self, report: &ReportData) -> AppResult<ReportPaths> {
        std::fs::create_dir_all(&self.output_dir)?;

        let base = base_filename(&report.molecule);
        let pdf_name = format!("{base}.pdf");
        let excel_name = format!("{base}.xlsx");

        pdf::write_pdf(report, &self.output_dir.join(&pdf_name))?;
        excel::write_excel(report, &self.output_dir.join(&excel_name))?;
        info!(base = %base, dir = %self.output_dir.display(), "Reports written");

        Ok(ReportPaths {
            pdf: pdf_name,
            excel: excel_name,
            base_filename: base,
        })
    }

    /// Report failures are logged, never fatal to the analysis itself.
    pub fn try_generate(&self, report: &ReportData) -> Option<ReportPaths> {
        match self.generate(report) {
            Ok(paths) => Some(paths),
            Err(e) => {
                error!(error = %e, "Report generation failed");
                None
            }
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

fn base_filename(molecule: &str) -> String {
    let safe: String = molecule
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{safe}_repurposing_{timestamp}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentReportRow, SynthesisSummary};

    #[test]
    fn generates_both_files() {
        let report = ReportData {
            molecule: "Sildenafil Citrate".to_string(),
            query: "Analyze Sildenafil".to_string(),
            synthesis: "Synthesis body".to_string(),
            key_findings: vec!["Finding".to_string()],
            recommendations: vec!["Recommendation".to_string()],
            summary: SynthesisSummary::default(),
            agent_results: vec![AgentReportRow {
                agent_name: "Patent Landscape Agent".to_string(),
                role: "IP & Patent Analyst".to_string(),
                status: "completed".to_string(),
            }],
        };

        let dir = std::env::temp_dir().join(format!("reports-test-{}", std::process::id()));
        let generator = ReportGenerator::new(&dir);
        let paths = generator.generate(&report).unwrap();

        assert!(paths.pdf.ends_with(".pdf"));
        assert!(paths.excel.ends_with(".xlsx"));
        assert!(paths.base_filename.starts_with("Sildenafil_Citrate_repurposing_"));
        assert!(dir.join(&paths.pdf).exists());
        assert!(dir.join(&paths.excel).exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
