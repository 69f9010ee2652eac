//! Trade intelligence tool (EXIM-style mock feed).
//!
//! Import/export volumes, formulation movement, and supply-chain risk.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{round1, round2, DATA_PERIOD};

const EXPORTER_COUNTRIES: &[&str] = &["China", "India", "Germany", "Italy", "Spain"];
const IMPORTER_COUNTRIES: &[&str] = &["USA", "UK", "Canada", "Australia", "Japan"];
const FORMULATIONS: &[&str] = &[
    "Tablet",
    "Capsule",
    "Injectable",
    "Oral Solution",
    "Topical Cream",
];
const TRADE_TRENDS: &[&str] = &["Increasing", "Stable", "Declining"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeData {
    pub molecule: String,
    pub import_dependency_percent: f64,
    pub risk_level: String,
    pub risk_zones: Vec<String>,
    pub top_exporters: Vec<CountryVolume>,
    pub top_importers: Vec<CountryVolume>,
    pub formulations: Vec<String>,
    pub total_import_volume_tons: f64,
    pub total_export_volume_tons: f64,
    pub trade_trend: String,
    pub key_insights: Vec<String>,
    pub data_source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryVolume {
    pub country: String,
    pub volume_tons: f64,
}

/// Generate mock trade intelligence for a molecule.
pub fn trade_data(molecule: &str) -> TradeData {
    let mut rng = rand::thread_rng();

    let exporter_count = rng.gen_range(2..=4);
    let importer_count = rng.gen_range(2..=4);
    let exporters: Vec<String> = EXPORTER_COUNTRIES
        .choose_multiple(&mut rng, exporter_count)
        .map(|s| s.to_string())
        .collect();
    let importers: Vec<String> = IMPORTER_COUNTRIES
        .choose_multiple(&mut rng, importer_count)
        .map(|s| s.to_string())
        .collect();

    let formulation_count = rng.gen_range(2..=4);
    let formulations: Vec<String> = FORMULATIONS
        .choose_multiple(&mut rng, formulation_count)
        .map(|s| s.to_string())
        .collect();

    let import_dependency = round1(rng.gen_range(30.0..90.0));

    let (risk_level, risk_zones) = if import_dependency > 70.0 {
        ("High", exporters.iter().take(2).cloned().collect())
    } else if import_dependency > 50.0 {
        ("Medium", exporters.iter().take(1).cloned().collect())
    } else {
        ("Low", Vec::new())
    };

    let top_exporters: Vec<CountryVolume> = exporters
        .iter()
        .map(|country| CountryVolume {
            country: country.clone(),
            volume_tons: round2(rng.gen_range(50.0..2000.0)),
        })
        .collect();
    let top_importers: Vec<CountryVolume> = importers
        .iter()
        .map(|country| CountryVolume {
            country: country.clone(),
            volume_tons: round2(rng.gen_range(100.0..3000.0)),
        })
        .collect();

    let key_insights = vec![
        format!("Import dependency: {import_dependency}%"),
        format!("Risk level: {risk_level}"),
        match exporters.first() {
            Some(top) => format!("Top exporter: {top}"),
            None => "No major exporters".to_string(),
        },
        format!(
            "Primary formulations: {}",
            formulations.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
        ),
    ];

    TradeData {
        molecule: molecule.to_string(),
        import_dependency_percent: import_dependency,
        risk_level: risk_level.to_string(),
        risk_zones,
        top_exporters,
        top_importers,
        formulations,
        total_import_volume_tons: round2(rng.gen_range(100.0..5000.0)),
        total_export_volume_tons: round2(rng.gen_range(50.0..3000.0)),
        trade_trend: TRADE_TRENDS.choose(&mut rng).copied().unwrap_or("Stable").to_string(),
        key_insights,
        data_source: "EXIM Trade Intelligence (Mock)".to_string(),
        last_updated: DATA_PERIOD.to_string(),
    }
}

impl TradeData {
    /// Format the record as a readable report for LLM context.
    pub fn render(&self) -> String {
        let exporters = self
            .top_exporters
            .iter()
            .take(3)
            .map(|e| format!("  - {}: {} tons", e.country, e.volume_tons))
            .collect::<Vec<_>>()
            .join("\n");
        let importers = self
            .top_importers
            .iter()
            .take(3)
            .map(|i| format!("  - {}: {} tons", i.country, i.volume_tons))
            .collect::<Vec<_>>()
            .join("\n");
        let risk_zones = if self.risk_zones.is_empty() {
            "  - No significant risk zones identified".to_string()
        } else {
            format!("  - Risk Zones: {}", self.risk_zones.join(", "))
        };
        let insights = self
            .key_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Trade Intelligence Report for {molecule}\n\
             {rule}\n\n\
             Import/Export Overview:\n\
             - Import Dependency: {dependency}%\n\
             - Risk Level: {risk}\n\
             - Total Import Volume: {import_volume} metric tons\n\
             - Total Export Volume: {export_volume} metric tons\n\
             - Trade Trend: {trend}\n\n\
             Top Exporters:\n{exporters}\n\n\
             Top Importers:\n{importers}\n\n\
             Formulations in Trade: {formulations}\n\n\
             Risk Assessment:\n{risk_zones}\n\n\
             Key Insights:\n{insights}\n\n\
             Data Source: {source}\n\
             Last Updated: {updated}",
            molecule = self.molecule,
            rule = "=".repeat(60),
            dependency = self.import_dependency_percent,
            risk = self.risk_level,
            import_volume = self.total_import_volume_tons,
            export_volume = self.total_export_volume_tons,
            trend = self.trade_trend,
            exporters = exporters,
            importers = importers,
            formulations = self.formulations.join(", "),
            risk_zones = risk_zones,
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
    fn risk_level_matches_dependency_band() {
        for _ in 0..50 {
            let data = trade_data("Metformin");
            assert!((30.0..=90.0).contains(&data.import_dependency_percent));
            if data.import_dependency_percent > 70.0 {
                assert_eq!(data.risk_level, "High");
                assert!(!data.risk_zones.is_empty());
            } else if data.import_dependency_percent > 50.0 {
                assert_eq!(data.risk_level, "Medium");
                assert_eq!(data.risk_zones.len(), 1);
            } else {
                assert_eq!(data.risk_level, "Low");
                assert!(data.risk_zones.is_empty());
            }
        }
    }

    #[test]
    fn country_lists_are_bounded() {
        for _ in 0..20 {
            let data = trade_data("Aspirin");
            assert!((2..=4).contains(&data.top_exporters.len()));
            assert!((2..=4).contains(&data.top_importers.len()));
            assert!((2..=4).contains(&data.formulations.len()));
        }
    }
}
