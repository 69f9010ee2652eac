//! Market intelligence tool (IQVIA-style mock feed).
//!
//! Market size, competition, and growth data for a molecule.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{round2, DATA_PERIOD};

const THERAPY_AREAS: &[&str] = &[
    "Cardiovascular",
    "Diabetes",
    "Oncology",
    "Neurology",
    "Infectious Diseases",
    "Respiratory",
];

const CONCENTRATIONS: &[&str] = &["High", "Medium", "Low"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub molecule: String,
    pub region: String,
    pub market_size_usd_millions: u32,
    pub cagr_percent: f64,
    pub forecast_years: u8,
    pub market_trend: String,
    pub competition: Competition,
    pub therapy_areas: Vec<String>,
    pub key_insights: Vec<String>,
    pub data_source: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub total_competitors: u32,
    pub top_competitors: Vec<String>,
    pub market_concentration: String,
}

/// Generate mock market intelligence for a molecule.
pub fn market_data(molecule: &str, region: Option<&str>) -> MarketData {
    let mut rng = rand::thread_rng();

    let market_size = rng.gen_range(500..=5000u32);
    let cagr = round2(rng.gen_range(-5.0..15.0));
    let competitor_count = rng.gen_range(3..=25u32);

    let candidates = [
        format!("{molecule} Generic A"),
        format!("{molecule} Generic B"),
        format!("{molecule} Brand X"),
        format!("{molecule} Brand Y"),
        "Competitor Molecule 1".to_string(),
        "Competitor Molecule 2".to_string(),
    ];
    let top_competitors: Vec<String> = candidates
        .iter()
        .take(competitor_count as usize)
        .take(5)
        .cloned()
        .collect();

    let area_count = rng.gen_range(1..=3);
    let therapy_areas: Vec<String> = THERAPY_AREAS
        .choose_multiple(&mut rng, area_count)
        .map(|s| s.to_string())
        .collect();

    let market_trend = if cagr > 2.0 {
        "Growing"
    } else if cagr > -2.0 {
        "Stable"
    } else {
        "Declining"
    };

    let concentration = CONCENTRATIONS
        .choose(&mut rng)
        .copied()
        .unwrap_or("Medium")
        .to_string();

    let key_insights = vec![
        format!("Market size of ${market_size}M with {cagr}% CAGR"),
        format!("{competitor_count} active competitors in the market"),
        format!("Primary therapy areas: {}", therapy_areas.join(", ")),
        format!("Market concentration: {concentration}"),
    ];

    MarketData {
        molecule: molecule.to_string(),
        region: region.unwrap_or("Global").to_string(),
        market_size_usd_millions: market_size,
        cagr_percent: cagr,
        forecast_years: 5,
        market_trend: market_trend.to_string(),
        competition: Competition {
            total_competitors: competitor_count,
            top_competitors,
            market_concentration: concentration,
        },
        therapy_areas,
        key_insights,
        data_source: "IQVIA Market Intelligence (Mock)".to_string(),
        last_updated: DATA_PERIOD.to_string(),
    }
}

impl MarketData {
    /// Format the record as a readable report for LLM context.
    pub fn render(&self) -> String {
        let insights = self
            .key_insights
            .iter()
            .map(|i| format!("  - {i}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Market Intelligence Report for {molecule}\n\
             Region: {region}\n\
             {rule}\n\n\
             Market Overview:\n\
             - Market Size: ${size}M USD\n\
             - CAGR (5-year): {cagr}%\n\
             - Market Trend: {trend}\n\n\
             Competitive Landscape:\n\
             - Total Competitors: {competitors}\n\
             - Market Concentration: {concentration}\n\
             - Top Competitors: {top}\n\n\
             Therapy Areas: {areas}\n\n\
             Key Insights:\n{insights}\n\n\
             Data Source: {source}\n\
             Last Updated: {updated}",
            molecule = self.molecule,
            region = self.region,
            rule = "=".repeat(60),
            size = self.market_size_usd_millions,
            cagr = self.cagr_percent,
            trend = self.market_trend,
            competitors = self.competition.total_competitors,
            concentration = self.competition.market_concentration,
            top = self
                .competition
                .top_competitors
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            areas = self.therapy_areas.join(", "),
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
    fn values_stay_in_documented_ranges() {
        for _ in 0..50 {
            let data = market_data("Metformin", None);
            assert!((500..=5000).contains(&data.market_size_usd_millions));
            assert!((-5.0..15.0).contains(&data.cagr_percent));
            assert!((3..=25).contains(&data.competition.total_competitors));
            assert!(!data.therapy_areas.is_empty() && data.therapy_areas.len() <= 3);
            assert!(data.competition.top_competitors.len() <= 5);
        }
    }

    #[test]
    fn trend_is_derived_from_cagr() {
        for _ in 0..50 {
            let data = market_data("Aspirin", Some("US"));
            let expected = if data.cagr_percent > 2.0 {
                "Growing"
            } else if data.cagr_percent > -2.0 {
                "Stable"
            } else {
                "Declining"
            };
            assert_eq!(data.market_trend, expected);
            assert_eq!(data.region, "US");
        }
    }

    #[test]
    fn render_mentions_molecule_and_market_size() {
        let data = market_data("Metformin", None);
        let report = data.render();
        assert!(report.contains("Metformin"));
        assert!(report.contains(&format!("${}M USD", data.market_size_usd_millions)));
    }
}
