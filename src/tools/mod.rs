//! Mock Data Source Tools
//!
//! Six independent data sources producing pseudo-random structured records for a
//! named molecule. No external calls are made; outputs are synthetic but shaped
//! like the real feeds they stand in for:
//!
//! - **market**: IQVIA-style market intelligence (size, CAGR, competition)
//! - **trade**: EXIM import/export volumes and supply-chain risk
//! - **patents**: USPTO-style patent landscape and FTO assessment
//! - **trials**: ClinicalTrials.gov-style trial registry data
//! - **internal_docs**: internal document repository hits
//! - **web**: web search over publications, guidelines, and news
//!
//! Each tool returns a typed record set plus a `render()`ed report string that
//! the worker agents feed to the LLM as analysis context.

pub mod internal_docs;
pub mod market;
pub mod patents;
pub mod trade;
pub mod trials;
pub mod web;

pub use internal_docs::{internal_docs_data, InternalDocsData};
pub use market::{market_data, MarketData};
pub use patents::{patent_data, PatentData};
pub use trade::{trade_data, TradeData};
pub use trials::{trials_data, TrialsData};
pub use web::{web_data, WebData};

pub(crate) const DATA_PERIOD: &str = "2024-Q4";

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
