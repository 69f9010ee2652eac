use crate::config::Config;
use crate::queue::jobs::JobStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jobs: JobStore,
}

/// Optional per-agent filters carried alongside a query.
///
/// Each field is consumed by exactly one worker agent: `region` by market,
/// `therapy_area` by patents, `mechanism` by trials, `document_filter` by
/// internal insights, and `target_indication` by web intelligence.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AnalysisContext {
    pub region: Option<String>,
    pub therapy_area: Option<String>,
    pub mechanism: Option<String>,
    pub target_indication: Option<String>,
    pub document_filter: Option<String>,
}

// API Request/Response types

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub molecule: Option<String>,
    pub session_id: Option<String>,
    pub context: Option<AnalysisContext>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_paths: Option<ReportPaths>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_state: Option<WorkflowProgress>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatData {
    pub molecule: String,
    pub synthesis: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: SynthesisSummary,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SynthesisSummary {
    pub total_agents_executed: usize,
    pub agents_failed: usize,
    pub key_insights_count: usize,
    pub recommendations_count: usize,
}

/// Paths of the generated report files, relative to the output directory.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReportPaths {
    pub pdf: String,
    pub excel: String,
    pub base_filename: String,
}

/// Snapshot of workflow progress, suitable for job polling and the UI.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WorkflowProgress {
    pub agents_completed: Vec<String>,
    pub agents_failed: Vec<String>,
    pub current_step: String,
    pub messages: Vec<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct JobStartResponse {
    pub job_id: String,
    pub status: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_state: Option<WorkflowProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ChatResponse>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub llm_provider: String,
    pub api_key_configured: bool,
}

// Report generation payload

/// Everything the report generator needs, assembled by the synthesize step.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReportData {
    pub molecule: String,
    pub query: String,
    pub synthesis: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: SynthesisSummary,
    pub agent_results: Vec<AgentReportRow>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentReportRow {
    pub agent_name: String,
    pub role: String,
    pub status: String, // "completed" or "failed"
}
