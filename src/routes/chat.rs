//! Chat endpoints: synchronous analysis plus background jobs with polling.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info};

use crate::models::{
    AppState, ChatData, ChatRequest, ChatResponse, JobStartResponse, JobStatusResponse,
};
use crate::reports::ReportGenerator;
use crate::types::{AppError, AppResult};
use crate::workflow::RepurposingWorkflow;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(post_chat))
        .route("/api/chat/start", post(start_chat_job))
        .route("/api/chat/status/{job_id}", get(chat_job_status))
        .with_state(state)
}

/// Run the full analysis inline and return the complete response.
async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    info!(message = %request.message, "Received chat request");
    let response = run_analysis(&state, &request).await?;
    Ok(Json(response))
}

/// Kick off a background analysis and return a pollable job id.
async fn start_chat_job(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<JobStartResponse>> {
    // Validate up front so a bad request fails fast instead of failing the job.
    extract_molecule(&request)?;

    let session_id = request
        .session_id
        .clone()
        .unwrap_or_else(|| "session".to_string());
    let job_id = state.jobs.create(&session_id).await;
    info!(job_id = %job_id, "Starting background analysis job");

    let job_state = state.clone();
    let spawned_job_id = job_id.clone();
    tokio::spawn(async move {
        run_job(job_state, spawned_job_id, request).await;
    });

    Ok(Json(JobStartResponse {
        job_id,
        status: "started".to_string(),
    }))
}

async fn chat_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<JobStatusResponse>> {
    let job = state
        .jobs
        .get(&job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("job {job_id} not found")))?;

    Ok(Json(JobStatusResponse {
        job_id,
        status: job.status.as_str().to_string(),
        error: job.error,
        workflow_state: job.workflow_state,
        result: job.result,
    }))
}

async fn run_job(state: AppState, job_id: String, request: ChatRequest) {
    state.jobs.mark_running(&job_id).await;

    // Progress snapshots come from the workflow's sync callback; forward them
    // through a channel into the async job store.
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let progress_store = state.jobs.clone();
    let progress_job_id = job_id.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            progress_store.record_progress(&progress_job_id, progress).await;
        }
    });

    let result = run_analysis_with_progress(&state, &request, |progress| {
        let _ = tx.send(progress);
    })
    .await;
    drop(tx);
    let _ = forwarder.await;

    match result {
        Ok(response) => state.jobs.complete(&job_id, response).await,
        Err(e) => {
            error!(job_id = %job_id, error = %e, "Background job failed");
            state.jobs.fail(&job_id, e.to_string()).await;
        }
    }
}

async fn run_analysis(state: &AppState, request: &ChatRequest) -> AppResult<ChatResponse> {
    run_analysis_with_progress(state, request, |_| {}).await
}

async fn run_analysis_with_progress(
    state: &AppState,
    request: &ChatRequest,
    on_progress: impl Fn(crate::models::WorkflowProgress),
) -> AppResult<ChatResponse> {
    let molecule = extract_molecule(request)?;
    let ctx = request.context.clone().unwrap_or_default();

    let workflow = RepurposingWorkflow::new(std::sync::Arc::new(state.config.clone()));
    let workflow_state = workflow
        .run_with_progress(&molecule, &request.message, ctx, |s| on_progress(s.progress()))
        .await?;

    let report_data = workflow_state
        .report_data
        .as_ref()
        .ok_or_else(|| AppError::Workflow("workflow finished without report data".to_string()))?;

    let generator = ReportGenerator::new(&state.config.reports.output_dir);
    let report_paths = generator.try_generate(report_data);

    let data = ChatData {
        molecule: molecule.clone(),
        synthesis: report_data.synthesis.clone(),
        key_findings: report_data.key_findings.clone(),
        recommendations: report_data.recommendations.clone(),
        summary: report_data.summary.clone(),
    };

    Ok(ChatResponse {
        response: format!(
            "Repurposing analysis complete for {molecule}: {} of {} agents succeeded.",
            workflow_state.agents_completed.len(),
            workflow_state.agents_to_run.len(),
        ),
        status: "completed".to_string(),
        session_id: request.session_id.clone(),
        data: Some(data),
        report_paths,
        workflow_state: Some(workflow_state.progress()),
    })
}

/// Use the explicit molecule field when given, otherwise the first word of the
/// message with surrounding quotes stripped.
fn extract_molecule(request: &ChatRequest) -> AppResult<String> {
    if let Some(molecule) = &request.molecule {
        let molecule = molecule.trim();
        if !molecule.is_empty() {
            return Ok(molecule.to_string());
        }
    }
    request
        .message
        .split_whitespace()
        .next()
        .map(|word| word.trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|word| !word.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("no molecule found in request".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str, molecule: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            molecule: molecule.map(String::from),
            session_id: None,
            context: None,
        }
    }

    #[test]
    fn explicit_molecule_wins() {
        let req = request("Analyze Aspirin please", Some("Metformin"));
        assert_eq!(extract_molecule(&req).unwrap(), "Metformin");
    }

    #[test]
    fn first_word_fallback_strips_quotes() {
        let req = request("\"Sildenafil\" repurposing options", None);
        assert_eq!(extract_molecule(&req).unwrap(), "Sildenafil");
    }

    #[test]
    fn empty_message_is_rejected() {
        let req = request("   ", None);
        assert!(matches!(
            extract_molecule(&req),
            Err(AppError::InvalidRequest(_))
        ));
    }
}
