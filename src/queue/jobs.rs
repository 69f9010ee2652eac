//! In-memory background job store.
//!
//! Jobs are process-local and unbounded; a restart loses them. Good enough
//! for a single-instance demo service with polling clients.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ChatResponse, WorkflowProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobRecord {
    pub status: JobStatus,
    pub error: Option<String>,
    /// Latest workflow progress snapshot while the job runs.
    pub workflow_state: Option<WorkflowProgress>,
    pub result: Option<ChatResponse>,
}

impl JobRecord {
    fn queued() -> Self {
        Self {
            status: JobStatus::Queued,
            error: None,
            workflow_state: None,
            result: None,
        }
    }
}

/// Shared handle to all jobs, cloned into every request handler.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, JobRecord>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new queued job and return its id.
    pub async fn create(&self, session_id: &str) -> String {
        let job_id = new_job_id(session_id);
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), JobRecord::queued());
        job_id
    }

    pub async fn get(&self, job_id: &str) -> Option<JobRecord> {
        self.jobs.read().await.get(job_id).cloned()
    }

    pub async fn mark_running(&self, job_id: &str) {
        self.update(job_id, |job| job.status = JobStatus::Running).await;
    }

    pub async fn record_progress(&self, job_id: &str, progress: WorkflowProgress) {
        self.update(job_id, |job| job.workflow_state = Some(progress)).await;
    }

    pub async fn complete(&self, job_id: &str, result: ChatResponse) {
        self.update(job_id, |job| {
            job.status = JobStatus::Completed;
            job.result = Some(result);
        })
        .await;
    }

    pub async fn fail(&self, job_id: &str, error: String) {
        self.update(job_id, |job| {
            job.status = JobStatus::Failed;
            job.error = Some(error);
        })
        .await;
    }

    async fn update(&self, job_id: &str, f: impl FnOnce(&mut JobRecord)) {
        if let Some(job) = self.jobs.write().await.get_mut(job_id) {
            f(job);
        }
    }
}

/// Job ids are `<session>-<8 hex chars>`.
fn new_job_id(session_id: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{session_id}-{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn job_lifecycle() {
        let store = JobStore::new();
        let job_id = store.create("session-1").await;
        assert!(job_id.starts_with("session-1-"));
        assert_eq!(job_id.len(), "session-1-".len() + 8);

        assert_eq!(store.get(&job_id).await.unwrap().status, JobStatus::Queued);

        store.mark_running(&job_id).await;
        assert_eq!(store.get(&job_id).await.unwrap().status, JobStatus::Running);

        store.fail(&job_id, "boom".to_string()).await;
        let job = store.get(&job_id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn missing_job_is_none() {
        let store = JobStore::new();
        assert!(store.get("nope").await.is_none());
        // Updates on unknown ids are silently dropped.
        store.mark_running("nope").await;
        assert!(store.get("nope").await.is_none());
    }
}
