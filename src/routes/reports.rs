//! Report file downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::info;

use crate::models::AppState;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/reports/{report_type}/{filename}", get(download_report))
        .with_state(state)
}

async fn download_report(
    State(state): State<AppState>,
    Path((report_type, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    let expected_ext = match report_type.as_str() {
        "pdf" => ".pdf",
        "excel" => ".xlsx",
        other => {
            return Err(AppError::InvalidRequest(format!(
                "unknown report type: {other}"
            )))
        }
    };

    // Downloads are limited to files the generator wrote into the output
    // directory; anything that could escape it is rejected.
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(AppError::InvalidRequest("invalid filename".to_string()));
    }
    if !filename.ends_with(expected_ext) {
        return Err(AppError::InvalidRequest(format!(
            "{report_type} report filenames must end with {expected_ext}"
        )));
    }

    let path = std::path::Path::new(&state.config.reports.output_dir).join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("report {filename} not found")))?;
    info!(filename = %filename, size = bytes.len(), "Serving report download");

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::queue::JobStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState {
            config: Config::for_tests(),
            jobs: JobStore::new(),
        };
        router(state)
    }

    async fn get_status(app: Router, uri: &str) -> StatusCode {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn rejects_traversal_and_bad_types() {
        assert_eq!(
            get_status(app(), "/api/reports/pdf/..%2Fsecret.pdf").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(app(), "/api/reports/word/report.doc").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(app(), "/api/reports/pdf/report.xlsx").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn missing_report_is_404() {
        assert_eq!(
            get_status(app(), "/api/reports/pdf/does_not_exist.pdf").await,
            StatusCode::NOT_FOUND
        );
    }
}
