//! Productivity summary endpoint.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::assist::{summarize_team_output, validate_summary_request};
use crate::errors::AppError;
use crate::models::{ProductivityReport, SummaryRequest};
use crate::AppState;

/// POST /api/summary - Summarize the team's daily output.
pub async fn create_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> ApiResult<ProductivityReport> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(issues) = validate_summary_request(&request) {
        return error(AppError::InvalidInput(issues), revision_id);
    }

    let Some(client) = state.llm.as_deref() else {
        return error(
            AppError::LlmUnavailable("No language model is configured".to_string()),
            revision_id,
        );
    };

    match summarize_team_output(client, &request).await {
        Ok(report) => success(report, revision_id),
        Err(e) => error(e, revision_id),
    }
}
