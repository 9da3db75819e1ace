//! Sign-in endpoint.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{SessionRequest, SessionResponse};
use crate::AppState;

/// POST /api/session - Map a signed-in identity to its member, creating it on first sight.
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> ApiResult<SessionResponse> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.uid.trim().is_empty() {
        return error(
            AppError::Validation("uid is required".to_string()),
            revision_id,
        );
    }

    match state.repo.get_or_create_member(&request).await {
        Ok((member, created)) => {
            if created {
                tracing::info!("Provisioned member {} on first sign-in", member.id);
            }
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(SessionResponse { member, created }, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
