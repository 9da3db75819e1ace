//! Member API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CreateMemberRequest, HistoryEntry, HistoryQuery, MemberListQuery, TeamMember,
    UpdateMemberRequest,
};
use crate::presence::history_between;
use crate::AppState;

/// GET /api/members - List all members, optionally filtered by current status.
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<MemberListQuery>,
) -> ApiResult<Vec<TeamMember>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let members = match query.status {
        Some(status) => state.repo.list_members_by_status(status).await,
        None => state.repo.list_members().await,
    };

    match members {
        Ok(members) => success(members, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/members/:id - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_member(&id).await {
        Ok(Some(member)) => success(member, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Member {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/members - Create a new member.
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Validate required fields
    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }
    if request.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
        return error(
            AppError::Validation("Member id must not be blank".to_string()),
            revision_id,
        );
    }

    match state.repo.create_member(&request).await {
        Ok(member) => {
            tracing::info!("Created member {} ({})", member.id, member.name);
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(member, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/members/:id - Update a member's profile.
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return error(
            AppError::Validation("Name must not be blank".to_string()),
            revision_id,
        );
    }

    match state.repo.update_member(&id, &request).await {
        Ok(member) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(member, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/members/:id/history - Sorted history, optionally limited to a range.
pub async fn get_member_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Vec<HistoryEntry>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return error(
                AppError::Validation(format!("from ({}) is after to ({})", from, to)),
                revision_id,
            );
        }
    }

    match state.repo.get_member(&id).await {
        Ok(Some(member)) => success(
            history_between(&member.history, query.from, query.to),
            revision_id,
        ),
        Ok(None) => error(
            AppError::NotFound(format!("Member {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}
