//! Presence API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;

use super::{error, success, ApiResult};
use crate::errors::{AppError, AppErrorWithRevision};
use crate::models::{
    BatchPresenceRequest, DayQuery, DayStatus, SetDayStatusRequest, SetStatusRequest, TeamMember,
    WeekOverview,
};
use crate::presence::{apply_batch, apply_status, recorded_status, resolve_status, week_overview};
use crate::AppState;

/// GET /api/members/:id/presence?date= - Effective status on a day (default today).
pub async fn get_presence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DayQuery>,
) -> ApiResult<DayStatus> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    let day = query.date.unwrap_or_else(|| state.today());

    match state.repo.get_member(&id).await {
        Ok(Some(member)) => success(
            DayStatus {
                member_id: member.id.clone(),
                date: day,
                status: resolve_status(&member.history, day, state.config.default_status),
                recorded: recorded_status(&member.history, day).is_some(),
            },
            revision_id,
        ),
        Ok(None) => error(
            AppError::NotFound(format!("Member {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/members/:id/status - Set the member's status for today.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> ApiResult<TeamMember> {
    update_presence(&state, &id, 1, |member, today| {
        apply_status(member, today, request.status, today)
    })
    .await
}

/// PUT /api/members/:id/presence - Set the member's status for one day.
pub async fn set_day_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetDayStatusRequest>,
) -> ApiResult<TeamMember> {
    update_presence(&state, &id, 1, |member, today| {
        apply_status(member, request.date, request.status, today)
    })
    .await
}

/// POST /api/members/:id/presence/batch - Apply several day updates at once.
pub async fn batch_update_presence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<BatchPresenceRequest>,
) -> ApiResult<TeamMember> {
    if request.updates.is_empty() {
        let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
        return error(
            AppError::Validation("No dates selected".to_string()),
            revision_id,
        );
    }

    let updates = request.as_updates();
    update_presence(&state, &id, updates.len(), |member, today| {
        apply_batch(member, &updates, today)
    })
    .await
}

/// GET /api/presence/week - Team overview for the next five weekdays.
pub async fn get_week(State(state): State<AppState>) -> ApiResult<WeekOverview> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_members().await {
        Ok(members) => success(
            week_overview(&members, state.today(), state.config.default_status),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// Load a member, apply `change` for today's date and store the result.
async fn update_presence<F>(
    state: &AppState,
    id: &str,
    days: usize,
    change: F,
) -> ApiResult<TeamMember>
where
    F: FnOnce(TeamMember, NaiveDate) -> TeamMember,
{
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    let with_revision = |error: AppError| AppErrorWithRevision { error, revision_id };

    let member = state
        .repo
        .get_member(id)
        .await
        .map_err(with_revision)?
        .ok_or_else(|| with_revision(AppError::NotFound(format!("Member {} not found", id))))?;

    let updated = change(member, state.today());
    let saved = state.repo.save_presence(updated).await.map_err(with_revision)?;

    tracing::info!(
        member = %saved.id,
        days,
        status = saved.status.as_str(),
        "Updated presence"
    );

    let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
    success(saved, new_revision)
}
