//! Meeting suggestion endpoint.

use axum::extract::State;

use super::{error, success, ApiResult};
use crate::assist::suggest_meeting;
use crate::models::MeetingSuggestion;
use crate::presence::suggest_day;
use crate::AppState;

/// GET /api/meeting/suggestion - Best upcoming in-office day with a justification.
pub async fn get_meeting_suggestion(State(state): State<AppState>) -> ApiResult<MeetingSuggestion> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let members = match state.repo.list_members().await {
        Ok(members) => members,
        Err(e) => return error(e, revision_id),
    };

    let selection = suggest_day(&members, state.today());
    tracing::info!(
        day = %selection.day,
        attendees = selection.attendee_count,
        "Selected meeting day"
    );

    match suggest_meeting(state.llm.as_deref(), selection).await {
        Ok(suggestion) => success(suggestion, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}
