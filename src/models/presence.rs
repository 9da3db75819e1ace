//! Presence views and presence-update requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{HistoryEntry, PresenceStatus, WorkStatus};
use crate::presence::calendar::{deserialize_day, deserialize_optional_day};

/// One member's status on a selected day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub status: WorkStatus,
}

/// Result of best-day selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySelection {
    pub day: NaiveDate,
    pub attendee_count: usize,
    pub roster: Vec<RosterEntry>,
}

/// Best meeting day with a human-readable justification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSuggestion {
    pub suggested_day: NaiveDate,
    pub expected_attendees: usize,
    pub justification: String,
    pub attendees: Vec<RosterEntry>,
}

/// A member's row in the weekly overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWeek {
    pub member_id: String,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    /// One status per entry of [`WeekOverview::days`].
    pub statuses: Vec<WorkStatus>,
}

/// Five weekdays of team presence starting today.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekOverview {
    pub today: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub in_office_today: usize,
    pub remote_today: usize,
    pub members: Vec<MemberWeek>,
}

/// Effective status of one member on one day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatus {
    pub member_id: String,
    pub date: NaiveDate,
    pub status: WorkStatus,
    /// Whether the status comes from a history entry rather than a fallback.
    pub recorded: bool,
}

/// Request body for `PUT /api/members/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetStatusRequest {
    pub status: PresenceStatus,
}

/// Request body for `PUT /api/members/{id}/presence`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetDayStatusRequest {
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub status: PresenceStatus,
}

/// Request body for `POST /api/members/{id}/presence/batch`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchPresenceRequest {
    #[serde(default)]
    pub updates: Vec<HistoryEntry>,
}

impl BatchPresenceRequest {
    pub fn as_updates(&self) -> Vec<(NaiveDate, PresenceStatus)> {
        self.updates.iter().map(|u| (u.date, u.status)).collect()
    }
}

/// Query for a single-day lookup; defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct DayQuery {
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub date: Option<NaiveDate>,
}

/// Inclusive date range for history listings.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub to: Option<NaiveDate>,
}

/// Filter for member listings.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberListQuery {
    #[serde(default)]
    pub status: Option<WorkStatus>,
}
