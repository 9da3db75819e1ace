//! Team member model and presence statuses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::presence::calendar::deserialize_day;

/// A recorded presence status for one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PresenceStatus {
    #[serde(rename = "In Office")]
    InOffice,
    #[serde(rename = "Remote")]
    Remote,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::InOffice => "In Office",
            PresenceStatus::Remote => "Remote",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "In Office" => Some(PresenceStatus::InOffice),
            "Remote" => Some(PresenceStatus::Remote),
            _ => None,
        }
    }
}

/// The status shown for a member, including the absence of any record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkStatus {
    #[serde(rename = "In Office")]
    InOffice,
    #[serde(rename = "Remote")]
    Remote,
    #[serde(rename = "No Status")]
    NoStatus,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::InOffice => "In Office",
            WorkStatus::Remote => "Remote",
            WorkStatus::NoStatus => "No Status",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "In Office" => Some(WorkStatus::InOffice),
            "Remote" => Some(WorkStatus::Remote),
            "No Status" => Some(WorkStatus::NoStatus),
            _ => None,
        }
    }
}

impl From<PresenceStatus> for WorkStatus {
    fn from(status: PresenceStatus) -> Self {
        match status {
            PresenceStatus::InOffice => WorkStatus::InOffice,
            PresenceStatus::Remote => WorkStatus::Remote,
        }
    }
}

/// One day of a member's presence history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub status: PresenceStatus,
}

/// A tracked team member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub status: WorkStatus,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub updated_at: String,
}

/// Request body for creating a new team member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    /// Identity provider subject; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
    #[serde(default = "default_status")]
    pub status: WorkStatus,
}

pub const DEFAULT_MEMBER_NAME: &str = "New User";
pub const DEFAULT_ROLE: &str = "New User";
pub const DEFAULT_AVATAR_URL: &str = "https://placehold.co/100x100";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_avatar_url() -> String {
    DEFAULT_AVATAR_URL.to_string()
}

fn default_status() -> WorkStatus {
    WorkStatus::InOffice
}

/// Request body for updating a member's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Claims forwarded from the identity provider after sign-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl SessionRequest {
    /// The member record provisioned for an identity seen for the first time.
    pub fn to_create_request(&self) -> CreateMemberRequest {
        let name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_MEMBER_NAME);
        let avatar_url = self
            .photo_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL);

        CreateMemberRequest {
            id: Some(self.uid.clone()),
            name: name.to_string(),
            role: default_role(),
            avatar_url: avatar_url.to_string(),
            status: default_status(),
        }
    }
}

/// Response body for `POST /api/session`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub member: TeamMember,
    pub created: bool,
}
