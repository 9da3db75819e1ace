//! Team output summarization request and report.

use serde::{Deserialize, Serialize};

/// One member's free-text daily update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOutput {
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub daily_output: String,
}

/// Request body for `POST /api/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub team_output: Vec<TeamOutput>,
}

/// Productivity assessment for one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberProductivity {
    pub member_name: String,
    /// Score between 0 and 100.
    pub productivity_score: u8,
    pub justification: String,
}

/// Structured productivity report produced from the team's updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityReport {
    pub overall_summary: String,
    pub productivity_analysis: Vec<MemberProductivity>,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}
