//! Productivity report from free-text daily updates.

use std::fmt::Write;

use serde::Deserialize;
use tracing::{debug, info};

use super::prompts::{SUMMARY_PROMPT, SUMMARY_SYSTEM};
use crate::errors::{AppError, ValidationIssue};
use crate::llm::{extract_json, truncate_for_log, LlmClient, LlmError, LlmRequest};
use crate::models::{MemberProductivity, ProductivityReport, SummaryRequest};

/// Longest daily update accepted per member, in characters.
pub const MAX_DAILY_OUTPUT_CHARS: usize = 4_000;

const SUMMARY_TEMPERATURE: f32 = 0.2;
const MAX_PROMPT_LOG_CHARS: usize = 4_000;
const MAX_LLM_OUTPUT_LOG_CHARS: usize = 8_000;

/// Check the request before any model call, collecting every problem.
pub fn validate_summary_request(request: &SummaryRequest) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if request.team_output.is_empty() {
        issues.push(ValidationIssue::new(
            "teamOutput",
            "At least one team member's output is required",
        ));
    }

    for (i, output) in request.team_output.iter().enumerate() {
        if output.member_name.trim().is_empty() {
            issues.push(ValidationIssue::new(
                format!("teamOutput[{}].memberName", i),
                "Member name is required",
            ));
        }
        if output.daily_output.trim().is_empty() {
            issues.push(ValidationIssue::new(
                format!("teamOutput[{}].dailyOutput", i),
                "Daily output is required",
            ));
        } else if output.daily_output.chars().count() > MAX_DAILY_OUTPUT_CHARS {
            issues.push(ValidationIssue::new(
                format!("teamOutput[{}].dailyOutput", i),
                format!(
                    "Daily output must be at most {} characters",
                    MAX_DAILY_OUTPUT_CHARS
                ),
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

pub fn build_summary_prompt(request: &SummaryRequest) -> String {
    let mut team_output = String::new();
    for output in &request.team_output {
        let _ = writeln!(team_output, "- Member: {}", output.member_name.trim());
        let _ = writeln!(team_output, "  - Output: {}", output.daily_output.trim());
    }
    SUMMARY_PROMPT.replace("{team_output}", &team_output)
}

/// Validate, ask the model, and parse its report.
pub async fn summarize_team_output(
    client: &dyn LlmClient,
    request: &SummaryRequest,
) -> Result<ProductivityReport, AppError> {
    validate_summary_request(request).map_err(AppError::InvalidInput)?;

    let user = build_summary_prompt(request);
    debug!(
        prompt = %truncate_for_log(&user, MAX_PROMPT_LOG_CHARS),
        "requesting team summary"
    );

    let reply = client
        .complete(LlmRequest {
            system: SUMMARY_SYSTEM.to_string(),
            user,
            model: client.model().to_string(),
            temperature: SUMMARY_TEMPERATURE,
        })
        .await?;
    debug!(
        reply = %truncate_for_log(&reply, MAX_LLM_OUTPUT_LOG_CHARS),
        "team summary reply"
    );

    let report = parse_report(&reply)?;
    info!(
        members = request.team_output.len(),
        blockers = report.blockers.len(),
        "Generated productivity report"
    );
    Ok(report)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    #[serde(default)]
    overall_summary: String,
    #[serde(default)]
    productivity_analysis: Vec<RawMemberProductivity>,
    #[serde(default)]
    blockers: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMemberProductivity {
    member_name: String,
    productivity_score: f64,
    #[serde(default)]
    justification: String,
}

/// Parse the model reply into a report, clamping scores into `0..=100`.
pub fn parse_report(reply: &str) -> Result<ProductivityReport, LlmError> {
    let json = extract_json(reply)
        .ok_or_else(|| LlmError::Response("No JSON object in model reply".to_string()))?;
    let raw: RawReport =
        serde_json::from_str(json).map_err(|e| LlmError::Serialization(e.to_string()))?;

    if raw.overall_summary.trim().is_empty() {
        return Err(LlmError::Response(
            "Model reply is missing overallSummary".to_string(),
        ));
    }

    Ok(ProductivityReport {
        overall_summary: raw.overall_summary.trim().to_string(),
        productivity_analysis: raw
            .productivity_analysis
            .into_iter()
            .map(|m| MemberProductivity {
                member_name: m.member_name,
                productivity_score: clamp_score(m.productivity_score),
                justification: m.justification,
            })
            .collect(),
        blockers: non_blank(raw.blockers),
        suggestions: non_blank(raw.suggestions),
    })
}

fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
