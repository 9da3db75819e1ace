//! Justification text for the selected meeting day.

use std::fmt::Write;

use tracing::debug;

use super::prompts::{MEETING_JUSTIFICATION_PROMPT, MEETING_JUSTIFICATION_SYSTEM};
use crate::llm::{truncate_for_log, LlmClient, LlmError, LlmRequest};
use crate::models::{DaySelection, MeetingSuggestion};

const MEETING_TEMPERATURE: f32 = 0.4;
const MAX_PROMPT_LOG_CHARS: usize = 2_000;

/// Attach a justification to a deterministic day selection.
///
/// With no client configured the justification is generated locally. A
/// configured client that fails surfaces its error.
pub async fn suggest_meeting(
    client: Option<&dyn LlmClient>,
    selection: DaySelection,
) -> Result<MeetingSuggestion, LlmError> {
    let justification = match client {
        Some(client) => {
            let text = request_justification(client, &selection).await?;
            if text.is_empty() {
                local_justification(&selection)
            } else {
                text
            }
        }
        None => local_justification(&selection),
    };

    Ok(MeetingSuggestion {
        suggested_day: selection.day,
        expected_attendees: selection.attendee_count,
        justification,
        attendees: selection.roster,
    })
}

async fn request_justification(
    client: &dyn LlmClient,
    selection: &DaySelection,
) -> Result<String, LlmError> {
    let user = build_justification_prompt(selection);
    debug!(
        prompt = %truncate_for_log(&user, MAX_PROMPT_LOG_CHARS),
        "requesting meeting justification"
    );

    let reply = client
        .complete(LlmRequest {
            system: MEETING_JUSTIFICATION_SYSTEM.to_string(),
            user,
            model: client.model().to_string(),
            temperature: MEETING_TEMPERATURE,
        })
        .await?;

    Ok(clean_reply(&reply))
}

pub fn build_justification_prompt(selection: &DaySelection) -> String {
    let mut roster = String::new();
    for entry in &selection.roster {
        let _ = writeln!(
            roster,
            "- {} ({}): {}",
            entry.name,
            entry.role,
            entry.status.as_str()
        );
    }
    if roster.is_empty() {
        roster.push_str("- nobody has recorded a status\n");
    }

    MEETING_JUSTIFICATION_PROMPT
        .replace("{day}", &format_day(selection))
        .replace("{attendees}", &selection.attendee_count.to_string())
        .replace("{team_size}", &selection.roster.len().to_string())
        .replace("{roster}", &roster)
}

/// Justification used when no model is configured.
pub fn local_justification(selection: &DaySelection) -> String {
    let day = format_day(selection);
    match selection.attendee_count {
        0 => format!(
            "Nobody has planned an office day yet, so {} is simply the next available weekday.",
            day
        ),
        1 => format!(
            "{} has the most in-office presence planned, with 1 of {} team members expected in the office.",
            day,
            selection.roster.len()
        ),
        n => format!(
            "{} has the most in-office presence planned, with {} of {} team members expected in the office.",
            day,
            n,
            selection.roster.len()
        ),
    }
}

fn format_day(selection: &DaySelection) -> String {
    selection.day.format("%A, %B %-d").to_string()
}

fn clean_reply(reply: &str) -> String {
    reply
        .trim()
        .trim_matches(|c| c == '"' || c == '`')
        .trim()
        .to_string()
}
