//! Prompt templates for the language model flows.

pub const MEETING_JUSTIFICATION_SYSTEM: &str = "\
You are an assistant helping a team manager plan an in-person team meeting. \
The meeting day has already been chosen; do not suggest a different day. \
Write a brief, friendly justification of one or two sentences. \
Reply with the justification text only: no lists, no markdown, no quotes.";

pub const MEETING_JUSTIFICATION_PROMPT: &str = "\
Chosen day: {day}
Team members expected in the office: {attendees} of {team_size}

Status of every team member on that day:
{roster}
Explain why this is the best day for the team to meet in person.";

pub const SUMMARY_SYSTEM: &str = "\
You are a team productivity expert reviewing the daily outputs of remote team members. \
You MUST respond with one valid JSON object only: no markdown fences, no explanations.";

pub const SUMMARY_PROMPT: &str = r#"Provide a structured analysis of the team's daily outputs:
1. A brief, high-level summary (2-3 sentences) of the team's collective work.
2. A productivity analysis for each member with a score from 0 to 100, based on completed tasks, progress made, and clarity of the update, plus a 1-2 sentence justification.
3. A list of potential blockers or challenges mentioned. If none, return an empty array.
4. A list of actionable suggestions for task re-balancing, collaboration, or process improvement.

OUTPUT SCHEMA (return exactly this structure):
{
  "overallSummary": "string",
  "productivityAnalysis": [
    {"memberName": "string", "productivityScore": number, "justification": "string"}
  ],
  "blockers": ["string"],
  "suggestions": ["string"]
}

TEAM OUTPUT:
{team_output}"#;
