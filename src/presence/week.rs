//! The "this week" dashboard view.

use chrono::NaiveDate;

use super::calendar::weekdays_from;
use super::{effective_status, resolve_status, StatusFallback};
use crate::models::{MemberWeek, TeamMember, WeekOverview, WorkStatus};

/// Number of weekdays shown in the overview.
pub const WEEK_LENGTH: usize = 5;

/// Build the weekly overview starting at `today`.
pub fn week_overview(
    members: &[TeamMember],
    today: NaiveDate,
    fallback: StatusFallback,
) -> WeekOverview {
    let days = weekdays_from(today, WEEK_LENGTH);

    let rows: Vec<MemberWeek> = members
        .iter()
        .map(|m| MemberWeek {
            member_id: m.id.clone(),
            name: m.name.clone(),
            role: m.role.clone(),
            avatar_url: m.avatar_url.clone(),
            statuses: days
                .iter()
                .map(|day| resolve_status(&m.history, *day, fallback))
                .collect(),
        })
        .collect();

    // Headline counts only include recorded entries; the fallback fills the grid.
    let count_today = |wanted: WorkStatus| {
        members
            .iter()
            .filter(|m| effective_status(&m.history, today) == wanted)
            .count()
    };

    WeekOverview {
        today,
        in_office_today: count_today(WorkStatus::InOffice),
        remote_today: count_today(WorkStatus::Remote),
        days,
        members: rows,
    }
}
