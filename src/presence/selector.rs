//! Best meeting day selection.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::calendar::{is_weekend, next_weekday};
use super::effective_status;
use crate::models::{DaySelection, PresenceStatus, RosterEntry, TeamMember, WorkStatus};

/// Pick the future weekday with the most members in the office.
///
/// Only weekdays strictly after `today` are candidates. Ties go to the
/// earliest day. When nobody is in the office on any candidate, the first
/// weekday after `today` is returned with a count of zero.
pub fn suggest_day(members: &[TeamMember], today: NaiveDate) -> DaySelection {
    // Only days someone recorded as in-office can score above zero.
    let candidates: BTreeSet<NaiveDate> = members
        .iter()
        .flat_map(|m| m.history.iter())
        .filter(|entry| entry.status == PresenceStatus::InOffice)
        .map(|entry| entry.date)
        .filter(|day| *day > today && !is_weekend(*day))
        .collect();

    let mut best_day = next_weekday(today);
    let mut best_count = 0;
    for day in candidates {
        let count = in_office_count(members, day);
        if count > best_count {
            best_day = day;
            best_count = count;
        }
    }

    DaySelection {
        day: best_day,
        attendee_count: best_count,
        roster: roster_for(members, best_day),
    }
}

/// Number of members whose strict effective status on `day` is In Office.
pub fn in_office_count(members: &[TeamMember], day: NaiveDate) -> usize {
    members
        .iter()
        .filter(|m| effective_status(&m.history, day) == WorkStatus::InOffice)
        .count()
}

/// Every member's strict effective status on `day`.
pub fn roster_for(members: &[TeamMember], day: NaiveDate) -> Vec<RosterEntry> {
    members
        .iter()
        .map(|m| RosterEntry {
            user_id: m.id.clone(),
            name: m.name.clone(),
            role: m.role.clone(),
            avatar_url: m.avatar_url.clone(),
            status: effective_status(&m.history, day),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoryEntry;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn member(id: &str, history: &[(NaiveDate, PresenceStatus)]) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: id.to_uppercase(),
            role: "Engineer".to_string(),
            avatar_url: "https://placehold.co/100x100".to_string(),
            status: WorkStatus::InOffice,
            history: history
                .iter()
                .map(|&(date, status)| HistoryEntry { date, status })
                .collect(),
            updated_at: "2024-06-01T00:00:00Z".to_string(),
        }
    }

    use PresenceStatus::{InOffice, Remote};

    #[test]
    fn test_lone_busy_day_wins() {
        let today = d(2024, 6, 9);
        let members = vec![
            member("b", &[(d(2024, 6, 10), Remote), (d(2024, 6, 11), InOffice)]),
            member("a", &[(d(2024, 6, 10), Remote)]),
        ];
        let selection = suggest_day(&members, today);
        assert_eq!(selection.day, d(2024, 6, 11));
        assert_eq!(selection.attendee_count, 1);
        let statuses: Vec<_> = selection.roster.iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![WorkStatus::InOffice, WorkStatus::NoStatus]);
    }

    #[test]
    fn test_equal_counts_pick_earliest() {
        // A in office Monday, B in office Tuesday: one attendee each day.
        let today = d(2024, 6, 9);
        let members = vec![
            member("a", &[(d(2024, 6, 10), InOffice)]),
            member("b", &[(d(2024, 6, 10), Remote), (d(2024, 6, 11), InOffice)]),
        ];
        let selection = suggest_day(&members, today);
        assert_eq!(selection.day, d(2024, 6, 10));
        assert_eq!(selection.attendee_count, 1);
        assert_eq!(selection.roster[0].status, WorkStatus::InOffice);
        assert_eq!(selection.roster[1].status, WorkStatus::Remote);
    }

    #[test]
    fn test_higher_count_beats_earlier_day() {
        let today = d(2024, 6, 9);
        let members = vec![
            member("a", &[(d(2024, 6, 10), InOffice), (d(2024, 6, 12), InOffice)]),
            member("b", &[(d(2024, 6, 12), InOffice)]),
            member("c", &[(d(2024, 6, 12), Remote)]),
        ];
        let selection = suggest_day(&members, today);
        assert_eq!(selection.day, d(2024, 6, 12));
        assert_eq!(selection.attendee_count, 2);
    }

    #[test]
    fn test_today_and_past_are_ignored() {
        let today = d(2024, 6, 12);
        let members = vec![
            member("a", &[(d(2024, 6, 11), InOffice), (today, InOffice)]),
            member("b", &[(d(2024, 6, 11), InOffice), (today, InOffice)]),
            member("c", &[(d(2024, 6, 14), InOffice)]),
        ];
        let selection = suggest_day(&members, today);
        assert_eq!(selection.day, d(2024, 6, 14));
        assert_eq!(selection.attendee_count, 1);
    }

    #[test]
    fn test_weekends_are_ignored() {
        let today = d(2024, 6, 12);
        let members = vec![
            member("a", &[(d(2024, 6, 15), InOffice), (d(2024, 6, 17), InOffice)]),
            member("b", &[(d(2024, 6, 15), InOffice), (d(2024, 6, 16), InOffice)]),
        ];
        let selection = suggest_day(&members, today);
        assert_eq!(selection.day, d(2024, 6, 17));
        assert_eq!(selection.attendee_count, 1);
    }

    #[test]
    fn test_nobody_in_office_returns_next_weekday() {
        // Friday: the next weekday is Monday.
        let today = d(2024, 6, 14);
        let members = vec![
            member("a", &[(d(2024, 6, 17), Remote)]),
            member("b", &[(d(2024, 6, 13), InOffice)]),
        ];
        let selection = suggest_day(&members, today);
        assert_eq!(selection.day, d(2024, 6, 17));
        assert_eq!(selection.attendee_count, 0);
        let statuses: Vec<_> = selection.roster.iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![WorkStatus::Remote, WorkStatus::NoStatus]);
    }

    #[test]
    fn test_empty_team() {
        let selection = suggest_day(&[], d(2024, 6, 9));
        assert_eq!(selection.day, d(2024, 6, 10));
        assert_eq!(selection.attendee_count, 0);
        assert!(selection.roster.is_empty());
    }

    #[test]
    fn test_selection_is_never_weekend_or_past() {
        let start = d(2024, 6, 1);
        for offset in 0..21u64 {
            let today = start + chrono::Days::new(offset);
            let members = vec![
                member("a", &[(today, InOffice), (today + chrono::Days::new(1), InOffice)]),
                member("b", &[(today + chrono::Days::new(2), InOffice)]),
            ];
            let selection = suggest_day(&members, today);
            assert!(selection.day > today, "{} not after {}", selection.day, today);
            assert!(!is_weekend(selection.day), "{} is a weekend", selection.day);
        }
    }
}
