//! Presence reconciliation and history updates.
//!
//! Everything here is a pure function over member data. Handlers load members
//! from the repository, transform them with these functions and write the
//! returned member back.

pub mod calendar;
mod selector;
mod week;

pub use selector::*;
pub use week::*;

use chrono::NaiveDate;

use crate::models::{HistoryEntry, PresenceStatus, TeamMember, WorkStatus};

/// What to report for a day that has no history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFallback {
    /// Report `No Status`.
    #[default]
    NoStatus,
    /// Report the given status as if it had been recorded.
    Assume(PresenceStatus),
}

impl StatusFallback {
    /// Parse the `PRESENCE_DEFAULT_STATUS` setting.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no-status" | "" => Some(StatusFallback::NoStatus),
            "in-office" | "office" => Some(StatusFallback::Assume(PresenceStatus::InOffice)),
            "remote" => Some(StatusFallback::Assume(PresenceStatus::Remote)),
            _ => None,
        }
    }

    fn status(self) -> WorkStatus {
        match self {
            StatusFallback::NoStatus => WorkStatus::NoStatus,
            StatusFallback::Assume(status) => status.into(),
        }
    }
}

/// The recorded status for `day`, if any.
pub fn recorded_status(history: &[HistoryEntry], day: NaiveDate) -> Option<PresenceStatus> {
    history
        .iter()
        .find(|entry| entry.date == day)
        .map(|entry| entry.status)
}

/// Strict effective status: the recorded status, or `No Status`.
pub fn effective_status(history: &[HistoryEntry], day: NaiveDate) -> WorkStatus {
    resolve_status(history, day, StatusFallback::NoStatus)
}

/// Effective status with a caller-chosen value for unrecorded days.
pub fn resolve_status(
    history: &[HistoryEntry],
    day: NaiveDate,
    fallback: StatusFallback,
) -> WorkStatus {
    recorded_status(history, day)
        .map(WorkStatus::from)
        .unwrap_or_else(|| fallback.status())
}

/// Record `status` for a single day.
pub fn apply_status(
    member: TeamMember,
    day: NaiveDate,
    status: PresenceStatus,
    today: NaiveDate,
) -> TeamMember {
    apply_batch(member, &[(day, status)], today)
}

/// Apply a batch of `(day, status)` updates to a member.
///
/// Existing entries for a day are overwritten in place, new days are
/// appended. When one of the updated days is `today`, the member's top-level
/// status follows it. Applying the same batch twice yields the same member.
pub fn apply_batch(
    mut member: TeamMember,
    updates: &[(NaiveDate, PresenceStatus)],
    today: NaiveDate,
) -> TeamMember {
    for &(day, status) in updates {
        match member.history.iter_mut().find(|entry| entry.date == day) {
            Some(entry) => entry.status = status,
            None => member.history.push(HistoryEntry { date: day, status }),
        }

        if day == today {
            member.status = status.into();
        }
    }
    member
}

/// History entries sorted by day, restricted to an inclusive range.
pub fn history_between(
    history: &[HistoryEntry],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = history
        .iter()
        .filter(|entry| from.map_or(true, |f| entry.date >= f))
        .filter(|entry| to.map_or(true, |t| entry.date <= t))
        .copied()
        .collect();
    entries.sort_by_key(|entry| entry.date);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn member(history: Vec<HistoryEntry>) -> TeamMember {
        TeamMember {
            id: "m1".to_string(),
            name: "Ada".to_string(),
            role: "Engineer".to_string(),
            avatar_url: "https://placehold.co/100x100".to_string(),
            status: WorkStatus::InOffice,
            history,
            updated_at: "2024-06-01T00:00:00Z".to_string(),
        }
    }

    fn entry(date: NaiveDate, status: PresenceStatus) -> HistoryEntry {
        HistoryEntry { date, status }
    }

    #[test]
    fn test_single_entry_is_effective() {
        for status in [PresenceStatus::InOffice, PresenceStatus::Remote] {
            let history = vec![entry(d(2024, 6, 10), status)];
            assert_eq!(effective_status(&history, d(2024, 6, 10)), status.into());
        }
    }

    #[test]
    fn test_missing_entry_is_no_status() {
        let history = vec![entry(d(2024, 6, 10), PresenceStatus::Remote)];
        assert_eq!(effective_status(&history, d(2024, 6, 11)), WorkStatus::NoStatus);
        assert_eq!(effective_status(&[], d(2024, 6, 11)), WorkStatus::NoStatus);
    }

    #[test]
    fn test_fallback_only_applies_to_missing_days() {
        let history = vec![entry(d(2024, 6, 10), PresenceStatus::Remote)];
        let fallback = StatusFallback::Assume(PresenceStatus::InOffice);
        assert_eq!(
            resolve_status(&history, d(2024, 6, 10), fallback),
            WorkStatus::Remote
        );
        assert_eq!(
            resolve_status(&history, d(2024, 6, 11), fallback),
            WorkStatus::InOffice
        );
    }

    #[test]
    fn test_fallback_parse() {
        assert_eq!(StatusFallback::parse("none"), Some(StatusFallback::NoStatus));
        assert_eq!(
            StatusFallback::parse("In-Office"),
            Some(StatusFallback::Assume(PresenceStatus::InOffice))
        );
        assert_eq!(
            StatusFallback::parse("remote"),
            Some(StatusFallback::Assume(PresenceStatus::Remote))
        );
        assert_eq!(StatusFallback::parse("sometimes"), None);
    }

    #[test]
    fn test_batch_today_sets_top_level_status() {
        let today = d(2024, 6, 10);
        let updated = apply_batch(member(vec![]), &[(today, PresenceStatus::Remote)], today);
        assert_eq!(updated.status, WorkStatus::Remote);
        assert_eq!(effective_status(&updated.history, today), WorkStatus::Remote);
    }

    #[test]
    fn test_batch_future_day_keeps_top_level_status() {
        let today = d(2024, 6, 10);
        let tomorrow = d(2024, 6, 11);
        let mut start = member(vec![]);
        start.status = WorkStatus::Remote;
        let updated = apply_batch(start, &[(tomorrow, PresenceStatus::InOffice)], today);
        assert_eq!(updated.status, WorkStatus::Remote);
        assert_eq!(
            effective_status(&updated.history, tomorrow),
            WorkStatus::InOffice
        );
    }

    #[test]
    fn test_batch_overwrites_in_place() {
        let today = d(2024, 6, 3);
        let start = member(vec![
            entry(d(2024, 6, 10), PresenceStatus::InOffice),
            entry(d(2024, 6, 11), PresenceStatus::InOffice),
        ]);
        let updated = apply_batch(
            start,
            &[
                (d(2024, 6, 11), PresenceStatus::Remote),
                (d(2024, 6, 12), PresenceStatus::Remote),
            ],
            today,
        );
        assert_eq!(
            updated.history,
            vec![
                entry(d(2024, 6, 10), PresenceStatus::InOffice),
                entry(d(2024, 6, 11), PresenceStatus::Remote),
                entry(d(2024, 6, 12), PresenceStatus::Remote),
            ]
        );
    }

    #[test]
    fn test_batch_is_idempotent() {
        let today = d(2024, 6, 10);
        let updates = [
            (today, PresenceStatus::Remote),
            (d(2024, 6, 11), PresenceStatus::InOffice),
            (d(2024, 6, 12), PresenceStatus::Remote),
        ];
        let once = apply_batch(member(vec![]), &updates, today);
        let twice = apply_batch(once.clone(), &updates, today);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_batch_with_repeated_day_keeps_one_entry() {
        let today = d(2024, 6, 10);
        let updated = apply_batch(
            member(vec![]),
            &[
                (today, PresenceStatus::Remote),
                (today, PresenceStatus::InOffice),
            ],
            today,
        );
        assert_eq!(updated.history.len(), 1);
        assert_eq!(updated.status, WorkStatus::InOffice);
    }

    #[test]
    fn test_apply_status_single_day() {
        let today = d(2024, 6, 10);
        let updated = apply_status(member(vec![]), today, PresenceStatus::Remote, today);
        assert_eq!(updated.status, WorkStatus::Remote);
        assert_eq!(updated.history, vec![entry(today, PresenceStatus::Remote)]);
    }

    #[test]
    fn test_history_between_sorts_and_filters() {
        let history = vec![
            entry(d(2024, 6, 12), PresenceStatus::Remote),
            entry(d(2024, 6, 3), PresenceStatus::InOffice),
            entry(d(2024, 6, 10), PresenceStatus::InOffice),
        ];
        let all = history_between(&history, None, None);
        assert_eq!(
            all.iter().map(|e| e.date).collect::<Vec<_>>(),
            vec![d(2024, 6, 3), d(2024, 6, 10), d(2024, 6, 12)]
        );

        let ranged = history_between(&history, Some(d(2024, 6, 4)), Some(d(2024, 6, 10)));
        assert_eq!(ranged, vec![entry(d(2024, 6, 10), PresenceStatus::InOffice)]);
    }
}
