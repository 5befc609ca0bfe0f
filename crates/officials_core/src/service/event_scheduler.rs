//! Mandatory event schedule derived from entry date and status.
//!
//! # Invariants
//! - `schedule` is pure and total: no I/O, no hidden state, no failure mode.
//! - Offsets are calendar months, clamped to the last day of shorter months.
//! - Output is ordered by ascending offset.

use crate::model::event::{EventType, PlannedEvent};
use crate::model::official::EmploymentStatus;
use chrono::{Months, NaiveDate};

const POSITIONED_PLAN: &[(EventType, u32)] = &[
    (EventType::FollowUp, 3),
    (EventType::TrialPeriodEvaluation, 6),
    (EventType::AnnualEvaluation, 12),
];

const PROVISIONAL_PLAN: &[(EventType, u32)] = &[(EventType::AnnualEvaluation, 12)];

/// Event types and month offsets required for `status`.
pub fn plan_for(status: EmploymentStatus) -> &'static [(EventType, u32)] {
    match status {
        EmploymentStatus::Positioned => POSITIONED_PLAN,
        EmploymentStatus::Provisional => PROVISIONAL_PLAN,
        EmploymentStatus::Inactive | EmploymentStatus::FollowUp => &[],
    }
}

/// Computes the events an official with `status` must have, anchored at
/// `entry_date`.
pub fn schedule(entry_date: NaiveDate, status: EmploymentStatus) -> Vec<PlannedEvent> {
    plan_for(status)
        .iter()
        .map(|&(event_type, months)| PlannedEvent {
            event_type,
            scheduled_date: add_months(entry_date, months),
        })
        .collect()
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    // Only overflows within a year of NaiveDate::MAX.
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::schedule;
    use crate::model::event::{EventType, PlannedEvent};
    use crate::model::official::EmploymentStatus;
    use chrono::{Datelike, NaiveDate};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn planned(event_type: EventType, scheduled_date: NaiveDate) -> PlannedEvent {
        PlannedEvent {
            event_type,
            scheduled_date,
        }
    }

    #[test]
    fn positioned_gets_follow_up_trial_and_annual() {
        let events = schedule(date(2024, 1, 15), EmploymentStatus::Positioned);
        assert_eq!(
            events,
            vec![
                planned(EventType::FollowUp, date(2024, 4, 15)),
                planned(EventType::TrialPeriodEvaluation, date(2024, 7, 15)),
                planned(EventType::AnnualEvaluation, date(2025, 1, 15)),
            ]
        );
    }

    #[test]
    fn provisional_gets_annual_evaluation_only() {
        let events = schedule(date(2023, 9, 1), EmploymentStatus::Provisional);
        assert_eq!(
            events,
            vec![planned(EventType::AnnualEvaluation, date(2024, 9, 1))]
        );
    }

    #[test]
    fn inactive_and_follow_up_get_nothing() {
        for day in [date(2020, 2, 29), date(2024, 12, 31), date(1999, 1, 1)] {
            assert!(schedule(day, EmploymentStatus::Inactive).is_empty());
            assert!(schedule(day, EmploymentStatus::FollowUp).is_empty());
        }
    }

    #[test]
    fn month_end_entry_dates_clamp_to_shorter_months() {
        let events = schedule(date(2023, 8, 31), EmploymentStatus::Positioned);
        let dates: Vec<NaiveDate> = events.iter().map(|event| event.scheduled_date).collect();
        assert_eq!(
            dates,
            vec![date(2023, 11, 30), date(2024, 2, 29), date(2024, 8, 31)]
        );
    }

    #[test]
    fn leap_day_annual_evaluation_lands_on_february_28() {
        let events = schedule(date(2024, 2, 29), EmploymentStatus::Provisional);
        assert_eq!(events[0].scheduled_date, date(2025, 2, 28));
    }

    #[test]
    fn overflow_near_max_date_saturates() {
        let events = schedule(NaiveDate::MAX, EmploymentStatus::Provisional);
        assert_eq!(events[0].scheduled_date, NaiveDate::MAX);
    }

    #[test]
    fn schedule_is_deterministic_and_ordered_for_every_day_of_a_leap_year() {
        let mut day = date(2024, 1, 1);
        while day.year() == 2024 {
            let first = schedule(day, EmploymentStatus::Positioned);
            let second = schedule(day, EmploymentStatus::Positioned);
            assert_eq!(first, second);
            assert_eq!(first.len(), 3);
            assert!(first.windows(2).all(|pair| pair[0].scheduled_date < pair[1].scheduled_date));
            assert!(first.iter().all(|event| event.scheduled_date > day));
            assert_eq!(first[2].scheduled_date.year(), 2025);

            let provisional = schedule(day, EmploymentStatus::Provisional);
            assert_eq!(provisional, vec![first[2]]);

            day = day.succ_opt().unwrap();
        }
    }
}
