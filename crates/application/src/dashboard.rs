//! Read models for the dashboard and the appointment calendar

use board::BoardStats;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use domain::{Appointment, AppointmentStatus, Task};
use serde::Serialize;
use std::collections::BTreeSet;

/// Appointments starting at or after `now`, cancelled ones excluded, soonest first
pub fn upcoming_appointments(
    appointments: &[Appointment],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&Appointment> {
    let mut upcoming: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.start >= now && a.status != AppointmentStatus::Cancelled)
        .collect();
    upcoming.sort_by_key(|a| a.start);
    upcoming.truncate(limit);
    upcoming
}

/// Tasks not completed; earliest deadline first, tasks without a deadline last
pub fn open_tasks(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut open: Vec<&Task> = tasks.iter().filter(|t| t.status.is_open()).collect();
    // stable sort keeps list order among equal deadlines
    open.sort_by_key(|t| (t.deadline.is_none(), t.deadline));
    open.truncate(limit);
    open
}

/// Appointments whose start falls on `day` in the viewer's timezone
pub fn appointments_on<'a, Tz: TimeZone>(
    appointments: &'a [Appointment],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Appointment> {
    let mut on_day: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.start.with_timezone(tz).date_naive() == day)
        .collect();
    on_day.sort_by_key(|a| a.start);
    on_day
}

/// Days carrying at least one appointment, for calendar highlighting
pub fn event_days<Tz: TimeZone>(appointments: &[Appointment], tz: &Tz) -> BTreeSet<NaiveDate> {
    appointments
        .iter()
        .map(|a| a.start.with_timezone(tz).date_naive())
        .collect()
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub upcoming: Vec<Appointment>,
    pub open_tasks: Vec<Task>,
    pub stats: BoardStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};
    use domain::TaskStatus;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap()
    }

    fn apt(id: &str, start: DateTime<Utc>, status: AppointmentStatus) -> Appointment {
        Appointment {
            status,
            ..Appointment::new(id, id, start, start + Duration::hours(1))
        }
    }

    #[test]
    fn test_upcoming_skips_past_and_cancelled() {
        let list = vec![
            apt("late", at(15), AppointmentStatus::Scheduled),
            apt("past", at(8), AppointmentStatus::Confirmed),
            apt("off", at(11), AppointmentStatus::Cancelled),
            apt("soon", at(10), AppointmentStatus::Confirmed),
        ];
        let ids: Vec<&str> = upcoming_appointments(&list, at(10), 5)
            .iter()
            .map(|a| a.id.as_str())
            .collect();

        assert_eq!(ids, vec!["soon", "late"]);
        assert_eq!(upcoming_appointments(&list, at(10), 1).len(), 1);
    }

    #[test]
    fn test_open_tasks_order() {
        let mut a = Task::new("a", "no deadline", TaskStatus::Todo);
        a.deadline = None;
        let mut b = Task::new("b", "later", TaskStatus::Blocked);
        b.deadline = Some(at(18));
        let mut c = Task::new("c", "sooner", TaskStatus::InProgress);
        c.deadline = Some(at(9));
        let done = Task::new("d", "done", TaskStatus::Completed);

        let tasks = vec![a, b, c, done];
        let ids: Vec<&str> = open_tasks(&tasks, 10).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_calendar_uses_viewer_timezone() {
        // 23:30 UTC on June 3 is already June 4 at UTC+2
        let late = Utc.with_ymd_and_hms(2024, 6, 3, 23, 30, 0).unwrap();
        let list = vec![apt("x", late, AppointmentStatus::Scheduled)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let june_4 = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

        assert_eq!(appointments_on(&list, june_4, &plus_two).len(), 1);
        assert!(appointments_on(&list, june_4, &Utc).is_empty());
        assert!(event_days(&list, &plus_two).contains(&june_4));
    }
}
