//! Reminder status engine.
//!
//! Pure derivations over a day's reminder records: which doses are still
//! upcoming, how many are done, the rendered list (orphaned records left
//! out), and which reminders are due for a notification. The only
//! mutation is `mark_taken`, which is one-way and idempotent.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::medication::parse_dose_time;
use crate::models::{Medication, ReminderRecord};

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// A reminder row resolved against its medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderView {
    pub reminder_id: String,
    pub medication_id: String,
    pub medication_name: String,
    pub dosage: String,
    pub time: String,
    pub taken: bool,
}

/// Status of one day's reminders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaySummary {
    /// Records neither taken nor skipped, in input order.
    pub upcoming: Vec<ReminderRecord>,
    pub completed_count: u32,
    pub total_count: u32,
    /// Rendered rows; records whose medication is missing are left out.
    pub entries: Vec<ReminderView>,
}

/// "Reminder due" event handed to the notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDue {
    pub reminder_id: String,
    pub medication_name: String,
    pub dosage: String,
    pub time: String,
    pub date: NaiveDate,
}

/// Result of a successful `mark_taken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    AlreadyTaken,
}

// ═══════════════════════════════════════════
// Derivations
// ═══════════════════════════════════════════

/// Lookup table from medication id to medication.
pub fn index_medications(medications: &[Medication]) -> HashMap<&str, &Medication> {
    medications.iter().map(|m| (m.id.as_str(), m)).collect()
}

/// The records belonging to `date`, in their original order.
pub fn reminders_for_date(reminders: &[ReminderRecord], date: NaiveDate) -> Vec<ReminderRecord> {
    reminders.iter().filter(|r| r.date == date).cloned().collect()
}

/// Summarize a day's reminders against the medication list.
pub fn summarize_day(medications: &[Medication], reminders: &[ReminderRecord]) -> DaySummary {
    let by_id = index_medications(medications);

    let upcoming: Vec<ReminderRecord> = reminders
        .iter()
        .filter(|r| r.is_pending())
        .cloned()
        .collect();
    let completed_count = reminders.iter().filter(|r| r.taken).count() as u32;

    let entries = reminders
        .iter()
        .filter_map(|r| {
            let med = by_id.get(r.medication_id.as_str())?;
            Some(ReminderView {
                reminder_id: r.id.clone(),
                medication_id: med.id.clone(),
                medication_name: med.name.clone(),
                dosage: med.dosage.clone(),
                time: r.time.clone(),
                taken: r.taken,
            })
        })
        .collect();

    DaySummary {
        upcoming,
        completed_count,
        total_count: reminders.len() as u32,
        entries,
    }
}

/// Pending reminders dated today whose time has arrived.
/// Orphaned records, unparseable times and medications not scheduled
/// that day never fire.
pub fn due_reminders(
    medications: &[Medication],
    reminders: &[ReminderRecord],
    now: NaiveDateTime,
) -> Vec<ReminderDue> {
    let by_id = index_medications(medications);
    let today = now.date();
    let clock = now.time();

    reminders
        .iter()
        .filter(|r| r.is_pending() && r.date == today)
        .filter(|r| parse_dose_time(&r.time).is_some_and(|t| t <= clock))
        .filter_map(|r| {
            let med = by_id
                .get(r.medication_id.as_str())
                .filter(|m| m.is_scheduled_on(r.date))?;
            Some(ReminderDue {
                reminder_id: r.id.clone(),
                medication_name: med.name.clone(),
                dosage: med.dosage.clone(),
                time: r.time.clone(),
                date: r.date,
            })
        })
        .collect()
}

// ═══════════════════════════════════════════
// Mutation
// ═══════════════════════════════════════════

/// Mark the reminder with `id` as taken.
///
/// Unknown ids leave the collection untouched and return `NotFound`.
/// A skipped reminder cannot be taken.
pub fn mark_taken(reminders: &mut [ReminderRecord], id: &str) -> Result<MarkOutcome, CoreError> {
    let reminder = reminders
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| CoreError::not_found("reminder", id))?;

    if reminder.taken {
        return Ok(MarkOutcome::AlreadyTaken);
    }
    if reminder.skipped {
        return Err(CoreError::Invalid(format!(
            "reminder {id} was skipped and cannot be marked taken"
        )));
    }
    reminder.taken = true;
    Ok(MarkOutcome::Marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn med(id: &str, name: &str, dosage: &str) -> Medication {
        Medication {
            id: id.into(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: "Once daily".into(),
            times: vec!["08:00".into()],
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
            instructions: None,
            refill_date: None,
            is_active: true,
        }
    }

    fn reminder(id: &str, med_id: &str, time: &str, taken: bool) -> ReminderRecord {
        ReminderRecord {
            id: id.into(),
            medication_id: med_id.into(),
            time: time.into(),
            taken,
            skipped: false,
            date: today(),
        }
    }

    fn demo() -> (Vec<Medication>, Vec<ReminderRecord>) {
        (
            vec![med("1", "Lisinopril", "10mg"), med("2", "Metformin", "500mg")],
            vec![
                reminder("1", "1", "08:00", false),
                reminder("2", "2", "08:00", true),
                reminder("3", "2", "20:00", false),
            ],
        )
    }

    #[test]
    fn one_taken_two_pending() {
        let (meds, reminders) = demo();
        let summary = summarize_day(&meds, &reminders);

        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.total_count, 3);
        let ids: Vec<&str> = summary.upcoming.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn upcoming_excludes_taken_and_skipped_preserving_order() {
        let meds = vec![med("m", "Aspirin", "81mg")];
        let mut skipped = reminder("b", "m", "09:00", false);
        skipped.skipped = true;
        let reminders = vec![
            reminder("a", "m", "07:00", false),
            skipped,
            reminder("c", "m", "12:00", true),
            reminder("d", "m", "18:00", false),
            reminder("e", "m", "22:00", false),
        ];

        let summary = summarize_day(&meds, &reminders);
        let ids: Vec<&str> = summary.upcoming.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d", "e"]);
        assert!(summary.completed_count <= summary.total_count);
    }

    #[test]
    fn orphaned_reminders_are_not_rendered() {
        let (meds, mut reminders) = demo();
        reminders.push(reminder("4", "gone", "12:00", false));

        let summary = summarize_day(&meds, &reminders);
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.entries.len(), 3);
        assert!(summary.entries.iter().all(|e| e.reminder_id != "4"));
        assert_eq!(summary.entries[1].medication_name, "Metformin");
        assert!(summary.entries[1].taken);
    }

    #[test]
    fn empty_day_summary() {
        let summary = summarize_day(&[], &[]);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.completed_count, 0);
        assert!(summary.upcoming.is_empty());
        assert!(summary.entries.is_empty());
    }

    #[test]
    fn filters_by_date() {
        let (_, mut reminders) = demo();
        let mut yesterday = reminder("0", "1", "08:00", true);
        yesterday.date = today().pred_opt().unwrap();
        reminders.insert(0, yesterday);

        let todays = reminders_for_date(&reminders, today());
        assert_eq!(todays.len(), 3);
        assert_eq!(todays[0].id, "1");
    }

    #[test]
    fn mark_taken_sets_flag() {
        let (_, mut reminders) = demo();
        assert_eq!(mark_taken(&mut reminders, "1").unwrap(), MarkOutcome::Marked);
        assert!(reminders[0].taken);
    }

    #[test]
    fn mark_taken_is_idempotent() {
        let (_, mut reminders) = demo();
        mark_taken(&mut reminders, "3").unwrap();
        let once = reminders.clone();

        assert_eq!(mark_taken(&mut reminders, "3").unwrap(), MarkOutcome::AlreadyTaken);
        assert_eq!(reminders, once);
    }

    #[test]
    fn mark_taken_unknown_id_is_not_found() {
        let (_, mut reminders) = demo();
        let before = reminders.clone();

        let err = mark_taken(&mut reminders, "99").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert!(err.is_recoverable());
        assert_eq!(reminders, before);
    }

    #[test]
    fn mark_taken_refuses_skipped() {
        let (_, mut reminders) = demo();
        reminders[0].skipped = true;

        assert!(matches!(mark_taken(&mut reminders, "1"), Err(CoreError::Invalid(_))));
        assert!(!reminders[0].taken);
    }

    #[test]
    fn due_reminders_fire_once_time_arrives() {
        let (meds, reminders) = demo();
        let morning = today().and_hms_opt(8, 0, 0).unwrap();
        let due = due_reminders(&meds, &reminders, morning);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].reminder_id, "1");
        assert_eq!(due[0].medication_name, "Lisinopril");

        let night = today().and_hms_opt(21, 0, 0).unwrap();
        let ids: Vec<String> = due_reminders(&meds, &reminders, night)
            .into_iter()
            .map(|d| d.reminder_id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn due_reminders_skip_other_days_and_orphans() {
        let (meds, mut reminders) = demo();
        reminders.push(reminder("4", "gone", "07:00", false));
        let tomorrow = today().succ_opt().unwrap().and_hms_opt(23, 0, 0).unwrap();
        assert!(due_reminders(&meds, &reminders, tomorrow).is_empty());

        let now = today().and_hms_opt(7, 30, 0).unwrap();
        assert!(due_reminders(&meds, &reminders, now).is_empty());
    }

    #[test]
    fn due_reminders_skip_inactive_and_ended_medications() {
        let (mut meds, reminders) = demo();
        meds[0].is_active = false;
        meds[1].end_date = today().pred_opt();
        let night = today().and_hms_opt(21, 0, 0).unwrap();
        assert!(due_reminders(&meds, &reminders, night).is_empty());

        meds[1].end_date = Some(today());
        let ids: Vec<String> = due_reminders(&meds, &reminders, night)
            .into_iter()
            .map(|d| d.reminder_id)
            .collect();
        assert_eq!(ids, vec!["3"]);
    }
}
