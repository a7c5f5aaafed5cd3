//! Refill status engine.
//!
//! Days until a medication's next refill, classified into an urgency
//! with a short label and, when urgent, a warning sentence. Day counts
//! come from calendar-date subtraction so clock changes never shift them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::REFILL_DUE_SOON_DAYS;
use crate::error::CoreError;
use crate::models::Medication;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefillUrgency {
    NotApplicable,
    Ok,
    DueSoon,
    Overdue,
}

impl RefillUrgency {
    /// Classify a day count. 7 and 0 are both due soon.
    pub fn from_days(days: i64) -> Self {
        if days > REFILL_DUE_SOON_DAYS {
            Self::Ok
        } else if days >= 0 {
            Self::DueSoon
        } else {
            Self::Overdue
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::DueSoon | Self::Overdue)
    }
}

/// Derived refill view for one medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefillStatus {
    pub urgency: RefillUrgency,
    pub days_remaining: Option<i64>,
    pub label: Option<String>,
    pub warning: Option<String>,
}

impl RefillStatus {
    pub fn not_applicable() -> Self {
        Self {
            urgency: RefillUrgency::NotApplicable,
            days_remaining: None,
            label: None,
            warning: None,
        }
    }

    /// Status for a known day count.
    pub fn from_days(days: i64) -> Self {
        let urgency = RefillUrgency::from_days(days);
        let label = match days {
            d if d > 0 => format!("{d} days"),
            0 => "Today".to_string(),
            _ => "Overdue".to_string(),
        };
        let warning = urgency.needs_attention().then(|| match days {
            d if d > 0 => format!("Your prescription needs refilling in {d} days."),
            0 => "Your prescription needs refilling today.".to_string(),
            _ => "Your prescription refill is overdue.".to_string(),
        });
        Self {
            urgency,
            days_remaining: Some(days),
            label: Some(label),
            warning,
        }
    }
}

/// Parse an ISO calendar date. A full timestamp contributes its date only.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map(|dt| dt.date())
        .map_err(|_| CoreError::Invalid(format!("not a calendar date: {trimmed:?}")))
}

/// Whole calendar days from `today` to `target` (negative when past).
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Refill status for an optional refill date string.
///
/// Absent, blank or malformed dates yield `NotApplicable`.
pub fn refill_status(today: NaiveDate, refill_date: Option<&str>) -> RefillStatus {
    let Some(raw) = refill_date.filter(|s| !s.trim().is_empty()) else {
        return RefillStatus::not_applicable();
    };
    match parse_calendar_date(raw) {
        Ok(date) => RefillStatus::from_days(days_until(today, date)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unusable refill date");
            RefillStatus::not_applicable()
        }
    }
}

/// Refill status of a medication on `today`.
pub fn medication_refill_status(today: NaiveDate, medication: &Medication) -> RefillStatus {
    refill_status(today, medication.refill_date.as_deref())
}
