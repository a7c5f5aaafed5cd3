use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A medication on the user's list.
///
/// `refill_date` keeps the raw ISO string from the form; the refill
/// engine parses it and degrades to "not applicable" when malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Display order. Empty means "as needed".
    #[serde(default)]
    pub times: Vec<String>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refill_date: Option<String>,
    pub is_active: bool,
}

/// Medication form values as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub times: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub refill_date: String,
}

impl Medication {
    pub fn is_as_needed(&self) -> bool {
        self.times.is_empty()
    }

    /// Whether the medication is scheduled on `date` (active and within
    /// its start/end window).
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.start_date <= date
            && self.end_date.map_or(true, |end| date <= end)
    }

    /// Every dose time must read as 24-hour "HH:MM".
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.times.iter().find(|t| parse_dose_time(t).is_none()) {
            Some(bad) => Err(CoreError::Invalid(format!(
                "medication {} has malformed dose time {bad:?}",
                self.id
            ))),
            None => Ok(()),
        }
    }
}

/// Parse a 24-hour clock time ("8:00", "08:00", "20:30") into canonical "HH:MM".
pub fn normalize_dose_time(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

/// Parse a stored reminder/medication time for comparisons.
pub fn parse_dose_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}
