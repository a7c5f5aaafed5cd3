use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One scheduled dose: medication X at time T on date D.
///
/// `medication_id` is a weak reference. `taken` and `skipped` are never
/// both set, and `taken` never goes back to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    pub id: String,
    pub medication_id: String,
    pub time: String,
    #[serde(default)]
    pub taken: bool,
    #[serde(default)]
    pub skipped: bool,
    pub date: NaiveDate,
}

impl ReminderRecord {
    /// A fresh, untaken reminder with a generated id.
    #[cfg(test)]
    pub(crate) fn new(medication_id: impl Into<String>, time: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            medication_id: medication_id.into(),
            time: time.into(),
            taken: false,
            skipped: false,
            date,
        }
    }

    /// Neither taken nor skipped.
    pub fn is_pending(&self) -> bool {
        !self.taken && !self.skipped
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.taken && self.skipped {
            return Err(CoreError::Invalid(format!(
                "reminder {} is marked both taken and skipped",
                self.id
            )));
        }
        Ok(())
    }
}
