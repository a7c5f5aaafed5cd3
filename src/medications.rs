//! Medication list: card view types and builders.
//!
//! Each card carries the medication's display fields plus its derived
//! refill status for the given day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Medication;
use crate::refill::{medication_refill_status, RefillStatus};

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// A medication card for the list view.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationCard {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Reminder times joined for display ("08:00, 20:00"), or "As needed".
    pub schedule: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub instructions: Option<String>,
    pub is_active: bool,
    pub status_label: &'static str,
    pub refill: RefillStatus,
}

// ═══════════════════════════════════════════
// Builders
// ═══════════════════════════════════════════

pub fn medication_card(today: NaiveDate, medication: &Medication) -> MedicationCard {
    let schedule = if medication.is_as_needed() {
        "As needed".to_string()
    } else {
        medication.times.join(", ")
    };
    MedicationCard {
        id: medication.id.clone(),
        name: medication.name.clone(),
        dosage: medication.dosage.clone(),
        frequency: medication.frequency.clone(),
        schedule,
        start_date: medication.start_date,
        end_date: medication.end_date,
        instructions: medication.instructions.clone(),
        is_active: medication.is_active,
        status_label: if medication.is_active { "Active" } else { "Inactive" },
        refill: medication_refill_status(today, medication),
    }
}

/// Cards for every medication, in list order.
pub fn medication_cards(today: NaiveDate, medications: &[Medication]) -> Vec<MedicationCard> {
    medications.iter().map(|m| medication_card(today, m)).collect()
}

pub fn count_active(medications: &[Medication]) -> u32 {
    medications.iter().filter(|m| m.is_active).count() as u32
}

/// Cards whose refill is due soon or overdue.
pub fn refill_alerts(today: NaiveDate, medications: &[Medication]) -> Vec<MedicationCard> {
    medication_cards(today, medications)
        .into_iter()
        .filter(|c| c.refill.urgency.needs_attention())
        .collect()
}
