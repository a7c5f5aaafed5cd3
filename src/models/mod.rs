pub mod delivery;
pub mod enums;
pub mod medication;
pub mod reminder;
pub mod user;

pub use delivery::{DeliveryRequest, DeliveryRequestInput};
pub use enums::{DeliveryStatus, UserRole};
pub use medication::{Medication, MedicationInput};
pub use reminder::ReminderRecord;
pub use user::{RegistrationInput, User};

/// Trimmed copy of a form field, `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
