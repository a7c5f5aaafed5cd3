//! Notification collaborator seam.
//!
//! The core only decides *which* reminders are due; surfacing them
//! (system notifications, permission prompts) belongs to the embedder.

use crate::reminders::ReminderDue;

/// Receives "reminder due" events.
pub trait Notifier {
    fn notify(&self, event: &ReminderDue);
}

/// Logs each due reminder through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &ReminderDue) {
        tracing::info!(
            reminder_id = %event.reminder_id,
            time = %event.time,
            "Time to take {} ({})",
            event.medication_name,
            event.dosage
        );
    }
}
