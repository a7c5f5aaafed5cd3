//! Session and collection store.
//!
//! A `Session` owns the signed-in user and the user's medications,
//! reminders and delivery requests. It is the only stateful part of the
//! core; the status engines are pure and read from it.
//!
//! `SessionManager` adds the load / save / sign-out lifecycle on top of
//! a `SessionStore`.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::delivery::{delivery_card, DeliveryCard};
use crate::error::CoreError;
use crate::medications::{self, MedicationCard};
use crate::models::medication::normalize_dose_time;
use crate::models::{
    non_blank, DeliveryRequest, DeliveryRequestInput, DeliveryStatus, Medication,
    MedicationInput, ReminderRecord, User,
};
use crate::notify::Notifier;
use crate::reminders::{self, DaySummary, MarkOutcome};
use crate::store::{SessionSnapshot, SessionStore};

// ═══════════════════════════════════════════════════════════
// View types
// ═══════════════════════════════════════════════════════════

/// Everything the dashboard header and reminder list need for one day.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user_name: String,
    pub role: &'static str,
    pub completed_today: u32,
    pub total_today: u32,
    pub active_medications: u32,
    pub upcoming_reminders: u32,
    pub delivery_requests: u32,
    pub today: DaySummary,
    pub refill_alerts: Vec<MedicationCard>,
}

/// Status reported by the external fulfillment process.
#[derive(Debug, Clone)]
pub struct DeliveryUpdate {
    pub status: DeliveryStatus,
    pub volunteer_id: Option<String>,
    pub delivery_date: Option<NaiveDate>,
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    medications: Vec<Medication>,
    reminders: Vec<ReminderRecord>,
    delivery_requests: Vec<DeliveryRequest>,
    /// Reminder ids already handed to the notifier this session.
    notified: HashSet<String>,
}

impl Session {
    /// Start a fresh session for `user` with empty collections.
    pub fn sign_in(user: User) -> Self {
        tracing::info!(user_id = %user.id, role = %user.role, "Session started");
        Self {
            user,
            medications: Vec::new(),
            reminders: Vec::new(),
            delivery_requests: Vec::new(),
            notified: HashSet::new(),
        }
    }

    /// Rebuild a session from a stored snapshot.
    ///
    /// Stale dates are kept as-is. Reminders marked both taken and
    /// skipped are dropped.
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        let SessionSnapshot {
            user,
            medications,
            reminders,
            delivery_requests,
        } = snapshot;

        let before = reminders.len();
        let reminders: Vec<ReminderRecord> = reminders
            .into_iter()
            .filter(|r| match r.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping invalid stored reminder");
                    false
                }
            })
            .collect();
        let dropped = before - reminders.len();

        tracing::info!(
            user_id = %user.id,
            medications = medications.len(),
            reminders = reminders.len(),
            dropped,
            "Session restored"
        );

        Self {
            user,
            medications,
            reminders,
            delivery_requests,
            notified: HashSet::new(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            medications: self.medications.clone(),
            reminders: self.reminders.clone(),
            delivery_requests: self.delivery_requests.clone(),
        }
    }

    // ── Accessors ────────────────────────────────────────

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn reminders(&self) -> &[ReminderRecord] {
        &self.reminders
    }

    pub fn delivery_requests(&self) -> &[DeliveryRequest] {
        &self.delivery_requests
    }

    // ── Mutations ────────────────────────────────────────

    /// Replace the profile as a whole.
    pub fn replace_profile(&mut self, user: User) {
        tracing::debug!(user_id = %user.id, "Profile replaced");
        self.user = user;
    }

    /// Append a medication from form input. Never fails.
    ///
    /// Blank time slots are dropped; malformed ones are dropped with a
    /// warning so stored times stay well-formed "HH:MM".
    pub fn add_medication(&mut self, input: MedicationInput, today: NaiveDate) -> &Medication {
        let mut times = Vec::with_capacity(input.times.len());
        for raw in input.times.iter().filter(|t| !t.trim().is_empty()) {
            match normalize_dose_time(raw) {
                Some(t) => times.push(t),
                None => tracing::warn!(time = %raw, "Dropping malformed reminder time"),
            }
        }

        let medication = Medication {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            dosage: input.dosage.trim().to_string(),
            frequency: input.frequency.trim().to_string(),
            times,
            start_date: today,
            end_date: None,
            instructions: non_blank(&input.instructions),
            refill_date: non_blank(&input.refill_date),
            is_active: true,
        };
        tracing::debug!(medication_id = %medication.id, "Medication added");
        self.medications.push(medication);
        &self.medications[self.medications.len() - 1]
    }

    /// Append a delivery request; it always starts out pending.
    pub fn add_delivery_request(
        &mut self,
        input: DeliveryRequestInput,
        today: NaiveDate,
    ) -> &DeliveryRequest {
        let request = DeliveryRequest {
            id: Uuid::new_v4().to_string(),
            medication_name: input.medication_name.trim().to_string(),
            pharmacy: input.pharmacy.trim().to_string(),
            request_date: today,
            delivery_date: None,
            status: DeliveryStatus::Pending,
            volunteer_id: None,
            notes: non_blank(&input.notes),
        };
        tracing::debug!(request_id = %request.id, "Delivery request submitted");
        self.delivery_requests.push(request);
        &self.delivery_requests[self.delivery_requests.len() - 1]
    }

    pub fn mark_reminder_taken(&mut self, id: &str) -> Result<MarkOutcome, CoreError> {
        let outcome = reminders::mark_taken(&mut self.reminders, id)?;
        tracing::debug!(reminder_id = %id, ?outcome, "Reminder marked taken");
        Ok(outcome)
    }

    /// Bulk replace all three collections.
    ///
    /// The whole batch is rejected, and nothing changes, if any reminder
    /// is both taken and skipped or any medication has a malformed time.
    pub fn replace_collections(
        &mut self,
        medications: Vec<Medication>,
        reminders: Vec<ReminderRecord>,
        delivery_requests: Vec<DeliveryRequest>,
    ) -> Result<(), CoreError> {
        for medication in &medications {
            medication.validate()?;
        }
        for reminder in &reminders {
            reminder.validate()?;
        }
        self.medications = medications;
        self.reminders = reminders;
        self.delivery_requests = delivery_requests;
        self.notified.clear();
        tracing::debug!(
            medications = self.medications.len(),
            reminders = self.reminders.len(),
            delivery_requests = self.delivery_requests.len(),
            "Collections replaced"
        );
        Ok(())
    }

    /// Record a status change reported by the fulfillment process.
    /// Status may only move forward.
    pub fn apply_delivery_update(
        &mut self,
        id: &str,
        update: DeliveryUpdate,
    ) -> Result<&DeliveryRequest, CoreError> {
        let request = self
            .delivery_requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("delivery request", id))?;

        if !request.status.can_advance_to(update.status) {
            return Err(CoreError::Invalid(format!(
                "delivery {id} cannot go from {} to {}",
                request.status, update.status
            )));
        }

        request.status = update.status;
        if update.volunteer_id.is_some() {
            request.volunteer_id = update.volunteer_id;
        }
        if update.delivery_date.is_some() {
            request.delivery_date = update.delivery_date;
        }
        tracing::debug!(request_id = %id, status = %request.status, "Delivery status updated");
        Ok(&*request)
    }

    // ── Views ────────────────────────────────────────────

    pub fn todays_reminders(&self, today: NaiveDate) -> Vec<ReminderRecord> {
        reminders::reminders_for_date(&self.reminders, today)
    }

    pub fn day_summary(&self, today: NaiveDate) -> DaySummary {
        reminders::summarize_day(&self.medications, &self.todays_reminders(today))
    }

    pub fn medication_cards(&self, today: NaiveDate) -> Vec<MedicationCard> {
        medications::medication_cards(today, &self.medications)
    }

    pub fn delivery_cards(&self) -> Vec<DeliveryCard> {
        self.delivery_requests.iter().map(delivery_card).collect()
    }

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let summary = self.day_summary(today);
        Dashboard {
            user_name: self.user.name.clone(),
            role: self.user.role.display_name(),
            completed_today: summary.completed_count,
            total_today: summary.total_count,
            active_medications: medications::count_active(&self.medications),
            upcoming_reminders: summary.upcoming.len() as u32,
            delivery_requests: self.delivery_requests.len() as u32,
            today: summary,
            refill_alerts: medications::refill_alerts(today, &self.medications),
        }
    }

    /// Hand newly due reminders to `notifier`. Each reminder is signalled
    /// at most once per session. Returns how many were sent.
    pub fn dispatch_due(&mut self, now: NaiveDateTime, notifier: &dyn Notifier) -> usize {
        let due = reminders::due_reminders(&self.medications, &self.reminders, now);
        let mut sent = 0;
        for event in due {
            if self.notified.insert(event.reminder_id.clone()) {
                notifier.notify(&event);
                sent += 1;
            }
        }
        sent
    }
}

// ═══════════════════════════════════════════════════════════
// SessionManager — lifecycle over a store
// ═══════════════════════════════════════════════════════════

/// Holds at most one active session and persists it through `S`.
pub struct SessionManager<S: SessionStore> {
    store: S,
    session: Option<Session>,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
        }
    }

    /// Restore the stored session, if any. A missing record is a fresh start.
    pub fn load(&mut self) -> Result<Option<&mut Session>, CoreError> {
        match self.store.load()? {
            Some(snapshot) => {
                self.session = Some(Session::restore(snapshot));
            }
            None => {
                tracing::info!("No stored session");
                self.session = None;
            }
        }
        Ok(self.session.as_mut())
    }

    /// Start a session for `user` and persist it.
    pub fn sign_in(&mut self, user: User) -> Result<&mut Session, CoreError> {
        let session = Session::sign_in(user);
        self.store.save(&session.snapshot())?;
        Ok(self.session.insert(session))
    }

    /// Persist the active session. No-op when signed out.
    pub fn save(&mut self) -> Result<(), CoreError> {
        if let Some(session) = &self.session {
            self.store.save(&session.snapshot())?;
            tracing::debug!(user_id = %session.user().id, "Session saved");
        }
        Ok(())
    }

    /// Drop the active session and clear the stored record.
    pub fn sign_out(&mut self) -> Result<(), CoreError> {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = %session.user().id, "Signed out");
        }
        self.store.clear()?;
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
