//! RSVP form controller: field validation, the attending/not-attending
//! conditional block, meal group generation and the submit state machine.
//!
//! All state lives in [`FormState`]; hosts feed [`FormEvent`]s in and read a
//! fresh [`FormView`] back out after every transition.

use std::{sync::Arc, time::Instant};

use chrono::Utc;
use shared::{
    config::SiteConfig,
    domain::{AttendanceAnswer, AttendanceState, FieldName, Severity},
    protocol::{AttendingDetails, GuestContact, SubmissionPayload},
};
use tracing::{debug, error, info, warn};

use crate::{
    error::SubmitError,
    form::{FieldStatus, FormState},
    notices::{LoadingOverlay, Notices},
    validation::FieldRule,
    view::FormView,
    SubmissionPort,
};

pub const SUBMIT_LABEL: &str = "Submit RSVP";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const LOADING_MESSAGE: &str = "Submitting your RSVP...";
pub const ATTENDING_REQUIRED_MESSAGE: &str = "Please select whether you will be attending.";
pub const NOT_CONFIGURED_MESSAGE: &str = "RSVP form is not configured yet. Please set up Google Apps Script. See docs/SETUP.md for instructions.";
pub const TRANSPORT_FAILED_MESSAGE: &str =
    "There was an error submitting your RSVP. Please try again or contact us directly.";

pub fn missing_meal_message(guest: u32) -> String {
    format!("Please select a meal preference for Guest {guest}.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    /// Last attempt hit a transport error; behaves like `Idle`.
    Failed,
}

impl SubmissionPhase {
    pub fn accepts_submit(self) -> bool {
        matches!(self, SubmissionPhase::Idle | SubmissionPhase::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input { field: FieldName, value: String },
    Blur(FieldName),
    AttendingSelected(AttendanceState),
    /// The guest-count input committed its value (change, not keystroke).
    GuestCountCommitted,
    MealSelected { guest: u32, option: String },
    SubmitAnother,
}

/// A validated submission waiting for the port to deliver it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub endpoint: String,
    pub payload: SubmissionPayload,
}

pub struct RsvpController {
    config: Arc<SiteConfig>,
    port: Arc<dyn SubmissionPort>,
    form: FormState,
    phase: SubmissionPhase,
    notices: Notices,
    overlay: LoadingOverlay,
    confirmation: Option<AttendanceAnswer>,
}

impl RsvpController {
    pub fn new(config: Arc<SiteConfig>, port: Arc<dyn SubmissionPort>) -> Self {
        Self {
            config,
            port,
            form: FormState::default(),
            phase: SubmissionPhase::Idle,
            notices: Notices::default(),
            overlay: LoadingOverlay::default(),
            confirmation: None,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn overlay(&self) -> &LoadingOverlay {
        &self.overlay
    }

    /// Attendance answer of the last accepted submission while its
    /// confirmation is on screen.
    pub fn confirmation(&self) -> Option<AttendanceAnswer> {
        self.confirmation
    }

    pub fn view(&self) -> FormView {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> FormView {
        FormView::project(self, now)
    }

    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Input { field, value } => {
                self.form.set_value(field, value);
                self.form.clear_status(field);
            }
            FormEvent::Blur(field) => {
                self.validate_field(field);
            }
            FormEvent::AttendingSelected(attendance) => self.select_attendance(attendance),
            FormEvent::GuestCountCommitted => {
                let guest_count = self.form.guest_count();
                self.generate_meal_preference_fields(i64::from(guest_count));
            }
            FormEvent::MealSelected { guest, option } => self.select_meal(guest, &option),
            FormEvent::SubmitAnother => self.submit_another(),
        }
    }

    /// Validates one field against its rule and records the outcome on it.
    pub fn validate_field(&mut self, field: FieldName) -> bool {
        let required = self.form.is_required(field);
        let rule = FieldRule::new(field, required, self.config.max_guests);

        match rule.validate(self.form.value(field)) {
            Ok(()) => {
                let status = if required && !self.form.value(field).trim().is_empty() {
                    FieldStatus::Valid
                } else {
                    FieldStatus::Pristine
                };
                self.form.set_status(field, status);
                true
            }
            Err(err) => {
                debug!(field = %field, reason = %err.message, "field failed validation");
                self.form.set_status(field, FieldStatus::Invalid(err.message));
                false
            }
        }
    }

    pub fn select_attendance(&mut self, attendance: AttendanceState) {
        let was_attending = self.form.attendance().is_attending();
        self.form.set_attendance(attendance);

        if attendance.is_attending() {
            // Coming back to "yes" with a count already typed rebuilds the
            // groups that leaving "yes" destroyed.
            let guest_count = self.form.guest_count();
            if !was_attending && self.form.meals().is_empty() && guest_count >= 1 {
                self.generate_meal_preference_fields(i64::from(guest_count));
            }
        } else {
            for field in FieldName::ALL {
                if field.in_conditional_fieldset() {
                    self.form.clear_status(field);
                }
            }
            self.form.meals_mut().clear();
        }

        debug!(attendance = ?attendance, "attendance changed");
    }

    /// Rebuilds the meal groups from scratch for `guest_count` guests.
    /// Counts below one empty the container; counts above the configured
    /// maximum are capped to it.
    pub fn generate_meal_preference_fields(&mut self, guest_count: i64) {
        if !self.form.conditional_visible() {
            warn!(guest_count, "ignoring meal group generation while not attending");
            return;
        }
        if guest_count < 1 {
            self.form.meals_mut().clear();
            return;
        }

        let max_guests = i64::from(self.config.max_guests);
        let capped = guest_count.min(max_guests) as u32;
        self.form.meals_mut().rebuild(capped);
        debug!(guest_count = capped, "meal preference groups rebuilt");
    }

    fn select_meal(&mut self, guest: u32, option: &str) {
        if !self.form.conditional_visible() {
            warn!(guest, option, "ignoring meal selection while not attending");
            return;
        }
        let Some(idx) = self
            .config
            .meal_options
            .iter()
            .position(|candidate| candidate == option)
        else {
            warn!(guest, option, "ignoring unknown meal option");
            return;
        };

        if !self.form.meals_mut().select(guest, idx) {
            warn!(guest, option, "ignoring meal selection for guest without a group");
        }
    }

    /// Leaves the confirmation view for a fresh, empty form.
    pub fn submit_another(&mut self) {
        if self.phase == SubmissionPhase::Succeeded {
            self.confirmation = None;
            self.form = FormState::default();
            self.phase = SubmissionPhase::Idle;
        }
    }

    /// Validates the whole form and prepares the payload. On success the form
    /// is in `Submitting` until [`RsvpController::finish_submit`] runs.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if !self.phase.accepts_submit() {
            return Err(SubmitError::Unavailable(self.phase));
        }

        self.phase = SubmissionPhase::Validating;
        let now = Instant::now();

        if !self.validate_for_submit(now) {
            self.phase = SubmissionPhase::Idle;
            let first_invalid = self.form.first_invalid();
            self.form.set_focus(first_invalid);
            info!(first_invalid = ?first_invalid, "rsvp submission blocked by validation");
            return Err(SubmitError::Invalid { first_invalid });
        }
        self.form.set_focus(None);

        let payload = self.collect_payload();

        if !self.config.is_intake_configured() {
            warn!("rsvp intake url is still the placeholder");
            self.notices.show(NOT_CONFIGURED_MESSAGE, Severity::Error, now);
            self.phase = SubmissionPhase::Idle;
            return Err(SubmitError::NotConfigured);
        }

        self.phase = SubmissionPhase::Submitting;
        self.overlay.show(LOADING_MESSAGE);
        info!(
            attending = %payload.attending,
            guest_count = payload.guest_count,
            "submitting rsvp"
        );

        Ok(PendingSubmission {
            endpoint: self.config.intake_url.trim().to_string(),
            payload,
        })
    }

    /// Applies the port result. The intake endpoint's answer is opaque, so
    /// any result that is not an error counts as accepted.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        result: anyhow::Result<()>,
    ) -> Result<SubmissionPayload, SubmitError> {
        self.overlay.hide();

        match result {
            Ok(()) => {
                info!(attending = %pending.payload.attending, "rsvp accepted");
                self.confirmation = Some(pending.payload.attending);
                self.form = FormState::default();
                self.phase = SubmissionPhase::Succeeded;
                Ok(pending.payload)
            }
            Err(err) => {
                error!(error = %err, "rsvp submission failed");
                self.notices
                    .show(TRANSPORT_FAILED_MESSAGE, Severity::Error, Instant::now());
                self.phase = SubmissionPhase::Failed;
                Err(SubmitError::Transport(format!("{err:#}")))
            }
        }
    }

    pub async fn submit(&mut self) -> Result<SubmissionPayload, SubmitError> {
        let pending = self.begin_submit()?;
        let port = Arc::clone(&self.port);
        let result = port.submit(&pending.endpoint, &pending.payload).await;
        self.finish_submit(pending, result)
    }

    fn validate_for_submit(&mut self, now: Instant) -> bool {
        let mut valid = true;
        for field in FieldName::ALL {
            let checked = self.form.is_required(field) && self.form.is_visible(field);
            if checked && !self.validate_field(field) {
                valid = false;
            }
        }

        match self.form.attendance() {
            AttendanceState::Unknown => {
                self.notices.show(ATTENDING_REQUIRED_MESSAGE, Severity::Error, now);
                valid = false;
            }
            AttendanceState::Attending => {
                let guest_count = self.form.guest_count();
                if let Some(guest) = self.form.meals().first_missing(guest_count) {
                    self.notices.show(missing_meal_message(guest), Severity::Error, now);
                    valid = false;
                }
            }
            AttendanceState::NotAttending => {}
        }

        valid
    }

    fn collect_payload(&self) -> SubmissionPayload {
        let contact = GuestContact {
            guest_name: self.form.trimmed(FieldName::GuestName),
            email: self.form.trimmed(FieldName::Email),
            phone: self.form.trimmed(FieldName::Phone),
        };
        let at = Utc::now();

        if !self.form.attendance().is_attending() {
            return SubmissionPayload::declined(contact, at);
        }

        let guest_count = self.form.guest_count();
        SubmissionPayload::accepted(
            contact,
            AttendingDetails {
                guest_count,
                guest_names: self.form.trimmed(FieldName::GuestNames),
                meals: self
                    .form
                    .meals()
                    .preferences(guest_count, &self.config.meal_options),
                dietary_restrictions: self.form.trimmed(FieldName::DietaryRestrictions),
                special_requests: self.form.trimmed(FieldName::SpecialRequests),
            },
            at,
        )
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
