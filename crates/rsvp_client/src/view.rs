//! Read-only projection of the controller, rebuilt on every call.

use std::time::Instant;

use shared::domain::{AttendanceAnswer, AttendanceState, FieldName, Severity};

use crate::{
    controller::{RsvpController, SubmissionPhase, SUBMITTING_LABEL, SUBMIT_LABEL},
    form::FieldStatus,
    meals::{meal_groups, MealGroupView},
    notices::LoadingOverlay,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorView {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: FieldName,
    pub value: String,
    pub required: bool,
    pub visible: bool,
    /// `error` or `success` styling, if any.
    pub state_class: Option<&'static str>,
    pub aria_invalid: Option<bool>,
    pub aria_describedby: Option<String>,
    pub error: Option<FieldErrorView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonView {
    pub disabled: bool,
    pub busy: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub message: String,
    pub severity: Severity,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub heading: &'static str,
    pub message: &'static str,
    pub note: &'static str,
}

impl ConfirmationView {
    pub fn for_answer(answer: AttendanceAnswer) -> Self {
        let message = match answer {
            AttendanceAnswer::Yes => {
                "Thank you for your RSVP! We look forward to celebrating with you."
            }
            AttendanceAnswer::No => "Thank you for letting us know. You will be missed!",
        };
        Self {
            heading: "RSVP Received!",
            message,
            note: "A confirmation has been sent to your email.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub form_visible: bool,
    pub fields: Vec<FieldView>,
    pub attendance: AttendanceState,
    pub conditional_hidden: bool,
    pub meal_groups: Vec<MealGroupView>,
    pub submit_button: SubmitButtonView,
    pub loading: LoadingOverlay,
    pub alerts: Vec<AlertView>,
    pub confirmation: Option<ConfirmationView>,
    pub scroll_target: Option<FieldName>,
}

impl FormView {
    pub fn project(controller: &RsvpController, now: Instant) -> Self {
        let form = controller.form();
        let submitting = controller.phase() == SubmissionPhase::Submitting;

        let fields = FieldName::ALL
            .into_iter()
            .map(|name| {
                let status = form.status(name);
                let (state_class, aria_invalid, error) = match status {
                    FieldStatus::Pristine => (None, None, None),
                    FieldStatus::Valid => (Some("success"), Some(false), None),
                    FieldStatus::Invalid(message) => (
                        Some("error"),
                        Some(true),
                        Some(FieldErrorView {
                            id: name.error_id(),
                            message: message.clone(),
                        }),
                    ),
                };
                FieldView {
                    name,
                    value: form.value(name).to_string(),
                    required: form.is_required(name),
                    visible: form.is_visible(name),
                    state_class,
                    aria_invalid,
                    aria_describedby: error.as_ref().map(|err| err.id.clone()),
                    error,
                }
            })
            .collect();

        Self {
            form_visible: controller.confirmation().is_none(),
            fields,
            attendance: form.attendance(),
            conditional_hidden: !form.conditional_visible(),
            meal_groups: meal_groups(form.meals(), &controller.config().meal_options),
            submit_button: SubmitButtonView {
                disabled: submitting,
                busy: submitting,
                label: if submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            },
            loading: controller.overlay().clone(),
            alerts: controller
                .notices()
                .active(now)
                .map(|alert| AlertView {
                    message: alert.message.clone(),
                    severity: alert.severity,
                    icon: alert.severity.icon(),
                })
                .collect(),
            confirmation: controller.confirmation().map(ConfirmationView::for_answer),
            scroll_target: form.focus(),
        }
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.name == name)
    }
}
