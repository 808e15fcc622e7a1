use std::collections::BTreeMap;

use shared::domain::{AttendanceState, FieldName};

use crate::{meals::MealSlots, validation::guest_count_from};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Pristine,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldStatus::Invalid(_))
    }
}

/// Everything the page would otherwise keep in the DOM: input values, per-field
/// validation marks, the attending answer and the meal groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<FieldName, String>,
    statuses: BTreeMap<FieldName, FieldStatus>,
    attendance: AttendanceState,
    meals: MealSlots,
    focus: Option<FieldName>,
}

static PRISTINE: FieldStatus = FieldStatus::Pristine;

impl FormState {
    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn trimmed(&self, field: FieldName) -> String {
        self.value(field).trim().to_string()
    }

    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn status(&self, field: FieldName) -> &FieldStatus {
        self.statuses.get(&field).unwrap_or(&PRISTINE)
    }

    pub fn set_status(&mut self, field: FieldName, status: FieldStatus) {
        if status == FieldStatus::Pristine {
            self.statuses.remove(&field);
        } else {
            self.statuses.insert(field, status);
        }
    }

    pub fn clear_status(&mut self, field: FieldName) {
        self.statuses.remove(&field);
    }

    pub fn attendance(&self) -> AttendanceState {
        self.attendance
    }

    pub(crate) fn set_attendance(&mut self, attendance: AttendanceState) {
        self.attendance = attendance;
    }

    pub fn conditional_visible(&self) -> bool {
        self.attendance.is_attending()
    }

    pub fn is_visible(&self, field: FieldName) -> bool {
        !field.in_conditional_fieldset() || self.conditional_visible()
    }

    pub fn is_required(&self, field: FieldName) -> bool {
        field.is_always_required() || (field.in_conditional_fieldset() && self.conditional_visible())
    }

    pub fn meals(&self) -> &MealSlots {
        &self.meals
    }

    pub(crate) fn meals_mut(&mut self) -> &mut MealSlots {
        &mut self.meals
    }

    pub fn guest_count(&self) -> u32 {
        guest_count_from(self.value(FieldName::GuestCount))
    }

    /// First invalid field in document order.
    pub fn first_invalid(&self) -> Option<FieldName> {
        self.statuses
            .iter()
            .find(|(_, status)| status.is_invalid())
            .map(|(field, _)| *field)
    }

    pub fn focus(&self) -> Option<FieldName> {
        self.focus
    }

    pub(crate) fn set_focus(&mut self, focus: Option<FieldName>) {
        self.focus = focus;
    }

    pub fn is_pristine(&self) -> bool {
        *self == FormState::default()
    }
}
