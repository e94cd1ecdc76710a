//! Page view-models.
//!
//! Each page owns an explicit state struct. Handlers drive it through its
//! transition methods and hand it to [`crate::ui`] for rendering.

pub mod attendance;
pub mod employees;

#[cfg(test)]
pub(crate) mod fake;

use crate::errors::ApiError;
use std::collections::BTreeMap;

pub use attendance::{AttendanceForm, AttendancePage, FetchTicket};
pub use employees::{DeleteOutcome, DeleteTarget, EmployeeForm, EmployeesPage};

/// Key holding a form-level message that belongs to no single field.
pub const GENERAL_ERROR_KEY: &str = "_";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Inline form errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    /// Field errors replace the map verbatim; anything else lands under
    /// [`GENERAL_ERROR_KEY`].
    pub fn from_error(err: &ApiError) -> Self {
        match err.field_errors() {
            Some(fields) => Self(fields.clone()),
            None => Self(BTreeMap::from([(
                GENERAL_ERROR_KEY.to_string(),
                err.to_string(),
            )])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn general(&self) -> Option<&str> {
        self.get(GENERAL_ERROR_KEY)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Interactive confirmation for destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A confirmation answered ahead of time, e.g. by a submitted form.
#[derive(Debug, Clone, Copy)]
pub struct Decision(pub bool);

impl Confirm for Decision {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Message for a page-level error, falling back when the error renders empty.
pub(crate) fn page_error(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
