//! Form-to-record adapters
//!
//! Each form is the raw dialog input. `validated()` checks it against the
//! schema and yields a typed draft; the draft then either becomes a new
//! record (`into_*`) or is merged over an existing one (`apply`). Nothing
//! here touches the store.

pub mod appointment;
pub mod item;
pub mod service;
pub mod task;

pub use appointment::{AppointmentDraft, AppointmentForm};
pub use item::{ItemDraft, ItemForm};
pub use service::{ServiceDraft, ServiceForm};
pub use task::{TaskDraft, TaskForm};

use std::borrow::Cow;
use validator::ValidationError;

use crate::errors::{FieldErrors, FormError};

/// Trimmed value, or `None` for missing and blank input
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Run the derived schema, then record a price that is not a finite number
pub(crate) fn validate_priced<T: validator::Validate>(
    form: &T,
    price: f64,
) -> Result<(), FormError> {
    let mut fields = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from_validation(&errors),
    };
    if !price.is_finite() && !fields.contains("price") {
        fields.add("price", "Price must be a number");
    }
    fields.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  c1 ".into())), Some("c1".to_string()));
        assert_eq!(non_blank(&Some("   ".into())), None);
        assert_eq!(non_blank(&None), None);
    }
}
