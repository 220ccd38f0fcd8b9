use chrono::{DateTime, Utc};
use domain::{Appointment, AppointmentId, AppointmentStatus, ClientId, EmployeeId, ServiceId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{invalid, non_blank};
use crate::errors::FormError;

fn appointment_status(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<AppointmentStatus>().is_ok() {
        Ok(())
    } else {
        Err(invalid(
            "status",
            "Status must be one of scheduled, confirmed, completed, cancelled",
        ))
    }
}

/// Raw appointment dialog input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(required(message = "Start date is required."))]
    pub start: Option<DateTime<Utc>>,
    #[validate(required(message = "End date is required."))]
    pub end: Option<DateTime<Utc>>,
    /// Blank or missing means "scheduled"
    #[validate(custom = "appointment_status")]
    pub status: Option<String>,
    pub client_id: Option<String>,
    pub employee_id: Option<String>,
    pub service_id: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Validated appointment fields, without id or display names
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub client_id: Option<ClientId>,
    pub employee_id: Option<EmployeeId>,
    pub service_id: Option<ServiceId>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl AppointmentForm {
    /// Create-form defaults: one hour starting at `start`
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(start + chrono::Duration::hours(1)),
            status: Some(AppointmentStatus::Scheduled.to_string()),
            ..Self::default()
        }
    }

    /// Edit-form prefill
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            title: appointment.title.clone(),
            start: Some(appointment.start),
            end: Some(appointment.end),
            status: Some(appointment.status.to_string()),
            client_id: appointment.client_id.as_ref().map(ToString::to_string),
            employee_id: appointment.employee_id.as_ref().map(ToString::to_string),
            service_id: appointment.service_id.as_ref().map(ToString::to_string),
            location: appointment.location.clone(),
            notes: appointment.notes.clone(),
        }
    }

    pub fn validated(&self) -> Result<AppointmentDraft, FormError> {
        self.validate()?;

        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            (None, _) => return Err(FormError::field("start", "Start date is required.")),
            (_, None) => return Err(FormError::field("end", "End date is required.")),
        };
        let status = non_blank(&self.status)
            .and_then(|s| s.parse::<AppointmentStatus>().ok())
            .unwrap_or_default();

        Ok(AppointmentDraft {
            title: self.title.clone(),
            start,
            end,
            status,
            client_id: non_blank(&self.client_id).map(ClientId::from),
            employee_id: non_blank(&self.employee_id).map(EmployeeId::from),
            service_id: non_blank(&self.service_id).map(ServiceId::from),
            location: non_blank(&self.location),
            notes: non_blank(&self.notes),
        })
    }
}

impl AppointmentDraft {
    pub fn into_appointment(self, id: AppointmentId) -> Appointment {
        let mut appointment = Appointment::new(id, String::new(), self.start, self.end);
        self.apply(&mut appointment);
        appointment
    }

    /// Overwrite the editable fields; the id is kept
    pub fn apply(self, appointment: &mut Appointment) {
        appointment.title = self.title;
        appointment.start = self.start;
        appointment.end = self.end;
        appointment.status = self.status;
        appointment.client_id = self.client_id;
        appointment.employee_id = self.employee_id;
        appointment.service_id = self.service_id;
        appointment.location = self.location;
        appointment.notes = self.notes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_to_scheduled() {
        let form = AppointmentForm {
            title: "Gutter Cleaning - Jane Roe".into(),
            status: None,
            ..AppointmentForm::starting_at(start())
        };
        let draft = form.validated().unwrap();

        assert_eq!(draft.status, AppointmentStatus::Scheduled);
        assert_eq!(draft.end - draft.start, chrono::Duration::hours(1));
    }

    #[test]
    fn test_missing_title_and_start() {
        let form = AppointmentForm {
            end: Some(start()),
            ..AppointmentForm::default()
        };
        let err = form.validated().unwrap_err();

        assert_eq!(err.fields.first("title"), Some("Title is required"));
        assert_eq!(err.fields.first("start"), Some("Start date is required."));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let form = AppointmentForm {
            title: "Visit".into(),
            status: Some("pending".into()),
            ..AppointmentForm::starting_at(start())
        };
        assert!(form.validated().unwrap_err().fields.contains("status"));
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut existing = Appointment::new("1", "Old", start(), start());
        let form = AppointmentForm {
            title: "New".into(),
            client_id: Some(" ".into()),
            ..AppointmentForm::starting_at(start())
        };
        form.validated().unwrap().apply(&mut existing);

        assert_eq!(existing.id.as_str(), "1");
        assert_eq!(existing.title, "New");
        assert_eq!(existing.client_id, None);
    }
}
