//! Application Layer Errors
//!
//! One enum per concern, folded into [`ApplicationError`] at the workspace
//! boundary.

use domain::errors::DomainError;
use llm::FlowError;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Entity kinds held by the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Client,
    Employee,
    Service,
    Item,
    Appointment,
    Task,
}

impl EntityKind {
    /// Capitalized name used in notification titles
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Client => "Client",
            EntityKind::Employee => "Employee",
            EntityKind::Service => "Service",
            EntityKind::Item => "Item",
            EntityKind::Appointment => "Appointment",
            EntityKind::Task => "Task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} with id '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} with id '{id}' already exists")]
    DuplicateId { kind: EntityKind, id: String },
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Field name -> messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Flatten validator output; nested list errors become `field[i].inner`
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut out = Self::new();
        out.collect(String::new(), errors);
        out
    }

    /// Record errors of a nested row under `prefix` (e.g. `tasks[0]`)
    pub fn extend_prefixed(&mut self, prefix: &str, errors: &ValidationErrors) {
        self.collect(prefix.to_string(), errors);
    }

    fn collect(&mut self, prefix: String, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                        self.add(path.clone(), message);
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(path, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(format!("{path}[{index}]"), inner);
                    }
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// First message for a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError { fields: self })
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Form input rejected; nothing was mutated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {fields}")]
pub struct FormError {
    pub fields: FieldErrors,
}

impl FormError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.add(field, message);
        Self { fields }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            fields: FieldErrors::from_validation(&errors),
        }
    }
}

/// Top-level error of the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl ApplicationError {
    /// Get error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Store(_) => "store",
            Self::Form(_) => "validation",
            Self::Flow(FlowError::InvalidInput(_)) => "validation",
            Self::Flow(_) => "model",
        }
    }

    /// Field errors, when the failure was a validation failure
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Form(e) => Some(e.fields.clone()),
            Self::Flow(FlowError::InvalidInput(e)) => Some(FieldErrors::from_validation(e)),
            _ => None,
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
