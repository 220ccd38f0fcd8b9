//! Domain Entities - plain records of the field-service model

pub mod appointment;
pub mod catalog;
pub mod chat;
pub mod ids;
pub mod people;
pub mod task;

pub use appointment::{Appointment, AppointmentStatus};
pub use catalog::{Item, Service};
pub use chat::{ChatMessage, ChatRole};
pub use ids::{
    AppointmentId, ClientId, EmployeeId, EntityId, ItemId, MessageId, ServiceId, TaskId,
};
pub use people::{Client, Employee};
pub use task::{Task, TaskStatus};

/// Display label for a reference whose target no longer exists
pub const UNKNOWN_LABEL: &str = "Unknown";
