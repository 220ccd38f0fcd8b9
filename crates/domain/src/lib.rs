//! Domain Layer - PoliMinder field-service model
//!
//! Contains ONLY plain business records without dependencies on:
//! - Infrastructure (config files, HTTP clients)
//! - Frameworks (CLI, UI)
//! - External systems (the hosted LLM)
//!
//! Layout:
//! - Entities: Client, Employee, Service, Item, Appointment, Task, ChatMessage
//! - Identifiers: typed string ids, one per entity kind
//! - Config: serde model of the application configuration

pub mod config;
pub mod entities;
pub mod errors;

// Re-export core domain types
pub use entities::{
    Appointment, AppointmentId, AppointmentStatus, ChatMessage, ChatRole, Client, ClientId,
    EntityId, Employee, EmployeeId, Item, ItemId, MessageId, Service, ServiceId, Task, TaskId,
    TaskStatus, UNKNOWN_LABEL,
};
pub use errors::DomainError;
