//! # Application Layer
//!
//! Session state of the PoliMinder field-service app:
//! - `store` - in-memory collections seeded from `fixtures`
//! - `forms` - schema-validated dialog input turned into records
//! - `workspace` - page-level container owning store, board, chat and notices
//! - `ai_tools` - form rows and input builders for the four AI flows
//! - `dashboard` / `routing` - read models and URL resolution
//!
//! ## Dependency Direction
//!
//! ```text
//! cli → application → board, llm → domain
//! ```

pub mod ai_tools;
pub mod chat;
pub mod dashboard;
pub mod errors;
pub mod fixtures;
pub mod forms;
pub mod notices;
pub mod routing;
pub mod store;
pub mod workspace;

pub use ai_tools::{AssignmentForm, EmployeeRow, TaskRow};
pub use chat::ChatSession;
pub use dashboard::DashboardView;
pub use errors::{
    ApplicationError, ApplicationResult, EntityKind, FieldErrors, FormError, StoreError,
};
pub use forms::{AppointmentForm, ItemForm, ServiceForm, TaskForm};
pub use notices::{Notice, NoticeLevel};
pub use routing::{resolve, Navigation, Route};
pub use store::{SessionStore, UNKNOWN_ITEM_LABEL};
pub use workspace::Workspace;
