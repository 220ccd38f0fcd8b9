//! Task board: status partition of the flat task list and drag-and-drop
//! reconciliation back into that partition.

pub mod board;
pub mod drag;
pub mod stats;

pub use board::TaskBoard;
pub use drag::{DragEnd, DragOutcome, DropTarget};
pub use stats::BoardStats;
