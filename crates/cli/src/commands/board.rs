use anyhow::{anyhow, Result};
use application::Workspace;
use board::{DragEnd, DragOutcome, DropTarget};
use clap::Subcommand;
use console::style;
use domain::{TaskId, TaskStatus};

use crate::render;

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Show the task board, one column per status
    Board,
    /// Drag a task card to another column or position
    Move {
        /// Task id, e.g. "t1"
        task_id: String,
        /// Destination column: todo, in-progress, completed, blocked
        to: String,
        /// Position in the destination column (end of column by default)
        #[arg(short, long)]
        index: Option<usize>,
    },
}

impl BoardCommand {
    pub fn execute(self, workspace: &mut Workspace) -> Result<()> {
        match self {
            BoardCommand::Board => {
                print_board(workspace);
                Ok(())
            }
            BoardCommand::Move { task_id, to, index } => move_task(workspace, &task_id, &to, index),
        }
    }
}

fn move_task(workspace: &mut Workspace, task_id: &str, to: &str, index: Option<usize>) -> Result<()> {
    let destination: TaskStatus = to.parse()?;
    let id = TaskId::new(task_id);
    let source = workspace
        .board()
        .find(&id)
        .map(|task| task.status)
        .ok_or_else(|| anyhow!("Task '{task_id}' is not on the board"))?;

    let index = index.unwrap_or_else(|| workspace.board().bucket(destination).len());
    let event = DragEnd::new(
        id,
        source,
        DropTarget {
            bucket: destination,
            index,
        },
    );

    let outcome = workspace.drag_task(&event);
    render::notices(workspace.take_notices());
    match outcome? {
        DragOutcome::Unchanged => println!("{}", style("Nothing to do").dim()),
        DragOutcome::Reordered { bucket, from, to } => println!(
            "{} reordered {} {} → {}",
            style("↕").cyan(),
            bucket.label(),
            from,
            to
        ),
        DragOutcome::Moved { task_id, from, to } => println!(
            "{} {} moved {} → {}",
            style("✓").green(),
            task_id,
            from.label(),
            to.label()
        ),
    }
    println!();
    print_board(workspace);
    Ok(())
}

fn print_board(workspace: &Workspace) {
    for (status, tasks) in workspace.board().columns() {
        render::heading(&format!("{} ({})", status.label(), tasks.len()));
        if tasks.is_empty() {
            println!("  {}", style("No tasks").dim());
        }
        for task in tasks {
            render::task_line(task);
        }
        println!();
    }
}
