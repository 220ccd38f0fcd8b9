use anyhow::{Context, Result};
use application::{resolve, Navigation, Workspace};
use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use console::style;
use domain::TaskStatus;

use crate::render;

#[derive(Debug, Subcommand)]
pub enum ViewCommand {
    /// Upcoming appointments, open tasks and board counts
    Dashboard {
        /// Print the read model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Appointments on one day (today by default)
    Calendar {
        /// Day as YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Resolve an application URL such as "/tasks?action=new"
    Route { url: String },
}

impl ViewCommand {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        match self {
            ViewCommand::Dashboard { json } => dashboard(workspace, json),
            ViewCommand::Calendar { date } => calendar(workspace, date.as_deref()),
            ViewCommand::Route { url } => {
                route(&url);
                Ok(())
            }
        }
    }
}

fn dashboard(workspace: &Workspace, json: bool) -> Result<()> {
    let view = workspace.dashboard(Utc::now());
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    render::heading("Upcoming appointments");
    if view.upcoming.is_empty() {
        println!("  {}", style("No upcoming appointments.").dim());
    }
    for apt in &view.upcoming {
        render::appointment_line(apt);
    }

    println!();
    render::heading("Open tasks");
    if view.open_tasks.is_empty() {
        println!("  {}", style("No open tasks.").dim());
    }
    for task in &view.open_tasks {
        render::task_line(task);
    }

    println!();
    println!(
        "{} total {}  {}",
        style("Σ").yellow(),
        view.stats.total,
        TaskStatus::ALL
            .iter()
            .map(|status| format!("{} {}", status.label(), view.stats.count(*status)))
            .collect::<Vec<_>>()
            .join("  ")
    );
    Ok(())
}

fn calendar(workspace: &Workspace, date: Option<&str>) -> Result<()> {
    let day = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };

    let marked: Vec<String> = workspace
        .event_days(&Local)
        .iter()
        .map(|d| d.format("%d %b").to_string())
        .collect();
    println!("{} {}", style("Days with appointments:").dim(), marked.join(", "));
    println!();

    render::heading(&format!("Appointments for {}", day.format("%A %d %B %Y")));
    let appointments = workspace.calendar_day(day, &Local);
    if appointments.is_empty() {
        println!("  {}", style("No appointments for this day.").dim());
    }
    for apt in appointments {
        render::appointment_line(apt);
        if let Some(location) = &apt.location {
            println!("      {}", style(location).dim());
        }
        if let Some(notes) = &apt.notes {
            println!("      {}", style(notes).italic());
        }
    }
    Ok(())
}

fn route(url: &str) {
    match resolve(url) {
        Navigation::Redirect(to) => println!("{} redirect to {}", style("→").cyan(), to),
        Navigation::Page {
            route,
            open_create_form,
            anchor,
        } => {
            print!("{} {}", style("✓").green(), route);
            if open_create_form {
                print!(" {}", style("(create form open)").yellow());
            }
            if let Some(anchor) = anchor {
                print!(" #{anchor}");
            }
            println!();
        }
        Navigation::NotFound => println!("{} not found", style("✗").red()),
    }
}
