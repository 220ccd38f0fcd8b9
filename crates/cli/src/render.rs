//! Terminal output helpers

use application::store::display_name;
use application::{FieldErrors, Notice, NoticeLevel};
use chrono::{DateTime, Local, Utc};
use console::style;
use domain::{Appointment, Task};

pub fn local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%a %d %b %H:%M").to_string()
}

pub fn heading(text: &str) {
    println!("{}", style(text).cyan().bold());
}

pub fn appointment_line(apt: &Appointment) {
    println!(
        "  {} {} {} [{}]",
        style(local(apt.start)).green(),
        style(&apt.title).bold(),
        style(format!(
            "· {} · {}",
            display_name(apt.employee_name.as_deref()),
            display_name(apt.service_name.as_deref())
        ))
        .dim(),
        apt.status
    );
}

pub fn task_line(task: &Task) {
    let deadline = task
        .deadline
        .map(local)
        .unwrap_or_else(|| "no deadline".to_string());
    println!(
        "  {} {} {} {}",
        style(task.id.as_str()).dim(),
        style(&task.title).bold(),
        style(format!("({deadline})")).yellow(),
        style(display_name(task.assigned_to_name.as_deref())).dim()
    );
}

pub fn notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => println!(
                "{} {} {}",
                style("✓").green(),
                style(&notice.title).bold(),
                notice.description
            ),
            NoticeLevel::Error => eprintln!(
                "{} {} {}",
                style("✗").red(),
                style(&notice.title).red().bold(),
                notice.description
            ),
        }
    }
}

pub fn field_errors(fields: &FieldErrors) {
    eprintln!("{}", style("Please fix the following fields:").red().bold());
    for (field, messages) in fields.iter() {
        for message in messages {
            eprintln!("  {} {}", style(field).yellow(), message);
        }
    }
}
