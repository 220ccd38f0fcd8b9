use anyhow::{anyhow, bail, Context, Result};
use application::{ai_tools, ApplicationResult, AssignmentForm, Workspace};
use clap::Subcommand;
use console::style;
use domain::config::AppConfig;
use domain::{AppointmentId, EmployeeId};
use infrastructure::config::ConfigValidator;
use llm::{FlowRunner, LlmClient, ModelBackend};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::progress::FlowSpinner;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum AiCommand {
    /// Ask for the best time slot for an employee
    Schedule {
        /// Employee id
        #[arg(short, long, default_value = "e1")]
        employee: String,
        /// Service location
        #[arg(short, long)]
        location: String,
        /// Service type, e.g. "Exterior Cleaning"
        #[arg(short, long)]
        service: String,
        /// Availability text (the employee's stored availability by default)
        #[arg(short, long)]
        availability: Option<String>,
    },
    /// Let the model distribute open tasks among employees
    Assign {
        /// Required skills per task as TASK=skill,skill (repeatable);
        /// open tasks left out are sent with the "general" skill
        #[arg(short, long = "skill", value_name = "TASK=SKILLS")]
        skills: Vec<String>,
    },
    /// Talk to the support chatbot (interactive when no message is given)
    Chat { message: Option<String> },
    /// Draft a review request message for a completed visit
    Review {
        /// Appointment id
        #[arg(short, long)]
        appointment: String,
        /// Review page link (business.review_page_link by default)
        #[arg(long)]
        link: Option<String>,
    },
}

impl AiCommand {
    pub async fn execute(self, workspace: &mut Workspace, config: &AppConfig) -> Result<()> {
        let runner = build_runner(config)?;
        match self {
            AiCommand::Schedule {
                employee,
                location,
                service,
                availability,
            } => schedule(workspace, &runner, &employee, location, service, availability).await,
            AiCommand::Assign { skills } => assign(workspace, &runner, &skills).await,
            AiCommand::Chat { message } => chat(workspace, &runner, message).await,
            AiCommand::Review { appointment, link } => {
                review(workspace, &runner, &appointment, link).await
            }
        }
    }
}

fn build_runner(config: &AppConfig) -> Result<FlowRunner> {
    ConfigValidator::new()
        .validate(config)
        .context("AI tools need a valid [llm] configuration")?;
    let client = LlmClient::from_config(&config.llm)?;
    info!("Using model {}", client.name());
    Ok(FlowRunner::new(Arc::new(client)).with_company_name(config.business.company_name.clone()))
}

/// Print queued notices and turn an application error into a CLI error
fn report<T>(workspace: &mut Workspace, result: ApplicationResult<T>) -> Result<T> {
    render::notices(workspace.take_notices());
    match result {
        Ok(value) => Ok(value),
        Err(e) => match e.field_errors() {
            Some(fields) => {
                render::field_errors(&fields);
                bail!("Form has invalid fields")
            }
            None => Err(e.into()),
        },
    }
}

async fn schedule(
    workspace: &mut Workspace,
    runner: &FlowRunner,
    employee_id: &str,
    location: String,
    service: String,
    availability: Option<String>,
) -> Result<()> {
    let employee = workspace
        .store()
        .employee(&EmployeeId::new(employee_id))
        .ok_or_else(|| anyhow!("Employee '{employee_id}' not found"))?;
    let mut input = ai_tools::scheduling_input(employee, location, service);
    if let Some(availability) = availability {
        input.employee_availability = availability;
    }

    let spinner = FlowSpinner::start("Asking for a scheduling recommendation...");
    let result = workspace.recommend_schedule(runner, &input).await;
    finish(&spinner, &result, "Recommendation ready");
    let recommendation = report(workspace, result)?;

    println!();
    println!("{} {}", style("Recommendation:").bold(), recommendation.recommendation);
    println!("{} {}", style("Reason:").bold(), recommendation.reason);
    Ok(())
}

/// Parse "t1=cleaning, driving" into ("t1", "cleaning, driving")
fn parse_skill_arg(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(task, skills)| (task.trim(), skills.trim()))
        .filter(|(task, _)| !task.is_empty())
        .ok_or_else(|| anyhow!("Expected TASK=SKILLS, got '{raw}'"))
}

async fn assign(workspace: &mut Workspace, runner: &FlowRunner, skills: &[String]) -> Result<()> {
    let mut form = AssignmentForm::prefilled(workspace.store().tasks(), workspace.store().employees());

    for raw in skills {
        let (task_id, task_skills) = parse_skill_arg(raw)?;
        let row = form
            .tasks
            .iter_mut()
            .find(|row| row.task_id == task_id)
            .ok_or_else(|| anyhow!("Task '{task_id}' is not an open task"))?;
        row.required_skills = task_skills.to_string();
    }
    form.fill_blanks();

    let spinner = FlowSpinner::start("Assigning tasks...");
    let result = workspace.assign_tasks(runner, &form).await;
    finish(&spinner, &result, "Assignment complete");
    let output = report(workspace, result)?;

    println!();
    render::heading("Assignments");
    for assignment in &output.assignments {
        println!(
            "  {} → {} {}",
            style(&assignment.task_id).bold(),
            style(&assignment.employee_id).green(),
            style(format!("({})", assignment.reason)).dim()
        );
    }
    if !output.unassigned_tasks.is_empty() {
        println!();
        render::heading("Unassigned");
        for task_id in &output.unassigned_tasks {
            println!("  {}", style(task_id).yellow());
        }
    }
    Ok(())
}

async fn chat(workspace: &mut Workspace, runner: &FlowRunner, message: Option<String>) -> Result<()> {
    workspace.open_chat();
    if let Some(welcome) = workspace.chat().messages().first() {
        println!("{} {}", style("🤖").cyan(), welcome.content);
    }

    if let Some(message) = message {
        return send_one(workspace, runner, &message).await;
    }

    println!("{}", style("Type a message, 'exit' to quit.").dim());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }
        // a failed call keeps the session going
        if let Err(e) = send_one(workspace, runner, text).await {
            eprintln!("{} {e:#}", style("✗").red());
        }
    }
    Ok(())
}

async fn send_one(workspace: &mut Workspace, runner: &FlowRunner, text: &str) -> Result<()> {
    let spinner = FlowSpinner::start("Thinking...");
    let result = workspace.send_chat(runner, text).await;
    spinner.clear();
    let reply = report(workspace, result)?;
    println!("{} {}", style("🤖").cyan(), reply.content);
    Ok(())
}

async fn review(
    workspace: &mut Workspace,
    runner: &FlowRunner,
    appointment_id: &str,
    link: Option<String>,
) -> Result<()> {
    let id = AppointmentId::new(appointment_id);
    // explicit link overrides business.review_page_link
    let input = match workspace.store().appointment(&id) {
        Some(appointment) => link.map(|link| ai_tools::review_input(appointment, link)),
        None => bail!("Appointment '{appointment_id}' not found"),
    };

    let spinner = FlowSpinner::start("Drafting review request...");
    let result = match input {
        Some(input) => workspace.request_review(runner, &input).await,
        None => workspace.request_review_for(runner, &id).await,
    };
    finish(&spinner, &result, "Message drafted");
    let message = report(workspace, result)?;

    println!();
    println!("{}", message.message);
    Ok(())
}

fn finish<T>(spinner: &FlowSpinner, result: &ApplicationResult<T>, success: &str) {
    match result {
        Ok(_) => spinner.finish_success(success),
        Err(e) => spinner.finish_error(e.category()),
    }
}
