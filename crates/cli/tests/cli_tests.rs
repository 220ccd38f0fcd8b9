use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the developer's config files and API keys
fn poliminder(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("poliminder").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GROQ_API_KEY")
        .env_remove("AZURE_OPENAI_API_KEY")
        .env_remove("POLIMINDER_LLM_API_KEY")
        .env_remove("POLIMINDER_LLM_PROVIDER")
        .env_remove("POLIMINDER_LLM_BASE_URL")
        .env_remove("POLIMINDER_ENV");
    cmd
}

#[test]
fn test_dashboard_lists_seeded_data() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Upcoming appointments"))
        .stdout(predicate::str::contains("Open tasks"))
        .stdout(predicate::str::contains("Prepare equipment for Client A"))
        .stdout(predicate::str::contains("completed 1"));
}

#[test]
fn test_dashboard_json() {
    let home = TempDir::new().unwrap();
    let output = poliminder(&home)
        .args(["dashboard", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["stats"]["total"], 5);
    assert!(view["upcoming"].as_array().unwrap().len() <= 5);
}

#[test]
fn test_board_shows_every_column() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("Order new cleaning solution"))
        .stdout(predicate::str::contains("Finalize Q3 Report"));
}

#[test]
fn test_move_task_to_completed() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["move", "t1", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t1 moved"));
}

#[test]
fn test_move_rejects_unknown_status() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["move", "t1", "archived"])
        .assert()
        .failure();
}

#[test]
fn test_move_unknown_task_fails() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["move", "t99", "todo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("t99"));
}

#[test]
fn test_calendar_with_bad_date_fails() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["calendar", "--date", "31/12/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_calendar_today() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .arg("calendar")
        .assert()
        .success()
        .stdout(predicate::str::contains("Days with appointments:"));
}

#[test]
fn test_route_resolution() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["route", "/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redirect"));
    poliminder(&home)
        .args(["route", "/nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_config_show_uses_defaults() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built-in defaults"))
        .stdout(predicate::str::contains("[business]"));
}

#[test]
fn test_config_generate_then_load() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["config", "generate"])
        .assert()
        .success();
    assert!(home.path().join("poliminder.toml").exists());

    poliminder(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("poliminder.toml"));
}

#[test]
fn test_company_name_from_env() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .env("POLIMINDER_COMPANY_NAME", "Sparkle Co")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sparkle Co"));
}

#[test]
fn test_chat_without_api_key_fails() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_review_without_api_key_fails() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["review", "--appointment", "1"])
        .assert()
        .failure();
}

/// Point the binary at a local OpenAI-compatible server
fn with_local_model(cmd: &mut Command, server: &Server) {
    cmd.env("POLIMINDER_LLM_PROVIDER", "local")
        .env("POLIMINDER_LLM_BASE_URL", server.url());
}

fn chat_completion(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[test]
fn test_assign_without_skill_flags_sends_every_open_task() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Task ID: t1".into()),
            Matcher::Regex("Task ID: t3".into()),
            Matcher::Regex("Task ID: t4".into()),
            Matcher::Regex("Required Skills: general".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_completion(
            r#"{"assignments":[{"taskId":"t1","employeeId":"e1","reason":"closest"}],"unassignedTasks":["t4"]}"#,
        ))
        .create();

    let mut cmd = poliminder(&home);
    with_local_model(&mut cmd, &server);
    cmd.arg("assign")
        .assert()
        .success()
        .stdout(predicate::str::contains("t1 → e1"))
        .stdout(predicate::str::contains("Unassigned"));
    mock.assert();
}

#[test]
fn test_assign_skill_overrides_one_task() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Required Skills: cleaning, driving".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_completion(r#"{"assignments":[],"unassignedTasks":[]}"#))
        .create();

    let mut cmd = poliminder(&home);
    with_local_model(&mut cmd, &server);
    cmd.args(["assign", "--skill", "t1=cleaning, driving"])
        .assert()
        .success();
    mock.assert();
}

#[test]
fn test_review_unknown_appointment_fails_before_model_call() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server.mock("POST", "/chat/completions").expect(0).create();

    let mut cmd = poliminder(&home);
    with_local_model(&mut cmd, &server);
    cmd.args(["review", "--appointment", "99", "--link", "https://g.page/review/abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Appointment '99' not found"));
    mock.assert();
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    poliminder(&home)
        .args(["--config", "absent.toml", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}
