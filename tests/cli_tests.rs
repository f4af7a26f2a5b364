use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MENU: &str = include_str!("fixtures/menu.json");
const PREK_MENU: &str = include_str!("fixtures/prek_menu.json");

/// Every variable the binary reads, cleared so the host environment cannot leak in.
const KNOWN_VARS: &[&str] = &[
    "SCHOOL_ID",
    "GRADE",
    "SERVING_LINE",
    "MEAL_TYPE",
    "SENDER_EMAIL",
    "SENDER_PASSWORD",
    "RECIPIENT_EMAIL",
    "ADDITIONAL_RECIPIENTS",
    "SMTP_SERVER",
    "SMTP_PORT",
    "SMTP_TIMEOUT_SECS",
    "TEST_RUN",
    "MENU_API_URL",
    "HTTP_TIMEOUT_SECS",
    "PREK_GRADE",
    "PREK_SERVING_LINE",
    "MENU_NOTIFIER_LOG_FILE",
    "RUST_LOG",
];

/// Command with a clean environment, run from an empty directory so no `.env` is found.
fn notifier_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("menu-notifier"));
    for var in KNOWN_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(dir.path());
    cmd
}

fn school_env(cmd: &mut Command, api_url: &str) {
    cmd.env("SCHOOL_ID", "school-1")
        .env("GRADE", "01")
        .env("SERVING_LINE", "Main Line")
        .env("MEAL_TYPE", "Lunch")
        .env("MENU_API_URL", api_url)
        .env("HTTP_TIMEOUT_SECS", "5");
}

/// Serve `main` for every request, or `prek` when the request asks for the PK grade.
fn menu_server(main: &'static str, prek: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            loop {
                let mut header = String::new();
                match reader.read_line(&mut header) {
                    Ok(0) | Err(_) => break,
                    Ok(_) if header == "\r\n" => break,
                    Ok(_) => {}
                }
            }

            let body = if request_line.contains("Grade=PK") {
                prek
            } else {
                main
            };
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/api/menu", addr)
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    notifier_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lunch menus"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    notifier_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("menu-notifier"));
}

#[test]
fn test_unknown_subcommand() {
    let dir = TempDir::new().unwrap();
    notifier_cmd(&dir).arg("monthly").assert().failure();
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn test_missing_school_id() {
    let dir = TempDir::new().unwrap();
    notifier_cmd(&dir)
        .args(["daily", "--dry-run"])
        .env("GRADE", "01")
        .env("SERVING_LINE", "Main Line")
        .env("MEAL_TYPE", "Lunch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SCHOOL_ID"));
}

#[test]
fn test_invalid_smtp_port() {
    let dir = TempDir::new().unwrap();
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, "http://127.0.0.1:9/menu");
    cmd.args(["daily", "--dry-run"])
        .env("SMTP_PORT", "abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SMTP_PORT"));
}

#[test]
fn test_missing_sender_fails_before_fetching() {
    let dir = TempDir::new().unwrap();
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, "http://127.0.0.1:9/menu");
    cmd.arg("daily")
        .env("RECIPIENT_EMAIL", "parent@example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SENDER_EMAIL"))
        .stderr(predicate::str::contains("Failed to fetch").not());
}

#[test]
fn test_env_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "SCHOOL_ID=from-dotenv\nGRADE=02\nSERVING_LINE=Main Line\nMEAL_TYPE=Lunch\n",
    )
    .unwrap();

    notifier_cmd(&dir)
        .arg("check-config")
        .assert()
        .failure()
        .stdout(predicate::str::contains("from-dotenv"))
        .stderr(predicate::str::contains("SENDER_EMAIL"));
}

#[test]
fn test_env_file_sets_log_filter() {
    let dir = TempDir::new().unwrap();
    let url = menu_server("{}", "{}");
    std::fs::write(
        dir.path().join(".env"),
        format!(
            "SCHOOL_ID=school-1\nGRADE=01\nSERVING_LINE=Main Line\nMEAL_TYPE=Lunch\n\
             MENU_API_URL={}\nRUST_LOG=menu_notifier=debug\n",
            url
        ),
    )
    .unwrap();

    notifier_cmd(&dir)
        .args(["daily", "--dry-run", "--date", "2026-10-19"])
        .assert()
        .success()
        .stderr(predicate::str::contains("GET http://127.0.0.1"));
}

#[test]
fn test_malformed_env_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "this line is not an assignment\n").unwrap();

    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, "http://127.0.0.1:9/menu");
    cmd.arg("check-config")
        .env("SENDER_EMAIL", "sender@example.com")
        .env("SENDER_PASSWORD", "hunter2")
        .env("RECIPIENT_EMAIL", "parent@example.com")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring unreadable .env file"));
}

// =============================================================================
// check-config
// =============================================================================

#[test]
fn test_check_config_masks_secrets() {
    let dir = TempDir::new().unwrap();
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, "http://127.0.0.1:9/menu");
    cmd.arg("check-config")
        .env("SENDER_EMAIL", "sender@example.com")
        .env("SENDER_PASSWORD", "hunter2")
        .env("RECIPIENT_EMAIL", "parent@example.com")
        .env("ADDITIONAL_RECIPIENTS", "grandma@example.com, PARENT@example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("s***@example.com"))
        .stdout(predicate::str::contains("g***@example.com"))
        .stdout(predicate::str::contains("hunter2").not())
        .stdout(predicate::str::contains("sender@example.com").not())
        .stderr(predicate::str::contains("hunter2").not());
}

// =============================================================================
// Fetch failures
// =============================================================================

#[test]
fn test_unreachable_api_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, "http://127.0.0.1:9/menu");
    cmd.args(["daily", "--dry-run", "--date", "2026-10-19"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch menu data"));
}

// =============================================================================
// Dry runs against a local menu server
// =============================================================================

#[test]
fn test_holiday_renders_no_menu_notice() {
    let dir = TempDir::new().unwrap();
    let url = menu_server("{}", "{}");
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, &url);
    cmd.args(["daily", "--dry-run", "--date", "2026-11-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Menu Available"))
        .stdout(predicate::str::contains("Thursday, November 26, 2026"));
}

#[test]
fn test_daily_dry_run_renders_menu() {
    let dir = TempDir::new().unwrap();
    let url = menu_server(MENU, PREK_MENU);
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, &url);

    let output = cmd
        .args(["daily", "--dry-run", "--date", "2026-10-19"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let html = String::from_utf8(output).unwrap();

    assert!(html.contains("Lunch Menu for Monday, October 19, 2026"));
    assert_eq!(html.matches(">Pizza<").count(), 1);
    assert!(html.contains("Corn &amp; Peas"));
    assert!(html.contains("Calories: N/A"));
    assert!(html.contains("Pre-K"));

    let entrees = html.find("<h2>Entrees</h2>").unwrap();
    let vegetables = html.find("<h2>Vegetables</h2>").unwrap();
    let milk = html.find("<h2>Milk</h2>").unwrap();
    let condiments = html.find("<h2>Condiments</h2>").unwrap();
    assert!(entrees < vegetables && vegetables < milk && milk < condiments);
}

#[test]
fn test_test_run_marks_output() {
    let dir = TempDir::new().unwrap();
    let url = menu_server(MENU, PREK_MENU);
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, &url);
    cmd.args(["daily", "--dry-run", "--date", "2026-10-19"])
        .env("TEST_RUN", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("[TEST] Lunch Menu"))
        .stdout(predicate::str::contains("<div class=\"test-banner\">"));
}

#[test]
fn test_weekly_dry_run_has_five_days() {
    let dir = TempDir::new().unwrap();
    let url = menu_server(MENU, PREK_MENU);
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, &url);

    let output = cmd
        .args(["weekly", "--dry-run", "--start", "2026-10-19"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let html = String::from_utf8(output).unwrap();

    assert_eq!(html.matches("class=\"day-section\"").count(), 5);
    assert!(html.contains("Weekly Lunch Preview: Oct 19"));
    assert!(html.contains("Chicken Nuggets"));
    assert!(!html.contains("Corn"));
    assert!(!html.contains("Calories"));
}

#[test]
fn test_fetch_json_keeps_category_order() {
    let dir = TempDir::new().unwrap();
    let url = menu_server(MENU, "{}");
    let mut cmd = notifier_cmd(&dir);
    school_env(&mut cmd, &url);

    let output = cmd
        .args(["fetch", "--json", "--date", "2026-10-19"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["date"], "2026-10-19");
    let categories = json["categories"].as_object().unwrap();
    assert_eq!(categories["ENTREES"].as_array().unwrap().len(), 2);
    assert_eq!(categories["ENTREES"][1]["calories"], 280);
    assert!(categories["VEGETABLES"][0]["calories"].is_null());
}
