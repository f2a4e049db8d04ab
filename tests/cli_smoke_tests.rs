use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "cashflow_cli";

fn command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("CASHFLOW_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("CASHFLOW_CLI_SCRIPT");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().expect("temp dir");
    command(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("cycle").and(contains("monthly")));
}

#[test]
fn version_prints_package_version() {
    let home = TempDir::new().expect("temp dir");
    command(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn script_mode_builds_and_reports_a_cycle() {
    let home = TempDir::new().expect("temp dir");
    command(&home)
        .env("CASHFLOW_CLI_SCRIPT", "1")
        .write_stdin(
            "add-recurring \"Rent\" -1000 2025-01-01\n\
             add-one-off Bonus 500 2025-02-10\n\
             cycle 2025-01-25 --json\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(
            contains("\"startDate\": \"2025-01-20\"")
                .and(contains("\"endBalance\": -500.0"))
                .and(contains("Jan 20th - Feb 19th")),
        );
    assert!(home.path().join("finance.json").exists());
}

#[test]
fn monthly_json_has_twelve_months() {
    let home = TempDir::new().expect("temp dir");
    command(&home)
        .args(["monthly", "2025", "--json"])
        .assert()
        .success()
        .stdout(contains("\"year\": 2025").and(contains("December 2025")));
}

#[test]
fn invalid_year_fails() {
    let home = TempDir::new().expect("temp dir");
    command(&home)
        .args(["monthly", "next-year"])
        .assert()
        .failure()
        .stderr(contains("year"));
}

#[test]
fn unknown_command_fails() {
    let home = TempDir::new().expect("temp dir");
    command(&home)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("unknown command"));
}
