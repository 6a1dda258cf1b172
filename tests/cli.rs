//! End-to-end tests of the `budget` binary against a temporary data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budget(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget").unwrap();
    cmd.env("HOUSEHOLD_BUDGET_DATA_DIR", data_dir.path())
        .env_remove("BUDGET_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn register_and_login(data_dir: &TempDir) {
    budget(data_dir)
        .args(["register", "anna", "--password", "hemmeligt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user: anna"));

    budget(data_dir)
        .args(["login", "anna", "--password", "hemmeligt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as anna"));
}

#[test]
fn demo_dashboard_needs_no_login() {
    let data_dir = TempDir::new().unwrap();

    budget(&data_dir)
        .args(["--demo", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Dashboard"))
        .stdout(predicate::str::contains("55000.00 kr"))
        .stdout(predicate::str::contains("Husleje/boliglån"));
}

#[test]
fn demo_mode_is_read_only() {
    let data_dir = TempDir::new().unwrap();

    budget(&data_dir)
        .args(["--demo", "expense", "delete", "Netflix"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}

#[test]
fn commands_require_login() {
    let data_dir = TempDir::new().unwrap();

    budget(&data_dir)
        .args(["income", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn wrong_password_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    register_and_login(&data_dir);

    budget(&data_dir)
        .args(["login", "anna", "--password", "forkert!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn budget_flow_from_income_to_overview() {
    let data_dir = TempDir::new().unwrap();
    register_and_login(&data_dir);

    budget(&data_dir)
        .args(["income", "set", "Person 1", "28000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income: Person 1"));

    budget(&data_dir)
        .args([
            "expense", "add", "Bilservice", "6000", "-c", "Transport", "-f", "semi-annual", "-m", "3,9",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Months:    Mar, Sep"));

    budget(&data_dir)
        .args(["expense", "add", "Vægtafgift", "3600", "-c", "Transport", "-f", "semi-annual", "-m", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 2 month(s)"));

    budget(&data_dir)
        .args(["expense", "add", "Skat", "18000", "-c", "Bolig", "-f", "yearly", "-m", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month: 13"));

    budget(&data_dir)
        .args(["export", "overview", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transport,0.00,0.00,3000.00,0.00,0.00,0.00,0.00,0.00,3000.00,0.00,0.00,0.00,6000.00",
        ))
        .stdout(predicate::str::contains("INCOME,28000.00"));

    budget(&data_dir)
        .args(["overview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yearly Overview"))
        .stdout(predicate::str::contains("Balance"));
}

#[test]
fn category_in_use_cannot_be_deleted() {
    let data_dir = TempDir::new().unwrap();
    register_and_login(&data_dir);

    budget(&data_dir)
        .args(["expense", "add", "Husleje", "12000", "-c", "Bolig"])
        .assert()
        .success();

    budget(&data_dir)
        .args(["category", "delete", "Bolig"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is used by 1 expense(s)"));

    budget(&data_dir)
        .args(["category", "edit", "Bolig", "--name", "Hjem"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 1 expense(s) to 'Hjem'."));
}

#[test]
fn logout_ends_the_session() {
    let data_dir = TempDir::new().unwrap();
    register_and_login(&data_dir);

    budget(&data_dir)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("anna"));

    budget(&data_dir).args(["logout"]).assert().success();

    budget(&data_dir)
        .args(["whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn password_reset_with_emailed_address() {
    let data_dir = TempDir::new().unwrap();
    register_and_login(&data_dir);

    budget(&data_dir)
        .args(["email", "anna@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E-mail address saved for anna."));

    let output = budget(&data_dir)
        .args(["reset-password", "request", "anna@example.com"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let code = stdout
        .lines()
        .skip_while(|line| !line.starts_with("Reset code for anna"))
        .nth(1)
        .unwrap()
        .trim()
        .to_string();

    budget(&data_dir)
        .args(["reset-password", "confirm", &code, "--password", "nyt-kodeord"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password reset for anna."));

    budget(&data_dir)
        .args(["reset-password", "confirm", &code, "--password", "tredje-kode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid or expired reset code"));

    budget(&data_dir)
        .args(["login", "anna", "--password", "nyt-kodeord"])
        .assert()
        .success();
}

#[test]
fn oversized_amount_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    register_and_login(&data_dir);

    budget(&data_dir)
        .args(["expense", "add", "Slot", "100000000000000000", "-c", "Bolig"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount too large"));
}
