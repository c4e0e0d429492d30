use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn shell(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("outlay").unwrap();
    cmd.env("OUTLAY_CLI_SCRIPT", "1")
        .env("OUTLAY_DATA_DIR", data_dir.path())
        .env_remove("OUTLAY_ALERT_THRESHOLD");
    cmd
}

#[test]
fn script_mode_tracks_spending_against_a_budget() {
    let dir = TempDir::new().unwrap();
    let input = "\
# comments are skipped
add-expense \"Bus pass\" 125 transportation
set-budget transportation 100
budgets
alerts
dashboard
exit
";

    shell(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added expense"))
        .stdout(contains("Budget for Transportation set to $100.00."))
        .stdout(contains(" 125%"))
        .stdout(contains("[####################]"))
        .stdout(contains("over by $25.00"))
        .stdout(contains("Transportation is over budget: 125% used"))
        .stdout(contains("=== Dashboard ==="));

    let book = std::fs::read_to_string(dir.path().join("books").join("local.json")).unwrap();
    assert!(book.contains("\"Bus pass\""));
    assert!(book.contains("\"transportation\""));
}

#[test]
fn script_mode_reports_field_errors_and_keeps_running() {
    let dir = TempDir::new().unwrap();
    let input = "\
add-expense \"\" -5 snacks 2024-03-01
add-expense Lunch 12.5 food 2024-03-01
expenses
exit
";

    shell(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("description: Description is required"))
        .stdout(contains("amount: Amount must be a positive number"))
        .stdout(contains("category:"))
        .stdout(contains("Lunch"))
        .stdout(contains("$12.50"));
}

#[test]
fn script_mode_suggests_close_command_names() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .write_stdin("expnses\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `expnses`"))
        .stdout(contains("Suggestion: `expenses`?"));
}

#[test]
fn script_mode_deletes_without_prompting() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .write_stdin("add-expense Coffee 4 food 2024-03-01\nexit\n")
        .assert()
        .success();

    let book = std::fs::read_to_string(dir.path().join("books").join("local.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&book).unwrap();
    let id = json["expenses"][0]["id"].as_str().unwrap().to_string();

    shell(&dir)
        .write_stdin(format!("delete-expense {}\nexpenses\nexit\n", &id[..8]))
        .assert()
        .success()
        .stdout(contains("Deleted expense"))
        .stdout(contains("No expenses recorded yet"));
}
