//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hopbench() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("hopbench").unwrap();
    cmd.env_remove("HOPBENCH_QUESTIONS")
        .env_remove("HOPBENCH_STORE_TOKEN");
    cmd
}

/// Two tier-2 questions whose answer is A, the model got one right.
const QUESTIONS: &str = r#"[
  {"id": 1, "k_hops": 2, "question_and_explanation": "<Question>\n[First hop question?]\n</Question>\n<Options>\nalpha\nbeta\ngamma\ndelta\n</Options>\n<Answer>: A", "correctness_m": "yes", "response_m": "reasoning one"},
  {"id": 2, "k_hops": 2, "question_and_explanation": "<Question>\n[Second hop question?]\n</Question>\n<Options>\none\ntwo\nthree\n</Options>\n<Answer>A</Answer>", "correctness_m": "no", "response_m": "reasoning two"},
  {"id": 3, "k_hops": 4, "question_and_explanation": "<Question>\n[Deep question?]\n</Question>\n<Options>\nx\ny\n</Options>\n<Answer>: B", "correctness_m": "yes", "response_m": "reasoning three"}
]"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("questions.json"), QUESTIONS).unwrap();
    std::fs::write(
        dir.path().join("hopbench.toml"),
        "questions_path = \"questions.json\"\n\n[store]\ntype = \"jsonl\"\npath = \"results/sessions.jsonl\"\n",
    )
    .unwrap();
    dir
}

fn read_results(dir: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(dir.join("results/sessions.jsonl"))
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn play_scripted_session() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--seed", "7", "--format", "json", "--output", "out"])
        .write_stdin("Ada\nAnalyst\n2\nA\n\nA\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/2"))
        .stdout(predicate::str::contains("Question 2/2"))
        .stdout(predicate::str::contains("Comparison against Qwen-2.5-32B"))
        .stdout(predicate::str::contains("2/2"))
        .stdout(predicate::str::contains("1/2"))
        .stdout(predicate::str::contains("-10.0%"))
        .stdout(predicate::str::contains("human ahead"));

    let results = read_results(dir.path());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Ada");
    assert_eq!(results[0]["position"], "Analyst");
    assert_eq!(results[0]["selected_difficulty"], 2);
    assert_eq!(results[0]["user_score"], 2);
    assert_eq!(results[0]["model_score"], 1);
    assert_eq!(results[0]["percent_difference"], -10.0);

    let reports: Vec<_> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].extension().unwrap(), "json");
}

#[test]
fn play_with_flags_and_html_report() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args([
            "play",
            "--name",
            "Grace",
            "--position",
            "Engineer",
            "--difficulty",
            "4",
            "--format",
            "html",
            "--output",
            "out",
        ])
        .write_stdin("a\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/1"))
        .stdout(predicate::str::contains("model ahead"));

    let results = read_results(dir.path());
    assert_eq!(results[0]["user_score"], 0);
    assert_eq!(results[0]["model_score"], 1);
    assert_eq!(results[0]["percent_difference"], 10.0);

    let html = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|ext| ext == "html"))
        .unwrap();
    let content = std::fs::read_to_string(html).unwrap();
    assert!(content.contains("Deep question?"));
}

#[test]
fn play_requires_selection_before_advancing() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada", "--position", "Analyst"])
        .args(["--difficulty", "4", "--format", "none"])
        .write_stdin("\nB\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("select an answer before moving on"))
        .stdout(predicate::str::contains("+0.0%"));
}

#[test]
fn play_empty_tier_fails() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada", "--position", "Analyst"])
        .args(["--difficulty", "5", "--format", "none"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Insufficient questions available for this difficulty tier",
        ));

    assert!(!dir.path().join("results/sessions.jsonl").exists());
}

#[test]
fn play_missing_question_file_degrades_to_empty_pool() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--questions", "missing.json", "--name", "Ada"])
        .args(["--position", "Analyst", "--difficulty", "2", "--format", "none"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error loading questions"))
        .stderr(predicate::str::contains(
            "Insufficient questions available for this difficulty tier",
        ));
}

#[test]
fn play_rejects_out_of_range_difficulty_flag() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada", "--position", "Analyst"])
        .args(["--difficulty", "9", "--format", "none"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid difficulty (1-5): '9'"));
}

#[test]
fn report_renders_saved_session() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada", "--position", "Analyst"])
        .args(["--difficulty", "4", "--format", "json", "--output", "out"])
        .write_stdin("B\n\n")
        .assert()
        .success();

    let session = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|ext| ext == "json"))
        .unwrap();

    hopbench()
        .current_dir(dir.path())
        .arg("report")
        .arg("--session")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("you 1 / model 1 (+0.0%)"))
        .stdout(predicate::str::contains("HTML report"));

    let html = std::fs::read_to_string(session.with_extension("html")).unwrap();
    assert!(html.contains("Deep question?"));
}

#[test]
fn report_missing_session_fails() {
    let dir = TempDir::new().unwrap();

    hopbench()
        .current_dir(dir.path())
        .args(["report", "--session", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn play_reprompts_invalid_intake() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--format", "none"])
        .write_stdin("  \nAda\nAnalyst\n7\n4\nB\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a valid name."))
        .stdout(predicate::str::contains("Please enter a valid difficulty"));
}

#[test]
fn play_truncated_input_fails() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada", "--position", "Analyst"])
        .args(["--difficulty", "2", "--format", "none"])
        .write_stdin("A\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}

#[test]
fn questions_lists_tier() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["questions", "--difficulty", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First hop question?"))
        .stdout(predicate::str::contains("Second hop question?"))
        .stdout(predicate::str::contains("2 question(s) at difficulty 2"));
}

#[test]
fn questions_rejects_out_of_range_tier() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .args(["questions", "--difficulty", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_clean_file() {
    let dir = workspace();

    hopbench()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records"))
        .stdout(predicate::str::contains("difficulty 2: 2 question(s)"))
        .stdout(predicate::str::contains("All questions valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.json"),
        r#"[{"id": 1, "k_hops": 2, "question_and_explanation": "no markers"}]"#,
    )
    .unwrap();

    hopbench()
        .current_dir(dir.path())
        .args(["validate", "--questions", "bad.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    hopbench()
        .current_dir(dir.path())
        .args(["validate", "--questions", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    hopbench()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created hopbench.toml"))
        .stdout(predicate::str::contains("Created questions.json"));

    assert!(dir.path().join("hopbench.toml").exists());
    assert!(dir.path().join("questions.json").exists());

    hopbench()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));

    hopbench()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All questions valid."));
}

#[test]
fn help_lists_commands() {
    hopbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("questions"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("init"));
}
