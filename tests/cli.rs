#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CONNECTIVITY: &str = "0 1 1 0\n0 0 0 1\n1 0 0 1\n1 0 0 0\n";

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn bin() -> Command {
    Command::cargo_bin("rapid-pagerank").unwrap()
}

#[test]
fn test_cli_reference_graph() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "connectivity.txt", CONNECTIVITY);

    bin()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Input matrix : \n[   0][   1][   1][   0]\n"))
        .stdout(predicate::str::contains("Rank Result \n"))
        .stdout(predicate::str::contains("Page A : 39.07%"))
        .stdout(predicate::str::contains("Page B :  9.24%"))
        .stdout(predicate::str::contains("Page C : 25.85%"))
        .stdout(predicate::str::contains("Page D : 25.85%"));
    Ok(())
}

#[test]
fn test_cli_output_is_stable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "connectivity.txt", CONNECTIVITY);

    let first = bin().arg(&input).output()?;
    let second = bin().arg(&input).output()?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn test_cli_default_input_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    write_input(&dir, "connectivity.txt", CONNECTIVITY);

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Page D"));
    Ok(())
}

#[test]
fn test_cli_non_square_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "ten.txt", "0 1 0 1 0 1 0 1 0 1\n");

    bin()
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("must be square"))
        .stdout(predicate::str::contains("Found : 10"));
    Ok(())
}

#[test]
fn test_cli_missing_file_fails() {
    bin()
        .arg("no/such/connectivity.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to open a file"));
}

#[test]
fn test_cli_empty_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "empty.txt", "\n");

    bin()
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("must be more than 0"));
    Ok(())
}

#[test]
fn test_cli_page_count_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "connectivity.txt", CONNECTIVITY);

    bin()
        .arg(&input)
        .args(["--pages", "3"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("expected a link matrix for 3 pages"));
    Ok(())
}

#[test]
fn test_cli_invalid_damping() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "connectivity.txt", CONNECTIVITY);

    bin()
        .arg(&input)
        .args(["--damping", "1.5"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("/damping"));
    Ok(())
}

#[test]
fn test_cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "connectivity.txt", CONNECTIVITY);

    let output = bin().arg(&input).args(["--format", "json"]).output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 4);
    assert_eq!(pages[3]["label"], "D");
    let percent: f64 = pages.iter().map(|p| p["percent"].as_f64().unwrap()).sum();
    assert!((percent - 100.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_cli_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "connectivity.txt", CONNECTIVITY);
    let config = write_input(&dir, "rank.json", r#"{ "max_iterations": 2 }"#);

    bin()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("did not converge after 2 iterations"));

    // flag overrides the file
    bin()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .args(["--max-iterations", "500", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Rank Result \n"));
    Ok(())
}

#[test]
fn test_cli_malformed_tokens_stop_read() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    // four numbers then garbage: read stops early and yields a 2x2 graph
    let input = write_input(&dir, "short.txt", "0 1 1 0 x 1 1 1 1\n");

    bin()
        .arg(&input)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page B"))
        .stdout(predicate::str::contains("Page C").not());
    Ok(())
}

#[test]
fn test_cli_nan_token_stops_read() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "nan.txt", "0 1 1 0 nan 1 1 1 1\n");

    bin()
        .arg(&input)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page B"))
        .stdout(predicate::str::contains("NaN").not());
    Ok(())
}
