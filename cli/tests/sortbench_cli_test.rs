use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sortbench"))
}

#[test]
fn lists_scenarios_with_bound_candidates() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    Command::new(bin_path())
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("priorityqueue"))
        .stdout(predicate::str::contains("intervals"))
        .stdout(predicate::str::contains("BTreeMultiset"))
        .stdout(predicate::str::contains("limit 100000"))
        .stdout(predicate::str::contains("setup fill_values"));
    Ok(())
}

#[test]
fn runs_one_scenario_and_prints_table() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    Command::new(bin_path())
        .current_dir(dir.path())
        .args(["run", "--scenario", "pop", "--size", "1000", "--repeat", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SegmentedList(key=identity)"))
        .stdout(predicate::str::contains("BTreeMultiset"))
        .stdout(predicate::str::contains("FAILED").not());
    Ok(())
}

#[test]
fn writes_json_report_to_output_dir() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("reports");
    Command::new(bin_path())
        .current_dir(dir.path())
        .args(["run", "-s", "multiset", "-s", "intervals", "-n", "1000", "-r", "1", "--format", "json"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("latest.json"));

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.join("latest.json"))?)?;
    let measurements = report["measurements"].as_array().ok_or("measurements array")?;
    assert!(!measurements.is_empty());
    assert!(measurements.iter().all(|m| m["outcome"]["status"] == "passed"));
    assert!(measurements.iter().all(|m| m["candidate"] != "BTreeMultiset"));
    Ok(())
}

#[test]
fn config_file_limits_and_format_apply() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("sortbench.toml"),
        r#"
sizes = [100, 1000]
repeat = 1
scenarios = ["add"]

[[limits]]
scenario = "add"
candidate = "SegmentedList"
value = 100

[output]
format = "csv"
"#,
    )?;
    Command::new(bin_path())
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("add,SegmentedList,100,1,"))
        .stdout(predicate::str::contains("add,SegmentedList,1000,").not())
        .stdout(predicate::str::contains("add,KeyedCollection,1000,1,"));
    Ok(())
}

#[test]
fn unknown_scenario_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    Command::new(bin_path())
        .current_dir(dir.path())
        .args(["run", "--scenario", "sort", "--size", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scenario 'sort' not found"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, "repeat = 0\n")?;
    Command::new(bin_path())
        .current_dir(dir.path())
        .arg("run")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.toml"));
    Ok(())
}
