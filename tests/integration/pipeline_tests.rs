//! End-to-end runs through `run_app`, as the binary would drive them.

use clap::Parser;
use numdupe::cli::Cli;
use numdupe::error::ExitCode;
use numdupe::run_app;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let mut argv: Vec<&str> = vec!["numdupe", "-q"];
    argv.extend_from_slice(args);
    run_app(Cli::try_parse_from(argv).unwrap())
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Reference counts computed without the tree.
fn repeated_values(corpus: &Path) -> Vec<String> {
    let content = fs::read_to_string(corpus).unwrap();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for line in content.lines().filter(|l| !l.is_empty()) {
        *counts.entry(line).or_default() += 1;
    }
    let mut repeated: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(k, _)| k.to_string())
        .collect();
    repeated.sort();
    repeated
}

#[test]
fn test_generate_then_compute_matches_reference_counts() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("numbers.txt");
    let results = dir.path().join("dupes.txt");

    let code = run(&[
        "generate",
        "--corpus",
        arg(&corpus),
        "--target-size-mb",
        "0",
        "--batch-size",
        "3000",
        "--max-exclusive",
        "500",
        "--seed",
        "11",
    ])
    .unwrap();
    assert_eq!(code, ExitCode::Success);

    let code = run(&[
        "compute",
        "--corpus",
        arg(&corpus),
        "--output",
        arg(&results),
    ])
    .unwrap();
    // 3000 draws from 500 values must repeat.
    assert_eq!(code, ExitCode::Success);

    let reported: Vec<String> = fs::read_to_string(&results)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    // Pre-order over characters is lexicographic order of the keys.
    let mut sorted = reported.clone();
    sorted.sort();
    assert_eq!(reported, sorted);
    assert_eq!(reported, repeated_values(&corpus));
}

#[test]
fn test_compute_without_duplicates_exits_with_no_duplicates() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("unique.txt");
    let results = dir.path().join("dupes.txt");
    fs::write(&corpus, "1\n2\n3\n").unwrap();

    let code = run(&[
        "compute",
        "-c",
        arg(&corpus),
        "-o",
        arg(&results),
    ])
    .unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
    assert_eq!(fs::read_to_string(&results).unwrap(), "");
}

#[test]
fn test_compute_json_report() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("numbers.txt");
    let results = dir.path().join("dupes.json");
    fs::write(&corpus, "7\n77\n7\n77\n77\n\n").unwrap();

    let code = run(&[
        "compute",
        "-c",
        arg(&corpus),
        "-o",
        arg(&results),
        "--format",
        "json",
    ])
    .unwrap();
    assert_eq!(code, ExitCode::Success);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&results).unwrap()).unwrap();
    let duplicates = json["duplicates"].as_array().unwrap();
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[0]["key"], "7");
    assert_eq!(duplicates[0]["count"], 2);
    assert_eq!(duplicates[1]["key"], "77");
    assert_eq!(duplicates[1]["count"], 3);
    assert_eq!(json["summary"]["lines_read"], 6);
    assert_eq!(json["summary"]["empty_lines"], 1);
    assert_eq!(json["summary"]["distinct_keys"], 2);
    assert_eq!(json["summary"]["exit_code_name"], "ND000");
}

#[test]
fn test_compute_missing_corpus_is_general_error() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("absent.txt");

    let err = run(&["compute", "-c", arg(&corpus)]).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    let message = format!("{err:#}");
    assert!(message.contains("Corpus not found"), "{message}");
}

#[test]
fn test_config_file_supplies_generate_settings() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("from_config.txt");
    let config = dir.path().join("numdupe.toml");
    fs::write(
        &config,
        format!(
            "corpus_path = {:?}\ntarget_size_mb = 0\nbatch_size = 40\nmax_exclusive = 3\nseed = 2\n",
            arg(&corpus)
        ),
    )
    .unwrap();

    let code = run(&["--config", arg(&config), "generate"]).unwrap();
    assert_eq!(code, ExitCode::Success);

    let content = fs::read_to_string(&corpus).unwrap();
    assert_eq!(content.lines().count(), 40);
    assert!(content.lines().all(|l| ["0", "1", "2"].contains(&l)));
}

#[test]
fn test_cli_flags_override_config_file() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("numbers.txt");
    let config = dir.path().join("numdupe.toml");
    fs::write(&config, "target_size_mb = 0\nbatch_size = 40\n").unwrap();

    run(&[
        "--config",
        arg(&config),
        "generate",
        "-c",
        arg(&corpus),
        "--batch-size",
        "15",
    ])
    .unwrap();

    assert_eq!(fs::read_to_string(&corpus).unwrap().lines().count(), 15);
}

#[test]
fn test_missing_config_file_is_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("nope.toml");

    let err = run(&["--config", arg(&config), "compute"]).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
