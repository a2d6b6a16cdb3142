use numdupe::corpus::{CorpusGenerator, GeneratorConfig, GeneratorError, LineReader};
use std::fs;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_generate_stops_after_first_batch_over_threshold() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.txt");

    let summary = CorpusGenerator::new(
        GeneratorConfig::new(&path)
            .with_target_size_mb(0)
            .with_batch_size(250)
            .with_max_exclusive(1000)
            .with_seed(1),
    )
    .generate()
    .unwrap();

    assert_eq!(summary.batches, 1);
    assert_eq!(summary.lines_written, 250);
    assert_eq!(summary.bytes_on_disk, fs::metadata(&path).unwrap().len());
}

#[test]
fn test_generated_lines_are_in_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.txt");

    CorpusGenerator::new(
        GeneratorConfig::new(&path)
            .with_target_size_mb(0)
            .with_batch_size(2_000)
            .with_max_exclusive(37)
            .with_seed(5),
    )
    .generate()
    .unwrap();

    let mut reader = LineReader::open(&path).unwrap();
    let mut seen = 0;
    while let Some(line) = reader.next_line().unwrap() {
        let value: u64 = line.parse().unwrap();
        assert!(value < 37, "value {value} out of range");
        seen += 1;
    }
    assert_eq!(seen, 2_000);
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    for path in [&a, &b] {
        CorpusGenerator::new(
            GeneratorConfig::new(path)
                .with_target_size_mb(0)
                .with_batch_size(500)
                .with_seed(42),
        )
        .generate()
        .unwrap();
    }

    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn test_generate_truncates_by_default_and_appends_on_request() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.txt");
    fs::write(&path, "stale\n").unwrap();

    let config = GeneratorConfig::new(&path)
        .with_target_size_mb(0)
        .with_batch_size(10)
        .with_seed(3);

    CorpusGenerator::new(config.clone()).generate().unwrap();
    let replaced = fs::read_to_string(&path).unwrap();
    assert!(!replaced.contains("stale"));
    assert_eq!(replaced.lines().count(), 10);

    CorpusGenerator::new(config.with_append(true))
        .generate()
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 20);
}

#[test]
fn test_generate_honours_shutdown_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.txt");

    let result = CorpusGenerator::new(
        GeneratorConfig::new(&path)
            .with_target_size_mb(0)
            .with_shutdown_flag(Arc::new(AtomicBool::new(true))),
    )
    .generate();

    assert!(matches!(result, Err(GeneratorError::Interrupted)));
}

#[test]
fn test_generate_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("numbers.txt");

    let result = CorpusGenerator::new(GeneratorConfig::new(&path).with_target_size_mb(0)).generate();

    match result {
        Err(GeneratorError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected Io error, got {other:?}"),
    }
}
