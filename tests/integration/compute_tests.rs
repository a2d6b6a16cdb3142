use numdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use std::fs;
use std::io::Cursor;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

fn duplicates_of(content: &str) -> Vec<String> {
    let (tree, _) = DuplicateFinder::with_defaults()
        .build_from_reader(Cursor::new(content.as_bytes().to_vec()))
        .unwrap();
    tree.duplicates().collect()
}

#[test]
fn test_single_repeated_value() {
    assert_eq!(duplicates_of("5\n5\n"), vec!["5"]);
}

#[test]
fn test_all_unique_yields_nothing() {
    assert!(duplicates_of("1\n2\n3\n").is_empty());
}

#[test]
fn test_prefix_and_extension_both_repeated() {
    assert_eq!(duplicates_of("7\n77\n7\n77\n"), vec!["7", "77"]);
}

#[test]
fn test_prefix_of_repeated_value_is_not_reported() {
    assert_eq!(duplicates_of("12\n123\n123\n"), vec!["123"]);
}

#[test]
fn test_output_is_preorder_by_character() {
    let content = "9\n10\n9\n100\n10\n2\n100\n2\n";
    assert_eq!(duplicates_of(content), vec!["10", "100", "2", "9"]);
}

#[test]
fn test_triplicate_reported_once() {
    assert_eq!(duplicates_of("42\n42\n42\n"), vec!["42"]);
}

#[test]
fn test_empty_lines_are_skipped() {
    let (tree, summary) = DuplicateFinder::with_defaults()
        .build_from_reader(Cursor::new(b"\n1\n\n1\n\n".to_vec()))
        .unwrap();

    assert_eq!(tree.duplicates().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(summary.lines_read, 5);
    assert_eq!(summary.empty_lines, 3);
    assert_eq!(summary.inserted_lines(), 2);
}

#[test]
fn test_crlf_lines_match_lf_lines() {
    assert_eq!(duplicates_of("8\r\n8\n"), vec!["8"]);
}

#[test]
fn test_missing_final_newline() {
    assert_eq!(duplicates_of("3\n3"), vec!["3"]);
}

#[test]
fn test_empty_corpus_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();

    let (tree, summary) = DuplicateFinder::with_defaults()
        .build_from_path(&path)
        .unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 1);
    assert_eq!(summary.lines_read, 0);
    assert_eq!(tree.duplicates().count(), 0);
}

#[test]
fn test_find_in_path_counts_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.txt");
    fs::write(&path, "31\n4\n31\n15\n4\n92\n").unwrap();

    let (keys, summary) = DuplicateFinder::with_defaults()
        .find_in_path(&path)
        .unwrap();

    assert_eq!(keys, vec!["31", "4"]);
    assert_eq!(summary.duplicate_keys, 2);
    assert_eq!(summary.distinct_keys, 4);
    assert_eq!(summary.bytes_read, 16);
}

#[test]
fn test_missing_corpus_is_path_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let err = DuplicateFinder::with_defaults()
        .build_from_path(&path)
        .unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(ref p) if *p == path));
}

#[test]
fn test_directory_corpus_is_not_a_file() {
    let dir = tempdir().unwrap();

    let err = DuplicateFinder::with_defaults()
        .build_from_path(dir.path())
        .unwrap_err();

    assert!(matches!(err, FinderError::NotAFile(_)));
}

#[test]
fn test_preset_shutdown_flag_interrupts_build() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.txt");
    fs::write(&path, "1\n1\n").unwrap();

    let finder = DuplicateFinder::new(
        FinderConfig::default().with_shutdown_flag(Arc::new(AtomicBool::new(true))),
    );

    assert!(matches!(
        finder.build_from_path(&path),
        Err(FinderError::Interrupted)
    ));
}

#[test]
fn test_enumeration_is_repeatable() {
    let (tree, _) = DuplicateFinder::with_defaults()
        .build_from_reader(Cursor::new(b"6\n66\n6\n66\n".to_vec()))
        .unwrap();

    let first: Vec<_> = tree.duplicates().collect();
    let second: Vec<_> = tree.duplicates().collect();
    assert_eq!(first, second);

    let with_counts: Vec<_> = tree.duplicates_with_counts().collect();
    assert_eq!(
        with_counts,
        vec![("6".to_string(), 2), ("66".to_string(), 2)]
    );
}
