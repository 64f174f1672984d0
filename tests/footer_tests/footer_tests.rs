//! Tests for the index footer
//!
//! These tests verify:
//! - Locating and decoding a well-formed footer
//! - Empty and tiny files (no footer)
//! - Best-effort fallback on unreadable pointer or index lines
//! - Truncation removes exactly the footer
//! - Cursor position is preserved
//! - Footer writer output

use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::PathBuf;

use jsondb::footer::{load_index, write_footer, Index};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const RECORDS: &str = "{\"x\":\"a\"}\n{\"y\":\"b\"}\n{\"x\":\"c\"}\n";
const WELL_FORMED: &str = "{\"x\":\"a\"}\n{\"y\":\"b\"}\n{\"x\":\"c\"}\n{\"x\":[0,20],\"y\":[10]}\n30";

fn setup_temp_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.jsonl");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

fn open_rw(path: &PathBuf) -> File {
    OpenOptions::new().read(true).write(true).open(path).unwrap()
}

fn expected_index() -> Index {
    let mut index = Index::new();
    index.insert("x".to_string(), vec![0, 20]);
    index.insert("y".to_string(), vec![10]);
    index
}

// =============================================================================
// Locate and Decode Tests
// =============================================================================

#[test]
fn test_load_well_formed_footer() {
    let (_temp, path) = setup_temp_file(WELL_FORMED);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, false).unwrap();

    assert_eq!(index, expected_index());
}

#[test]
fn test_load_without_truncate_leaves_file_unchanged() {
    let (_temp, path) = setup_temp_file(WELL_FORMED);
    let mut file = open_rw(&path);

    load_index(&mut file, false).unwrap();
    load_index(&mut file, false).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), WELL_FORMED);
}

#[test]
fn test_load_empty_file() {
    let (_temp, path) = setup_temp_file("");
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_load_single_byte_file() {
    let (_temp, path) = setup_temp_file("7");
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "7");
}

#[test]
fn test_load_empty_index_footer() {
    // What an add with no items leaves behind on an empty file
    let (_temp, path) = setup_temp_file("{}\n0");
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_load_preserves_cursor_position() {
    let (_temp, path) = setup_temp_file(WELL_FORMED);
    let mut file = open_rw(&path);
    file.seek(SeekFrom::Start(13)).unwrap();

    load_index(&mut file, false).unwrap();
    assert_eq!(file.stream_position().unwrap(), 13);

    load_index(&mut file, true).unwrap();
    assert_eq!(file.stream_position().unwrap(), 13);
}

// =============================================================================
// Best-Effort Fallback Tests
// =============================================================================

#[test]
fn test_records_without_footer() {
    // Last line is a record, not a pointer
    let (_temp, path) = setup_temp_file(RECORDS);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), RECORDS);
}

#[test]
fn test_non_integer_pointer_line() {
    let contents = format!("{}{{\"x\":[0,20],\"y\":[10]}}\nthirty", RECORDS);
    let (_temp, path) = setup_temp_file(&contents);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

#[test]
fn test_corrupt_index_json_is_not_truncated() {
    let contents = format!("{}not an index at all\n30", RECORDS);
    let (_temp, path) = setup_temp_file(&contents);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

#[test]
fn test_index_with_wrong_shape() {
    // Valid JSON, but offsets are not integers
    let contents = format!("{}{{\"x\":\"zero\"}}\n30", RECORDS);
    let (_temp, path) = setup_temp_file(&contents);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, false).unwrap();

    assert!(index.is_empty());
}

#[test]
fn test_pointer_beyond_pointer_line() {
    let contents = format!("{}{{\"x\":[0]}}\n9999", RECORDS);
    let (_temp, path) = setup_temp_file(&contents);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_truncate_removes_exactly_the_footer() {
    let (_temp, path) = setup_temp_file(WELL_FORMED);
    let mut file = open_rw(&path);

    let index = load_index(&mut file, true).unwrap();

    assert_eq!(index, expected_index());
    assert_eq!(fs::read_to_string(&path).unwrap(), RECORDS);
}

#[test]
fn test_second_truncating_load_finds_nothing() {
    let (_temp, path) = setup_temp_file(WELL_FORMED);
    let mut file = open_rw(&path);

    load_index(&mut file, true).unwrap();
    let index = load_index(&mut file, true).unwrap();

    assert!(index.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), RECORDS);
}

// =============================================================================
// Writer Tests
// =============================================================================

#[test]
fn test_write_footer_format() {
    let mut buf = Vec::new();

    write_footer(&mut buf, &expected_index(), 30).unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "{\"x\":[0,20],\"y\":[10]}\n30"
    );
}

#[test]
fn test_written_footer_loads_back() {
    let (_temp, path) = setup_temp_file(RECORDS);
    let mut file = open_rw(&path);
    file.seek(SeekFrom::End(0)).unwrap();

    write_footer(&mut file, &expected_index(), RECORDS.len() as u64).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), WELL_FORMED);
    assert_eq!(load_index(&mut file, false).unwrap(), expected_index());
}
