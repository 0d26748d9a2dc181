use std::fs;

use satchel_fs::{
    ShredOptions, ShredPattern, exists, find_files_by_suffix, read_to_string, sanitize_output,
    shred_file, shred_file_with_options,
};
use tempfile::tempdir;

#[test]
fn test_sanitize_then_write_then_find() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("exports/2024");

    let target = sanitize_output(&out_dir, "C/reports/summary.csv").unwrap();
    fs::write(&target, "a,b\n").unwrap();

    let found = find_files_by_suffix(dir.path(), ".csv", None).unwrap();
    assert_eq!(found, vec![out_dir.join("summary.csv")]);
    assert_eq!(read_to_string(&found[0]).unwrap(), "a,b\n");
}

#[test]
fn test_random_names_do_not_collide() {
    let dir = tempdir().unwrap();
    let first = sanitize_output(dir.path().join("drop"), "").unwrap();
    let second = sanitize_output(dir.path().join("drop"), "").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_shred_each_tier() {
    let dir = tempdir().unwrap();

    for (name, len) in [("tiny", 10usize), ("medium", 6_000)] {
        let path = dir.path().join(name);
        fs::write(&path, vec![7u8; len]).unwrap();
        shred_file(&path, None).unwrap();
        assert!(!exists(&path), "{name} still exists");
    }

    // a size hint overrides the real size when picking the plan
    let path = dir.path().join("hinted");
    fs::write(&path, b"short").unwrap();
    shred_file(&path, Some(2_000_000_000)).unwrap();
    assert!(!exists(&path));
}

#[test]
fn test_shred_random_pass_changes_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, vec![0u8; 4096]).unwrap();

    let options = ShredOptions::default()
        .pattern(ShredPattern::ZerosThenRandom)
        .passes(1)
        .remove(false);
    shred_file_with_options(&path, options).unwrap();

    let content = fs::read(&path).unwrap();
    assert_eq!(content.len(), 4096);
    assert!(content.iter().any(|b| *b != 0));
}
