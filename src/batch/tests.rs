use super::*;
use crate::chunker::{ChunkConfig, Chunker, Strategy};
use crate::merge::{MergeError, MergeOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PARAGRAPHS: &str = "aaaaaaaaaa\n\nbbbbbbbbbb\n\ncccccccccc";

fn window_options() -> SplitOptions {
    let config = ChunkConfig::default()
        .strategy(Strategy::Window)
        .min_chars(5)
        .max_chars(15);
    SplitOptions::new(Chunker::new(config))
}

fn breakpoint_options() -> SplitOptions {
    let config = ChunkConfig::default()
        .min_chars(20)
        .target_chars(40)
        .max_chars(60)
        .overlap_chars(0);
    SplitOptions::new(Chunker::new(config))
}

fn sample_document() -> String {
    (1..=12)
        .map(|i| format!("Thence north {i}0 feet along the fence; then east to pin {i}."))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ========================================================================
// Discovery
// ========================================================================

#[test]
fn test_collect_text_files() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("b.txt"), "b");
    write(&dir.path().join("a.txt"), "a");
    write(&dir.path().join("notes.md"), "skip");
    write(&dir.path().join("sub/c.txt"), "c");

    let top = collect_text_files(dir.path(), false).unwrap();
    assert_eq!(top, vec![dir.path().join("a.txt"), dir.path().join("b.txt")]);

    let all = collect_text_files(dir.path(), true).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.contains(&dir.path().join("sub/c.txt")));
}

#[test]
fn test_collect_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(collect_text_files(&dir.path().join("nope"), true).unwrap().is_empty());
}

// ========================================================================
// Split
// ========================================================================

#[test]
fn test_split_no_input_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("readme.md"), "not text");

    let err = split_directory(input.path(), output.path(), &window_options()).unwrap_err();
    assert!(matches!(err, BatchError::NoInputFiles(_)));
}

#[test]
fn test_split_window_naming() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("long.txt"), PARAGRAPHS);
    write(&input.path().join("short.txt"), "hello");

    let report = split_directory(input.path(), output.path(), &window_options()).unwrap();

    assert!(report.failed.is_empty());
    assert_eq!(report.segment_count(), 4);
    assert_eq!(
        file_names(output.path()),
        vec![
            "long_split_1_of_3.txt",
            "long_split_2_of_3.txt",
            "long_split_3_of_3.txt",
            "short.txt",
        ]
    );
    assert_eq!(
        fs::read_to_string(output.path().join("long_split_2_of_3.txt")).unwrap(),
        "bbbbbbbbbb"
    );
    assert_eq!(fs::read_to_string(output.path().join("short.txt")).unwrap(), "hello");
}

#[test]
fn test_split_mirrors_subdirectories() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("county/2021/deed.txt"), PARAGRAPHS);

    let options = window_options().recursive(true);
    split_directory(input.path(), output.path(), &options).unwrap();

    assert_eq!(file_names(&output.path().join("county/2021")).len(), 3);
}

#[test]
fn test_split_empty_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("empty.txt"), "");

    let report = split_directory(input.path(), output.path(), &breakpoint_options()).unwrap();
    assert_eq!(report.files[0].outputs, vec![output.path().join("empty.txt")]);
    assert_eq!(fs::read_to_string(output.path().join("empty.txt")).unwrap(), "");
}

#[test]
fn test_split_isolates_bad_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();
    write(&input.path().join("good.txt"), "fine");

    let report = split_directory(input.path(), output.path(), &window_options()).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, input.path().join("bad.txt"));
    assert!(report.failed[0].error.contains("not valid UTF-8"));
    assert_eq!(report.files.len(), 1);
    assert!(output.path().join("good.txt").exists());
}

#[test]
fn test_split_text_window_short_circuit() {
    let chunker = window_options().chunker;
    let pieces = split_text("fifteen chars!!", &chunker);
    assert_eq!(pieces.len(), 1);
    assert!(split_text("", &chunker).is_empty());
}

#[test]
fn test_split_writes_manifest() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let document = sample_document();
    write(&input.path().join("deed.txt"), &document);

    let options = breakpoint_options().manifest(true);
    let report = split_directory(input.path(), output.path(), &options).unwrap();

    let manifest = report.manifest.clone().unwrap();
    assert_eq!(manifest, output.path().join(MANIFEST_FILE));

    let records = read_manifest(&manifest).unwrap();
    assert_eq!(records.len(), report.segment_count());
    assert!(records.len() > 1);

    let total = records.len();
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.source, "deed.txt");
        assert_eq!(record.source_sha256, hash_bytes(document.as_bytes()));
        assert_eq!(record.index, i + 1);
        assert_eq!(record.total, total);
        assert_eq!(record.file, format!("deed_split_{}_of_{total}.txt", i + 1));
        assert_eq!(record.generator, generator());
        assert!(record.start_char.unwrap() < record.end_char.unwrap());
    }
    assert_eq!(records[0].start_char, Some(0));
    assert_eq!(
        records.last().unwrap().end_char,
        Some(document.chars().count())
    );
}

// ========================================================================
// Merge
// ========================================================================

#[test]
fn test_split_then_merge_round_trip() {
    let input = TempDir::new().unwrap();
    let split = TempDir::new().unwrap();
    let merged = TempDir::new().unwrap();
    let document = sample_document();
    write(&input.path().join("deed.txt"), &document);
    write(&input.path().join("tiny.txt"), "tiny");

    split_directory(input.path(), split.path(), &breakpoint_options()).unwrap();
    let report = merge_directory(split.path(), merged.path(), &MergeOptions::new()).unwrap();

    assert_eq!(report.merged.len(), 1);
    assert_eq!(report.copied, vec![merged.path().join("tiny.txt")]);
    assert_eq!(
        fs::read_to_string(merged.path().join("deed.txt")).unwrap(),
        document
    );
    assert_eq!(fs::read_to_string(merged.path().join("tiny.txt")).unwrap(), "tiny");
}

#[test]
fn test_merge_partial_group_policy() {
    let input = TempDir::new().unwrap();
    write(&input.path().join("x_split_1_of_3.txt"), "one ");
    write(&input.path().join("x_split_3_of_3.txt"), "three");

    let strict = TempDir::new().unwrap();
    let report = merge_directory(input.path(), strict.path(), &MergeOptions::new()).unwrap();
    assert!(report.merged.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        report.skipped[0].reason,
        MergeError::MissingParts { .. }
    ));
    assert!(!strict.path().join("x.txt").exists());

    let lenient = TempDir::new().unwrap();
    let options = MergeOptions::new().allow_partial(true);
    let report = merge_directory(input.path(), lenient.path(), &options).unwrap();
    assert_eq!(report.merged[0].missing, vec![2]);
    assert_eq!(report.merged[0].parts, 2);
    assert_eq!(
        fs::read_to_string(lenient.path().join("x.txt")).unwrap(),
        "one three"
    );
}

#[test]
fn test_merge_skips_inconsistent_group_only() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("bad_split_1_of_2.txt"), "a");
    write(&input.path().join("bad_split_2_of_3.txt"), "b");
    write(&input.path().join("good_split_1_of_2.txt"), "c");
    write(&input.path().join("good_split_2_of_2.txt"), "d");

    let report = merge_directory(input.path(), output.path(), &MergeOptions::new()).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].key.base, "bad");
    assert_eq!(fs::read_to_string(output.path().join("good.txt")).unwrap(), "cd");
    assert!(!output.path().join("bad.txt").exists());
}

#[test]
fn test_merge_recursive_with_newlines() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("a/doc_split_1_of_2.txt"), "first");
    write(&input.path().join("a/doc_split_2_of_2.txt"), "second");
    write(&input.path().join("b/doc_split_1_of_1.txt"), "other");

    let flat = merge_directory(input.path(), output.path(), &MergeOptions::new()).unwrap();
    assert!(flat.merged.is_empty());

    let options = MergeOptions::new()
        .recursive(true)
        .ensure_newline_between(true);
    let report = merge_directory(input.path(), output.path(), &options).unwrap();

    assert_eq!(report.merged.len(), 2);
    assert_eq!(
        fs::read_to_string(output.path().join("a/doc.txt")).unwrap(),
        "first\nsecond"
    );
    assert_eq!(fs::read_to_string(output.path().join("b/doc.txt")).unwrap(), "other");
}

#[cfg(target_os = "linux")]
#[test]
fn test_merge_isolates_rejected_paths() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("doc_split_1_of_2.txt"), "first ");
    write(&input.path().join("doc_split_2_of_2.txt"), "second");
    let bad = input.path().join(OsStr::from_bytes(b"bad\xFF.txt"));
    fs::write(&bad, "unnamed").unwrap();

    let report = merge_directory(input.path(), output.path(), &MergeOptions::new()).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, bad);
    assert!(report.failed[0].error.contains("Invalid UTF-8"));
    assert_eq!(report.merged.len(), 1);
    assert_eq!(
        fs::read_to_string(output.path().join("doc.txt")).unwrap(),
        "first second"
    );
}

#[test]
fn test_merge_empty_input() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let report = merge_directory(input.path(), output.path(), &MergeOptions::new()).unwrap();
    assert_eq!(report, MergeReport::default());
}
