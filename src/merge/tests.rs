use super::*;
use std::path::{Path, PathBuf};

fn seg(index: usize, total: usize, text: &str) -> Segment<'_> {
    Segment { index, total, text }
}

// ========================================================================
// Grouping
// ========================================================================

#[test]
fn test_group_parts_by_parent_and_base() {
    let files = [
        "a/deed_split_2_of_2.txt",
        "a/deed_split_1_of_2.txt",
        "b/deed_split_1_of_1.txt",
        "a/notes.txt",
        "a/plat_split_1_of_3.txt",
    ];
    let grouping = group_parts(&files);

    assert_eq!(grouping.passthrough, vec![PathBuf::from("a/notes.txt")]);

    let keys: Vec<String> = grouping.groups.iter().map(|g| g.key.to_string()).collect();
    assert_eq!(keys, vec!["a/deed", "a/plat", "b/deed"]);

    let deed = &grouping.groups[0];
    let indices: Vec<usize> = deed.parts.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert_eq!(deed.key.output_path(), Path::new("a/deed.txt"));
}

#[test]
fn test_group_parts_top_level_files() {
    let grouping = group_parts(&["deed_split_1_of_2.txt", "deed_split_2_of_2.txt"]);
    assert_eq!(grouping.groups.len(), 1);
    assert_eq!(grouping.groups[0].key.parent, PathBuf::new());
    assert_eq!(grouping.groups[0].key.output_path(), Path::new("deed.txt"));
}

#[test]
fn test_inconsistent_totals_rejected() {
    let grouping = group_parts(&["x_split_1_of_2.txt", "x_split_2_of_3.txt"]);
    let group = &grouping.groups[0];
    assert_eq!(
        group.ordered_parts(true),
        Err(MergeError::InconsistentTotals {
            base: "x".to_string(),
            totals: vec![2, 3],
        })
    );
}

#[test]
fn test_missing_parts() {
    let grouping = group_parts(&["x_split_1_of_3.txt", "x_split_3_of_3.txt"]);
    let group = &grouping.groups[0];
    assert_eq!(group.missing(), Ok(vec![2]));

    let err = group.ordered_parts(false).unwrap_err();
    assert!(err.to_string().contains("missing parts [2] of 3"));

    let parts = group.ordered_parts(true).unwrap();
    let indices: Vec<usize> = parts.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 3]);
}

#[test]
fn test_out_of_range_parts_ignored() {
    let grouping = group_parts(&["x_split_0_of_2.txt", "x_split_1_of_2.txt", "x_split_2_of_2.txt"]);
    let parts = grouping.groups[0].ordered_parts(false).unwrap();
    let indices: Vec<usize> = parts.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2]);

    let grouping = group_parts(&["y_split_5_of_2.txt"]);
    assert_eq!(
        grouping.groups[0].ordered_parts(true),
        Err(MergeError::Empty {
            base: "y".to_string(),
        })
    );
}

// ========================================================================
// Reassembly
// ========================================================================

#[test]
fn test_merge_orders_by_index() {
    let segments = [seg(3, 3, "C"), seg(1, 3, "A"), seg(2, 3, "B")];
    assert_eq!(merge("doc", &segments, &MergeOptions::new()).unwrap(), "ABC");
}

#[test]
fn test_merge_partial_policy() {
    let segments = [seg(1, 3, "one "), seg(3, 3, "three")];

    assert_eq!(
        merge("doc", &segments, &MergeOptions::new()),
        Err(MergeError::MissingParts {
            base: "doc".to_string(),
            total: 3,
            missing: vec![2],
        })
    );

    let options = MergeOptions::new().allow_partial(true);
    assert_eq!(merge("doc", &segments, &options).unwrap(), "one three");
}

#[test]
fn test_merge_inconsistent_totals() {
    let segments = [seg(1, 2, "a"), seg(2, 3, "b")];
    let options = MergeOptions::new().allow_partial(true);
    assert!(matches!(
        merge("doc", &segments, &options),
        Err(MergeError::InconsistentTotals { .. })
    ));
}

#[test]
fn test_merge_empty_group() {
    assert_eq!(
        merge("doc", &[], &MergeOptions::new()),
        Err(MergeError::Empty {
            base: "doc".to_string(),
        })
    );
}

#[test]
fn test_merge_duplicate_index_keeps_first() {
    let segments = [seg(1, 2, "first"), seg(1, 2, "again"), seg(2, 2, "!")];
    assert_eq!(merge("doc", &segments, &MergeOptions::new()).unwrap(), "first!");
}

#[test]
fn test_merge_texts_plain_concat() {
    assert_eq!(merge_texts(["a\n", "b", "c"], false), "a\nbc");
}

#[test]
fn test_merge_texts_ensure_newline_between() {
    assert_eq!(merge_texts(["a\n", "b", "c"], true), "a\nb\nc");
    assert_eq!(merge_texts(["a\n\n", "b\n"], true), "a\n\nb\n");
    assert_eq!(merge_texts(Vec::<String>::new(), true), "");
}

#[test]
fn test_merge_texts_checks_previous_piece_only() {
    assert_eq!(merge_texts(["a\n", "", "b"], true), "a\n\nb");
    assert_eq!(merge_texts(["a", "", "b"], true), "a\n\nb");
}

#[test]
fn test_merge_options_from_json() {
    let options: MergeOptions = serde_json::from_str(r#"{ "allow_partial": true }"#).unwrap();
    assert!(options.allow_partial);
    assert!(!options.recursive);
    assert!(!options.ensure_newline_between);
}
