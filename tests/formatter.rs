mod common;
use crate::common::{init_tracing, pairs};

use pretty_assertions::assert_eq;

use pathfilter::filter::{classify, ClassificationReport};
use pathfilter::output::{encode_file_list, error_annotation, format, render_outputs};
use pathfilter::types::ListFilesMode;
use pathfilter_test_utils::builders::{modified_all, FilterConfigBuilder};

fn sample_report() -> ClassificationReport {
    let matchers = FilterConfigBuilder::new()
        .with_filter("src", &["src/**"])
        .with_filter("doc", &["doc/**"])
        .compile();
    classify(&modified_all(&["src/main.py", "src/utils.py"]), &matchers)
}

#[test]
fn none_mode_emits_booleans_counts_and_changes_only() {
    init_tracing();
    let outputs = format(&sample_report(), ListFilesMode::None);

    assert_eq!(
        outputs,
        pairs(&[
            ("src", "true"),
            ("src_count", "2"),
            ("doc", "false"),
            ("doc_count", "0"),
            ("changes", r#"["src"]"#),
        ])
    );
}

#[test]
fn csv_mode_adds_files_for_every_filter() {
    let outputs = format(&sample_report(), ListFilesMode::Csv);

    assert_eq!(
        outputs,
        pairs(&[
            ("src", "true"),
            ("src_count", "2"),
            ("src_files", "src/main.py,src/utils.py"),
            ("doc", "false"),
            ("doc_count", "0"),
            ("doc_files", ""),
            ("changes", r#"["src"]"#),
        ])
    );
}

#[test]
fn empty_report_still_emits_an_empty_changes_array() {
    let matchers = FilterConfigBuilder::new()
        .with_filter("src", &["src/**"])
        .compile();
    let report = classify(&[], &matchers);

    let outputs = format(&report, ListFilesMode::Json);
    assert_eq!(
        outputs,
        pairs(&[
            ("src", "false"),
            ("src_count", "0"),
            ("src_files", "[]"),
            ("changes", "[]"),
        ])
    );
}

#[test]
fn json_mode_escapes_quotes_and_backslashes() {
    let files = vec![r#"a "quoted" name.txt"#.to_string(), r"back\slash".to_string()];
    assert_eq!(
        encode_file_list(&files, ListFilesMode::Json).unwrap(),
        r#"["a \"quoted\" name.txt","back\\slash"]"#
    );
}

#[test]
fn shell_mode_single_quotes_each_path() {
    let files = vec![
        "src/main.py".to_string(),
        "docs/my file.md".to_string(),
        "it's.txt".to_string(),
    ];
    assert_eq!(
        encode_file_list(&files, ListFilesMode::Shell).unwrap(),
        r#"'src/main.py' 'docs/my file.md' 'it'\''s.txt'"#
    );
}

#[test]
fn escape_mode_backslash_escapes_shell_metacharacters() {
    let files = vec![
        "src/main.py".to_string(),
        "docs/my file (1).md".to_string(),
        "a$b&c;d".to_string(),
        "keep,these._+:@%/-".to_string(),
    ];
    assert_eq!(
        encode_file_list(&files, ListFilesMode::Escape).unwrap(),
        r"src/main.py docs/my\ file\ \(1\).md a\$b\&c\;d keep,these._+:@%/-"
    );
}

#[test]
fn none_mode_encodes_nothing() {
    assert_eq!(encode_file_list(&["a".to_string()], ListFilesMode::None), None);
}

#[test]
fn formatting_is_deterministic() {
    let report = sample_report();
    for mode in [
        ListFilesMode::None,
        ListFilesMode::Csv,
        ListFilesMode::Json,
        ListFilesMode::Shell,
        ListFilesMode::Escape,
    ] {
        let a = render_outputs(&format(&report, mode));
        let b = render_outputs(&format(&report, mode));
        assert_eq!(a, b);
    }
}

#[test]
fn render_outputs_writes_key_value_lines() {
    let rendered = render_outputs(&pairs(&[("src", "true"), ("changes", r#"["src"]"#)]));
    assert_eq!(rendered, "src=true\nchanges=[\"src\"]\n");
}

#[test]
fn render_outputs_uses_heredoc_for_multiline_values() {
    let rendered = render_outputs(&pairs(&[("weird_files", "line one\nline two")]));
    assert_eq!(
        rendered,
        "weird_files<<PATHFILTER_EOF\nline one\nline two\nPATHFILTER_EOF\n"
    );
}

#[test]
fn heredoc_delimiter_avoids_collisions_with_the_value() {
    let rendered = render_outputs(&pairs(&[("x", "PATHFILTER_EOF\nmore")]));
    assert_eq!(
        rendered,
        "x<<PATHFILTER_EOF_1\nPATHFILTER_EOF\nmore\nPATHFILTER_EOF_1\n"
    );
}

#[test]
fn error_annotation_percent_encodes_line_breaks() {
    assert_eq!(
        error_annotation("unknown revision 'gone'"),
        "::error::unknown revision 'gone'"
    );
    assert_eq!(
        error_annotation("100% broken\nsecond line\r"),
        "::error::100%25 broken%0Asecond line%0D"
    );
}
