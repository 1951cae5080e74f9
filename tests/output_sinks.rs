mod common;
use crate::common::{pairs, TestResult};

use std::path::Path;

use pretty_assertions::assert_eq;

use pathfilter::fs::mock::MockFileSystem;
use pathfilter::fs::{FileSystem, RealFileSystem};
use pathfilter::output::{FileOutputSink, OutputSink, WriterOutputSink};

#[test]
fn file_sink_appends_after_existing_content() -> TestResult {
    let fs = MockFileSystem::new();
    let path = Path::new("/runner/_temp/github_output");
    fs.add_file(path, "earlier_step=1\n");

    FileOutputSink::new(&fs, path).write_outputs(&pairs(&[("src", "true"), ("src_count", "3")]))?;

    assert_eq!(
        fs.contents(path).unwrap(),
        "earlier_step=1\nsrc=true\nsrc_count=3\n"
    );
    Ok(())
}

#[test]
fn file_sink_creates_missing_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/output.txt");

    FileOutputSink::new(&RealFileSystem, &path).write_outputs(&pairs(&[("changes", "[]")]))?;

    assert_eq!(RealFileSystem.read_to_string(&path)?, "changes=[]\n");
    Ok(())
}

#[test]
fn writer_sink_writes_rendered_lines() -> TestResult {
    let mut sink = WriterOutputSink::new(Vec::new());
    sink.write_outputs(&pairs(&[("doc", "false"), ("doc_count", "0")]))?;

    assert_eq!(String::from_utf8(sink.into_inner())?, "doc=false\ndoc_count=0\n");
    Ok(())
}
