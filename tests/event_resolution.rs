mod common;
use crate::common::TestResult;

use std::path::Path;

use pretty_assertions::assert_eq;

use pathfilter::config::event::NULL_SHA;
use pathfilter::config::{resolve_revisions, EventContext, RevisionInputs};
use pathfilter::errors::PathFilterError;
use pathfilter::fs::mock::MockFileSystem;

const EVENT_PATH: &str = "/github/workflow/event.json";

fn context(name: &str, payload: &str, sha: Option<&str>) -> EventContext {
    let fs = MockFileSystem::new();
    fs.add_file(EVENT_PATH, payload);
    EventContext::load(
        &fs,
        Some(name.to_string()),
        Some(Path::new(EVENT_PATH)),
        sha.map(String::from),
    )
    .expect("payload should load")
}

fn inputs(base: Option<&str>, head: Option<&str>) -> RevisionInputs {
    RevisionInputs::new(base.map(String::from), head.map(String::from))
}

#[test]
fn pull_request_base_and_head_override_inputs() {
    let event = context(
        "pull_request",
        r#"{"pull_request": {"base": {"sha": "base123"}, "head": {"sha": "head456"}}}"#,
        None,
    );

    let resolved = resolve_revisions(inputs(Some("wrong_base"), None), &event);
    assert_eq!(resolved, inputs(Some("base123"), Some("head456")));
}

#[test]
fn pull_request_without_payload_data_keeps_inputs() {
    let event = context("pull_request_target", "{}", None);
    let resolved = resolve_revisions(inputs(Some("main"), Some("topic")), &event);
    assert_eq!(resolved, inputs(Some("main"), Some("topic")));
}

#[test]
fn push_uses_before_and_github_sha_when_inputs_are_missing() {
    let event = context("push", r#"{"before": "aaa111", "after": "bbb222"}"#, Some("bbb222"));
    let resolved = resolve_revisions(inputs(None, None), &event);
    assert_eq!(resolved, inputs(Some("aaa111"), Some("bbb222")));
}

#[test]
fn push_of_new_branch_ignores_null_before() {
    let payload = format!(r#"{{"before": "{NULL_SHA}"}}"#);
    let event = context("push", &payload, Some("bbb222"));
    let resolved = resolve_revisions(inputs(None, None), &event);
    assert_eq!(resolved, inputs(None, Some("bbb222")));
}

#[test]
fn push_keeps_explicit_inputs() {
    let event = context("push", r#"{"before": "aaa111"}"#, Some("bbb222"));
    let resolved = resolve_revisions(inputs(Some("main"), Some("HEAD")), &event);
    assert_eq!(resolved, inputs(Some("main"), Some("HEAD")));
}

#[test]
fn other_events_pass_inputs_through() {
    let event = context("workflow_dispatch", r#"{"before": "aaa111"}"#, Some("bbb222"));
    let resolved = resolve_revisions(inputs(Some("v1.0"), None), &event);
    assert_eq!(resolved, inputs(Some("v1.0"), None));

    let resolved = resolve_revisions(inputs(None, None), &EventContext::default());
    assert_eq!(resolved, RevisionInputs::default());
}

#[test]
fn missing_payload_file_is_an_empty_payload() -> TestResult {
    let fs = MockFileSystem::new();
    let event = EventContext::load(
        &fs,
        Some("push".to_string()),
        Some(Path::new("/does/not/exist.json")),
        Some("bbb222".to_string()),
    )?;
    assert!(event.payload.before.is_none());
    assert_eq!(
        resolve_revisions(inputs(None, None), &event),
        inputs(None, Some("bbb222"))
    );
    Ok(())
}

#[test]
fn malformed_payload_is_a_config_error() {
    let fs = MockFileSystem::new();
    fs.add_file(EVENT_PATH, "{not json");
    let result = EventContext::load(&fs, Some("push".into()), Some(Path::new(EVENT_PATH)), None);
    assert!(matches!(result, Err(PathFilterError::ConfigError(_))), "{result:?}");
}
