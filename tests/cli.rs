use assert_cmd::Command;
use predicates::prelude::{predicate, PredicateBooleanExt};
use pretty_assertions::assert_eq;

use pathfilter_test_utils::repo::{git_available, TestRepo};

mod common;
use crate::common::TestResult;

const CI_VARS: &[&str] = &[
    "INPUT_FILTERS",
    "INPUT_BASE",
    "INPUT_REF",
    "INPUT_WORKING_DIRECTORY",
    "INPUT_LIST_FILES",
    "INPUT_IGNORE_DELETIONS",
    "GITHUB_OUTPUT",
    "GITHUB_EVENT_NAME",
    "GITHUB_EVENT_PATH",
    "GITHUB_SHA",
    "PATHFILTER_LOG",
];

/// The binary with every CI input cleared, so the host's CI can't leak in.
fn pathfilter() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pathfilter")?;
    for var in CI_VARS {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

fn feature_repo() -> TestRepo {
    let repo = TestRepo::init();
    repo.write("README.md", "# demo\n");
    repo.commit("initial");
    repo.checkout_new_branch("feature", None);
    repo.write("src/main.py", "print('hi')\n");
    repo.write("src/utils.py", "def f(): pass\n");
    repo.commit("add sources");
    repo
}

#[test]
fn prints_outputs_to_stdout() -> TestResult {
    if !git_available() {
        return Ok(());
    }
    let repo = feature_repo();

    let assert = pathfilter()?
        .arg("--filters")
        .arg("src: 'src/**'\ndoc: '*.md'")
        .args(["--base", "main", "--ref", "feature", "--list-files", "csv"])
        .arg("--working-directory")
        .arg(repo.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    assert_eq!(
        stdout,
        "src=true\nsrc_count=2\nsrc_files=src/main.py,src/utils.py\n\
         doc=false\ndoc_count=0\ndoc_files=\nchanges=[\"src\"]\n"
    );
    Ok(())
}

#[test]
fn reads_inputs_from_the_environment_and_appends_to_output_file() -> TestResult {
    if !git_available() {
        return Ok(());
    }
    let repo = feature_repo();
    let out_dir = tempfile::tempdir()?;
    let out_file = out_dir.path().join("github_output");
    std::fs::write(&out_file, "earlier=step\n")?;

    pathfilter()?
        .env("INPUT_FILTERS", r#"{"src": ["src/**"]}"#)
        .env("INPUT_BASE", "main")
        .env("INPUT_REF", "feature")
        .env("INPUT_WORKING_DIRECTORY", repo.path())
        .env("INPUT_LIST_FILES", "")
        .env("GITHUB_OUTPUT", &out_file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out_file)?;
    assert_eq!(
        written,
        "earlier=step\nsrc=true\nsrc_count=2\nchanges=[\"src\"]\n"
    );
    Ok(())
}

#[test]
fn filters_file_is_loaded_by_extension() -> TestResult {
    if !git_available() {
        return Ok(());
    }
    let repo = feature_repo();
    let cfg_dir = tempfile::tempdir()?;
    let cfg = cfg_dir.path().join("filters.toml");
    std::fs::write(&cfg, "docs = [\"**/*.md\"]\npython = \"**/*.py\"\n")?;

    pathfilter()?
        .arg("--filters-file")
        .arg(&cfg)
        .args(["--base", "main", "--ref", "feature"])
        .arg("--working-directory")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("docs=false\n"))
        .stdout(predicate::str::contains("python=true\npython_count=2\n"))
        .stdout(predicate::str::contains("changes=[\"python\"]\n"));
    Ok(())
}

#[test]
fn dry_run_does_not_touch_git() -> TestResult {
    let not_a_repo = tempfile::tempdir()?;

    pathfilter()?
        .args(["--filters", "backend:\n  - 'src/**'\n  - '!src/docs/**'", "--dry-run"])
        .arg("--working-directory")
        .arg(not_a_repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pathfilter dry-run"))
        .stdout(predicate::str::contains("include: src/**"))
        .stdout(predicate::str::contains("exclude: src/docs/**"));
    Ok(())
}

#[test]
fn missing_filters_fail() -> TestResult {
    pathfilter()?
        .assert()
        .failure()
        .stderr(predicate::str::contains("pathfilter error"))
        .stderr(predicate::str::contains("filters are required"));
    Ok(())
}

#[test]
fn invalid_pattern_fails_without_outputs() -> TestResult {
    let out_dir = tempfile::tempdir()?;
    let out_file = out_dir.path().join("github_output");

    pathfilter()?
        .args(["--filters", "broken: 'src/[abc'", "--base", "main"])
        .arg("--output-file")
        .arg(&out_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));

    assert!(!out_file.exists());
    Ok(())
}

#[test]
fn missing_reference_fails_without_outputs() -> TestResult {
    if !git_available() {
        return Ok(());
    }
    let repo = feature_repo();

    pathfilter()?
        .args(["--filters", "src: 'src/**'", "--base", "gone"])
        .arg("--working-directory")
        .arg(repo.path())
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("::error::"))
        .stdout(predicate::str::contains("unknown revision 'gone'"))
        .stdout(predicate::str::contains("src=").not())
        .stderr(predicate::str::contains("unknown revision 'gone'"));
    Ok(())
}

#[test]
fn empty_action_inputs_are_treated_as_absent() -> TestResult {
    if !git_available() {
        return Ok(());
    }
    let repo = feature_repo();

    let assert = pathfilter()?
        .args(["--filters", "src: 'src/**'", "--base", "main", "--ref", "feature"])
        .arg("--working-directory")
        .arg(repo.path())
        .env("INPUT_IGNORE_DELETIONS", "")
        .env("INPUT_LIST_FILES", "")
        .env("GITHUB_OUTPUT", "")
        .env("GITHUB_EVENT_PATH", "")
        .env("GITHUB_EVENT_NAME", "")
        .env("GITHUB_SHA", "")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    assert_eq!(stdout, "src=true\nsrc_count=2\nchanges=[\"src\"]\n");
    Ok(())
}

#[test]
fn ignore_deletions_accepts_boolean_strings_from_the_environment() -> TestResult {
    for (value, expected) in [("true", "true"), ("True", "true"), ("false", "false")] {
        pathfilter()?
            .args(["--filters", "src: 'src/**'", "--dry-run"])
            .env("INPUT_IGNORE_DELETIONS", value)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "ignore_deletions = {expected}"
            )));
    }
    Ok(())
}

#[test]
fn empty_inline_filters_defer_to_filters_file() -> TestResult {
    let cfg_dir = tempfile::tempdir()?;
    let cfg = cfg_dir.path().join("filters.yml");
    std::fs::write(&cfg, "docs: 'docs/**'\n")?;

    pathfilter()?
        .env("INPUT_FILTERS", "")
        .arg("--filters-file")
        .arg(&cfg)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("- docs"));
    Ok(())
}

#[test]
fn inline_filters_and_filters_file_together_fail() -> TestResult {
    let cfg_dir = tempfile::tempdir()?;
    let cfg = cfg_dir.path().join("filters.yml");
    std::fs::write(&cfg, "docs: 'docs/**'\n")?;

    pathfilter()?
        .env("INPUT_FILTERS", "src: 'src/**'")
        .arg("--filters-file")
        .arg(&cfg)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mutually exclusive"));
    Ok(())
}
