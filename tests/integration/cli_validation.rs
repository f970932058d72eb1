use predicates::prelude::*;
use test_support::cmd_bin;

const NOW: &str = "2025-08-15T12:00:00+09:00";

fn cmd() -> assert_cmd::Command {
  let mut c = cmd_bin("gh-activity-metrics");
  // Empty fixtures keep failures local even if validation were to pass.
  c.env("GAM_TEST_COMMITS_JSON", "[]");
  c.args(["--now-override", NOW]);
  c
}

#[test]
fn errors_without_repositories() {
  cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide at least one repository"));
}

#[test]
fn errors_on_malformed_repository() {
  cmd()
    .arg("not-a-repo")
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected owner/name"));
}

#[test]
fn errors_on_mixed_period_styles() {
  cmd()
    .args(["octo/repo", "--days", "7", "--period", "last-month"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Ambiguous period selection"));
}

#[test]
fn errors_on_lonely_start_date() {
  cmd()
    .args(["octo/repo", "--start", "2025-08-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--start and --end"));
}

#[test]
fn errors_on_unparseable_date_before_output() {
  cmd()
    .args(["octo/repo", "--start", "2025-02-30", "--end", "2025-03-01"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("2025-02-30"));
}

#[test]
fn errors_on_reversed_range() {
  cmd()
    .args(["octo/repo", "--start", "2025-03-02", "--end", "2025-03-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid period specification"));
}

#[test]
fn errors_on_unknown_zone() {
  cmd()
    .args(["octo/repo", "--tz", "Mars/Olympus"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown time zone"));
}
