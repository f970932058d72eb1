use predicates::prelude::*;
use test_support::{cmd_bin, fixture_env_pairs};

const NOW: &str = "2025-08-15T12:00:00+09:00";

fn report(args: &[&str]) -> assert_cmd::Command {
  let mut cmd = cmd_bin("gh-activity-metrics");
  for (k, v) in fixture_env_pairs() {
    cmd.env(k, v);
  }
  cmd.args(["--now-override", NOW]).args(args);
  cmd
}

fn stdout_of(args: &[&str]) -> String {
  let out = report(args).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  String::from_utf8(out.stdout).unwrap()
}

#[test]
fn csv_repository_summary() {
  let text = stdout_of(&["octo/repo", "--format", "csv"]);
  let lines: Vec<&str> = text.lines().collect();
  assert_eq!(
    lines,
    vec![
      "Repository,Commits,LinesAdded,LinesDeleted,PRsCreated,PRsMerged,PRMergeRate,AvgPRMergeTime,IssuesCreated,IssuesClosed,IssueResolveRate,AvgIssueCloseTime,OpenIssues",
      "octo/repo,3,0,0,2,1,50%,1d 12h 00m,2,1,50%,1d 00h 00m,1",
    ]
  );
}

#[test]
fn csv_by_normalized_user_with_line_stats() {
  let text = stdout_of(&[
    "octo/repo",
    "-f",
    "csv",
    "--by-user",
    "--normalize-users",
    "--detailed-stats",
    "--sort-by",
    "user,repository",
  ]);
  let rows: Vec<&str> = text.lines().skip(1).collect();
  assert_eq!(
    rows,
    vec![
      "octo/repo,alice,1,3,0,1,0,0%,None,1,1,100%,1d 00h 00m,0",
      "octo/repo,kotaoue,2,15,3,1,1,100%,1d 12h 00m,1,0,0%,None,1",
    ]
  );
}

#[test]
fn by_user_without_normalization_keeps_name_variants() {
  let text = stdout_of(&["octo/repo", "-f", "csv", "-u"]);
  let users: Vec<&str> = text
    .lines()
    .skip(1)
    .filter_map(|l| l.split(',').nth(1))
    .collect();
  assert_eq!(users, vec!["Kota Oue", "alice", "kotaoue"]);
}

#[test]
fn multiple_repositories_are_sorted_together() {
  let text = stdout_of(&["octo/zeta", "octo/alpha", "-f", "csv"]);
  let repos: Vec<&str> = text
    .lines()
    .skip(1)
    .filter_map(|l| l.split(',').next())
    .collect();
  assert_eq!(repos, vec!["octo/alpha", "octo/zeta"]);
}

#[test]
fn json_output_is_an_array_of_records() {
  let text = stdout_of(&["octo/repo", "--format", "json"]);
  let v: serde_json::Value = serde_json::from_str(&text).unwrap();
  let rows = v.as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["repository"], "octo/repo");
  assert_eq!(rows[0]["user"], "");
  assert_eq!(rows[0]["commits"], 3);
  assert_eq!(rows[0]["pr_merge_rate"], "50%");
  assert_eq!(rows[0]["avg_issue_close_time"], "1d 00h 00m");
  assert_eq!(rows[0]["open_issues"], 1);
}

#[test]
fn markdown_report_with_explicit_range() {
  report(&["octo/repo", "--start", "2025-08-01", "--end", "2025-08-03", "--detailed-stats"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "Analyzing data from 2025-08-01 to 2025-08-03 (3 days)\n",
    ))
    .stdout(predicate::str::contains("| Repository"))
    .stdout(predicate::str::contains("Lines +/-"))
    .stdout(predicate::str::contains("+18/-3"))
    .stdout(predicate::str::contains("1/1 (100%)"));
}

#[test]
fn placeholder_row_when_nobody_contributed() {
  let out = cmd_bin("gh-activity-metrics")
    .env("GAM_TEST_COMMITS_JSON", "[]")
    .env("GAM_TEST_PULLS_JSON", "[]")
    .env("GAM_TEST_ISSUES_JSON", "[]")
    .args(["--now-override", NOW, "octo/empty", "-f", "csv", "-u"])
    .output()
    .unwrap();
  assert!(out.status.success());
  let text = String::from_utf8(out.stdout).unwrap();
  let rows: Vec<&str> = text.lines().skip(1).collect();
  assert_eq!(rows, vec!["octo/empty,-,0,0,0,0,0,None,None,0,0,None,None,0"]);
}

#[test]
fn users_active_only_outside_the_period_get_zero_rows() {
  let text = stdout_of(&["octo/repo", "-f", "csv", "-u", "-n", "--start", "2020-01-01", "--end", "2020-01-31"]);
  let rows: Vec<&str> = text.lines().skip(1).collect();
  assert_eq!(
    rows,
    vec![
      "octo/repo,alice,0,0,0,0,0,None,None,0,0,None,None,0",
      "octo/repo,kotaoue,0,0,0,0,0,None,None,0,0,None,None,0",
    ]
  );
}
