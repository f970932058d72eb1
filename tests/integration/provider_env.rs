use chrono::{TimeZone, Utc};
use gh_activity_metrics::aggregate::{aggregate, AggregateOptions};
use gh_activity_metrics::model::Repository;
use gh_activity_metrics::period::{resolve_period, PeriodSpec, DEFAULT_REPORTING_TZ};
use gh_activity_metrics::provider::{ActivityProvider, GithubProvider};
use serial_test::serial;
use test_support::{fixture_env_pairs, init_tracing, read_fixture_json, with_env};

fn repo() -> Repository {
  Repository { owner: "octo".into(), name: "repo".into() }
}

#[test]
#[serial]
fn env_fixtures_flow_through_provider_and_aggregate() {
  init_tracing();
  let pairs = fixture_env_pairs();
  let vars: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
  let _env = with_env(&vars);

  let provider = GithubProvider::from_env();
  let since = Utc.with_ymd_and_hms(2025, 7, 16, 0, 0, 0).unwrap();
  let events = provider.fetch(&repo(), since, true);

  assert_eq!(events.commits.len(), 4);
  assert_eq!(events.pull_requests.len(), 3);
  assert_eq!(events.issues.len(), 2, "pull requests are not issues");
  assert_eq!(events.commits[0].additions, 10);

  let now = DEFAULT_REPORTING_TZ.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap();
  let interval = resolve_period(&PeriodSpec::Days(30), now).unwrap();
  let records = aggregate(
    &repo().full_name(),
    &events,
    &interval,
    &AggregateOptions { include_line_stats: true, ..Default::default() },
  );

  assert_eq!(records.len(), 1);
  let r = &records[0];
  assert_eq!((r.commits, r.lines_added, r.lines_deleted), (3, 18, 3));
  assert_eq!(r.pr_merge_rate_text(), "50%");
  assert_eq!(r.avg_pr_merge_time_text(), "1d 12h 00m");
  assert_eq!(r.issue_resolve_rate_text(), "50%");
  assert_eq!(r.open_issues, 1);
}

#[test]
#[serial]
fn malformed_fixture_degrades_to_empty_listing() {
  init_tracing();
  let _env = with_env(&[
    ("GAM_TEST_COMMITS_JSON", "{ not json"),
    ("GAM_TEST_PULLS_JSON", "[]"),
    ("GAM_TEST_ISSUES_JSON", "[]"),
  ]);

  let events = GithubProvider::from_env().fetch(&repo(), Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), false);
  assert!(events.is_empty());
}

#[test]
fn fixture_files_are_github_shaped() {
  let commits: serde_json::Value = read_fixture_json("github/commits.json");
  assert!(commits.as_array().is_some_and(|a| a.iter().all(|c| c["commit"]["author"]["date"].is_string())));
  let issues: serde_json::Value = read_fixture_json("github/issues.json");
  assert!(issues.as_array().is_some_and(|a| a.iter().any(|i| i.get("pull_request").is_some())));
}
