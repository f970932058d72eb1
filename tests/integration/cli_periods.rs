use predicates::prelude::*;
use test_support::cmd_bin;

#[test]
fn list_periods_describes_presets_for_pinned_now() {
  cmd_bin("gh-activity-metrics")
    .args(["--list-periods", "--now-override", "2025-08-15T12:00:00+09:00"])
    .assert()
    .success()
    .stdout(predicate::str::contains("last-7-days"))
    .stdout(predicate::str::contains("Last month (2025-07-01 to 2025-07-31 JST)"))
    .stdout(predicate::str::contains("(2024-10-01 to 2025-03-31 JST)"))
    .stdout(predicate::str::contains("(2024-01-01 to 2024-12-31 JST)"))
    .stdout(predicate::str::contains("(2024-04-01 to 2025-03-31 JST)"));
}

#[test]
fn list_periods_follows_reporting_zone() {
  cmd_bin("gh-activity-metrics")
    .args(["--list-periods", "--tz", "UTC", "--now-override", "2025-08-15T12:00:00Z"])
    .assert()
    .success()
    .stdout(predicate::str::contains("(2025-07-01 to 2025-07-31 UTC)"));
}
