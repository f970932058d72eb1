// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Reduce one group of commits/PRs/issues into a SummaryRecord (counts, rates, average durations)
// role: metrics/reduction
// inputs: repository + user labels; event iterators; TimeInterval; include_line_stats flag
// outputs: SummaryRecord
// invariants:
// - pure: no I/O, no clock, never fails
// - events are narrowed with the broad period filter first
// - a PR counts as merged whenever merged_at is set; its merge time is sampled only when merged_at is in period
// - an issue counts as closed (and is sampled) only when closed_at is in period; otherwise "open" state counts it as open
// - rate = round(completed/total*100); None when total == 0
// - durations are averaged at full precision and formatted by truncation to whole minutes
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::TimeDelta;

use crate::filter::filter_in_period;
use crate::model::{Commit, Issue, Percentage, PullRequest, SummaryRecord};
use crate::period::TimeInterval;

pub fn summarize<'a>(
  repository: &str,
  user: &str,
  commits: impl IntoIterator<Item = &'a Commit>,
  prs: impl IntoIterator<Item = &'a PullRequest>,
  issues: impl IntoIterator<Item = &'a Issue>,
  interval: &TimeInterval,
  include_line_stats: bool,
) -> SummaryRecord {
  let commits = filter_in_period(commits, interval);
  let prs = filter_in_period(prs, interval);
  let issues = filter_in_period(issues, interval);

  let (lines_added, lines_deleted) = if include_line_stats {
    commits
      .iter()
      .fold((0i64, 0i64), |(a, d), c| (a + c.additions, d + c.deletions))
  } else {
    (0, 0)
  };

  let mut prs_merged = 0usize;
  let mut merge_times: Vec<TimeDelta> = Vec::new();
  for pr in &prs {
    if let Some(merged_at) = pr.merged_at {
      prs_merged += 1;
      if interval.contains(&merged_at) {
        merge_times.push(merged_at - pr.created_at);
      }
    }
  }

  let mut issues_closed = 0usize;
  let mut open_issues = 0usize;
  let mut close_times: Vec<TimeDelta> = Vec::new();
  for issue in &issues {
    match issue.closed_at {
      Some(closed_at) if interval.contains(&closed_at) => {
        issues_closed += 1;
        close_times.push(closed_at - issue.created_at);
      }
      _ if issue.state == "open" => open_issues += 1,
      _ => {}
    }
  }

  SummaryRecord {
    repository: repository.to_string(),
    user: user.to_string(),
    commits: commits.len(),
    lines_added,
    lines_deleted,
    prs_created: prs.len(),
    prs_merged,
    pr_merge_rate: rate(prs_merged, prs.len()),
    avg_pr_merge_time: average_duration(&merge_times),
    issues_created: issues.len(),
    issues_closed,
    issue_resolve_rate: rate(issues_closed, issues.len()),
    avg_issue_close_time: average_duration(&close_times),
    open_issues,
  }
}

/// Share of `completed` in `total` as a rounded whole percentage.
pub fn rate(completed: usize, total: usize) -> Option<Percentage> {
  if total == 0 {
    return None;
  }
  let pct = completed as f64 / total as f64 * 100.0;
  Some(Percentage(pct.round() as i64))
}

/// Arithmetic mean of `samples` at full precision.
pub fn average_duration(samples: &[TimeDelta]) -> Option<TimeDelta> {
  if samples.is_empty() {
    return None;
  }
  let count = i32::try_from(samples.len()).ok()?;
  let total = samples
    .iter()
    .try_fold(TimeDelta::zero(), |acc, d| acc.checked_add(d))?;
  Some(total / count)
}

/// `Dd HHh MMm`, each unit truncated from the total.
pub fn format_duration(d: TimeDelta) -> String {
  let secs = d.num_seconds();
  let total_hours = secs / 3600;
  let days = total_hours / 24;
  let hours = total_hours % 24;
  let minutes = (secs / 60) % 60;
  format!("{}d {:02}h {:02}m", days, hours, minutes)
}
