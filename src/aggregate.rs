// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn one repository's fetched events into ordered summary records (repository-wide or per user)
// role: aggregation/entry-point
// inputs: repository full name; RepoEvents; resolved TimeInterval; AggregateOptions
// outputs: Vec<SummaryRecord> sorted by options.sort_key
// invariants:
// - repository-wide mode emits exactly one record with an empty user
// - per-user mode emits one record per non-empty identity; none at all ⇒ a single "-" record with zero statistics
// - no I/O; safe to run per repository in any order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::debug;

use crate::identity::{distinct_users, group_by_user};
use crate::metrics::summarize;
use crate::model::{Commit, Issue, PullRequest, RepoEvents, SummaryRecord, NO_USER_PLACEHOLDER};
use crate::period::TimeInterval;
use crate::sort::{sort_summaries, SortKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
  pub by_user: bool,
  pub normalize_users: bool,
  pub include_line_stats: bool,
  pub sort_key: SortKey,
}

pub fn aggregate(
  repository: &str,
  events: &RepoEvents,
  interval: &TimeInterval,
  options: &AggregateOptions,
) -> Vec<SummaryRecord> {
  let mut records = if options.by_user {
    aggregate_by_user(repository, events, interval, options)
  } else {
    vec![summarize(
      repository,
      "",
      &events.commits,
      &events.pull_requests,
      &events.issues,
      interval,
      options.include_line_stats,
    )]
  };

  debug!(repository, records = records.len(), by_user = options.by_user, "aggregated");

  sort_summaries(&mut records, options.sort_key);
  records
}

fn aggregate_by_user(
  repository: &str,
  events: &RepoEvents,
  interval: &TimeInterval,
  options: &AggregateOptions,
) -> Vec<SummaryRecord> {
  let users = distinct_users(events, options.normalize_users);

  if users.is_empty() {
    let none_c: &[Commit] = &[];
    let none_p: &[PullRequest] = &[];
    let none_i: &[Issue] = &[];
    return vec![summarize(
      repository,
      NO_USER_PLACEHOLDER,
      none_c,
      none_p,
      none_i,
      interval,
      options.include_line_stats,
    )];
  }

  let commits = group_by_user(&events.commits, options.normalize_users);
  let prs = group_by_user(&events.pull_requests, options.normalize_users);
  let issues = group_by_user(&events.issues, options.normalize_users);

  users
    .iter()
    .map(|user| {
      summarize(
        repository,
        user,
        commits.get(user).into_iter().flatten().copied(),
        prs.get(user).into_iter().flatten().copied(),
        issues.get(user).into_iter().flatten().copied(),
        interval,
        options.include_line_stats,
      )
    })
    .collect()
}
