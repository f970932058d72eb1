// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Decide which raw events belong to a reporting period
// role: filter/period-membership
// inputs: TimeInterval; commits, pull requests, issues
// outputs: Booleans and filtered borrowed slices
// invariants:
// - containment is inclusive at both ends
// - an event is in period when any timestamp it carries (creation, close, merge) is contained
// - ZERO_INSTANT timestamps are never contained by a realistic interval
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Commit, Issue, PullRequest};
use crate::period::TimeInterval;

impl TimeInterval {
  /// `start <= t <= end`.
  pub fn contains<Z: TimeZone>(&self, t: &DateTime<Z>) -> bool {
    let t = t.with_timezone(&Utc);
    self.start.with_timezone(&Utc) <= t && t <= self.end.with_timezone(&Utc)
  }

  fn contains_opt(&self, t: Option<&DateTime<Utc>>) -> bool {
    t.is_some_and(|t| self.contains(t))
  }
}

pub trait InPeriod {
  fn in_period(&self, interval: &TimeInterval) -> bool;
}

impl InPeriod for Commit {
  fn in_period(&self, interval: &TimeInterval) -> bool {
    interval.contains(&self.authored_at)
  }
}

impl InPeriod for PullRequest {
  fn in_period(&self, interval: &TimeInterval) -> bool {
    interval.contains(&self.created_at)
      || interval.contains_opt(self.closed_at.as_ref())
      || interval.contains_opt(self.merged_at.as_ref())
  }
}

impl InPeriod for Issue {
  fn in_period(&self, interval: &TimeInterval) -> bool {
    interval.contains(&self.created_at) || interval.contains_opt(self.closed_at.as_ref())
  }
}

/// Keep the events that belong to `interval`, preserving input order.
pub fn filter_in_period<'a, T: InPeriod + 'a>(
  events: impl IntoIterator<Item = &'a T>,
  interval: &TimeInterval,
) -> Vec<&'a T> {
  events.into_iter().filter(|e| e.in_period(interval)).collect()
}
