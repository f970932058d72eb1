// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the typed activity events (commits, PRs, issues) and the per-repository/per-user summary record
// role: model/types
// outputs: Immutable value records consumed by filter, grouping, metrics and rendering
// invariants: Events are validated once at the provider boundary; absent creation times are ZERO_INSTANT; summary sentinels are rendered only at serialization
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Serializer};

/// Stand-in for a timestamp the provider could not read. Sorts before any real period.
pub const ZERO_INSTANT: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Repository {
  pub owner: String,
  pub name: String,
}

impl Repository {
  pub fn full_name(&self) -> String {
    format!("{}/{}", self.owner, self.name)
  }
}

impl fmt::Display for Repository {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
  pub sha: String,
  pub author: String,
  pub authored_at: DateTime<Utc>,
  pub additions: i64,
  pub deletions: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
  pub number: i64,
  pub author: String,
  pub created_at: DateTime<Utc>,
  pub merged_at: Option<DateTime<Utc>>,
  pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
  pub number: i64,
  pub author: String,
  pub created_at: DateTime<Utc>,
  pub closed_at: Option<DateTime<Utc>>,
  /// Taken verbatim from the source ("open", "closed", ...).
  pub state: String,
}

/// Borrowed, tagged view over one raw event of any kind.
#[derive(Debug, Clone, Copy)]
pub enum ActivityEvent<'a> {
  Commit(&'a Commit),
  PullRequest(&'a PullRequest),
  Issue(&'a Issue),
}

impl<'a> ActivityEvent<'a> {
  pub fn author(&self) -> &'a str {
    match self {
      ActivityEvent::Commit(c) => &c.author,
      ActivityEvent::PullRequest(p) => &p.author,
      ActivityEvent::Issue(i) => &i.author,
    }
  }
}

/// Everything the provider returned for one repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoEvents {
  pub commits: Vec<Commit>,
  pub pull_requests: Vec<PullRequest>,
  pub issues: Vec<Issue>,
}

impl RepoEvents {
  pub fn events(&self) -> impl Iterator<Item = ActivityEvent<'_>> {
    self
      .commits
      .iter()
      .map(ActivityEvent::Commit)
      .chain(self.pull_requests.iter().map(ActivityEvent::PullRequest))
      .chain(self.issues.iter().map(ActivityEvent::Issue))
  }

  pub fn is_empty(&self) -> bool {
    self.commits.is_empty() && self.pull_requests.is_empty() && self.issues.is_empty()
  }
}

/// Whole-number percentage, already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(pub i64);

impl fmt::Display for Percentage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}%", self.0)
  }
}

/// Written wherever a rate or an average has no samples.
pub const NONE_SENTINEL: &str = "None";

/// User column value for a repository with no attributable activity in per-user mode.
pub const NO_USER_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
  pub repository: String,
  /// Empty for repository-wide rows.
  pub user: String,
  pub commits: usize,
  pub lines_added: i64,
  pub lines_deleted: i64,
  pub prs_created: usize,
  pub prs_merged: usize,
  #[serde(serialize_with = "serialize_rate")]
  pub pr_merge_rate: Option<Percentage>,
  #[serde(serialize_with = "serialize_average")]
  pub avg_pr_merge_time: Option<TimeDelta>,
  pub issues_created: usize,
  pub issues_closed: usize,
  #[serde(serialize_with = "serialize_rate")]
  pub issue_resolve_rate: Option<Percentage>,
  #[serde(serialize_with = "serialize_average")]
  pub avg_issue_close_time: Option<TimeDelta>,
  pub open_issues: usize,
}

impl SummaryRecord {
  pub fn pr_merge_rate_text(&self) -> String {
    rate_text(self.pr_merge_rate)
  }

  pub fn issue_resolve_rate_text(&self) -> String {
    rate_text(self.issue_resolve_rate)
  }

  pub fn avg_pr_merge_time_text(&self) -> String {
    average_text(self.avg_pr_merge_time)
  }

  pub fn avg_issue_close_time_text(&self) -> String {
    average_text(self.avg_issue_close_time)
  }
}

pub fn rate_text(rate: Option<Percentage>) -> String {
  rate.map(|p| p.to_string()).unwrap_or_else(|| NONE_SENTINEL.to_string())
}

pub fn average_text(avg: Option<TimeDelta>) -> String {
  avg
    .map(crate::metrics::format_duration)
    .unwrap_or_else(|| NONE_SENTINEL.to_string())
}

fn serialize_rate<S: Serializer>(rate: &Option<Percentage>, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(&rate_text(*rate))
}

fn serialize_average<S: Serializer>(avg: &Option<TimeDelta>, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(&average_text(*avg))
}
