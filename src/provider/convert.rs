// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Map GitHub REST payloads onto the typed event model
// role: provider/conversion
// inputs: serde_json::Value arrays from the commits, pulls and issues listings; single-commit payloads
// outputs: Vec<Commit>, Vec<PullRequest>, Vec<Issue>; stats applied in place
// invariants:
// - non-array payloads convert to empty lists
// - missing or unparseable creation timestamps become ZERO_INSTANT; optional timestamps stay None
// - issue listings include pull requests; entries carrying `pull_request` are dropped
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::ext::serde_json::JsonFetch;
use crate::model::{Commit, Issue, PullRequest};

fn items(v: &serde_json::Value) -> &[serde_json::Value] {
  v.as_array().map(Vec::as_slice).unwrap_or(&[])
}

pub fn commits_from_json(v: &serde_json::Value) -> Vec<Commit> {
  items(v)
    .iter()
    .map(|item| Commit {
      sha: item.fetch("sha").to_or_default::<String>(),
      author: item.fetch("commit.author.name").to_or_default::<String>(),
      authored_at: item.fetch("commit.author.date").to_instant_or_zero(),
      additions: 0,
      deletions: 0,
    })
    .collect()
}

pub fn pulls_from_json(v: &serde_json::Value) -> Vec<PullRequest> {
  items(v)
    .iter()
    .map(|item| PullRequest {
      number: item.fetch("number").to::<i64>().unwrap_or(0),
      author: item.fetch("user.login").to_or_default::<String>(),
      created_at: item.fetch("created_at").to_instant_or_zero(),
      merged_at: item.fetch("merged_at").to_instant(),
      closed_at: item.fetch("closed_at").to_instant(),
    })
    .collect()
}

pub fn issues_from_json(v: &serde_json::Value) -> Vec<Issue> {
  items(v)
    .iter()
    .filter(|item| !item.fetch("pull_request").exists())
    .map(|item| Issue {
      number: item.fetch("number").to::<i64>().unwrap_or(0),
      author: item.fetch("user.login").to_or_default::<String>(),
      created_at: item.fetch("created_at").to_instant_or_zero(),
      closed_at: item.fetch("closed_at").to_instant(),
      state: item.fetch("state").to_or_default::<String>(),
    })
    .collect()
}

/// Copy `stats.additions` / `stats.deletions` from a single-commit payload.
pub fn apply_commit_stats(commit: &mut Commit, v: &serde_json::Value) {
  commit.additions = v.fetch("stats.additions").to::<i64>().unwrap_or(0);
  commit.deletions = v.fetch("stats.deletions").to::<i64>().unwrap_or(0);
}
