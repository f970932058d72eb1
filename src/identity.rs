// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Contributor identity normalization and per-user partitioning of event lists
// role: grouping/identity
// inputs: Event slices with an author string; normalize flag
// outputs: BTreeMap<identity, Vec<&event>>; sorted set of attributable users
// invariants:
// - normalized form = lowercase with every whitespace character removed
// - empty identities are grouped under "" and never enumerated as users
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Commit, Issue, PullRequest, RepoEvents};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  original: String,
  normalized: String,
}

impl Identity {
  pub fn new(raw: &str) -> Self {
    Self {
      original: raw.to_string(),
      normalized: normalize_user(raw),
    }
  }

  pub fn original(&self) -> &str {
    &self.original
  }

  pub fn normalized(&self) -> &str {
    &self.normalized
  }

  /// The grouping key under the chosen mode.
  pub fn key(&self, normalize: bool) -> &str {
    if normalize {
      &self.normalized
    } else {
      &self.original
    }
  }
}

/// "Kota Oue", " KOTA OUE " and "kotaoue" all become "kotaoue".
pub fn normalize_user(raw: &str) -> String {
  raw
    .chars()
    .filter(|c| !c.is_whitespace())
    .flat_map(char::to_lowercase)
    .collect()
}

pub trait Authored {
  fn author(&self) -> &str;
}

impl Authored for Commit {
  fn author(&self) -> &str {
    &self.author
  }
}

impl Authored for PullRequest {
  fn author(&self) -> &str {
    &self.author
  }
}

impl Authored for Issue {
  fn author(&self) -> &str {
    &self.author
  }
}

pub fn group_by_user<T: Authored>(events: &[T], normalize: bool) -> BTreeMap<String, Vec<&T>> {
  let mut groups: BTreeMap<String, Vec<&T>> = BTreeMap::new();

  for event in events {
    let id = Identity::new(event.author());
    groups.entry(id.key(normalize).to_string()).or_default().push(event);
  }

  groups
}

/// Every non-empty identity that authored a commit, PR or issue.
pub fn distinct_users(events: &RepoEvents, normalize: bool) -> BTreeSet<String> {
  events
    .events()
    .map(|e| Identity::new(e.author()).key(normalize).to_string())
    .filter(|k| !k.is_empty())
    .collect()
}
