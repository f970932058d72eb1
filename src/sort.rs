// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Order summary records by the caller-chosen key
// role: ordering
// inputs: Vec<SummaryRecord>; sort key string
// outputs: Records reordered in place
// invariants: Lexical ascending; unknown keys fall back to "repository"; secondary field breaks ties for two-field keys
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cmp::Ordering;

use crate::model::SummaryRecord;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
  #[default]
  Repository,
  RepositoryUser,
  UserRepository,
}

impl SortKey {
  /// Never fails: anything unrecognized sorts by repository.
  pub fn parse(raw: &str) -> Self {
    match raw.trim() {
      "repository,user" => SortKey::RepositoryUser,
      "user,repository" => SortKey::UserRepository,
      _ => SortKey::Repository,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      SortKey::Repository => "repository",
      SortKey::RepositoryUser => "repository,user",
      SortKey::UserRepository => "user,repository",
    }
  }

  fn compare(self, a: &SummaryRecord, b: &SummaryRecord) -> Ordering {
    match self {
      SortKey::Repository => a.repository.cmp(&b.repository),
      SortKey::RepositoryUser => a.repository.cmp(&b.repository).then_with(|| a.user.cmp(&b.user)),
      SortKey::UserRepository => a.user.cmp(&b.user).then_with(|| a.repository.cmp(&b.repository)),
    }
  }
}

pub fn sort_summaries(records: &mut [SummaryRecord], key: SortKey) {
  records.sort_by(|a, b| key.compare(a, b));
}
