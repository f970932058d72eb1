// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups into GitHub API payloads with typed and timestamp extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to, to_or_default, to_instant, to_instant_or_zero)
// invariants: No panics; missing paths or JSON null yield None; unparseable timestamps yield None
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::model::ZERO_INSTANT;

/// A located (or missing) JSON node awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// RFC 3339 string (`2024-01-02T03:04:05Z`) as a UTC instant.
  pub fn to_instant(&self) -> Option<DateTime<Utc>> {
    let raw = self.inner?.as_str()?;
    DateTime::parse_from_rfc3339(raw).ok().map(|t| t.with_timezone(&Utc))
  }

  /// Same as `to_instant`, but absent values become the zero instant.
  pub fn to_instant_or_zero(&self) -> DateTime<Utc> {
    self.to_instant().unwrap_or(ZERO_INSTANT)
  }

  pub fn exists(&self) -> bool {
    self.inner.is_some()
  }
}

/// Fetch nested values via dotted paths like "commit.author.date".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
