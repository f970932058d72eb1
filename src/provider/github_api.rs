// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub REST access behind a trait seam (HTTP, env fixtures, per-run cache) plus token discovery
// role: provider/github-api
// inputs: owner/name; optional since date; commit sha; env GITHUB_TOKEN / GH_TOKEN; optional `gh` CLI; GAM_TEST_* fixtures
// outputs: serde_json::Value payloads (listings merged across pages)
// side_effects: Network calls to api.github.com; spawns `gh` subprocess when needed
// invariants:
// - Never panic; transport and decode failures become None after a warning
// - Listings page with per_page=100 until a short page
// - Token discovery prefers GITHUB_TOKEN, then GH_TOKEN, then `gh auth token`
// - Any GAM_TEST_* variable switches the whole run to the env backend
// errors: Swallowed; the provider decides how to surface them
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

const API_ROOT: &str = "https://api.github.com";
const PER_PAGE: usize = 100;
const MAX_PAGES: usize = 100;

pub const ENV_COMMITS: &str = "GAM_TEST_COMMITS_JSON";
pub const ENV_PULLS: &str = "GAM_TEST_PULLS_JSON";
pub const ENV_ISSUES: &str = "GAM_TEST_ISSUES_JSON";
pub const ENV_COMMIT_STATS: &str = "GAM_TEST_COMMIT_STATS_JSON";

/// Discover a GitHub token: env vars first, then `gh auth token` if available.
pub fn get_github_token() -> Option<String> {
  for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
    if let Ok(t) = std::env::var(var) {
      if !t.trim().is_empty() {
        return Some(t.trim().to_string());
      }
    }
  }

  if let Ok(output) = std::process::Command::new("gh").args(["auth", "token"]).output() {
    if output.status.success() {
      let t = String::from_utf8_lossy(&output.stdout).trim().to_string();

      if !t.is_empty() {
        return Some(t);
      }
    }
  }

  None
}

// --- Trait seam for GitHub API ---
pub trait GithubApi {
  fn list_commits_json(&self, owner: &str, name: &str, since: Option<NaiveDate>) -> Option<serde_json::Value>;
  fn list_pulls_json(&self, owner: &str, name: &str) -> Option<serde_json::Value>;
  fn list_issues_json(&self, owner: &str, name: &str) -> Option<serde_json::Value>;
  fn get_commit_json(&self, owner: &str, name: &str, sha: &str) -> Option<serde_json::Value>;
}

// --- Per-run cache ---
// Repositories named twice on the command line are fetched once.
struct GithubCachedApi {
  inner: Box<dyn GithubApi>,
  listings: RefCell<HashMap<String, Option<serde_json::Value>>>,
  commits: RefCell<HashMap<String, Option<serde_json::Value>>>,
}

impl GithubCachedApi {
  fn new(inner: Box<dyn GithubApi>) -> Self {
    Self {
      inner,
      listings: RefCell::new(HashMap::new()),
      commits: RefCell::new(HashMap::new()),
    }
  }

  fn listing(
    &self,
    key: String,
    load: impl FnOnce(&dyn GithubApi) -> Option<serde_json::Value>,
  ) -> Option<serde_json::Value> {
    if let Some(v) = self.listings.borrow().get(&key).cloned() {
      return v;
    }
    let v = load(self.inner.as_ref());
    self.listings.borrow_mut().insert(key, v.clone());

    v
  }
}

impl GithubApi for GithubCachedApi {
  fn list_commits_json(&self, owner: &str, name: &str, since: Option<NaiveDate>) -> Option<serde_json::Value> {
    let since_key = since.map(|d| d.to_string()).unwrap_or_default();
    let key = format!("commits:{}/{}:{}", owner, name, since_key);
    self.listing(key, |api| api.list_commits_json(owner, name, since))
  }

  fn list_pulls_json(&self, owner: &str, name: &str) -> Option<serde_json::Value> {
    self.listing(format!("pulls:{}/{}", owner, name), |api| api.list_pulls_json(owner, name))
  }

  fn list_issues_json(&self, owner: &str, name: &str) -> Option<serde_json::Value> {
    self.listing(format!("issues:{}/{}", owner, name), |api| api.list_issues_json(owner, name))
  }

  fn get_commit_json(&self, owner: &str, name: &str, sha: &str) -> Option<serde_json::Value> {
    let key = format!("{}/{}:{}", owner, name, sha);

    if let Some(v) = self.commits.borrow().get(&key).cloned() {
      return v;
    }
    let v = self.inner.get_commit_json(owner, name, sha);
    self.commits.borrow_mut().insert(key, v.clone());

    v
  }
}

struct GithubHttpApi {
  agent: ureq::Agent,
  token: Option<String>,
}

impl GithubHttpApi {
  fn new(token: Option<String>) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(std::time::Duration::from_secs(30))
      .build();
    Self { agent, token }
  }

  fn get_json(&self, url: &str) -> Option<serde_json::Value> {
    let mut req = self
      .agent
      .get(url)
      .set("Accept", "application/vnd.github+json")
      .set("User-Agent", "gh-activity-metrics");

    if let Some(token) = &self.token {
      req = req.set("Authorization", &format!("Bearer {}", token));
    }

    match req.call() {
      Ok(resp) => match resp.into_json::<serde_json::Value>() {
        Ok(v) => Some(v),
        Err(e) => {
          warn!(url, error = %e, "failed to decode GitHub response");
          None
        }
      },
      Err(ureq::Error::Status(code, _)) => {
        warn!(url, status = code, "GitHub API returned an error status");
        None
      }
      Err(e) => {
        warn!(url, error = %e, "GitHub API request failed");
        None
      }
    }
  }

  /// Merge every page of a listing into one JSON array.
  fn get_paged(&self, base: &str) -> Option<serde_json::Value> {
    let sep = if base.contains('?') { '&' } else { '?' };
    collect_pages(base, |page| {
      self.get_json(&format!("{}{}per_page={}&page={}", base, sep, PER_PAGE, page))
    })
  }
}

/// Pull pages from 1 until a short page arrives or `MAX_PAGES` is reached.
/// Any failed or non-array page fails the whole listing.
fn collect_pages<F>(base: &str, mut fetch_page: F) -> Option<serde_json::Value>
where
  F: FnMut(usize) -> Option<serde_json::Value>,
{
  let mut all: Vec<serde_json::Value> = Vec::new();

  for page in 1..=MAX_PAGES {
    let serde_json::Value::Array(items) = fetch_page(page)? else {
      warn!(base, page, "expected a JSON array from listing endpoint");
      return None;
    };
    let short = items.len() < PER_PAGE;
    all.extend(items);

    if short {
      return Some(serde_json::Value::Array(all));
    }
    debug!(base, page, "fetching next page");
  }

  warn!(base, pages = MAX_PAGES, items = all.len(), "listing truncated at the page limit");
  Some(serde_json::Value::Array(all))
}

impl GithubApi for GithubHttpApi {
  fn list_commits_json(&self, owner: &str, name: &str, since: Option<NaiveDate>) -> Option<serde_json::Value> {
    let mut url = format!("{}/repos/{}/{}/commits", API_ROOT, owner, name);

    if let Some(d) = since {
      url.push_str(&format!("?since={}", d.format("%Y-%m-%d")));
    }
    self.get_paged(&url)
  }

  fn list_pulls_json(&self, owner: &str, name: &str) -> Option<serde_json::Value> {
    self.get_paged(&format!("{}/repos/{}/{}/pulls?state=all", API_ROOT, owner, name))
  }

  fn list_issues_json(&self, owner: &str, name: &str) -> Option<serde_json::Value> {
    self.get_paged(&format!("{}/repos/{}/{}/issues?state=all", API_ROOT, owner, name))
  }

  fn get_commit_json(&self, owner: &str, name: &str, sha: &str) -> Option<serde_json::Value> {
    self.get_json(&format!("{}/repos/{}/{}/commits/{}", API_ROOT, owner, name, sha))
  }
}

struct GithubEnvApi;

fn env_json(var: &str) -> Option<serde_json::Value> {
  match std::env::var(var) {
    Ok(s) => match serde_json::from_str::<serde_json::Value>(&s) {
      Ok(v) => Some(v),
      Err(e) => {
        warn!(var, error = %e, "fixture is not valid JSON");
        None
      }
    },
    Err(_) => Some(serde_json::json!([])),
  }
}

impl GithubApi for GithubEnvApi {
  fn list_commits_json(&self, _owner: &str, _name: &str, _since: Option<NaiveDate>) -> Option<serde_json::Value> {
    env_json(ENV_COMMITS)
  }

  fn list_pulls_json(&self, _owner: &str, _name: &str) -> Option<serde_json::Value> {
    env_json(ENV_PULLS)
  }

  fn list_issues_json(&self, _owner: &str, _name: &str) -> Option<serde_json::Value> {
    env_json(ENV_ISSUES)
  }

  fn get_commit_json(&self, _owner: &str, _name: &str, sha: &str) -> Option<serde_json::Value> {
    let s = std::env::var(ENV_COMMIT_STATS).ok()?;
    let map = serde_json::from_str::<serde_json::Value>(&s).ok()?;
    map.get(sha).cloned()
  }
}

pub fn env_wants_mock() -> bool {
  [ENV_COMMITS, ENV_PULLS, ENV_ISSUES, ENV_COMMIT_STATS]
    .iter()
    .any(|var| std::env::var(var).is_ok())
}

pub fn build_api(token: Option<String>) -> Box<dyn GithubApi> {
  let inner: Box<dyn GithubApi> = if env_wants_mock() {
    Box::new(GithubEnvApi)
  } else {
    Box::new(GithubHttpApi::new(token))
  };

  Box::new(GithubCachedApi::new(inner))
}

#[cfg(test)]
pub fn make_env_api() -> Box<dyn GithubApi> {
  Box::new(GithubCachedApi::new(Box::new(GithubEnvApi)))
}

#[cfg(test)]
pub fn make_cached_api(inner: Box<dyn GithubApi>) -> Box<dyn GithubApi> {
  Box::new(GithubCachedApi::new(inner))
}
