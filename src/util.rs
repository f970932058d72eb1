// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for the reporting clock, zone parsing, report day spans, and man page rendering
// role: utilities/helpers
// inputs: Optional now-override string; IANA zone names; TimeInterval; clap CommandFactory
// outputs: DateTime<Tz>, Tz, day counts, man page text
// invariants:
// - effective_now is the only place the wall clock is read
// - report_days rounds partial days up so an inclusive calendar range counts every day
// errors: Unknown zones and bad overrides surface as anyhow errors with the offending input
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::CommandFactory;

use crate::period::{parse_now_override, TimeInterval};

/// "Now" in the reporting zone.
///
/// When `override_now` is `Some`, that instant is used (tests pin the clock
/// this way); otherwise the current time is converted into `tz`.
pub fn effective_now(override_now: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
  match override_now {
    Some(raw) => parse_now_override(Some(raw), tz).ok_or_else(|| anyhow!("invalid --now-override: {raw}")),
    None => Ok(Utc::now().with_timezone(&tz)),
  }
}

pub fn parse_tz(name: &str) -> Result<Tz> {
  name
    .trim()
    .parse::<Tz>()
    .map_err(|_| anyhow!("unknown time zone: {name}"))
}

pub fn report_days(interval: &TimeInterval) -> i64 {
  let secs = (interval.end - interval.start).num_seconds().max(0);
  (secs + 86_399) / 86_400
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
