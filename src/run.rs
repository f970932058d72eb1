// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report: resolve the period, fetch + aggregate each repository, sort, render
// role: orchestration/run
// inputs: EffectiveConfig; ActivityProvider; output sink
// outputs: Rendered report written to the sink
// side_effects: Provider I/O; writes to the sink
// invariants:
// - period errors abort before any fetch
// - records from every repository are sorted together before rendering
// - only markdown output carries the "Analyzing data from" preamble
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::ValueEnum;
use tracing::info;

use crate::aggregate::aggregate;
use crate::cli::EffectiveConfig;
use crate::model::SummaryRecord;
use crate::period::{describe_preset, resolve_period, Preset, TimeInterval};
use crate::provider::ActivityProvider;
use crate::render::{render, OutputFormat};
use crate::sort::sort_summaries;
use crate::util;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fetch and aggregate every configured repository over `interval`.
pub fn collect(cfg: &EffectiveConfig, provider: &dyn ActivityProvider, interval: &TimeInterval) -> Vec<SummaryRecord> {
  let options = cfg.aggregate_options();
  let since: DateTime<Utc> = interval.start.with_timezone(&Utc);
  let mut records = Vec::new();

  for repo in &cfg.repositories {
    info!(repo = %repo, "processing repository");
    let events = provider.fetch(repo, since, cfg.detailed_stats);
    records.extend(aggregate(&repo.full_name(), &events, interval, &options));
  }

  sort_summaries(&mut records, options.sort_key);
  records
}

pub fn run<W: Write>(cfg: &EffectiveConfig, provider: &dyn ActivityProvider, out: &mut W) -> Result<()> {
  // Phase 1: resolve period (fail fast)
  let now = util::effective_now(cfg.now_override.as_deref(), cfg.tz)?;
  let interval = resolve_period(&cfg.period, now).context("resolving reporting period")?;

  info!(
    start = %interval.start.to_rfc3339(),
    end = %interval.end.to_rfc3339(),
    repositories = cfg.repositories.len(),
    "resolved period"
  );

  // Phase 2: fetch + aggregate
  let records = collect(cfg, provider, &interval);

  // Phase 3: render
  let body = render(&records, cfg.format, &cfg.render_options())?;

  if cfg.format == OutputFormat::Markdown {
    writeln!(
      out,
      "Analyzing data from {} to {} ({} days)",
      interval.start.format(DATE_FORMAT),
      interval.end.format(DATE_FORMAT),
      util::report_days(&interval)
    )?;
    writeln!(out)?;
  }

  out.write_all(body.as_bytes())?;

  if !body.is_empty() && !body.ends_with('\n') {
    writeln!(out)?;
  }

  Ok(())
}

/// One line per preset: value name, label and concrete dates relative to `now`.
pub fn list_periods(now: DateTime<Tz>) -> Result<String> {
  let mut out = String::new();

  for preset in Preset::ALL {
    let name = preset
      .to_possible_value()
      .map(|v| v.get_name().to_string())
      .unwrap_or_default();
    let desc = describe_preset(preset, now)?;
    out.push_str(&format!("{:<22} {} {}\n", name, preset.label(), desc));
  }

  Ok(out)
}
