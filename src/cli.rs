// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Command-line surface and its validation into an EffectiveConfig
// role: cli/config
// inputs: argv via clap derive
// outputs: Cli (raw flags); EffectiveConfig (validated repositories, PeriodSpec, options, zone)
// invariants:
// - at least one repository, each in owner/name form
// - exactly one period style (--days | --start/--end | --period); none selects 30 rolling days
// errors: anyhow with a user-facing message; no I/O performed here
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::aggregate::AggregateOptions;
use crate::model::Repository;
use crate::period::{PeriodSpec, Preset};
use crate::render::{OutputFormat, RenderOptions};
use crate::sort::SortKey;
use crate::util;

pub const DEFAULT_DAYS: u32 = 30;

#[derive(Parser, Debug)]
#[command(
    name = "gh-activity-metrics",
    version,
    about = "Summarize GitHub repository activity (commits, PR merge rates, issue resolution) over a period",
    long_about = None
)]
pub struct Cli {
  /// Repositories to analyze, as owner/name
  #[arg(value_name = "REPOSITORIES")]
  pub repositories: Vec<String>,

  /// Rolling window: the last N days up to now
  #[arg(short = 'd', long)]
  pub days: Option<u32>,

  /// First day of an explicit range (YYYY-MM-DD); must be paired with --end
  #[arg(long)]
  pub start: Option<String>,

  /// Last day of an explicit range (YYYY-MM-DD, inclusive); must be paired with --start
  #[arg(long)]
  pub end: Option<String>,

  /// Named period preset
  #[arg(long, value_enum)]
  pub period: Option<Preset>,

  /// One row per contributor instead of one per repository
  #[arg(short = 'u', long)]
  pub by_user: bool,

  /// Merge contributor names that differ only in case or whitespace
  #[arg(short = 'n', long)]
  pub normalize_users: bool,

  /// Fetch per-commit line statistics (one extra API call per commit)
  #[arg(long)]
  pub detailed_stats: bool,

  /// Sort order: repository | repository,user | user,repository
  #[arg(short = 's', long, default_value = "repository")]
  pub sort_by: String,

  /// Output format
  #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Markdown)]
  pub format: OutputFormat,

  /// Reporting time zone (IANA name)
  #[arg(long, default_value = "Asia/Tokyo")]
  pub tz: String,

  /// Print the available --period presets with their current dates and exit
  #[arg(long)]
  pub list_periods: bool,

  /// Log progress to stderr
  #[arg(short = 'v', long)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
  pub repositories: Vec<Repository>,
  pub period: PeriodSpec,
  pub by_user: bool,
  pub normalize_users: bool,
  pub detailed_stats: bool,
  pub sort_key: SortKey,
  pub format: OutputFormat,
  pub tz: Tz,
  pub now_override: Option<String>,
}

impl EffectiveConfig {
  pub fn aggregate_options(&self) -> AggregateOptions {
    AggregateOptions {
      by_user: self.by_user,
      normalize_users: self.normalize_users,
      include_line_stats: self.detailed_stats,
      sort_key: self.sort_key,
    }
  }

  pub fn render_options(&self) -> RenderOptions {
    RenderOptions {
      by_user: self.by_user,
      detailed_stats: self.detailed_stats,
    }
  }
}

pub fn parse_repository(raw: &str) -> Option<Repository> {
  static RE_REPO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9._-]+)$").expect("valid repository regex"));

  let c = RE_REPO.captures(raw.trim())?;
  Some(Repository {
    owner: c.get(1)?.as_str().to_string(),
    name: c.get(2)?.as_str().to_string(),
  })
}

fn select_period(cli: &Cli) -> Result<PeriodSpec> {
  let has_dates = cli.start.is_some() || cli.end.is_some();
  let styles = [cli.days.is_some(), has_dates, cli.period.is_some()]
    .iter()
    .filter(|s| **s)
    .count();

  if styles > 1 {
    bail!("Ambiguous period selection: choose only one of --days | --start/--end | --period");
  }

  if let Some(p) = cli.period {
    return Ok(PeriodSpec::Preset(p));
  }

  if cli.start.is_some() != cli.end.is_some() {
    bail!("--start and --end must be given together");
  }

  match PeriodSpec::from_parts(cli.days, cli.start.as_deref(), cli.end.as_deref())
    .context("invalid period selection (--days must be positive)")?
  {
    PeriodSpec::Unset => Ok(PeriodSpec::Days(DEFAULT_DAYS)),
    spec => Ok(spec),
  }
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  if cli.repositories.is_empty() {
    bail!("Provide at least one repository (owner/name)");
  }

  let mut repositories = Vec::with_capacity(cli.repositories.len());
  for raw in &cli.repositories {
    match parse_repository(raw) {
      Some(r) => repositories.push(r),
      None => bail!("Invalid repository {raw:?}: expected owner/name"),
    }
  }

  let period = select_period(&cli)?;
  let tz = util::parse_tz(&cli.tz)?;

  Ok(EffectiveConfig {
    repositories,
    period,
    by_user: cli.by_user,
    normalize_users: cli.normalize_users,
    detailed_stats: cli.detailed_stats,
    sort_key: SortKey::parse(&cli.sort_by),
    format: cli.format,
    tz,
    now_override: cli.now_override,
  })
}
