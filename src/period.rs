// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve a reporting period (day count, explicit dates, or named preset) into a closed instant interval in the reporting zone
// role: period/resolution
// inputs: PeriodSpec; the invocation's "now" in the reporting zone
// outputs: TimeInterval; preset descriptions for listings
// invariants:
// - start <= end for every resolved interval
// - explicit ranges start at the first valid local instant of the start day and end 23:59:59 after the first valid instant of the end day
// - calendar presets (last month, halves, years) are expressed as whole dates and resolve through the explicit-date rule
// - everything is computed in one zone taken from `now`; nothing here reads the clock
// errors: PeriodError::{InvalidPeriodSpec, DateParse, OutOfRange}; fatal to the invocation
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use clap::ValueEnum;
use thiserror::Error;

use crate::model::ZERO_INSTANT;

/// The zone every period is computed in unless the caller picks another one.
pub const DEFAULT_REPORTING_TZ: Tz = chrono_tz::Asia::Tokyo;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
  #[error("invalid period specification")]
  InvalidPeriodSpec,
  #[error("unparseable date {input:?}: expected YYYY-MM-DD")]
  DateParse { input: String },
  #[error("period falls outside the representable calendar")]
  OutOfRange,
}

/// Closed reporting window; both endpoints are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
  pub start: DateTime<Tz>,
  pub end: DateTime<Tz>,
}

impl TimeInterval {
  /// The explicit zero value: both ends at the zero instant.
  pub fn zero(tz: Tz) -> Self {
    let z = ZERO_INSTANT.with_timezone(&tz);
    Self { start: z, end: z }
  }

  /// Whole days between the endpoints, rounded down.
  pub fn span_days(&self) -> i64 {
    (self.end - self.start).num_days()
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Preset {
  #[value(name = "last-7-days")]
  Last7Days,
  #[value(name = "last-30-days")]
  Last30Days,
  #[value(name = "last-month")]
  LastMonth,
  #[value(name = "previous-half")]
  PreviousHalf,
  #[value(name = "previous-year")]
  PreviousYear,
  #[value(name = "previous-fiscal-year")]
  PreviousFiscalYear,
}

impl Preset {
  pub const ALL: [Preset; 6] = [
    Preset::Last7Days,
    Preset::Last30Days,
    Preset::LastMonth,
    Preset::PreviousHalf,
    Preset::PreviousYear,
    Preset::PreviousFiscalYear,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Preset::Last7Days => "Last 7 days",
      Preset::Last30Days => "Last 30 days",
      Preset::LastMonth => "Last month",
      Preset::PreviousHalf => "Previous half (Apr-Sep / Oct-Mar)",
      Preset::PreviousYear => "Previous year (Jan-Dec)",
      Preset::PreviousFiscalYear => "Previous fiscal year (Apr-Mar)",
    }
  }

  /// Day count for the rolling presets; `None` for calendar-aligned ones.
  fn rolling_days(self) -> Option<u32> {
    match self {
      Preset::Last7Days => Some(7),
      Preset::Last30Days => Some(30),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeriodSpec {
  /// Nothing supplied; resolves to `TimeInterval::zero`.
  Unset,
  Days(u32),
  DateRange { start: String, end: String },
  Preset(Preset),
}

impl PeriodSpec {
  /// Build a spec from loose caller input. Explicit dates win over a day count when both are
  /// present; a lone start or end date is rejected.
  pub fn from_parts(days: Option<u32>, start: Option<&str>, end: Option<&str>) -> Result<Self, PeriodError> {
    match (days, start, end) {
      (None, None, None) => Ok(PeriodSpec::Unset),
      (_, Some(s), Some(e)) => Ok(PeriodSpec::DateRange {
        start: s.to_string(),
        end: e.to_string(),
      }),
      (Some(0), _, _) => Err(PeriodError::InvalidPeriodSpec),
      (Some(n), _, _) => Ok(PeriodSpec::Days(n)),
      _ => Err(PeriodError::InvalidPeriodSpec),
    }
  }
}

/// Resolve a spec relative to `now`; the zone of `now` is the reporting zone.
pub fn resolve_period(spec: &PeriodSpec, now: DateTime<Tz>) -> Result<TimeInterval, PeriodError> {
  let tz = now.timezone();

  match spec {
    PeriodSpec::Unset => Ok(TimeInterval::zero(tz)),
    PeriodSpec::DateRange { start, end } => {
      let start_day = parse_day(start)?;
      let end_day = parse_day(end)?;
      if start_day > end_day {
        return Err(PeriodError::InvalidPeriodSpec);
      }
      Ok(TimeInterval {
        start: local_midnight(&tz, start_day),
        end: local_midnight(&tz, end_day) + end_of_day_offset(),
      })
    }
    PeriodSpec::Days(0) => Err(PeriodError::InvalidPeriodSpec),
    PeriodSpec::Days(n) => rolling(now, *n),
    PeriodSpec::Preset(p) => resolve_period(&preset_spec(*p, now)?, now),
  }
}

/// The spec a preset selection stands for: rolling presets become a day count, calendar presets
/// become an explicit date range (so their last day is covered through 23:59:59).
pub fn preset_spec(preset: Preset, now: DateTime<Tz>) -> Result<PeriodSpec, PeriodError> {
  if let Some(n) = preset.rolling_days() {
    return Ok(PeriodSpec::Days(n));
  }

  let (start, end) = calendar_bounds(preset, now.date_naive())?;
  Ok(PeriodSpec::DateRange {
    start: start.format(DATE_FORMAT).to_string(),
    end: end.format(DATE_FORMAT).to_string(),
  })
}

/// Date-level boundaries of a preset: calendar presets end at midnight of their last day.
pub fn preset_interval(preset: Preset, now: DateTime<Tz>) -> Result<TimeInterval, PeriodError> {
  if let Some(n) = preset.rolling_days() {
    return rolling(now, n);
  }

  let tz = now.timezone();
  let (start, end) = calendar_bounds(preset, now.date_naive())?;
  Ok(TimeInterval {
    start: local_midnight(&tz, start),
    end: local_midnight(&tz, end),
  })
}

/// Human description such as `(2025-07-01 to 2025-07-31 JST)`.
pub fn describe_preset(preset: Preset, now: DateTime<Tz>) -> Result<String, PeriodError> {
  let iv = preset_interval(preset, now)?;
  Ok(format!(
    "({} to {} {})",
    iv.start.format(DATE_FORMAT),
    iv.end.format(DATE_FORMAT),
    iv.end.format("%Z")
  ))
}

/// Exactly `days * 24h` back from `now`, measured on the instant so wall-clock gaps never fail.
fn rolling(now: DateTime<Tz>, days: u32) -> Result<TimeInterval, PeriodError> {
  let start = TimeDelta::try_days(i64::from(days))
    .and_then(|span| now.checked_sub_signed(span))
    .ok_or(PeriodError::OutOfRange)?;
  Ok(TimeInterval { start, end: now })
}

fn calendar_bounds(preset: Preset, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), PeriodError> {
  let year = today.year();
  let month = today.month();

  match preset {
    Preset::LastMonth => {
      let first_this = ymd(year, month, 1)?;
      let first_prev = first_this
        .checked_sub_months(Months::new(1))
        .ok_or(PeriodError::OutOfRange)?;
      let last_prev = first_this.pred_opt().ok_or(PeriodError::OutOfRange)?;
      Ok((first_prev, last_prev))
    }
    Preset::PreviousHalf => match month {
      4..=9 => Ok((ymd(year - 1, 10, 1)?, ymd(year, 3, 31)?)),
      10..=12 => Ok((ymd(year, 4, 1)?, ymd(year, 9, 30)?)),
      _ => Ok((ymd(year - 1, 4, 1)?, ymd(year - 1, 9, 30)?)),
    },
    Preset::PreviousYear => Ok((ymd(year - 1, 1, 1)?, ymd(year - 1, 12, 31)?)),
    Preset::PreviousFiscalYear => {
      // Fiscal years start in April.
      let fiscal_year = if month >= 4 { year - 1 } else { year - 2 };
      Ok((ymd(fiscal_year, 4, 1)?, ymd(fiscal_year + 1, 3, 31)?))
    }
    Preset::Last7Days | Preset::Last30Days => Err(PeriodError::InvalidPeriodSpec),
  }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, PeriodError> {
  NaiveDate::from_ymd_opt(year, month, day).ok_or(PeriodError::OutOfRange)
}

fn parse_day(input: &str) -> Result<NaiveDate, PeriodError> {
  NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| PeriodError::DateParse {
    input: input.to_string(),
  })
}

fn end_of_day_offset() -> TimeDelta {
  TimeDelta::hours(23) + TimeDelta::minutes(59) + TimeDelta::seconds(59)
}

/// First valid local instant of `date` in `tz`: midnight, or the end of the gap when the zone
/// skips midnight that day.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
  let midnight = date.and_time(NaiveTime::MIN);
  if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
    return dt;
  }
  (1..=24 * 60)
    .map(|m| midnight + TimeDelta::minutes(m))
    .find_map(|t| tz.from_local_datetime(&t).earliest())
    .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Parse a `--now-override` string into the reporting zone.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive wall-clock timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`, read in `tz`.
pub fn parse_now_override(s: Option<&str>, tz: Tz) -> Option<DateTime<Tz>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&tz))
      .or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| tz.from_local_datetime(&ndt).single())
      })
  })
}
