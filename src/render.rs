// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render summary records as a markdown table, CSV or JSON
// role: rendering
// inputs: &[SummaryRecord]; OutputFormat; RenderOptions (by_user, detailed_stats)
// outputs: String ready for stdout
// invariants:
// - record order is preserved
// - User column only with by_user; Lines +/- column only with detailed_stats (markdown)
// - CSV always carries LinesAdded/LinesDeleted; empty input renders nothing
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::{presets::ASCII_MARKDOWN, CellAlignment, Table};

use crate::model::{SummaryRecord, NONE_SENTINEL};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Markdown,
  Csv,
  Json,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
  pub by_user: bool,
  pub detailed_stats: bool,
}

pub fn render(records: &[SummaryRecord], format: OutputFormat, opts: &RenderOptions) -> Result<String> {
  match format {
    OutputFormat::Markdown => Ok(render_markdown(records, opts)),
    OutputFormat::Csv => Ok(render_csv(records, opts)),
    OutputFormat::Json => render_json(records),
  }
}

fn ratio_cell(completed: usize, created: usize, rate: String) -> String {
  if created == 0 {
    "-/-".to_string()
  } else if rate == NONE_SENTINEL {
    format!("{}/{}", completed, created)
  } else {
    format!("{}/{} ({})", completed, created, rate)
  }
}

fn time_cell(text: String) -> String {
  if text == NONE_SENTINEL {
    "-".to_string()
  } else {
    text
  }
}

pub fn render_markdown(records: &[SummaryRecord], opts: &RenderOptions) -> String {
  let mut header = vec!["Repository"];
  if opts.by_user {
    header.push("User");
  }
  header.extend([
    "Commits",
    "PR Merge Rate",
    "PR Merge Time",
    "Issue Resolve Rate",
    "Issue Resolve Time",
    "Active Issues",
  ]);
  if opts.detailed_stats {
    header.push("Lines +/-");
  }

  let mut t = Table::new();
  t.load_preset(ASCII_MARKDOWN).set_header(header);

  for r in records {
    let mut row = vec![r.repository.clone()];
    if opts.by_user {
      row.push(r.user.clone());
    }
    row.extend([
      r.commits.to_string(),
      ratio_cell(r.prs_merged, r.prs_created, r.pr_merge_rate_text()),
      time_cell(r.avg_pr_merge_time_text()),
      ratio_cell(r.issues_closed, r.issues_created, r.issue_resolve_rate_text()),
      time_cell(r.avg_issue_close_time_text()),
      r.open_issues.to_string(),
    ]);
    if opts.detailed_stats {
      row.push(format!("+{}/-{}", r.lines_added, r.lines_deleted));
    }
    t.add_row(row);
  }

  let commits_col = if opts.by_user { 2 } else { 1 };
  for idx in [commits_col, commits_col + 5] {
    if let Some(col) = t.column_mut(idx) {
      col.set_cell_alignment(CellAlignment::Right);
    }
  }

  t.to_string()
}

/// Quote a field only when it would otherwise break the row.
fn csv_field(s: &str) -> String {
  if s.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", s.replace('"', "\"\""))
  } else {
    s.to_string()
  }
}

pub fn render_csv(records: &[SummaryRecord], opts: &RenderOptions) -> String {
  if records.is_empty() {
    return String::new();
  }

  let mut header = vec!["Repository"];
  if opts.by_user {
    header.push("User");
  }
  header.extend([
    "Commits",
    "LinesAdded",
    "LinesDeleted",
    "PRsCreated",
    "PRsMerged",
    "PRMergeRate",
    "AvgPRMergeTime",
    "IssuesCreated",
    "IssuesClosed",
    "IssueResolveRate",
    "AvgIssueCloseTime",
    "OpenIssues",
  ]);

  let mut out = header.join(",");
  out.push('\n');

  for r in records {
    let mut row = vec![csv_field(&r.repository)];
    if opts.by_user {
      row.push(csv_field(&r.user));
    }
    row.extend([
      r.commits.to_string(),
      r.lines_added.to_string(),
      r.lines_deleted.to_string(),
      r.prs_created.to_string(),
      r.prs_merged.to_string(),
      r.pr_merge_rate_text(),
      r.avg_pr_merge_time_text(),
      r.issues_created.to_string(),
      r.issues_closed.to_string(),
      r.issue_resolve_rate_text(),
      r.avg_issue_close_time_text(),
      r.open_issues.to_string(),
    ]);
    out.push_str(&row.join(","));
    out.push('\n');
  }

  out
}

pub fn render_json(records: &[SummaryRecord]) -> Result<String> {
  serde_json::to_string_pretty(records).context("serializing summary records")
}
