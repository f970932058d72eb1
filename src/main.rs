use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gh_activity_metrics::cli::{normalize, Cli};
use gh_activity_metrics::provider::GithubProvider;
use gh_activity_metrics::{run, util};

fn init_tracing(verbose: bool) {
  let default = if verbose { "info" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  if cli.list_periods {
    let tz = util::parse_tz(&cli.tz)?;
    let now = util::effective_now(cli.now_override.as_deref(), tz)?;
    print!("{}", run::list_periods(now)?);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: select the data source
  let provider = GithubProvider::from_env();

  // Phase 3: report to stdout
  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  run::run(&cfg, &provider, &mut out)
}
