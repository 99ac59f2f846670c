use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod contributors;
mod github;
mod gitio;
mod identity;
mod maintainers;
mod model;
mod render;
mod sync;
mod util;

use crate::cli::{normalize, Cli};

fn init_logging(cli: &Cli) {
  let default_level = if cli.quiet {
    "warn"
  } else if cli.verbose {
    "debug"
  } else {
    "info"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  // stdout carries --dry-run / --json output, so logs go to stderr.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_logging(&cli);

  // Phase 1: normalize CLI
  let cfg = normalize(cli, gitio::origin_url)?;

  // Phase 2: resolve now
  let now_opt = cfg.now_override.as_deref().map(util::parse_now_override).transpose()?;
  let now = util::effective_now(now_opt);

  // Phase 3: gather, aggregate, render, write
  let merges = sync::merge_source_for(&cfg);
  sync::run_sync(&cfg, merges.as_ref(), now)
}
