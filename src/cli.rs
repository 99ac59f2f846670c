use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::github::is_valid_slug;
use crate::maintainers::DEFAULT_MIN_MERGES;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "sync-credits",
    version,
    about = "Sync maintainers and contributors in a credits document from git history and merged pull requests",
    long_about = None
)]
pub struct Cli {
  /// Path to a Git repository (default: current dir)
  #[arg(long, default_value = ".")]
  pub repo: PathBuf,

  /// Credits document to update; relative paths resolve against --repo
  #[arg(long, default_value = "docs/reference/credits.md")]
  pub credits_file: PathBuf,

  /// Main line of history to count commits on
  #[arg(long, default_value = "main")]
  pub branch: String,

  /// Hosting repository as OWNER/NAME (default: derived from remote.origin.url)
  #[arg(long)]
  pub github_repo: Option<String>,

  /// Hosting platform domain; drives no-reply email matching and profile links
  #[arg(long, default_value = "github.com")]
  pub platform_domain: String,

  /// Read merged-by logins (one per line) from a file instead of calling `gh`;
  /// relative paths resolve against --repo
  #[arg(long)]
  pub merged_by_file: Option<PathBuf>,

  /// Maximum merged pull requests requested from `gh`
  #[arg(long, default_value_t = 10_000)]
  pub pr_limit: u32,

  /// Minimum merged pull requests for someone to be listed as a maintainer
  #[arg(long, default_value_t = DEFAULT_MIN_MERGES)]
  pub min_merges: u64,

  /// JSON file with {"maintainers": [...], "contributors": [...]} exclusion lists;
  /// relative paths resolve against --repo
  #[arg(long)]
  pub exclusions: Option<PathBuf>,

  /// Print the updated document to stdout instead of writing it
  #[arg(long)]
  pub dry_run: bool,

  /// Print both rosters as JSON to stdout (implies no write)
  #[arg(long)]
  pub json: bool,

  /// Enable debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Log only warnings and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant, YYYY-MM-DDTHH:MM:SS in UTC (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

/// Where merge actions come from after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeInput {
  Gh { slug: String, limit: u32 },
  File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  Write,
  DryRun,
  Json,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub repo: String, // absolute path for stability
  pub credits_file: PathBuf,
  pub branch: String,
  pub platform_domain: String,
  pub merges: MergeInput,
  pub min_merges: u64,
  pub exclusions: Option<PathBuf>,
  pub output: OutputMode,
  pub now_override: Option<String>,
}

/// Validate flags and resolve defaults. `origin_url` is consulted only when
/// neither --github-repo nor --merged-by-file is given.
pub fn normalize(cli: Cli, origin_url: impl FnOnce(&str) -> Option<String>) -> Result<EffectiveConfig> {
  if cli.branch.trim().is_empty() {
    bail!("--branch must not be empty");
  }
  if cli.min_merges == 0 {
    bail!("--min-merges must be at least 1");
  }
  if cli.platform_domain.trim().is_empty() {
    bail!("--platform-domain must not be empty");
  }

  let repo = util::canonicalize_lossy(&cli.repo);

  let merges = match (&cli.merged_by_file, &cli.github_repo) {
    (Some(_), Some(_)) => bail!("Ambiguous merge source: choose only one of --merged-by-file | --github-repo"),
    (Some(path), None) => MergeInput::File(util::resolve_against(Path::new(&repo), path)),
    (None, Some(slug)) => {
      if !is_valid_slug(slug) {
        bail!("--github-repo must look like OWNER/NAME, got {:?}", slug);
      }
      MergeInput::Gh {
        slug: slug.clone(),
        limit: cli.pr_limit,
      }
    }
    (None, None) => {
      let slug = origin_url(&repo)
        .and_then(|url| crate::github::parse_origin_slug(&url, &cli.platform_domain));
      match slug {
        Some(slug) => MergeInput::Gh {
          slug,
          limit: cli.pr_limit,
        },
        None => bail!(
          "Cannot determine the hosting repository from remote.origin.url; pass --github-repo OWNER/NAME or --merged-by-file PATH"
        ),
      }
    }
  };

  let output = if cli.json {
    OutputMode::Json
  } else if cli.dry_run {
    OutputMode::DryRun
  } else {
    OutputMode::Write
  };

  Ok(EffectiveConfig {
    credits_file: util::resolve_against(Path::new(&repo), &cli.credits_file),
    branch: cli.branch,
    platform_domain: cli.platform_domain,
    merges,
    min_merges: cli.min_merges,
    exclusions: cli.exclusions.map(|p| util::resolve_against(Path::new(&repo), &p)),
    output,
    now_override: cli.now_override,
    repo,
  })
}
