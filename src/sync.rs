// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one credits sync: gather raw streams, build both rosters, render, then write once
// role: processing/orchestrator
// inputs: EffectiveConfig, a MergeSource, the effective "now"
// outputs: Updated credits document on disk, or document/roster JSON on stdout
// side_effects: Spawns git (and gh through the MergeSource); reads and writes the credits file; prints to stdout
// invariants:
// - The credits file is read before any external tool runs and written only after both rosters and the text exist
// - Any external failure aborts before the write; nothing partial is written
// - A missing managed heading is a warning, not an error
// errors: Propagates tool/IO errors with path or command context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::cli::{EffectiveConfig, MergeInput, OutputMode};
use crate::config::Exclusions;
use crate::contributors::aggregate_contributors;
use crate::github::{GhCli, MergeLogFile, MergeSource};
use crate::gitio;
use crate::identity::NoreplyMatcher;
use crate::maintainers::aggregate_maintainers;
use crate::model::{parse_identity_lines, parse_merge_logins, RecordKind, Roster};
use crate::render::{render_document, CreditsLayout, RenderedDocument};

pub fn merge_source_for(cfg: &EffectiveConfig) -> Box<dyn MergeSource> {
  match &cfg.merges {
    MergeInput::Gh { slug, limit } => Box::new(GhCli {
      repo_dir: cfg.repo.clone(),
      slug: slug.clone(),
      limit: *limit,
    }),
    MergeInput::File(path) => Box::new(MergeLogFile { path: path.clone() }),
  }
}

/// Collect every raw stream and fold them into both rosters.
pub fn build_roster(
  cfg: &EffectiveConfig,
  merges: &dyn MergeSource,
  exclusions: &Exclusions,
  matcher: &NoreplyMatcher,
) -> Result<Roster> {
  tracing::info!(source = %merges.describe(), "fetching merged pull requests");
  let merge_records = parse_merge_logins(&merges.merged_by_logins()?);

  tracing::info!(branch = %cfg.branch, "counting direct pushes");
  let (push_records, bad_pushes) =
    parse_identity_lines(&gitio::direct_push_lines(&cfg.repo, &cfg.branch)?, RecordKind::Push);

  tracing::info!(branch = %cfg.branch, "collecting commit authors");
  let (author_records, bad_authors) =
    parse_identity_lines(&gitio::author_lines(&cfg.repo, &cfg.branch)?, RecordKind::Authored);

  if bad_pushes + bad_authors > 0 {
    tracing::warn!(skipped = bad_pushes + bad_authors, "skipped log lines without a name|email separator");
  }
  tracing::debug!(
    merges = merge_records.len(),
    pushes = push_records.len(),
    commits = author_records.len(),
    "raw records parsed"
  );

  let maintainers = aggregate_maintainers(
    merge_records.iter().chain(push_records.iter()),
    exclusions,
    matcher,
    cfg.min_merges,
  );
  let contributors = aggregate_contributors(&author_records, exclusions, matcher);

  Ok(Roster {
    maintainers,
    contributors,
  })
}

/// Render `roster` into the current credits document text.
pub fn render_credits(cfg: &EffectiveConfig, current: &str, roster: &Roster, now: DateTime<Utc>) -> RenderedDocument {
  let layout = CreditsLayout::for_domain(&cfg.platform_domain);
  let rendered = render_document(current, roster, &layout, now);
  if !rendered.maintainers_found {
    tracing::warn!(heading = %layout.maintainers_heading, file = %cfg.credits_file.display(), "section not found; left unchanged");
  }
  if !rendered.contributors_found {
    tracing::warn!(heading = %layout.contributors_heading, file = %cfg.credits_file.display(), "section not found; left unchanged");
  }
  rendered
}

pub fn run_sync(cfg: &EffectiveConfig, merges: &dyn MergeSource, now: DateTime<Utc>) -> Result<()> {
  let exclusions = match &cfg.exclusions {
    Some(path) => Exclusions::from_json_file(path)?,
    None => Exclusions::default(),
  };
  let matcher = NoreplyMatcher::new(&cfg.platform_domain);

  let current = std::fs::read_to_string(&cfg.credits_file)
    .with_context(|| format!("reading credits file {}", cfg.credits_file.display()))?;

  let roster = build_roster(cfg, merges, &exclusions, &matcher)?;

  match cfg.output {
    OutputMode::Json => {
      println!("{}", serde_json::to_string_pretty(&roster)?);
    }
    OutputMode::DryRun => {
      let rendered = render_credits(cfg, &current, &roster, now);
      print!("{}", rendered.text);
    }
    OutputMode::Write => {
      let rendered = render_credits(cfg, &current, &roster, now);
      if rendered.text == current {
        tracing::info!(file = %cfg.credits_file.display(), "credits already up to date");
      } else {
        std::fs::write(&cfg.credits_file, &rendered.text)
          .with_context(|| format!("writing credits file {}", cfg.credits_file.display()))?;
        tracing::info!(file = %cfg.credits_file.display(), "updated credits");
      }
    }
  }

  tracing::info!(
    maintainers = roster.maintainers.len(),
    contributors = roster.contributors.len(),
    "credits sync complete"
  );
  Ok(())
}
