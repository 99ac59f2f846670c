// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Sources of merge actions: the `gh` CLI (merged PR history) or an offline login file; origin slug detection
// role: sources/merges
// inputs: repo dir, OWNER/NAME slug, PR limit; or a file path with one login per line
// outputs: Raw text with one merged-by login per line
// side_effects: Spawns `gh`; reads files
// invariants:
// - Any `gh` failure is fatal (propagated); there are no retries
// - Origin parser only recognizes remotes on the configured platform domain (https or ssh)
// errors: Command + stderr for `gh`; path context for files
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use anyhow::{Context, Result};
use regex::Regex;

use crate::util::run_gh;

/// Provider of the raw "merged by" login stream.
pub trait MergeSource {
  fn merged_by_logins(&self) -> Result<String>;
  fn describe(&self) -> String;
}

/// Merged pull requests listed through the `gh` CLI.
pub struct GhCli {
  pub repo_dir: String,
  pub slug: String,
  pub limit: u32,
}

impl GhCli {
  fn args(&self) -> Vec<String> {
    vec![
      "pr".into(),
      "list".into(),
      "--repo".into(),
      self.slug.clone(),
      "--state".into(),
      "merged".into(),
      "--limit".into(),
      self.limit.to_string(),
      "--json".into(),
      "mergedBy".into(),
      "--jq".into(),
      ".[].mergedBy.login".into(),
    ]
  }
}

impl MergeSource for GhCli {
  fn merged_by_logins(&self) -> Result<String> {
    run_gh(&self.repo_dir, &self.args()).with_context(|| format!("listing merged pull requests for {}", self.slug))
  }

  fn describe(&self) -> String {
    format!("gh pr list --repo {}", self.slug)
  }
}

/// Logins read from a local file, one per line.
pub struct MergeLogFile {
  pub path: PathBuf,
}

impl MergeSource for MergeLogFile {
  fn merged_by_logins(&self) -> Result<String> {
    std::fs::read_to_string(&self.path).with_context(|| format!("reading merge log {}", self.path.display()))
  }

  fn describe(&self) -> String {
    format!("file {}", self.path.display())
  }
}

/// Extract `OWNER/NAME` from an origin URL hosted on `platform_domain`.
pub fn parse_origin_slug(url: &str, platform_domain: &str) -> Option<String> {
  let domain = regex::escape(platform_domain);
  let pattern = format!(r"^(?:git@{0}:|ssh://git@{0}/|https?://{0}/)([^/]+)/([^/]+?)(?:\.git)?/?$", domain);
  let re = Regex::new(&pattern).ok()?;
  let c = re.captures(url.trim())?;
  Some(format!("{}/{}", c.get(1)?.as_str(), c.get(2)?.as_str()))
}

/// Accept only `OWNER/NAME` with both parts non-empty.
pub fn is_valid_slug(slug: &str) -> bool {
  match slug.split_once('/') {
    Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
    None => false,
  }
}
