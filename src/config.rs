// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Exclusion filter configuration: bot/system maintainer logins and contributor display names
// role: config/exclusions
// inputs: Optional JSON file {"maintainers": [...], "contributors": [...]}
// outputs: Immutable Exclusions value injected into both aggregators
// invariants:
// - Membership is exact string equality (case-sensitive); no normalization is applied
// - A key missing from the JSON file keeps the built-in list for that filter
// errors: IO and JSON errors carry the file path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_EXCLUDED_MAINTAINERS: &[&str] = &["app/clawdinator", "clawdinator", "github-actions", "dependabot"];

const DEFAULT_EXCLUDED_CONTRIBUTORS: &[&str] = &[
  "GitHub",
  "github-actions[bot]",
  "dependabot[bot]",
  "clawdinator[bot]",
  "blacksmith-sh[bot]",
  "google-labs-jules[bot]",
  "Maude Bot",
  "Pocket Clawd",
  "Ghost",
  "Gregor's Bot",
  "Jarvis",
  "Jarvis Deploy",
  "CI",
  "Ubuntu",
  "user",
  "Developer",
];

fn owned_set(items: &[&str]) -> HashSet<String> {
  items.iter().map(|s| s.to_string()).collect()
}

fn default_maintainers() -> HashSet<String> {
  owned_set(DEFAULT_EXCLUDED_MAINTAINERS)
}

fn default_contributors() -> HashSet<String> {
  owned_set(DEFAULT_EXCLUDED_CONTRIBUTORS)
}

/// The two denylists applied before any record reaches aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exclusions {
  /// Platform logins whose merges are never counted.
  #[serde(default = "default_maintainers")]
  maintainers: HashSet<String>,
  /// Display names whose commits are never counted.
  #[serde(default = "default_contributors")]
  contributors: HashSet<String>,
}

impl Default for Exclusions {
  fn default() -> Self {
    Self {
      maintainers: default_maintainers(),
      contributors: default_contributors(),
    }
  }
}

impl Exclusions {
  /// Load lists from a JSON file; omitted keys fall back to the built-in lists.
  pub fn from_json_file(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading exclusions {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing exclusions {}", path.display()))
  }

  pub fn excludes_maintainer(&self, login: &str) -> bool {
    self.maintainers.contains(login)
  }

  pub fn excludes_contributor(&self, name: &str) -> bool {
    self.contributors.contains(name)
  }
}
