// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define raw activity records, roster entries, and the parsers for the "name|email" and login text streams
// role: model/types
// inputs: Lines produced by `git log --format=%aN|%aE` / `%cN|%cE` and `gh pr list --jq .[].mergedBy.login`
// outputs: RawRecord values; MaintainerEntry/ContributorEntry rows; Roster
// invariants:
// - A line is split on its last '|'; name is trimmed, email trimmed and lower-cased
// - Lines without a separator and blank logins are skipped, never fatal
// - Roster ordering: descending activity, ties by case-insensitive ascending name
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
  /// A merged pull request, attributed to whoever merged it.
  Merge,
  /// A non-merge commit on the main line, attributed to its committer.
  Push,
  /// Any commit on the main line, attributed to its author.
  Authored,
}

/// One observed commit or merge action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
  pub name: String,
  pub email: String,
  pub kind: RecordKind,
}

impl RawRecord {
  pub fn new(name: impl Into<String>, email: &str, kind: RecordKind) -> Self {
    Self {
      name: name.into(),
      email: email.to_lowercase(),
      kind,
    }
  }

  /// A merge action carries only the platform login of the merger.
  pub fn merge(login: impl Into<String>) -> Self {
    Self {
      name: login.into(),
      email: String::new(),
      kind: RecordKind::Merge,
    }
  }

  /// Parse one `name|email` line. Returns None when the separator is missing.
  pub fn parse_line(line: &str, kind: RecordKind) -> Option<Self> {
    let (name, email) = line.trim().rsplit_once('|')?;
    Some(Self::new(name.trim(), email.trim(), kind))
  }
}

/// Parse a whole `name|email` stream; the second value counts skipped lines.
pub fn parse_identity_lines(text: &str, kind: RecordKind) -> (Vec<RawRecord>, usize) {
  let mut skipped = 0;
  let records = text
    .lines()
    .filter(|l| !l.trim().is_empty())
    .filter_map(|l| {
      let rec = RawRecord::parse_line(l, kind);
      if rec.is_none() {
        skipped += 1;
      }
      rec
    })
    .collect();
  (records, skipped)
}

/// Parse a stream of merged-by logins, one per line.
pub fn parse_merge_logins(text: &str) -> Vec<RawRecord> {
  text
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .map(RawRecord::merge)
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintainerEntry {
  pub login: String,
  pub merges: u64,
  pub direct_pushes: u64,
}

impl MaintainerEntry {
  pub fn total_activity(&self) -> u64 {
    self.merges + self.direct_pushes
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorEntry {
  pub name: String,
  pub commits: u64,
}

/// Both ranked rosters produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
  pub maintainers: Vec<MaintainerEntry>,
  pub contributors: Vec<ContributorEntry>,
}
