// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fold merge actions and direct pushes into the ranked maintainer roster
// role: aggregation/maintainers
// inputs: RawRecord stream (Merge and Push kinds); Exclusions; NoreplyMatcher; merge threshold
// outputs: Vec<MaintainerEntry> sorted by (merges + pushes) desc, then login case-insensitively
// invariants:
// - Only logins with merges >= min_merges are emitted
// - Push counts are keyed by no-reply username or lower-cased committer name, and are
//   joined to merge logins only by lower-cased equality
// - Authored records are ignored
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::config::Exclusions;
use crate::identity::NoreplyMatcher;
use crate::model::{MaintainerEntry, RawRecord, RecordKind};

pub const DEFAULT_MIN_MERGES: u64 = 2;

pub struct MaintainerAggregator<'a> {
  exclusions: &'a Exclusions,
  matcher: &'a NoreplyMatcher,
  min_merges: u64,
  merges: BTreeMap<String, u64>,
  pushes: BTreeMap<String, u64>,
}

impl<'a> MaintainerAggregator<'a> {
  pub fn new(exclusions: &'a Exclusions, matcher: &'a NoreplyMatcher, min_merges: u64) -> Self {
    Self {
      exclusions,
      matcher,
      min_merges,
      merges: BTreeMap::new(),
      pushes: BTreeMap::new(),
    }
  }

  pub fn observe(&mut self, rec: &RawRecord) {
    match rec.kind {
      RecordKind::Merge => self.observe_merge(&rec.name),
      RecordKind::Push => self.observe_push(&rec.name, &rec.email),
      RecordKind::Authored => {}
    }
  }

  fn observe_merge(&mut self, login: &str) {
    if login.is_empty() || self.exclusions.excludes_maintainer(login) {
      return;
    }
    *self.merges.entry(login.to_string()).or_insert(0) += 1;
  }

  fn observe_push(&mut self, name: &str, email: &str) {
    if name.is_empty() || self.exclusions.excludes_contributor(name) {
      return;
    }
    let key = self.matcher.extract(email).unwrap_or_else(|| name.to_lowercase());
    *self.pushes.entry(key).or_insert(0) += 1;
  }

  pub fn finish(self) -> Vec<MaintainerEntry> {
    tracing::debug!(
      merged_by = self.merges.len(),
      pushers = self.pushes.len(),
      "maintainer activity collected"
    );

    let mut out: Vec<MaintainerEntry> = self
      .merges
      .iter()
      .filter(|&(_, &merges)| merges >= self.min_merges)
      .map(|(login, &merges)| MaintainerEntry {
        login: login.clone(),
        merges,
        direct_pushes: self.pushes.get(&login.to_lowercase()).copied().unwrap_or(0),
      })
      .collect();

    out.sort_by(|a, b| {
      b.total_activity()
        .cmp(&a.total_activity())
        .then_with(|| a.login.to_lowercase().cmp(&b.login.to_lowercase()))
        .then_with(|| a.login.cmp(&b.login))
    });
    out
  }
}

/// Build the maintainer roster from merge and push records in one call.
pub fn aggregate_maintainers<'r, I>(
  records: I,
  exclusions: &Exclusions,
  matcher: &NoreplyMatcher,
  min_merges: u64,
) -> Vec<MaintainerEntry>
where
  I: IntoIterator<Item = &'r RawRecord>,
{
  let mut agg = MaintainerAggregator::new(exclusions, matcher, min_merges);
  records.into_iter().for_each(|r| agg.observe(r));
  agg.finish()
}
