// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Collapse commit authorship records into one ranked roster of canonical identities
// role: aggregation/contributors
// inputs: All commit records on the main line (any order); Exclusions; NoreplyMatcher
// outputs: Vec<ContributorEntry> sorted by commits desc, then canonical name case-insensitively
// invariants:
// - Pass 1 sees the whole history before any key is assigned in pass 2
// - Key priority: no-reply username > name equal (case-insensitively) to a known username > lower-cased name
// - Permuting the input never changes the roster
// - Per-key commit counts sum to the accepted records for that key
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{BTreeMap, BTreeSet};

use crate::config::Exclusions;
use crate::identity::{CanonicalName, IdentityKey, NoreplyMatcher};
use crate::model::{ContributorEntry, RawRecord};

#[derive(Debug, Default)]
struct Tally {
  commits: u64,
  name: CanonicalName,
}

/// Pass 1: every username recoverable from a no-reply email anywhere in history.
pub fn known_platform_users(records: &[RawRecord], matcher: &NoreplyMatcher) -> BTreeSet<String> {
  records
    .iter()
    .filter(|r| !r.email.is_empty())
    .filter_map(|r| matcher.extract(&r.email))
    .collect()
}

/// Resolve the identity key for one record against the known usernames.
pub fn identity_key(rec: &RawRecord, matcher: &NoreplyMatcher, known: &BTreeSet<String>) -> IdentityKey {
  if let Some(user) = matcher.extract(&rec.email) {
    return IdentityKey::platform(&user);
  }

  let lowered = rec.name.to_lowercase();
  if known.contains(&lowered) {
    IdentityKey::platform(&lowered)
  } else {
    IdentityKey::display(&rec.name)
  }
}

pub fn aggregate_contributors(
  records: &[RawRecord],
  exclusions: &Exclusions,
  matcher: &NoreplyMatcher,
) -> Vec<ContributorEntry> {
  let known = known_platform_users(records, matcher);

  let mut tallies: BTreeMap<IdentityKey, Tally> = BTreeMap::new();
  let mut rejected = 0usize;
  for rec in records {
    if rec.name.is_empty() || rec.email.is_empty() || exclusions.excludes_contributor(&rec.name) {
      rejected += 1;
      continue;
    }

    let tally = tallies.entry(identity_key(rec, matcher, &known)).or_default();
    tally.commits += 1;
    tally.name.observe(&rec.name);
  }

  tracing::debug!(
    known_users = known.len(),
    identities = tallies.len(),
    rejected,
    "contributor identities resolved"
  );

  let mut ranked: Vec<(IdentityKey, ContributorEntry)> = tallies
    .into_iter()
    .filter_map(|(key, t)| {
      let name = t.name.get()?.to_string();
      Some((key, ContributorEntry { name, commits: t.commits }))
    })
    .collect();

  ranked.sort_by(|(ka, a), (kb, b)| {
    b.commits
      .cmp(&a.commits)
      .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
      .then_with(|| ka.cmp(kb))
  });

  ranked.into_iter().map(|(_, entry)| entry).collect()
}
