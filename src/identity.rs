// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve raw commit identities: no-reply email extraction, identity keys, canonical display-name selection
// role: identity/resolution
// inputs: Raw email strings and display names from commit metadata
// outputs: Platform usernames (lower-cased), IdentityKey values, canonical display names
// invariants:
// - NoreplyMatcher::extract is total and pure; a non-matching email is None, never an error
// - better_name is commutative and associative, so folding names is order-independent
// - IdentityKey::Platform and IdentityKey::Display never compare equal
// errors: none; construction only escapes the configured domain
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use regex::Regex;

/// Extracts hosting-platform usernames from no-reply commit emails such as
/// `123+alice@users.noreply.github.com` or `alice@users.noreply.github.com`.
#[derive(Debug, Clone)]
pub struct NoreplyMatcher {
  re: Regex,
}

impl NoreplyMatcher {
  pub fn new(platform_domain: &str) -> Self {
    let pattern = format!(r"(?i)^(?:\d+\+)?([^@]+)@users\.noreply\.{}$", regex::escape(platform_domain));
    // The domain is escaped, so the pattern is always valid.
    let re = Regex::new(&pattern).expect("escaped no-reply pattern compiles");
    Self { re }
  }

  /// Returns the lower-cased username when `email` follows the no-reply convention.
  pub fn extract(&self, email: &str) -> Option<String> {
    self.re
      .captures(email)
      .and_then(|c| c.get(1))
      .map(|m| m.as_str().to_lowercase())
  }
}

impl Default for NoreplyMatcher {
  fn default() -> Self {
    Self::new("github.com")
  }
}

/// Key under which raw identities are merged into one roster entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityKey {
  /// A hosting-platform username (always lower-case).
  Platform(String),
  /// Fallback: the lower-cased display name.
  Display(String),
}

impl IdentityKey {
  pub fn platform(username: &str) -> Self {
    IdentityKey::Platform(username.to_lowercase())
  }

  pub fn display(name: &str) -> Self {
    IdentityKey::Display(name.to_lowercase())
  }
}

fn starts_uppercase(name: &str) -> bool {
  name.chars().next().is_some_and(char::is_uppercase)
}

/// Picks the better display form of two candidates for the same identity.
///
/// Order: a name starting with an uppercase letter beats one that does not;
/// then the longer name (in chars) wins; remaining ties go to the
/// lexicographically smaller name so the choice never depends on arrival order.
pub fn better_name<'a>(a: &'a str, b: &'a str) -> &'a str {
  let (ua, ub) = (starts_uppercase(a), starts_uppercase(b));
  if ua != ub {
    return if ua { a } else { b };
  }

  let (la, lb) = (a.chars().count(), b.chars().count());
  if la != lb {
    return if la > lb { a } else { b };
  }

  if a <= b {
    a
  } else {
    b
  }
}

/// Running fold of `better_name` over every name seen for one identity key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalName {
  best: Option<String>,
}

impl CanonicalName {
  pub fn observe(&mut self, candidate: &str) {
    let next = match self.best.as_deref() {
      Some(cur) => better_name(cur, candidate),
      None => candidate,
    };
    if self.best.as_deref() != Some(next) {
      self.best = Some(next.to_string());
    }
  }

  pub fn get(&self) -> Option<&str> {
    self.best.as_deref()
  }
}
