// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Format both rosters as markdown and splice them under the managed headings of an existing document
// role: rendering/credits
// inputs: Existing document text, Roster, CreditsLayout, generation timestamp
// outputs: Updated document text plus which managed sections were found
// invariants:
// - Only the block after each managed heading changes; headings and all other lines are kept verbatim
// - A block ends at the next heading line, quote line, or end of document
// - A missing heading leaves the document unchanged for that section
// - Rendering the same roster and timestamp twice yields identical text
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::model::{ContributorEntry, MaintainerEntry, Roster};

pub const MAINTAINERS_HEADING: &str = "## Maintainers";
pub const CONTRIBUTORS_HEADING: &str = "## Contributors";
pub const NO_MAINTAINERS: &str = "_No maintainers detected._";
pub const NO_CONTRIBUTORS: &str = "_No contributors detected._";

/// Where the managed sections live and how profile links are built.
#[derive(Debug, Clone)]
pub struct CreditsLayout {
  pub maintainers_heading: String,
  pub contributors_heading: String,
  /// e.g. `https://github.com`
  pub profile_base_url: String,
}

impl CreditsLayout {
  pub fn for_domain(platform_domain: &str) -> Self {
    Self {
      maintainers_heading: MAINTAINERS_HEADING.to_string(),
      contributors_heading: CONTRIBUTORS_HEADING.to_string(),
      profile_base_url: format!("https://{}", platform_domain),
    }
  }
}

impl Default for CreditsLayout {
  fn default() -> Self {
    Self::for_domain("github.com")
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
  pub text: String,
  pub maintainers_found: bool,
  pub contributors_found: bool,
}

/// Timestamp shown on the contributors block, always in UTC.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
  at.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn maintainer_line(m: &MaintainerEntry, profile_base_url: &str) -> String {
  let link = format!("[@{0}]({1}/{0})", m.login, profile_base_url.trim_end_matches('/'));
  if m.direct_pushes > 0 {
    format!("- {} ({} merges, {} direct pushes)", link, m.merges, m.direct_pushes)
  } else {
    format!("- {} ({} merges)", link, m.merges)
  }
}

pub fn maintainers_block(maintainers: &[MaintainerEntry], profile_base_url: &str) -> String {
  if maintainers.is_empty() {
    return NO_MAINTAINERS.to_string();
  }
  maintainers
    .iter()
    .map(|m| maintainer_line(m, profile_base_url))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn contributors_block(contributors: &[ContributorEntry], generated_at: DateTime<Utc>) -> String {
  let listing = if contributors.is_empty() {
    NO_CONTRIBUTORS.to_string()
  } else {
    contributors
      .iter()
      .map(|c| format!("{} ({})", c.name, c.commits))
      .collect::<Vec<_>>()
      .join(", ")
  };
  format!(
    "{} contributors: {}\n\n_Last updated: {}_",
    contributors.len(),
    listing,
    format_timestamp(generated_at)
  )
}

fn is_heading(line: &str) -> bool {
  let hashes = line.bytes().take_while(|&b| b == b'#').count();
  (1..=6).contains(&hashes) && matches!(line.as_bytes().get(hashes).copied(), None | Some(b' '))
}

fn is_quote(line: &str) -> bool {
  line.starts_with('>')
}

fn ends_block(line: &str) -> bool {
  is_heading(line) || is_quote(line)
}

/// Replace the managed blocks of `document` with freshly rendered rosters.
pub fn render_document(
  document: &str,
  roster: &Roster,
  layout: &CreditsLayout,
  generated_at: DateTime<Utc>,
) -> RenderedDocument {
  let maintainers = maintainers_block(&roster.maintainers, &layout.profile_base_url);
  let contributors = contributors_block(&roster.contributors, generated_at);

  let (body, trailing_newline) = match document.strip_suffix('\n') {
    Some(b) => (b, true),
    None => (document, false),
  };

  let mut out: Vec<Cow<'_, str>> = Vec::new();
  let mut skipping = false;
  let mut maintainers_found = false;
  let mut contributors_found = false;

  for line in body.split('\n') {
    // Inserted lines follow the line ending of the line they sit next to.
    let bare = line.strip_suffix('\r');
    let cr = if bare.is_some() { "\r" } else { "" };
    let bare = bare.unwrap_or(line);
    if skipping {
      if !ends_block(bare) {
        continue;
      }
      skipping = false;
      out.push(Cow::Borrowed(cr));
    }

    let block = if bare == layout.maintainers_heading {
      maintainers_found = true;
      Some(maintainers.as_str())
    } else if bare == layout.contributors_heading {
      contributors_found = true;
      Some(contributors.as_str())
    } else {
      None
    };

    out.push(Cow::Borrowed(line));
    if let Some(block) = block {
      out.push(Cow::Borrowed(cr));
      for block_line in block.split('\n') {
        out.push(Cow::Owned(format!("{}{}", block_line, cr)));
      }
      skipping = true;
    }
  }

  let mut text = out.join("\n");
  if trailing_newline {
    text.push('\n');
  }

  RenderedDocument {
    text,
    maintainers_found,
    contributors_found,
  }
}
