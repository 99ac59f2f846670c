use anyhow::Result;

use crate::util::run_git;

fn log_lines(repo: &str, branch: &str, format: &str, no_merges: bool) -> Result<String> {
  let mut args: Vec<String> = vec![
    "-c".into(),
    "log.showSignature=false".into(),
    "log".into(),
    branch.into(),
    format!("--format={}", format),
  ];
  if no_merges {
    args.insert(4, "--no-merges".into());
  }
  run_git(repo, &args)
}

/// `committer-name|committer-email` for every non-merge commit on `branch`.
pub fn direct_push_lines(repo: &str, branch: &str) -> Result<String> {
  log_lines(repo, branch, "%cN|%cE", true)
}

/// `author-name|author-email` for every commit reachable from `branch`.
pub fn author_lines(repo: &str, branch: &str) -> Result<String> {
  log_lines(repo, branch, "%aN|%aE", false)
}

pub fn origin_url(repo: &str) -> Option<String> {
  run_git(repo, &["config".into(), "--get".into(), "remote.origin.url".into()])
    .ok()
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
}
