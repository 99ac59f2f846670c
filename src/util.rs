// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, subprocess invocation, the run clock, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; paths; clap CommandFactory
// outputs: Canonicalized paths, subprocess stdout, the effective "now", man page text
// side_effects: run_tool/run_git/run_gh invoke subprocesses
// invariants:
// - run_tool returns stdout only on a zero exit status
// - effective_now is the override when given, otherwise the current UTC time
// errors: run_tool surfaces program + args + stderr; spawn failures carry context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::CommandFactory;

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// Join `path` onto `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    base.join(path)
  }
}

/// Run an external program in `dir` and return its stdout.
pub fn run_tool(program: &str, dir: &str, args: &[String]) -> Result<String> {
  tracing::debug!(program, ?args, dir, "spawning");
  let out = Command::new(program)
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("spawning {} {:?}", program, args))?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::bail!("{} {:?} failed: {}", program, args, stderr.trim())
  }
}

pub fn run_git(repo: &str, args: &[String]) -> Result<String> {
  run_tool("git", repo, args)
}

pub fn run_gh(repo: &str, args: &[String]) -> Result<String> {
  run_tool("gh", repo, args)
}

/// Parse the hidden `--now-override` value (`YYYY-MM-DDTHH:MM:SS`, read as UTC).
pub fn parse_now_override(s: &str) -> Result<DateTime<Utc>> {
  let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S")
    .with_context(|| format!("invalid --now-override {:?} (expected YYYY-MM-DDTHH:MM:SS)", s))?;
  Ok(naive.and_utc())
}

/// Returns the effective "now" given an optional override.
///
/// Centralizes test determinism without sprinkling `Utc::now()` through the code.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
