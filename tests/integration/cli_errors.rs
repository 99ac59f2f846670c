use predicates::prelude::*;
use test_support::FixtureRepo;

const CREDITS: &str = "# Credits\n\n## Maintainers\n\nold\n\n## Contributors\n\nold\n";

#[test]
fn missing_hosting_repo_is_fatal() {
  let repo = FixtureRepo::new();
  repo.commit_as("Alice", "alice@example.com", "first");
  repo.write_file("docs/reference/credits.md", CREDITS);

  test_support::cmd_bin("sync-credits")
    .args(["--repo", repo.path_str()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--github-repo"));
  assert_eq!(repo.read_file("docs/reference/credits.md"), CREDITS);
}

#[test]
fn git_failure_leaves_document_untouched() {
  let repo = FixtureRepo::new();
  repo.commit_as("Alice", "alice@example.com", "first");
  let merges = repo.write_file("merges.txt", "alice\nalice\n");
  repo.write_file("docs/reference/credits.md", CREDITS);

  test_support::cmd_bin("sync-credits")
    .args([
      "--repo",
      repo.path_str(),
      "--merged-by-file",
      merges.to_str().unwrap(),
      "--branch",
      "trunk",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed"));
  assert_eq!(repo.read_file("docs/reference/credits.md"), CREDITS);
}

#[test]
fn unreadable_merge_log_is_fatal() {
  let repo = FixtureRepo::new();
  repo.commit_as("Alice", "alice@example.com", "first");
  repo.write_file("docs/reference/credits.md", CREDITS);

  test_support::cmd_bin("sync-credits")
    .args(["--repo", repo.path_str(), "--merged-by-file", "/nonexistent/merges.txt"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("merges.txt"));
  assert_eq!(repo.read_file("docs/reference/credits.md"), CREDITS);
}

#[test]
fn unrecognized_heading_is_left_alone_with_warning() {
  let repo = FixtureRepo::new();
  repo.commit_as("Alice", "alice@example.com", "first");
  let merges = repo.write_file("merges.txt", "");
  let doc = "## Core Team\n\nhand-written\n\n## Contributors\n\nold\n";
  repo.write_file("docs/reference/credits.md", doc);

  test_support::cmd_bin("sync-credits")
    .args([
      "--repo",
      repo.path_str(),
      "--merged-by-file",
      merges.to_str().unwrap(),
      "--now-override",
      "2026-10-19T08:30:00",
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("section not found"));

  assert_eq!(
    repo.read_file("docs/reference/credits.md"),
    "## Core Team\n\nhand-written\n\n## Contributors\n\n\
     1 contributors: Alice (1)\n\n_Last updated: 2026-10-19 08:30 UTC_\n"
  );
}

#[test]
fn invalid_now_override_is_rejected() {
  let repo = FixtureRepo::new();
  let merges = repo.write_file("merges.txt", "");

  test_support::cmd_bin("sync-credits")
    .args([
      "--repo",
      repo.path_str(),
      "--merged-by-file",
      merges.to_str().unwrap(),
      "--now-override",
      "tomorrow",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--now-override"));
}
