//! test-support: helpers for sync-credits integration tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```no_run
//! use test_support::{init_tracing, FixtureRepo};
//!
//! init_tracing();
//! let repo = FixtureRepo::new();
//! repo.commit_as("Alice", "1+alice@users.noreply.github.com", "first");
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};
use std::process::Command;

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// `RUST_LOG` is cleared so the binary's stderr stays at its default level.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run git in `repo`, panicking with the arguments on failure.
pub fn run(repo: &Path, args: &[&str]) {
    let status = Command::new("git").args(args).current_dir(repo).status().unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

/// A throwaway git repository on branch `main`, deleted on drop.
pub struct FixtureRepo {
    dir: tempfile::TempDir,
}

impl FixtureRepo {
    pub fn new() -> Self {
        let dir = tempfile::TempDir::new().expect("create tempdir");
        run(dir.path(), &["init", "-q", "-b", "main"]);
        run(dir.path(), &["config", "user.name", "Fixture Bot"]);
        run(dir.path(), &["config", "user.email", "fixture@example.com"]);
        run(dir.path(), &["config", "commit.gpgsign", "false"]);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> &str {
        self.dir.path().to_str().expect("utf-8 temp path")
    }

    /// Empty commit with author and committer both set to `name <email>`.
    pub fn commit_as(&self, name: &str, email: &str, message: &str) {
        self.commit_with(name, email, name, email, message);
    }

    /// Empty commit with distinct author and committer identities.
    pub fn commit_with(&self, author: &str, author_email: &str, committer: &str, committer_email: &str, message: &str) {
        let status = Command::new("git")
            .args(["commit", "-q", "--allow-empty", "-m", message])
            .current_dir(self.path())
            .env("GIT_AUTHOR_NAME", author)
            .env("GIT_AUTHOR_EMAIL", author_email)
            .env("GIT_COMMITTER_NAME", committer)
            .env("GIT_COMMITTER_EMAIL", committer_email)
            .env("GIT_AUTHOR_DATE", "2026-01-15T10:00:00")
            .env("GIT_COMMITTER_DATE", "2026-01-15T10:00:00")
            .status()
            .unwrap();
        assert!(status.success(), "git commit {:?} failed", message);
    }

    /// Create `branch` from main, commit on it as `name <email>`, then merge it back with `--no-ff`.
    pub fn merge_topic(&self, branch: &str, name: &str, email: &str) {
        run(self.path(), &["checkout", "-q", "-b", branch]);
        self.commit_as(name, email, &format!("work on {}", branch));
        run(self.path(), &["checkout", "-q", "main"]);
        run(self.path(), &["merge", "-q", "--no-ff", "-m", &format!("Merge {}", branch), branch]);
    }

    /// Write `contents` at `rel` inside the repository, creating parent directories.
    pub fn write_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn read_file(&self, rel: &str) -> String {
        let path = self.path().join(rel);
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
    }
}

impl Default for FixtureRepo {
    fn default() -> Self {
        Self::new()
    }
}
