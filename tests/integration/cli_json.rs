use test_support::FixtureRepo;

#[test]
fn json_mode_prints_rosters_without_writing() {
  let repo = FixtureRepo::new();
  repo.commit_as("Dana", "4+dana@users.noreply.github.com", "one");
  repo.commit_as("dana", "dana@home.example", "two");
  repo.commit_as("Eve", "eve@example.com", "three");
  let merges = repo.write_file("merges.txt", "dana\ndana\neve\n");
  let credits = "## Maintainers\n\nold\n";
  repo.write_file("docs/reference/credits.md", credits);

  let out = test_support::cmd_bin("sync-credits")
    .args([
      "--repo",
      repo.path_str(),
      "--merged-by-file",
      merges.to_str().unwrap(),
      "--json",
    ])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(
    v,
    serde_json::json!({
      "maintainers": [
        { "login": "dana", "merges": 2, "direct_pushes": 2 }
      ],
      "contributors": [
        { "name": "Dana", "commits": 2 },
        { "name": "Eve", "commits": 1 }
      ]
    })
  );
  assert_eq!(repo.read_file("docs/reference/credits.md"), credits);
}

#[test]
fn min_merges_flag_lowers_threshold() {
  let repo = FixtureRepo::new();
  repo.commit_as("Eve", "eve@example.com", "one");
  let merges = repo.write_file("merges.txt", "eve\n");
  repo.write_file("docs/reference/credits.md", "");

  let out = test_support::cmd_bin("sync-credits")
    .args([
      "--repo",
      repo.path_str(),
      "--merged-by-file",
      merges.to_str().unwrap(),
      "--min-merges",
      "1",
      "--json",
    ])
    .output()
    .unwrap();
  assert!(out.status.success());

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["maintainers"][0]["login"], "eve");
  assert_eq!(v["maintainers"][0]["direct_pushes"], 1);
}
