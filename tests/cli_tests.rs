use std::fs;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn headerfix() -> Command {
  let mut cmd = Command::cargo_bin("headerfix").expect("binary builds");
  cmd.env_remove("HEADERFIX_CONFIG");
  cmd
}

fn write_license(dir: &TempDir) -> std::path::PathBuf {
  let path = dir.path().join("LICENSE");
  fs::write(&path, "Copyright (c) 2026 Example Co.\nAll rights reserved.\n").expect("write license");
  path
}

#[test]
fn rewrites_file_and_exits_nonzero() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let target = dir.path().join("script.py");
  fs::write(&target, "print('hi')\n")?;

  headerfix()
    .arg("--license-file")
    .arg(&license)
    .arg(&target)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Updated license header in"));

  let content = String::from_utf8(fs::read(&target)?)?;
  assert!(content.starts_with("# Copyright (c) 2026 Example Co.\n\n"));
  assert!(content.ends_with("print('hi')\n"));
  Ok(())
}

#[test]
fn conforming_file_exits_zero() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let target = dir.path().join("script.py");
  fs::write(&target, "# Copyright (c) 2026 Example Co.\n\nprint('hi')\n")?;

  headerfix()
    .arg("--license-file")
    .arg(&license)
    .arg(&target)
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated license header in").not());
  Ok(())
}

#[test]
fn second_invocation_is_a_noop() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let target = dir.path().join("script.py");
  fs::write(&target, "print('hi')\n")?;

  headerfix().arg("--license-file").arg(&license).arg(&target).assert().code(1);
  let after_first = fs::read(&target)?;

  headerfix().arg("--license-file").arg(&license).arg(&target).assert().success();
  assert_eq!(fs::read(&target)?, after_first);
  Ok(())
}

#[test]
fn excerpt_flags_select_license_lines() -> Result<()> {
  let dir = tempdir()?;
  let license = dir.path().join("LICENSE");
  fs::write(&license, "BSD 3-Clause License\n\nCopyright (c) 2026 Example Co.\n")?;
  let target = dir.path().join("script.py");
  fs::write(&target, "print('hi')\n")?;

  headerfix()
    .arg("--license-file")
    .arg(&license)
    .arg("--start")
    .arg("2")
    .arg("--num")
    .arg("1")
    .arg("--add")
    .arg("Part of example-project.")
    .arg(&target)
    .assert()
    .code(1);

  let content = String::from_utf8(fs::read(&target)?)?;
  assert!(content.starts_with("# Copyright (c) 2026 Example Co.\n# Part of example-project.\n\n"));
  Ok(())
}

#[test]
fn add_lines_alone_are_enough() -> Result<()> {
  let dir = tempdir()?;
  let target = dir.path().join("tool.rs");
  fs::write(&target, "fn main() {}\n")?;

  headerfix()
    .arg("--add")
    .arg("Copyright (c) 2026 Example Co.")
    .arg(&target)
    .assert()
    .code(1);

  let content = String::from_utf8(fs::read(&target)?)?;
  assert!(content.starts_with("// Copyright (c) 2026 Example Co.\n\n"));
  Ok(())
}

#[test]
fn keep_before_preserves_shebang() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let target = dir.path().join("tool.py");
  fs::write(&target, "#!/usr/bin/env python\n# old header\nmain()\n")?;

  headerfix()
    .arg("--license-file")
    .arg(&license)
    .arg("--keep-before")
    .arg("#!")
    .arg(&target)
    .assert()
    .code(1);

  let content = String::from_utf8(fs::read(&target)?)?;
  assert!(content.starts_with("#!/usr/bin/env python\n# Copyright (c) 2026 Example Co.\n\n"));
  Ok(())
}

#[test]
fn unrecognized_extension_aborts_the_run() -> Result<()> {
  let dir = tempdir()?;
  let target = dir.path().join("data.xyz");
  fs::write(&target, "payload\n")?;

  headerfix()
    .arg("--add")
    .arg("header line")
    .arg(&target)
    .assert()
    .failure()
    .stderr(predicate::str::contains("No comment prefix known"));

  // The file must be untouched
  assert_eq!(fs::read(&target)?, b"payload\n");
  Ok(())
}

#[test]
fn explicit_comment_prefix_overrides_lookup() -> Result<()> {
  let dir = tempdir()?;
  let target = dir.path().join("data.xyz");
  fs::write(&target, "payload\n")?;

  headerfix()
    .arg("--comment-prefix")
    .arg("//")
    .arg("--add")
    .arg("header line")
    .arg(&target)
    .assert()
    .code(1);

  assert_eq!(fs::read(&target)?, b"// header line\n\npayload\n");
  Ok(())
}

#[test]
fn config_file_extends_the_prefix_table() -> Result<()> {
  let dir = tempdir()?;
  let config = dir.path().join("headerfix.toml");
  fs::write(&config, "[comment-prefixes]\nxyz = \"%%\"\n")?;
  let target = dir.path().join("data.xyz");
  fs::write(&target, "payload\n")?;

  headerfix()
    .arg("--config")
    .arg(&config)
    .arg("--add")
    .arg("header line")
    .arg(&target)
    .assert()
    .code(1);

  assert_eq!(fs::read(&target)?, b"%% header line\n\npayload\n");
  Ok(())
}

#[test]
fn unreadable_license_file_fails_fast() -> Result<()> {
  let dir = tempdir()?;
  let target = dir.path().join("script.py");
  fs::write(&target, "print('hi')\n")?;

  headerfix()
    .arg("--license-file")
    .arg("/nonexistent/LICENSE")
    .arg(&target)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read license file"));

  assert_eq!(fs::read(&target)?, b"print('hi')\n");
  Ok(())
}

#[test]
fn dry_run_reports_without_writing() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let target = dir.path().join("script.py");
  fs::write(&target, "print('hi')\n")?;

  headerfix()
    .arg("--dry-run")
    .arg("--license-file")
    .arg(&license)
    .arg(&target)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Would update license header in"));

  assert_eq!(fs::read(&target)?, b"print('hi')\n");
  Ok(())
}

#[test]
fn save_diff_appends_per_file_diffs() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let diff_path = dir.path().join("changes.diff");
  let first = dir.path().join("a.py");
  let second = dir.path().join("b.py");
  fs::write(&first, "a = 1\n")?;
  fs::write(&second, "b = 2\n")?;

  headerfix()
    .arg("--dry-run")
    .arg("--save-diff")
    .arg(&diff_path)
    .arg("--license-file")
    .arg(&license)
    .arg(&first)
    .arg(&second)
    .assert()
    .code(1);

  let diff = String::from_utf8(fs::read(&diff_path)?)?;
  assert!(diff.contains("Diff for"));
  assert!(diff.contains("+# Copyright (c) 2026 Example Co."));
  assert!(diff.contains(" a = 1"));
  assert!(diff.contains(" b = 2"));
  Ok(())
}

#[test]
fn stale_copyright_year_warns_on_stderr() -> Result<()> {
  let dir = tempdir()?;
  let target = dir.path().join("script.py");
  fs::write(&target, "# Copyright (c) 2020 Example Co.\n\nprint('hi')\n")?;

  headerfix()
    .arg("--add")
    .arg("Copyright (c) 2020 Example Co.")
    .arg(&target)
    .assert()
    .success()
    .stderr(predicate::str::contains("copyright end year 2020"));
  Ok(())
}

#[test]
fn multiple_files_aggregate_the_exit_code() -> Result<()> {
  let dir = tempdir()?;
  let license = write_license(&dir);
  let conforming = dir.path().join("ok.py");
  let stale = dir.path().join("stale.py");
  fs::write(&conforming, "# Copyright (c) 2026 Example Co.\n\nx = 1\n")?;
  fs::write(&stale, "y = 2\n")?;

  headerfix()
    .arg("--license-file")
    .arg(&license)
    .arg(&conforming)
    .arg(&stale)
    .assert()
    .code(1)
    .stdout(predicate::str::contains(format!(
      "Updated license header in {}",
      stale.display()
    )))
    .stdout(predicate::str::contains(format!("Updated license header in {}", conforming.display())).not());
  Ok(())
}

#[test]
fn missing_file_argument_is_a_usage_error() {
  headerfix().assert().failure().stderr(predicate::str::contains("Usage"));
}
