use crate::common::command::{committed_repository_dir, run_plumb_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_into_a_missing_directory(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["checkout", "HEAD", "out"])
        .assert()
        .success();

    committed_repository_dir.child("out/a.txt").assert("hi\n");
    committed_repository_dir.child("out/dir/b.txt").assert("bye\n");
}

#[rstest]
fn checkout_into_an_empty_directory(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = TempDir::new()?;

    run_plumb_command(
        committed_repository_dir.path(),
        &["checkout", "HEAD", &target.path().to_string_lossy()],
    )
    .assert()
    .success();

    target.child("a.txt").assert("hi\n");
    target.child("dir/b.txt").assert("bye\n");

    Ok(())
}

#[rstest]
fn non_empty_target_is_refused(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir.child("out/keep.txt").write_str("keep\n")?;

    run_plumb_command(committed_repository_dir.path(), &["checkout", "HEAD", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not empty"));

    committed_repository_dir
        .child("out/a.txt")
        .assert(predicate::path::missing());

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn executable_mode_survives_checkout(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    use crate::common::command::plumb_commit;
    use std::os::unix::fs::PermissionsExt;

    let script = committed_repository_dir.child("run.sh");
    script.write_str("#!/bin/sh\n")?;
    std::fs::set_permissions(script.path(), std::fs::Permissions::from_mode(0o755))?;
    run_plumb_command(committed_repository_dir.path(), &["add", "run.sh"])
        .assert()
        .success();
    plumb_commit(committed_repository_dir.path(), "script")
        .assert()
        .success();

    run_plumb_command(committed_repository_dir.path(), &["checkout", "HEAD", "out"])
        .assert()
        .success();

    let mode = std::fs::metadata(committed_repository_dir.path().join("out/run.sh"))?
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);

    Ok(())
}
