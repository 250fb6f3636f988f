use crate::common::command::{repository_dir, run_plumb_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_plumb_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty plumb repository in",
        ));

    let git = repository_dir.child(".git");
    git.child("objects").assert(predicate::path::is_dir());
    git.child("refs/heads").assert(predicate::path::is_dir());
    git.child("refs/tags").assert(predicate::path::is_dir());
    git.child("info").assert(predicate::path::is_dir());
    git.child("description").assert(predicate::path::is_file());
    git.child("HEAD").assert("ref: refs/heads/main\n");
    git.child("config")
        .assert(predicate::str::contains("repositoryformatversion = 0"));

    Ok(())
}

#[rstest]
fn init_at_a_nested_path_creates_it(repository_dir: TempDir) {
    run_plumb_command(repository_dir.path(), &["init", "deep/repo"])
        .assert()
        .success();

    repository_dir
        .child("deep/repo/.git/HEAD")
        .assert("ref: refs/heads/main\n");
}

#[rstest]
fn reinit_keeps_the_existing_head(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_plumb_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir
        .child(".git/HEAD")
        .write_str("ref: refs/heads/trunk\n")?;

    run_plumb_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
        .child(".git/HEAD")
        .assert("ref: refs/heads/trunk\n");

    Ok(())
}
