use crate::common::command::{committed_repository_dir, init_repository_dir, run_plumb_command};
use crate::common::{ROOT_COMMIT, ROOT_TREE};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn head_resolves_to_the_commit(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["rev-parse", "HEAD"])
        .assert()
        .success()
        .stdout(format!("{ROOT_COMMIT}\n"));
}

#[rstest]
fn commit_peels_to_its_tree(committed_repository_dir: TempDir) {
    run_plumb_command(
        committed_repository_dir.path(),
        &["rev-parse", "-t", "tree", &ROOT_COMMIT[..8]],
    )
    .assert()
    .success()
    .stdout(format!("{ROOT_TREE}\n"));
}

#[rstest]
fn tree_cannot_peel_to_a_commit(committed_repository_dir: TempDir) {
    run_plumb_command(
        committed_repository_dir.path(),
        &["rev-parse", "-t", "commit", ROOT_TREE],
    )
    .assert()
    .failure();
}

#[rstest]
fn hex_named_branch_resolves(committed_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir
        .child(".git/refs/heads/cafe")
        .write_str(&format!("{ROOT_COMMIT}\n"))?;

    run_plumb_command(committed_repository_dir.path(), &["rev-parse", "cafe"])
        .assert()
        .success()
        .stdout(format!("{ROOT_COMMIT}\n"));

    Ok(())
}

#[rstest]
fn unborn_head_is_no_such_reference(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["rev-parse", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such reference"));
}

#[rstest]
fn names_that_are_not_hex_resolve_to_nothing(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["rev-parse", "main"])
        .assert()
        .failure();
}
