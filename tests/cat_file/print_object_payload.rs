use crate::common::command::{committed_repository_dir, init_repository_dir, run_plumb_command};
use crate::common::{HI_BLOB, ROOT_TREE};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn print_blob_by_full_id(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["cat-file", "blob", HI_BLOB])
        .assert()
        .success()
        .stdout("hi\n");
}

#[rstest]
fn print_blob_by_uppercase_prefix(committed_repository_dir: TempDir) {
    let prefix = HI_BLOB[..6].to_ascii_uppercase();

    run_plumb_command(committed_repository_dir.path(), &["cat-file", "blob", &prefix])
        .assert()
        .success()
        .stdout("hi\n");
}

#[rstest]
fn head_peels_to_its_tree(committed_repository_dir: TempDir) {
    let output = run_plumb_command(committed_repository_dir.path(), &["cat-file", "tree", "HEAD"])
        .assert()
        .success()
        .get_output()
        .clone();

    // raw tree payload: binary ids after each NUL
    assert!(output.stdout.starts_with(b"100644 a.txt\0"));
    assert!(
        output
            .stdout
            .windows(b"40000 dir\0".len())
            .any(|window| window == b"40000 dir\0")
    );
}

#[rstest]
fn tree_cannot_be_read_as_a_commit(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["cat-file", "commit", ROOT_TREE])
        .assert()
        .failure();
}

#[rstest]
fn unknown_names_fail(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["cat-file", "blob", "deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deadbeef"));
}
