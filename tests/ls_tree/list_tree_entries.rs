use crate::common::command::{committed_repository_dir, run_plumb_command};
use crate::common::{BYE_BLOB, DIR_TREE, HI_BLOB, ROOT_TREE};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_top_level_entries_of_head(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_plumb_command(committed_repository_dir.path(), &["ls-tree", "HEAD"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        String::from_utf8(output)?,
        format!("100644 blob {HI_BLOB}\ta.txt\n040000 tree {DIR_TREE}\tdir\n")
    );

    Ok(())
}

#[rstest]
fn list_all_blobs_recursively(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output =
        run_plumb_command(committed_repository_dir.path(), &["ls-tree", "-r", ROOT_TREE])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

    assert_eq!(
        String::from_utf8(output)?,
        format!("100644 blob {HI_BLOB}\ta.txt\n100644 blob {BYE_BLOB}\tdir/b.txt\n")
    );

    Ok(())
}

#[rstest]
fn blobs_are_not_trees(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["ls-tree", HI_BLOB])
        .assert()
        .failure();
}
