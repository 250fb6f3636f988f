use crate::common::ROOT_COMMIT;
use crate::common::command::{committed_repository_dir, init_repository_dir, run_plumb_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::rstest;

#[rstest]
fn fresh_repository_has_no_refs(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["show-ref"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn refs_are_listed_sorted(committed_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir
        .child(".git/refs/tags/v1")
        .write_str(&format!("{ROOT_COMMIT}\n"))?;
    committed_repository_dir
        .child(".git/refs/heads/alias")
        .write_str("ref: refs/heads/main\n")?;

    run_plumb_command(committed_repository_dir.path(), &["show-ref"])
        .assert()
        .success()
        .stdout(format!(
            "{ROOT_COMMIT} refs/heads/alias\n{ROOT_COMMIT} refs/heads/main\n{ROOT_COMMIT} refs/tags/v1\n"
        ));

    Ok(())
}
