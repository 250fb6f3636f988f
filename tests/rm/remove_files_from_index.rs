use crate::common::command::{init_repository_dir, run_plumb_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn staged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    run_plumb_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    init_repository_dir
}

#[rstest]
fn remove_deletes_the_file_and_the_entry(staged_repository_dir: TempDir) {
    run_plumb_command(staged_repository_dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    staged_repository_dir
        .child("a.txt")
        .assert(predicate::path::missing());
    run_plumb_command(staged_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("dir/b.txt\n");
}

#[rstest]
fn cached_removal_keeps_the_file(staged_repository_dir: TempDir) {
    run_plumb_command(staged_repository_dir.path(), &["rm", "--cached", "dir/b.txt"])
        .assert()
        .success();

    staged_repository_dir.child("dir/b.txt").assert("bye\n");
    run_plumb_command(staged_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("a.txt\n");
}

#[rstest]
fn removing_deleted_files_from_index(staged_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::remove_file(staged_repository_dir.path().join("a.txt"))?;

    run_plumb_command(staged_repository_dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    run_plumb_command(staged_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("dir/b.txt\n");

    Ok(())
}

#[rstest]
fn unstaged_paths_abort_the_whole_removal(staged_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    staged_repository_dir.child("new.txt").write_str("new\n")?;

    run_plumb_command(staged_repository_dir.path(), &["rm", "a.txt", "new.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("new.txt"));

    staged_repository_dir.child("a.txt").assert("hi\n");
    run_plumb_command(staged_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("a.txt\ndir/b.txt\n");

    Ok(())
}
