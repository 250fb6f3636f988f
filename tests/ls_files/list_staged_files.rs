use crate::common::command::{init_repository_dir, run_plumb_command};
use crate::common::HI_BLOB;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn no_index_lists_nothing(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn staged_files_are_listed_in_name_order(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    run_plumb_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("a.txt\ndir/b.txt\n");
}

#[rstest]
fn verbose_listing_shows_entry_details(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_plumb_command(init_repository_dir.path(), &["ls-files", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Index file format v2, containing 1 entries\na.txt\n",
        ))
        .stdout(predicate::str::contains("regular file with perms: 644"))
        .stdout(predicate::str::contains(format!("on blob: {HI_BLOB}")))
        .stdout(predicate::str::contains("stage=0 assume_valid=false"));
}
