use crate::common::command::{init_repository_dir, run_plumb_command};
use crate::common::file::write_generated_files;
use crate::common::{BYE_BLOB, HI_BLOB};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    init_repository_dir
        .child(".git/index")
        .assert(predicate::path::is_file());
    for blob in [HI_BLOB, BYE_BLOB] {
        init_repository_dir
            .child(format!(".git/objects/{}/{}", &blob[..2], &blob[2..]))
            .assert(predicate::path::is_file());
    }
    run_plumb_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("a.txt\ndir/b.txt\n");
}

#[rstest]
fn add_files_incrementally(init_repository_dir: TempDir) {
    let generated = write_generated_files(init_repository_dir.path(), 3);

    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_plumb_command(init_repository_dir.path(), &["add", "dir/b.txt"])
        .assert()
        .success();
    for file in &generated {
        run_plumb_command(
            init_repository_dir.path(),
            &["add", &file.path.file_name().unwrap().to_string_lossy()],
        )
        .assert()
        .success();
    }

    let output = run_plumb_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listed = String::from_utf8(output).unwrap();

    assert_eq!(listed.lines().count(), 2 + generated.len());
    assert!(listed.lines().any(|line| line == "dir/b.txt"));
}

#[rstest]
fn adding_from_a_subdirectory_uses_repository_paths(init_repository_dir: TempDir) {
    run_plumb_command(&init_repository_dir.path().join("dir"), &["add", "b.txt"])
        .assert()
        .success();

    run_plumb_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout("dir/b.txt\n");
}

#[rstest]
fn adding_a_non_existent_file_stages_nothing(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));

    init_repository_dir
        .child(".git/index")
        .assert(predicate::path::missing());
}

#[rstest]
fn metadata_directory_cannot_be_staged(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", ".git/HEAD"])
        .assert()
        .failure();
}

#[rstest]
fn restaging_a_modified_file_replaces_its_entry(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    init_repository_dir.child("a.txt").write_str("bye\n")?;
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_plumb_command(init_repository_dir.path(), &["ls-files", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("containing 1 entries"))
        .stdout(predicate::str::contains(format!("on blob: {BYE_BLOB}")));

    Ok(())
}
