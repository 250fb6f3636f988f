use crate::common::command::{init_repository_dir, repository_dir, run_plumb_command};
use crate::common::file::write_generated_files;
use crate::common::{BYE_BLOB, HI_BLOB};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn hash_without_writing_stores_nothing(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .success()
        .stdout(format!("{HI_BLOB}\n"));

    init_repository_dir
        .child(format!(".git/objects/{}/{}", &HI_BLOB[..2], &HI_BLOB[2..]))
        .assert(predicate::path::missing());
}

#[rstest]
fn write_blob_object_successfully(init_repository_dir: TempDir) {
    run_plumb_command(
        init_repository_dir.path(),
        &["hash-object", "-w", "dir/b.txt"],
    )
    .assert()
    .success()
    .stdout(format!("{BYE_BLOB}\n"));

    init_repository_dir
        .child(format!(".git/objects/{}/{}", &BYE_BLOB[..2], &BYE_BLOB[2..]))
        .assert(predicate::path::is_file());
}

#[rstest]
fn write_generated_files_successfully(init_repository_dir: TempDir) {
    for file in write_generated_files(init_repository_dir.path(), 3) {
        let name = file.path.file_name().unwrap().to_string_lossy().into_owned();

        run_plumb_command(init_repository_dir.path(), &["hash-object", "-w", &name])
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$").unwrap());
    }
}

#[rstest]
fn hashing_works_outside_a_repository(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("a.txt").write_str("hi\n")?;

    run_plumb_command(repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .success()
        .stdout(format!("{HI_BLOB}\n"));

    Ok(())
}

#[rstest]
fn payload_must_parse_as_the_given_type(init_repository_dir: TempDir) {
    run_plumb_command(
        init_repository_dir.path(),
        &["hash-object", "-t", "commit", "a.txt"],
    )
    .assert()
    .failure();
}
