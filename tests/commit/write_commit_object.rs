use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, committed_repository_dir, init_repository_dir, plumb_commit,
    run_plumb_command,
};
use crate::common::{ROOT_COMMIT, SECOND_COMMIT};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn root_commit_matches_the_reference_id(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    plumb_commit(init_repository_dir.path(), "  initial\n\n")
        .assert()
        .success()
        .stdout(format!("[main (root-commit) {}] initial\n", &ROOT_COMMIT[..7]));

    init_repository_dir
        .child(".git/refs/heads/main")
        .assert(format!("{ROOT_COMMIT}\n"));
}

#[rstest]
fn second_commit_links_its_parent(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir.child("c.txt").write_str("hi\n")?;
    run_plumb_command(committed_repository_dir.path(), &["add", "c.txt"])
        .assert()
        .success();

    plumb_commit(committed_repository_dir.path(), "second")
        .assert()
        .success()
        .stdout(format!("[main {}] second\n", &SECOND_COMMIT[..7]));

    run_plumb_command(
        committed_repository_dir.path(),
        &["cat-file", "commit", "HEAD"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("parent {ROOT_COMMIT}\n")));

    Ok(())
}

#[rstest]
fn detached_head_is_advanced_directly(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir
        .child(".git/HEAD")
        .write_str(&format!("{ROOT_COMMIT}\n"))?;
    committed_repository_dir.child("c.txt").write_str("hi\n")?;
    run_plumb_command(committed_repository_dir.path(), &["add", "c.txt"])
        .assert()
        .success();

    plumb_commit(committed_repository_dir.path(), "second")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[detached HEAD "));

    committed_repository_dir
        .child(".git/HEAD")
        .assert(format!("{SECOND_COMMIT}\n"));
    committed_repository_dir
        .child(".git/refs/heads/main")
        .assert(format!("{ROOT_COMMIT}\n"));

    Ok(())
}

#[rstest]
fn identity_comes_from_the_repository_config(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child(".git/config").write_str(
        "[core]\nrepositoryformatversion = 0\nfilemode = true\nbare = false\n\n\
         [user]\nname = \"Config User\"\nemail = \"config@example.com\"\n",
    )?;
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    plumb_commit(init_repository_dir.path(), "configured")
        .assert()
        .success();

    run_plumb_command(init_repository_dir.path(), &["cat-file", "commit", "HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "author Config User <config@example.com> 1672574400 +0000\n",
        ))
        .stdout(predicate::str::contains(AUTHOR_NAME).not())
        .stdout(predicate::str::contains(AUTHOR_EMAIL).not());

    Ok(())
}

#[rstest]
fn missing_identity_fails(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_plumb_command(init_repository_dir.path(), &["commit", "-m", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no identity configured"));

    init_repository_dir
        .child(".git/refs/heads/main")
        .assert(predicate::path::missing());
}

#[rstest]
fn empty_message_is_rejected(init_repository_dir: TempDir) {
    plumb_commit(init_repository_dir.path(), "   ")
        .assert()
        .failure();
}
