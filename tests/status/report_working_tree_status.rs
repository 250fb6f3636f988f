use crate::common::ROOT_COMMIT;
use crate::common::command::{
    committed_repository_dir, init_repository_dir, run_plumb_command,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn fresh_repository_lists_everything_as_untracked(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "On branch main\n\
             Changes to be committed:\n\
             \n\
             Changes not staged for commit:\n\
             \n\
             Untracked files:\n  a.txt\n  dir/b.txt\n",
        );
}

#[rstest]
fn clean_tree_reports_no_changes(committed_repository_dir: TempDir) {
    run_plumb_command(committed_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "On branch main\n\
             Changes to be committed:\n\
             \n\
             Changes not staged for commit:\n\
             \n\
             Untracked files:\n",
        );
}

#[rstest]
fn index_is_compared_with_the_head_tree(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    committed_repository_dir.child("a.txt").write_str("changed\n")?;
    committed_repository_dir.child("c.txt").write_str("new\n")?;
    run_plumb_command(dir, &["add", "a.txt", "c.txt"])
        .assert()
        .success();
    run_plumb_command(dir, &["rm", "--cached", "dir/b.txt"])
        .assert()
        .success();

    run_plumb_command(dir, &["status"]).assert().success().stdout(
        "On branch main\n\
         Changes to be committed:\n\
         \x20 modified: a.txt\n\
         \x20 added:    c.txt\n\
         \x20 deleted:  dir/b.txt\n\
         \n\
         Changes not staged for commit:\n\
         \n\
         Untracked files:\n  dir/b.txt\n",
    );

    Ok(())
}

#[rstest]
fn worktree_is_compared_with_the_index(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir
        .child("a.txt")
        .write_str("edited in place\n")?;
    std::fs::remove_file(committed_repository_dir.child("dir/b.txt").path())?;
    committed_repository_dir.child("new.txt").write_str("new\n")?;

    run_plumb_command(committed_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "On branch main\n\
             Changes to be committed:\n\
             \n\
             Changes not staged for commit:\n\
             \x20 modified: a.txt\n\
             \x20 deleted:  dir/b.txt\n\
             \n\
             Untracked files:\n  new.txt\n",
        );

    Ok(())
}

#[rstest]
fn ignored_files_are_not_untracked(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir
        .child(".git/info/exclude")
        .write_str("*.log\nbuild/\n")?;
    committed_repository_dir.child("debug.log").write_str("x\n")?;
    committed_repository_dir.child("build/out.o").write_str("x\n")?;
    committed_repository_dir.child("notes.txt").write_str("x\n")?;

    run_plumb_command(committed_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Untracked files:\n  notes.txt\n"));

    Ok(())
}

#[rstest]
fn detached_head_is_reported_by_id(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir
        .child(".git/HEAD")
        .write_str(&format!("{ROOT_COMMIT}\n"))?;

    run_plumb_command(committed_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "HEAD detached at {}\n",
            &ROOT_COMMIT[..7]
        )));

    Ok(())
}
