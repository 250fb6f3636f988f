use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "A U Thor";
pub const AUTHOR_EMAIL: &str = "author@example.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository holding `a.txt` and `dir/b.txt`, nothing staged
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_plumb_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("dir").join("b.txt"),
        "bye\n".to_string(),
    ));

    repository_dir
}

/// [`init_repository_dir`] with everything staged and committed as `initial`
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    run_plumb_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();
    plumb_commit(init_repository_dir.path(), "initial")
        .assert()
        .success();

    init_repository_dir
}

/// `plumb` in `dir`, isolated from the user's global config and ignore file
pub fn run_plumb_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("plumb").expect("Failed to find plumb binary");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".git").join("test-xdg"))
        .env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .env_remove("GIT_AUTHOR_DATE")
        .env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// `plumb commit` with a fixed identity and date
pub fn plumb_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_plumb_command(dir, &["commit", "-m", message]);
    cmd.env("GIT_AUTHOR_NAME", AUTHOR_NAME)
        .env("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL)
        .env("GIT_AUTHOR_DATE", AUTHOR_DATE);
    cmd
}
