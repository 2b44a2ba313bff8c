mod common;

use std::path::Path;
use std::process::Command;

use serial_test::serial;
use tempfile::TempDir;

use common::FixedClock;
use pipeline_secrets::app::App;
use pipeline_secrets::app_deps::SystemCommandRunner;
use pipeline_secrets::config::Config;
use pipeline_secrets::git::GitRepository;

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("GIT_AUTHOR_NAME", "Pipeline Test")
        .env("GIT_AUTHOR_EMAIL", "pipeline@example.com")
        .env("GIT_COMMITTER_NAME", "Pipeline Test")
        .env("GIT_COMMITTER_EMAIL", "pipeline@example.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A clone of a local bare remote with one pushed commit and an upstream set.
fn checkout() -> (TempDir, TempDir) {
    let remote = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    assert!(git(remote.path(), &["init", "--bare", "--quiet"]));
    assert!(git(work.path(), &["init", "--quiet"]));
    assert!(git(
        work.path(),
        &["remote", "add", "origin", &remote.path().display().to_string()]
    ));
    std::fs::write(work.path().join("README.md"), "demo\n").unwrap();
    assert!(git(work.path(), &["add", "README.md"]));
    assert!(git(work.path(), &["commit", "--quiet", "-m", "initial"]));
    assert!(git(work.path(), &["push", "--quiet", "-u", "origin", "HEAD"]));

    (remote, work)
}

#[tokio::test]
#[serial]
async fn test_exercise_pipeline_against_real_git() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let (remote, work) = checkout();

    // the commit made by the tool picks its identity up from the environment
    let saved: Vec<_> = ["GIT_AUTHOR_NAME", "GIT_AUTHOR_EMAIL", "GIT_COMMITTER_NAME", "GIT_COMMITTER_EMAIL"]
        .iter()
        .map(|k| (*k, std::env::var_os(k)))
        .collect();
    unsafe {
        std::env::set_var("GIT_AUTHOR_NAME", "Pipeline Test");
        std::env::set_var("GIT_AUTHOR_EMAIL", "pipeline@example.com");
        std::env::set_var("GIT_COMMITTER_NAME", "Pipeline Test");
        std::env::set_var("GIT_COMMITTER_EMAIL", "pipeline@example.com");
    }

    let runner = SystemCommandRunner;
    let repo = GitRepository::new(&runner, "git".to_string(), work.path().to_path_buf());
    let result = App::exercise_pipeline(&repo, &FixedClock::new(), &Config::default()).await;

    for (key, value) in saved {
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    let run = result.unwrap();
    assert!(run.pushed);
    assert_eq!(run.marker_file_name, "pipeline-test-20260501-123045.txt");

    // the remote now has the marker in its history
    let log = Command::new("git")
        .arg("--git-dir")
        .arg(remote.path())
        .args(["log", "--all", "--name-only", "--pretty=format:%s"])
        .output()
        .unwrap();
    let log = String::from_utf8_lossy(&log.stdout);
    assert!(log.contains("pipeline-test-20260501-123045.txt"), "{}", log);
    assert!(log.contains("test: trigger pipeline run 2026-05-01 12:30:45"), "{}", log);
}
