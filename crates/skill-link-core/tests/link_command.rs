#![cfg(unix)]

mod support;

use std::fs;

use skill_link_core::commands::{LinkCommand, LinkOptions, UnlinkCommand, UnlinkOptions};
use skill_link_core::error::LinkError;
use skill_link_core::skills::{ConflictKind, FailureReason, LinkOutcome, PairOutcome};
use skill_link_core::types::TargetId;

use support::{Fixture, write_file};

#[test]
fn link_creates_symlink_to_skill_directory() {
    let fx = Fixture::with_skills(&["demo"]);
    let ctx = fx.ctx();

    let report = LinkCommand::new(&ctx)
        .execute(&LinkOptions::skills(TargetId::Claude, ["demo"]))
        .expect("link should succeed");

    assert!(report.is_success());
    assert_eq!(report.outcome_for("demo"), Some(&LinkOutcome::Created));

    let link = fx.link_path(TargetId::Claude, "demo");
    let meta = fs::symlink_metadata(&link).expect("link should exist");
    assert!(meta.file_type().is_symlink());
    assert_eq!(
        fs::canonicalize(&link).expect("canonicalize link"),
        fs::canonicalize(fx.repo.join("demo")).expect("canonicalize source")
    );
    assert!(link.join("SKILL.md").is_file());
}

#[test]
fn link_creates_missing_skills_directory() {
    let fx = Fixture::with_skills(&["demo"]);
    assert!(!fx.skills_dir(TargetId::Cursor).exists());

    let report = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::all(TargetId::Cursor))
        .expect("link should succeed");

    assert!(report.is_success());
    assert!(fx.skills_dir(TargetId::Cursor).is_dir());
}

#[test]
fn linking_twice_reports_already_linked() {
    let fx = Fixture::with_skills(&["demo"]);
    let ctx = fx.ctx();
    let cmd = LinkCommand::new(&ctx);
    let options = LinkOptions::skills(TargetId::Claude, ["demo"]);

    let first = cmd.execute(&options).expect("first link should succeed");
    let second = cmd.execute(&options).expect("second link should succeed");

    assert_eq!(first.outcome_for("demo"), Some(&LinkOutcome::Created));
    assert_eq!(second.outcome_for("demo"), Some(&LinkOutcome::AlreadyLinked));
    assert!(second.is_success());
}

#[test]
fn link_all_follows_catalog_order() {
    let fx = Fixture::with_skills(&["zeta", "alpha", "mid"]);

    let report = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::all(TargetId::Claude))
        .expect("link should succeed");

    let names: Vec<_> = report.results.iter().map(|r| r.skill.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn unknown_skill_rejects_request_before_any_change() {
    let fx = Fixture::with_skills(&["a"]);

    let err = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::skills(TargetId::Claude, ["a", "missing"]))
        .unwrap_err();

    match err {
        LinkError::SkillNotFound { name, available } => {
            assert_eq!(name, "missing");
            assert_eq!(available, vec!["a".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(fs::symlink_metadata(fx.link_path(TargetId::Claude, "a")).is_err());
}

#[test]
fn conflicting_file_is_skipped_without_force() {
    let fx = Fixture::with_skills(&["demo"]);
    let dest = fx.link_path(TargetId::Claude, "demo");
    write_file(&dest, "user data");

    let report = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::all(TargetId::Claude))
        .expect("link should succeed");

    assert_eq!(
        report.outcome_for("demo"),
        Some(&LinkOutcome::SkippedConflict(ConflictKind::File))
    );
    assert!(!report.is_success());
    assert_eq!(fs::read_to_string(&dest).expect("file kept"), "user data");
}

#[test]
fn link_all_continues_past_conflicting_pair() {
    let fx = Fixture::with_skills(&["a", "b"]);
    write_file(&fx.link_path(TargetId::Claude, "a"), "user data");

    let report = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::all(TargetId::Claude))
        .expect("link should succeed");

    assert_eq!(
        report.outcome_for("a"),
        Some(&LinkOutcome::SkippedConflict(ConflictKind::File))
    );
    assert_eq!(report.outcome_for("b"), Some(&LinkOutcome::Created));
    assert!(!report.is_success());
    assert_eq!(report.failures(), 1);
    assert!(fx.link_path(TargetId::Claude, "b").join("SKILL.md").is_file());
}

#[test]
fn force_replaces_file_directory_and_foreign_link() {
    let fx = Fixture::with_skills(&["file", "dir", "foreign"]);
    let other = fx.repo.join("..").join("elsewhere");
    fs::create_dir_all(&other).expect("create_dir_all should succeed");

    write_file(&fx.link_path(TargetId::Claude, "file"), "x");
    write_file(&fx.link_path(TargetId::Claude, "dir").join("inner.txt"), "y");
    std::os::unix::fs::symlink(&other, fx.link_path(TargetId::Claude, "foreign"))
        .expect("symlink should succeed");

    let report = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::all(TargetId::Claude).with_force(true))
        .expect("link should succeed");

    assert!(report.is_success());
    assert_eq!(
        report.outcome_for("file"),
        Some(&LinkOutcome::Replaced(ConflictKind::File))
    );
    assert_eq!(
        report.outcome_for("dir"),
        Some(&LinkOutcome::Replaced(ConflictKind::Directory))
    );
    assert!(matches!(
        report.outcome_for("foreign"),
        Some(LinkOutcome::Replaced(ConflictKind::ForeignLink { .. }))
    ));

    for name in ["file", "dir", "foreign"] {
        let link = fx.link_path(TargetId::Claude, name);
        assert!(link.join("SKILL.md").is_file(), "{name} should now be linked");
    }
    assert!(other.is_dir(), "foreign link target must not be deleted");
}

#[test]
fn blocked_skills_directory_fails_every_pair() {
    let fx = Fixture::with_skills(&["a", "b"]);
    write_file(&fx.home.join(".claude"), "not a directory");

    let report = LinkCommand::new(&fx.ctx())
        .execute(&LinkOptions::all(TargetId::Claude))
        .expect("command should still return a report");

    assert!(!report.is_success());
    assert_eq!(report.failures(), 2);
    for result in &report.results {
        assert_eq!(
            result.outcome,
            LinkOutcome::Failed(FailureReason::TargetUnavailable)
        );
        assert_eq!(result.outcome.label(), "failed:target_unavailable");
    }
}

#[test]
fn one_target_does_not_affect_the_other() {
    let fx = Fixture::with_skills(&["demo"]);
    let ctx = fx.ctx();

    LinkCommand::new(&ctx)
        .execute(&LinkOptions::all(TargetId::Claude))
        .expect("link should succeed");

    assert!(fx.link_path(TargetId::Claude, "demo").exists());
    assert!(!fx.skills_dir(TargetId::Cursor).exists());

    UnlinkCommand::new(&ctx)
        .execute(&UnlinkOptions::all(TargetId::Cursor))
        .expect("unlink should succeed");
    assert!(fx.link_path(TargetId::Claude, "demo").exists());
}
