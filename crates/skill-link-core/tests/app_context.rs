mod support;

use skill_link_core::config::{ConfigStore, SkillLinkConfig, parse_config_str};
use skill_link_core::context::AppContext;
use skill_link_core::error::LinkError;
use skill_link_core::types::TargetId;

use support::{Fixture, write_file};

#[test]
fn app_context_creates_from_paths() {
    let fx = Fixture::new();
    let ctx = AppContext::new(fx.home.clone(), fx.repo.clone(), SkillLinkConfig::new());

    assert_eq!(ctx.home_dir(), fx.home.as_path());
    assert_eq!(ctx.repo_root(), fx.repo.as_path());
    assert_eq!(ctx.config().manifest_name(), "SKILL.md");
}

#[test]
fn default_targets_live_under_home() {
    let fx = Fixture::new();
    let ctx = fx.ctx();

    let claude = ctx.target(TargetId::Claude).expect("claude target");
    let cursor = ctx.target(TargetId::Cursor).expect("cursor target");
    assert_eq!(claude.skills_dir, fx.skills_dir(TargetId::Claude));
    assert_eq!(cursor.skills_dir, fx.skills_dir(TargetId::Cursor));
}

#[test]
fn configured_skills_dir_overrides_default() {
    let fx = Fixture::new();
    let config = parse_config_str("[targets.cursor]\nskills_dir = \"build/cursor\"\n")
        .expect("config should parse");

    let ctx = fx.ctx_with(config);

    assert_eq!(
        ctx.target(TargetId::Cursor).expect("cursor target").skills_dir,
        fx.repo.join("build").join("cursor")
    );
    assert_eq!(
        ctx.target(TargetId::Claude).expect("claude target").skills_dir,
        fx.skills_dir(TargetId::Claude)
    );
}

#[test]
fn custom_manifest_changes_discovery() {
    let fx = Fixture::with_skills(&["standard"]);
    write_file(&fx.repo.join("custom").join("AGENT.md"), "# custom\n");
    let config = parse_config_str("manifest = \"AGENT.md\"\n").expect("config should parse");

    let catalog = fx.ctx_with(config).catalog().expect("discover should succeed");

    assert_eq!(catalog.names(), vec!["custom".to_string()]);
}

#[test]
fn repo_config_file_is_loaded_by_store() {
    let fx = Fixture::new();
    write_file(
        &fx.repo.join("skill-link.toml"),
        "[targets.claude]\nskills_dir = \"~/agents/claude\"\n",
    );

    let config = ConfigStore::from_paths(None, &fx.repo)
        .load()
        .expect("load should succeed");
    let ctx = fx.ctx_with(config);

    assert_eq!(
        ctx.target(TargetId::Claude).expect("claude target").skills_dir,
        fx.home.join("agents").join("claude")
    );
}

#[test]
fn invalid_repo_config_reports_line() {
    let fx = Fixture::new();
    write_file(
        &fx.repo.join("skill-link.toml"),
        "manifest = \"SKILL.md\"\n[targets.claude]\nskills_dirr = \"x\"\n",
    );

    let err = ConfigStore::from_paths(None, &fx.repo)
        .load()
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("line 3"), "unexpected message: {message}");
}

#[test]
fn missing_repository_is_a_filesystem_error() {
    let fx = Fixture::new();
    let ctx = AppContext::new(
        fx.home.clone(),
        fx.repo.join("does-not-exist"),
        SkillLinkConfig::new(),
    );

    let err = ctx.catalog().unwrap_err();
    assert!(matches!(err, LinkError::Filesystem { .. }));
}
