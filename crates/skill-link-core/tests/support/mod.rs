#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use skill_link_core::config::SkillLinkConfig;
use skill_link_core::context::AppContext;
use skill_link_core::types::TargetId;

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create_dir_all should succeed in test temp dirs");
    }
    fs::write(path, content).expect("write should succeed in test temp dirs");
}

/// Temporary home directory and skills repository.
pub struct Fixture {
    _tmp: TempDir,
    pub home: PathBuf,
    pub repo: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let home = tmp.path().join("home");
        let repo = tmp.path().join("repo");
        fs::create_dir_all(&home).expect("create_dir_all should succeed in test temp dirs");
        fs::create_dir_all(&repo).expect("create_dir_all should succeed in test temp dirs");
        Self {
            _tmp: tmp,
            home,
            repo,
        }
    }

    /// Repository with one skill directory per name.
    pub fn with_skills(names: &[&str]) -> Self {
        let fixture = Self::new();
        for name in names {
            fixture.add_skill(name);
        }
        fixture
    }

    pub fn add_skill(&self, name: &str) -> PathBuf {
        let dir = self.repo.join(name);
        write_file(&dir.join("SKILL.md"), &format!("# {name}\n"));
        dir
    }

    pub fn ctx(&self) -> AppContext {
        self.ctx_with(SkillLinkConfig::new())
    }

    pub fn ctx_with(&self, config: SkillLinkConfig) -> AppContext {
        AppContext::new(self.home.clone(), self.repo.clone(), config)
    }

    pub fn skills_dir(&self, target: TargetId) -> PathBuf {
        match target {
            TargetId::Claude => self.home.join(".claude").join("skills"),
            TargetId::Cursor => self.home.join(".cursor").join("skills"),
        }
    }

    pub fn link_path(&self, target: TargetId, skill: &str) -> PathBuf {
        self.skills_dir(target).join(skill)
    }
}
