//! Interactive flow used when `skill-link` runs without a subcommand.
//!
//! Collects the action, targets and skills through dialoguer prompts.
//! Values pre-filled from CLI flags skip their prompt.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, MultiSelect, Select, theme::ColorfulTheme};

use skill_link_core::skills::SkillCatalog;
use skill_link_core::target::TargetRegistry;
use skill_link_core::types::{SkillSelection, TargetId};

/// What the user wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Link,
    Unlink,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Link => "Link",
            Action::Unlink => "Unlink",
        }
    }
}

/// Pre-filled values that skip prompts.
#[derive(Debug, Clone, Default)]
pub struct PrefilledOptions {
    /// If Some, skip the action prompt
    pub action: Option<Action>,
    /// If Some, skip target selection
    pub targets: Option<Vec<TargetId>>,
    /// If Some, skip skill selection
    pub skills: Option<SkillSelection>,
    /// Replace conflicting entries when linking
    pub force: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Everything needed to dispatch after the prompts.
#[derive(Debug, Clone)]
pub struct InteractivePlan {
    pub action: Action,
    pub targets: Vec<TargetId>,
    pub selection: SkillSelection,
    pub force: bool,
    /// False when the user cancelled or selected nothing
    pub confirmed: bool,
}

pub struct InteractiveFlow<'a, W: Write = io::Stdout> {
    catalog: &'a SkillCatalog,
    targets: &'a TargetRegistry,
    prefilled: PrefilledOptions,
    writer: W,
    theme: ColorfulTheme,
}

impl<'a> InteractiveFlow<'a, io::Stdout> {
    pub fn new(
        catalog: &'a SkillCatalog,
        targets: &'a TargetRegistry,
        prefilled: PrefilledOptions,
    ) -> Self {
        Self {
            catalog,
            targets,
            prefilled,
            writer: io::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl<'a, W: Write> InteractiveFlow<'a, W> {
    /// Create a flow with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(
        catalog: &'a SkillCatalog,
        targets: &'a TargetRegistry,
        prefilled: PrefilledOptions,
        writer: W,
    ) -> Self {
        Self {
            catalog,
            targets,
            prefilled,
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    /// Flow:
    /// 1. Action (link or unlink)
    /// 2. Targets
    /// 3. Skills
    /// 4. Summary and confirm
    pub fn collect(&mut self) -> Result<InteractivePlan> {
        let action = self.prompt_action()?;
        let targets = self.prompt_targets()?;
        let selection = self.prompt_skills()?;

        let mut plan = InteractivePlan {
            action,
            targets,
            selection,
            force: self.prefilled.force && action == Action::Link,
            confirmed: false,
        };

        let nothing_selected = plan.targets.is_empty()
            || matches!(&plan.selection, SkillSelection::Named(names) if names.is_empty());
        if nothing_selected {
            writeln!(self.writer, "  {}", style("Nothing selected.").yellow())?;
            return Ok(plan);
        }

        plan.confirmed = self.show_summary_and_confirm(&plan)?;
        Ok(plan)
    }

    fn prompt_action(&self) -> Result<Action> {
        if let Some(action) = self.prefilled.action {
            return Ok(action);
        }

        let options = ["Link skills", "Unlink skills"];
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Action")
            .items(&options)
            .default(0)
            .interact()?;

        Ok(if selection == 0 {
            Action::Link
        } else {
            Action::Unlink
        })
    }

    fn prompt_targets(&self) -> Result<Vec<TargetId>> {
        if let Some(targets) = &self.prefilled.targets {
            return Ok(targets.clone());
        }

        let items: Vec<String> = self
            .targets
            .all()
            .iter()
            .map(|t| format!("{:<8} ({})", t.id, t.skills_dir.display()))
            .collect();

        let selections = MultiSelect::with_theme(&self.theme)
            .with_prompt("Targets (space to toggle, enter to confirm)")
            .items(&items)
            .interact()?;

        Ok(selections
            .into_iter()
            .map(|i| self.targets.all()[i].id)
            .collect())
    }

    fn prompt_skills(&self) -> Result<SkillSelection> {
        if let Some(selection) = &self.prefilled.skills {
            return Ok(selection.clone());
        }

        let names = self.catalog.names();
        let defaults = vec![false; names.len()];
        let selections = MultiSelect::with_theme(&self.theme)
            .with_prompt("Skills (space to toggle, enter to confirm)")
            .items(&names)
            .defaults(&defaults)
            .interact()?;

        if !names.is_empty() && selections.len() == names.len() {
            return Ok(SkillSelection::All);
        }
        Ok(SkillSelection::Named(
            selections.into_iter().map(|i| names[i].clone()).collect(),
        ))
    }

    fn show_summary_and_confirm(&mut self, plan: &InteractivePlan) -> Result<bool> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  Summary").bold())?;
        writeln!(self.writer, "  ───────────────────────────")?;
        writeln!(self.writer, "  Action:   {}", style(plan.action.label()).green())?;

        let targets: Vec<&str> = plan.targets.iter().map(|t| t.as_str()).collect();
        writeln!(self.writer, "  Targets:  {}", style(targets.join(", ")).green())?;

        let skills = match &plan.selection {
            SkillSelection::All => "all".to_string(),
            SkillSelection::Named(names) => names.join(", "),
        };
        writeln!(self.writer, "  Skills:   {}", style(skills).green())?;

        if plan.force {
            writeln!(self.writer, "  Force:    {}", style("yes").yellow())?;
        }
        writeln!(self.writer)?;

        if self.prefilled.yes {
            return Ok(true);
        }

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Proceed?")
            .default(true)
            .interact()?;

        Ok(confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_link_core::config::SkillLinkConfig;
    use std::path::Path;

    fn catalog_with(names: &[&str]) -> (tempfile::TempDir, SkillCatalog) {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        for name in names {
            let dir = tmp.path().join(name);
            std::fs::create_dir_all(&dir).expect("create_dir_all should succeed");
            std::fs::write(dir.join("SKILL.md"), "# skill\n").expect("write should succeed");
        }
        let catalog = SkillCatalog::discover(tmp.path(), "SKILL.md").expect("discover");
        (tmp, catalog)
    }

    fn registry() -> TargetRegistry {
        TargetRegistry::resolve(&SkillLinkConfig::new(), Path::new("/home/u"), Path::new("/r"))
    }

    #[test]
    fn prefilled_options_default() {
        let prefilled = PrefilledOptions::default();

        assert!(prefilled.action.is_none());
        assert!(prefilled.targets.is_none());
        assert!(prefilled.skills.is_none());
        assert!(!prefilled.force);
        assert!(!prefilled.yes);
    }

    #[test]
    fn prefilled_skips_prompts() {
        let (_tmp, catalog) = catalog_with(&["demo"]);
        let targets = registry();
        let prefilled = PrefilledOptions {
            action: Some(Action::Link),
            targets: Some(vec![TargetId::Claude, TargetId::Cursor]),
            skills: Some(SkillSelection::Named(vec!["demo".to_string()])),
            force: true,
            yes: true,
        };

        let mut output = Vec::new();
        let plan = {
            let mut flow =
                InteractiveFlow::with_writer(&catalog, &targets, prefilled, &mut output);
            flow.collect().expect("collect should succeed")
        };

        assert!(plan.confirmed);
        assert_eq!(plan.action, Action::Link);
        assert_eq!(plan.targets, vec![TargetId::Claude, TargetId::Cursor]);
        assert!(plan.force);

        let rendered = String::from_utf8(output).expect("utf8 output");
        assert!(rendered.contains("Summary"));
        assert!(rendered.contains("demo"));
    }

    #[test]
    fn force_is_dropped_for_unlink() {
        let (_tmp, catalog) = catalog_with(&["demo"]);
        let targets = registry();
        let prefilled = PrefilledOptions {
            action: Some(Action::Unlink),
            targets: Some(vec![TargetId::Claude]),
            skills: Some(SkillSelection::All),
            force: true,
            yes: true,
        };

        let mut output = Vec::new();
        let mut flow = InteractiveFlow::with_writer(&catalog, &targets, prefilled, &mut output);
        let plan = flow.collect().expect("collect should succeed");

        assert!(!plan.force);
        assert!(plan.confirmed);
    }

    #[test]
    fn empty_target_selection_is_not_confirmed() {
        let (_tmp, catalog) = catalog_with(&["demo"]);
        let targets = registry();
        let prefilled = PrefilledOptions {
            action: Some(Action::Link),
            targets: Some(vec![]),
            skills: Some(SkillSelection::All),
            yes: true,
            ..Default::default()
        };

        let mut output = Vec::new();
        let mut flow = InteractiveFlow::with_writer(&catalog, &targets, prefilled, &mut output);
        let plan = flow.collect().expect("collect should succeed");

        assert!(!plan.confirmed);
    }
}
