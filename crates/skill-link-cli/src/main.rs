//! skill-link - Agent Skills Link Manager
//!
//! Usage:
//!   skill-link                                   # Interactive mode
//!   skill-link status [--target claude]          # Show link status
//!   skill-link link -t claude --all              # Link every skill
//!   skill-link link -t cursor -s demo --force    # Link one skill, replacing conflicts
//!   skill-link unlink -t claude -s demo          # Remove a link
//!   skill-link strip-cfs <input> <output>        # Strip UnityCFS headers

mod interactive;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skill_link_core::bundle::{StripOutcome, StripStats, strip_dir, strip_file};
use skill_link_core::commands::{
    BatchReport, LinkCommand, LinkOptions, StatusCommand, StatusOptions, StatusReport,
    UnlinkCommand, UnlinkOptions,
};
use skill_link_core::config::REPO_CONFIG_FILE;
use skill_link_core::context::AppContext;
use skill_link_core::skills::{LinkState, PairOutcome};
use skill_link_core::types::{SkillSelection, TargetId};

use crate::interactive::{Action, InteractiveFlow, PrefilledOptions};

#[derive(Parser)]
#[command(name = "skill-link")]
#[command(about = "Link agent skills into AI tool skills directories", long_about = None)]
struct Cli {
    /// Repository root containing skill directories (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Config file applied over the user and repository config
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Replace conflicting entries (interactive mode)
    #[arg(long)]
    force: bool,

    /// Skip the confirmation prompt (interactive mode)
    #[arg(short = 'y', long)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the link state of every skill in every target
    Status {
        /// Only show this target (claude, cursor)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Link skills into a target's skills directory
    Link(LinkArgs),

    /// Remove links created by `link`
    ///
    /// Entries that are not links to this repository are never removed.
    #[command(alias = "rm")]
    Unlink(UnlinkArgs),

    /// List targets and their skills directories
    Targets,

    /// Strip UnityCFS headers from a bundle file or directory
    StripCfs {
        /// Input file or directory
        input: PathBuf,
        /// Output file or directory
        output: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Operate on every skill in the repository
    #[arg(long)]
    all: bool,

    /// Skill to operate on (repeatable)
    #[arg(short = 's', long = "skill", value_name = "NAME")]
    skills: Vec<String>,
}

impl SelectionArgs {
    fn selection(&self) -> SkillSelection {
        if self.all {
            SkillSelection::All
        } else {
            SkillSelection::Named(self.skills.clone())
        }
    }
}

#[derive(Args)]
struct LinkArgs {
    /// Target tool (claude, cursor)
    #[arg(short, long)]
    target: String,

    #[command(flatten)]
    selection: SelectionArgs,

    /// Replace conflicting files, directories or foreign links
    #[arg(short, long)]
    force: bool,
}

#[derive(Args)]
struct UnlinkArgs {
    /// Target tool (claude, cursor)
    #[arg(short, long)]
    target: String,

    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::StripCfs { input, output }) => run_strip_cfs(&input, &output, cli.format),
        Some(command) => {
            // Validate target ids before touching the filesystem.
            let target = match &command {
                Commands::Link(args) => Some(parse_target(&args.target)?),
                Commands::Unlink(args) => Some(parse_target(&args.target)?),
                Commands::Status { target } => target.as_deref().map(parse_target).transpose()?,
                _ => None,
            };
            let ctx = build_context(cli.repo, cli.config.as_deref())?;
            run_cli(&ctx, command, target, cli.format)
        }
        None => {
            let ctx = build_context(cli.repo, cli.config.as_deref())?;
            run_interactive(&ctx, cli.force, cli.yes)
        }
    }
}

fn build_context(repo: Option<PathBuf>, config: Option<&Path>) -> Result<AppContext> {
    let repo_root = match repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    tracing::debug!(repo = %repo_root.display(), "resolving context");
    AppContext::with_defaults(repo_root, config)
}

fn parse_target(s: &str) -> Result<TargetId> {
    Ok(s.parse::<TargetId>()?)
}

fn run_cli(
    ctx: &AppContext,
    command: Commands,
    target: Option<TargetId>,
    format: OutputFormat,
) -> Result<ExitCode> {
    match (command, target) {
        (Commands::Status { .. }, filter) => {
            let mut options = StatusOptions::new();
            if let Some(t) = filter {
                options = options.with_target(t);
            }
            let report = StatusCommand::new(ctx).execute(&options)?;
            match format {
                OutputFormat::Table => print_status_table(&report),
                OutputFormat::Json => print_status_json(&report)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        (Commands::Link(args), Some(target)) => {
            let options = LinkOptions {
                target,
                selection: args.selection.selection(),
                force: args.force,
            };
            let report = LinkCommand::new(ctx).execute(&options)?;
            finish_batches(&[report], format)
        }
        (Commands::Unlink(args), Some(target)) => {
            let options = UnlinkOptions {
                target,
                selection: args.selection.selection(),
            };
            let report = UnlinkCommand::new(ctx).execute(&options)?;
            finish_batches(&[report], format)
        }
        (Commands::Targets, _) => {
            print_targets(ctx, format)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => anyhow::bail!("A target is required (use --target claude or --target cursor)"),
    }
}

fn run_interactive(ctx: &AppContext, force: bool, yes: bool) -> Result<ExitCode> {
    let catalog = ctx.catalog()?;
    if catalog.is_empty() {
        println!(
            "{}",
            style(format!(
                "No skills found in {} (directories containing {})",
                ctx.repo_root().display(),
                ctx.config().manifest_name()
            ))
            .red()
        );
        return Ok(ExitCode::FAILURE);
    }

    let report = StatusCommand::new(ctx).execute(&StatusOptions::new())?;
    print_status_table(&report);

    let prefilled = PrefilledOptions {
        force,
        yes,
        ..Default::default()
    };
    let mut flow = InteractiveFlow::new(&catalog, ctx.targets(), prefilled);
    let plan = flow.collect()?;

    if !plan.confirmed {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut success = true;
    for target in &plan.targets {
        success &= match plan.action {
            Action::Link => {
                let options = LinkOptions {
                    target: *target,
                    selection: plan.selection.clone(),
                    force: plan.force,
                };
                let report = LinkCommand::new(ctx).execute(&options)?;
                print_batch(&report);
                report.is_success()
            }
            Action::Unlink => {
                let options = UnlinkOptions {
                    target: *target,
                    selection: plan.selection.clone(),
                };
                let report = UnlinkCommand::new(ctx).execute(&options)?;
                print_batch(&report);
                report.is_success()
            }
        };
    }

    print_done(success);
    Ok(exit_code(success))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// =============================================================================
// Batch output
// =============================================================================

fn finish_batches<O: PairOutcome>(reports: &[BatchReport<O>], format: OutputFormat) -> Result<ExitCode> {
    let success = reports.iter().all(|r| r.is_success());
    match format {
        OutputFormat::Table => {
            for report in reports {
                print_batch(report);
            }
            print_done(success);
        }
        OutputFormat::Json => {
            let output: Vec<_> = reports.iter().map(batch_json).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(exit_code(success))
}

fn print_batch<O: PairOutcome>(report: &BatchReport<O>) {
    println!();
    println!(
        "  {} {}",
        style(format!("[{}]", report.target)).cyan(),
        report.skills_dir.display()
    );

    if report.results.is_empty() {
        println!("  {}", style("(no skills selected)").dim());
    }

    for result in &report.results {
        let label = result.outcome.label();
        let badge = format!("{:<18}", label);
        let badge = if result.outcome.is_success() {
            style(badge).green()
        } else if label.starts_with("failed") {
            style(badge).red()
        } else {
            style(badge).yellow()
        };
        match result.outcome.detail() {
            Some(detail) => println!(
                "  {} {} {}",
                badge,
                result.skill,
                style(format!("({detail})")).dim()
            ),
            None => println!("  {} {}", badge, result.skill),
        }
    }
}

fn print_done(success: bool) {
    println!();
    if success {
        println!("{}", style("Done!").green());
    } else {
        println!(
            "{}",
            style("Some operations did not complete; see the output above").yellow()
        );
    }
}

fn batch_json<O: PairOutcome>(report: &BatchReport<O>) -> serde_json::Value {
    let results: Vec<_> = report
        .results
        .iter()
        .map(|r| {
            serde_json::json!({
                "skill": r.skill,
                "link_path": r.link_path,
                "outcome": r.outcome.label(),
                "detail": r.outcome.detail(),
            })
        })
        .collect();

    serde_json::json!({
        "target": report.target,
        "skills_dir": report.skills_dir,
        "success": report.is_success(),
        "results": results,
    })
}

// =============================================================================
// Status output
// =============================================================================

fn state_badge(state: &LinkState) -> console::StyledObject<String> {
    let text = match state {
        LinkState::Linked => "● linked",
        LinkState::Conflict(_) => "▲ conflict",
        LinkState::Absent => "○ absent",
    };
    let padded = format!("{:<16}", text);
    match state {
        LinkState::Linked => style(padded).green(),
        LinkState::Conflict(_) => style(padded).yellow(),
        LinkState::Absent => style(padded).dim(),
    }
}

fn print_status_table(report: &StatusReport) {
    println!();
    println!(
        "{}  (repo: {})",
        style("Available skills").bold(),
        report.repo_root.display()
    );
    println!();

    if report.skills.is_empty() {
        println!("  No skills found.");
        println!();
        return;
    }

    let mut header = format!("  {:<4} {:<30}", "#", "Skill");
    for target in &report.targets {
        header.push_str(&format!(" {:<16}", target.id.display_name()));
    }
    println!("{}", style(header).dim());
    println!(
        "  {}",
        style("─".repeat(36 + 17 * report.targets.len())).dim()
    );

    for (i, skill) in report.skills.iter().enumerate() {
        let mut line = format!("  {:<4} {:<30}", i + 1, truncate(skill, 30));
        for target in &report.targets {
            if let Some(state) = report.state_of(skill, target.id) {
                line.push_str(&format!(" {}", state_badge(state)));
            }
        }
        println!("{}", line);
    }

    println!();
    if report.conflicts() > 0 {
        println!(
            "  {} conflicting entries (use `link --force` to replace)",
            report.conflicts()
        );
        println!();
    }
}

fn print_status_json(report: &StatusReport) -> Result<()> {
    let entries: Vec<_> = report
        .entries
        .iter()
        .map(|e| {
            let conflict = match &e.state {
                LinkState::Conflict(kind) => Some(kind.to_string()),
                _ => None,
            };
            serde_json::json!({
                "skill": e.skill,
                "target": e.target,
                "link_path": e.link_path,
                "state": e.state.as_str(),
                "conflict": conflict,
            })
        })
        .collect();

    let output = serde_json::json!({
        "repo": report.repo_root,
        "targets": report.targets,
        "entries": entries,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// =============================================================================
// Targets and bundles
// =============================================================================

fn print_targets(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let targets = ctx.targets().all();
    match format {
        OutputFormat::Table => {
            println!("{:<8} {:<14} {:<8} Skills directory", "Id", "Tool", "Exists");
            println!("{}", "-".repeat(70));
            for target in targets {
                let exists = if target.skills_dir.is_dir() { "yes" } else { "no" };
                println!(
                    "{:<8} {:<14} {:<8} {}",
                    target.id,
                    target.id.display_name(),
                    exists,
                    target.skills_dir.display()
                );
            }
            println!();
            println!(
                "Manifest: {}   Repo config: {}",
                ctx.config().manifest_name(),
                ctx.repo_root().join(REPO_CONFIG_FILE).display()
            );
        }
        OutputFormat::Json => {
            let output: Vec<_> = targets
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "name": t.id.display_name(),
                        "skills_dir": t.skills_dir,
                        "exists": t.skills_dir.is_dir(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_strip_cfs(input: &Path, output: &Path, format: OutputFormat) -> Result<ExitCode> {
    if input.is_file() {
        let outcome = strip_file(input, output)?;
        match format {
            OutputFormat::Table => print_strip_outcome(input, output, &outcome),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "input": input,
                    "output": output,
                    "stripped": matches!(outcome, StripOutcome::Stripped { .. }),
                    "warnings": strip_warnings(&outcome),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !input.is_dir() {
        anyhow::bail!("{} does not exist", input.display());
    }

    let stats = strip_dir(input, output)?;
    match format {
        OutputFormat::Table => print_strip_stats(input, output, &stats),
        OutputFormat::Json => {
            let files: Vec<_> = stats
                .files
                .iter()
                .map(|f| match &f.result {
                    Ok(outcome) => serde_json::json!({
                        "file": f.relative,
                        "stripped": matches!(outcome, StripOutcome::Stripped { .. }),
                        "warnings": strip_warnings(outcome),
                    }),
                    Err(message) => serde_json::json!({
                        "file": f.relative,
                        "error": message,
                    }),
                })
                .collect();
            let json = serde_json::json!({
                "total": stats.total(),
                "stripped": stats.stripped(),
                "already_standard": stats.already_standard(),
                "errors": stats.errors(),
                "files": files,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(exit_code(stats.errors() == 0))
}

fn strip_warnings(outcome: &StripOutcome) -> Vec<String> {
    match outcome {
        StripOutcome::Stripped { warnings, .. } => warnings.iter().map(|w| w.to_string()).collect(),
        StripOutcome::Copied => Vec::new(),
    }
}

fn print_strip_outcome(input: &Path, output: &Path, outcome: &StripOutcome) {
    match outcome {
        StripOutcome::Stripped { .. } => println!(
            "Stripped CFS header: {} -> {}",
            input.display(),
            output.display()
        ),
        StripOutcome::Copied => println!(
            "Not a CFS file, copied as-is: {} -> {}",
            input.display(),
            output.display()
        ),
    }
    for warning in strip_warnings(outcome) {
        println!("  {} {}", style("warning:").yellow(), warning);
    }
}

fn print_strip_stats(input: &Path, output: &Path, stats: &StripStats) {
    println!("Processing directory: {}", input.display());
    println!("Output directory: {}", output.display());
    println!();

    for file in &stats.files {
        match &file.result {
            Ok(outcome @ StripOutcome::Stripped { .. }) => {
                println!("  [CFS -> UnityFS] {}", file.relative.display());
                for warning in strip_warnings(outcome) {
                    println!("    {} {}", style("warning:").yellow(), warning);
                }
            }
            Ok(StripOutcome::Copied) => {}
            Err(message) => println!(
                "  {} {}: {}",
                style("[ERROR]").red(),
                file.relative.display(),
                message
            ),
        }
    }

    println!();
    println!("Done! Processed {} files:", stats.total());
    println!("  CFS headers stripped: {}", stats.stripped());
    println!("  Already standard:     {}", stats.already_standard());
    if stats.errors() > 0 {
        println!("  Errors:               {}", stats.errors());
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, truncate};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_selects_interactive_mode() {
        let cli = Cli::try_parse_from(["skill-link"]).expect("parse should succeed");
        assert!(cli.command.is_none());
    }

    #[test]
    fn link_with_single_skill_parses() {
        let cli = Cli::try_parse_from(["skill-link", "link", "--target", "claude", "--skill", "demo"])
            .expect("parse should succeed");
        match cli.command {
            Some(Commands::Link(args)) => {
                assert_eq!(args.target, "claude");
                assert_eq!(args.selection.skills, vec!["demo"]);
                assert!(!args.force);
            }
            _ => panic!("expected link command"),
        }
    }

    #[test]
    fn link_with_repeated_skills_and_force_parses() {
        let cli = Cli::try_parse_from([
            "skill-link", "link", "-t", "cursor", "-s", "a", "-s", "b", "--force",
        ])
        .expect("parse should succeed");
        match cli.command {
            Some(Commands::Link(args)) => {
                assert_eq!(args.selection.skills, vec!["a", "b"]);
                assert!(args.force);
            }
            _ => panic!("expected link command"),
        }
    }

    #[test]
    fn link_requires_a_selection() {
        let result = Cli::try_parse_from(["skill-link", "link", "--target", "claude"]);
        assert!(result.is_err());
    }

    #[test]
    fn all_and_skill_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "skill-link", "unlink", "-t", "claude", "--all", "--skill", "demo",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unlink_alias_parses() {
        let cli = Cli::try_parse_from(["skill-link", "rm", "-t", "claude", "--all"])
            .expect("parse should succeed");
        assert!(matches!(cli.command, Some(Commands::Unlink(_))));
    }

    #[test]
    fn status_with_target_and_json_parses() {
        let cli = Cli::try_parse_from(["skill-link", "status", "--target", "cursor", "-o", "json"])
            .expect("parse should succeed");
        assert!(matches!(
            cli.command,
            Some(Commands::Status { target: Some(ref t) }) if t == "cursor"
        ));
    }

    #[test]
    fn global_repo_option_parses_after_subcommand() {
        let cli = Cli::try_parse_from(["skill-link", "status", "--repo", "/tmp/skills"])
            .expect("parse should succeed");
        assert_eq!(cli.repo.as_deref(), Some(std::path::Path::new("/tmp/skills")));
    }

    #[test]
    fn strip_cfs_parses_paths() {
        let cli = Cli::try_parse_from(["skill-link", "strip-cfs", "in", "out"])
            .expect("parse should succeed");
        assert!(matches!(cli.command, Some(Commands::StripCfs { .. })));
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(super::parse_target("windsurf").is_err());
        assert!(super::parse_target("claude").is_ok());
    }

    #[test]
    fn truncate_keeps_short_names() {
        assert_eq!(truncate("demo", 30), "demo");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
