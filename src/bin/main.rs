use clap::{Parser, Subcommand};
use levels::config::defaults::default_settings;
use levels::config::{PluginVars, SettingsOverride, load_config_file, load_settings};
use levels::mode::syntax_for_path;
use levels::view::memory::HighlightGroup;
use levels::{
    DocumentId, DocumentView, EngineRegistry, LevelsController, LevelsError, LevelsResult,
    MemoryView,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Compute nesting-level highlight groups for source files
#[derive(Parser)]
#[command(name = "levels")]
#[command(version)]
#[command(about = "Compute nesting-level highlight groups for source files")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files to analyse
    files: Vec<PathBuf>,

    /// Syntax name to use instead of detecting it from the extension
    #[arg(long)]
    syntax: Option<String>,

    /// Settings file with the highest precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory searched for a project levels.toml (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Turn on live updates regardless of the configured `live` setting
    #[arg(long)]
    live: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default settings as TOML
    Init,
}

#[derive(Serialize)]
struct FileReport {
    path: PathBuf,
    supported: bool,
    live: bool,
    level_count: Option<usize>,
    style_profile: Option<String>,
    groups: BTreeMap<String, HighlightGroup>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(Commands::Config {
        action: ConfigAction::Init,
    }) = cli.command
    {
        match toml::to_string_pretty(&default_settings()) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let root = cli
        .root
        .clone()
        .or_else(|| std::env::current_dir().ok());
    if let Some(path) = cli.config.as_deref()
        && let Err(e) = check_config_file(path)
    {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut settings =
        load_settings(root.as_deref(), cli.config.clone().map(SettingsOverride::File))
            .into_settings();
    if cli.live {
        settings.live = true;
    }

    let controller = LevelsController::new(
        EngineRegistry::with_builtin_engines(),
        settings,
        install_vars(),
    );

    let reports: Vec<LevelsResult<FileReport>> = cli
        .files
        .par_iter()
        .enumerate()
        .map(|(index, path)| {
            analyse_file(&controller, index as u64, path, cli.syntax.as_deref())
        })
        .collect();

    let mut failed = false;
    for report in reports {
        let line = report.and_then(|report| {
            serde_json::to_string(&report).map_err(|e| LevelsError::internal(e.to_string()))
        });
        match line {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// A file named with `--config` must exist and parse; layered files are
/// only warned about.
fn check_config_file(path: &Path) -> LevelsResult<()> {
    match load_config_file(path) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(LevelsError::config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Err(e) => Err(LevelsError::config(e.to_string())),
    }
}

fn install_vars() -> PluginVars {
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    PluginVars::from_install_path(&base)
}

fn analyse_file(
    controller: &LevelsController,
    index: u64,
    path: &Path,
    syntax: Option<&str>,
) -> LevelsResult<FileReport> {
    let text = std::fs::read_to_string(path)?;
    let syntax = syntax.or_else(|| syntax_for_path(&path.to_string_lossy()));

    let mut view = MemoryView::new(DocumentId(index), text);
    if let Some(syntax) = syntax {
        view = view.with_syntax(syntax);
    }

    let outcome = controller.enable(&mut view)?;
    let report = FileReport {
        path: path.to_path_buf(),
        supported: outcome.update().is_some(),
        live: controller.settings().is_live(),
        level_count: controller.level_count(view.id()),
        style_profile: view.style_profile(),
        groups: view.highlights().clone(),
    };
    controller.disable(&mut view);
    Ok(report)
}
