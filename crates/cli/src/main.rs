use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sidenav_engine::{NavItemView, SidebarState};
use sidenav_types::{NodePath, SidebarMode};
use sidenav_util::{NavTreeSource, Validation, load_configured_nav_tree};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "sidenav.log";

/// Collapsible navigation sidebar for the terminal.
#[derive(Debug, Parser)]
#[command(name = "sidenav", version, about)]
struct Cli {
    #[command(flatten)]
    sidebar: SidebarArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sidebar projection as JSON instead of starting the TUI.
    Inspect(InspectArgs),
}

#[derive(Debug, Clone, Args)]
struct SidebarArgs {
    /// Navigation tree file (JSON or YAML). Overrides SIDENAV_TREE_PATH.
    #[arg(long, value_name = "FILE", global = true)]
    tree: Option<PathBuf>,

    /// Initial location.
    #[arg(long, value_name = "PATH", default_value = "/", global = true)]
    path: String,

    /// Start in icon-only mode.
    #[arg(long, global = true)]
    collapsed: bool,

    /// Disable the close-sidebar effect on link and action clicks.
    #[arg(long, global = true)]
    no_dismiss: bool,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Open the branch at this node path before projecting, e.g. `1` or `1.2`.
    /// May be repeated; parents should be listed before their children.
    #[arg(long = "open", value_name = "NODE_PATH")]
    open: Vec<NodePath>,

    /// Fail on malformed items instead of keeping them inert.
    #[arg(long)]
    strict: bool,
}

/// Output of `sidenav inspect`.
#[derive(Debug, Serialize)]
struct Inspection {
    source: String,
    location: String,
    mode: SidebarMode,
    items: Vec<NavItemView>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = mode_from(&cli.sidebar);

    match cli.command {
        Some(Command::Inspect(args)) => {
            init_tracing(LogTarget::Stderr);
            let inspection = inspect(&cli.sidebar, mode, &args)?;
            println!("{}", serde_json::to_string_pretty(&inspection)?);
            Ok(())
        }
        None => {
            init_tracing(LogTarget::File(log_file_path()));
            let (sidebar, source) = build_sidebar(&cli.sidebar, mode, Validation::Lenient)?;
            info!(source = %source, "starting sidebar TUI");
            sidenav_tui::run(sidebar).await
        }
    }
}

/// Where log lines go.
enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so logs go to a file. Without a usable file
    /// they are discarded.
    File(Option<PathBuf>),
}

fn init_tracing(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => match path.and_then(|path| open_log_file(&path)) {
            Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
            None => builder.with_writer(std::io::sink).try_init(),
        },
    };
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::create(path).ok()
}

fn log_file_path() -> Option<PathBuf> {
    dirs_next::data_dir().map(|dir| dir.join("sidenav").join(LOG_FILE_NAME))
}

fn mode_from(args: &SidebarArgs) -> SidebarMode {
    let mode = if args.collapsed { SidebarMode::collapsed() } else { SidebarMode::expanded() };
    mode.with_dismissible(!args.no_dismiss)
}

fn build_sidebar(args: &SidebarArgs, mode: SidebarMode, validation: Validation) -> Result<(SidebarState, NavTreeSource)> {
    let (tree, source) = load_configured_nav_tree(args.tree.as_deref(), validation).context("failed to load the navigation tree")?;
    let sidebar = SidebarState::new(tree, mode).with_current_path(args.path.clone());
    Ok((sidebar, source))
}

fn inspect(sidebar_args: &SidebarArgs, mode: SidebarMode, args: &InspectArgs) -> Result<Inspection> {
    let validation = if args.strict { Validation::Strict } else { Validation::Lenient };
    let (mut sidebar, source) = build_sidebar(sidebar_args, mode, validation)?;
    for path in &args.open {
        open_branch(&mut sidebar, path)?;
    }
    Ok(Inspection {
        source: source.to_string(),
        location: sidebar.current_path().to_string(),
        mode: sidebar.mode(),
        items: sidebar.project(),
    })
}

/// Opens a branch the way a user would: a click in expanded mode, hover in
/// icon-only mode.
fn open_branch(sidebar: &mut SidebarState, path: &NodePath) -> Result<()> {
    let Some(item) = sidebar.tree().get(path) else {
        bail!("no navigation node at {path}");
    };
    if !item.is_branch() {
        bail!("node {path} ({}) has no children to open", item.name);
    }
    if sidebar.is_open(path) {
        return Ok(());
    }
    if sidebar.mode().expanded {
        sidebar.click(path);
    } else {
        sidebar.mouse_enter(path);
    }
    debug!(node = %path, "opened branch for inspection");
    Ok(())
}
