use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

mod command;
mod layout;
mod models;
mod session_info;
mod tmux;
mod workspace;

use command::CommandBatch;
use models::WindowTarget;
use tmux::{TmuxExecutor, TmuxRunner};

/// Create a new workspace by providing a directory, or flip between workspace layouts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The target session (defaults to the current one)
    #[arg(short = 's', long)]
    session: Option<String>,

    /// The target window (defaults to the directory path, or the current window when flipping)
    #[arg(short = 'w', long)]
    window: Option<String>,

    /// Print the tmux commands instead of executing them
    #[arg(short = 'p', long)]
    print: bool,

    /// tmux binary to invoke
    #[arg(long = "tmux", env = "TMUX_WORKSPACE_TMUX", default_value = "tmux")]
    tmux_bin: String,

    /// Directory for a new workspace window; omit to flip the current layout
    directory: Option<PathBuf>,
}

/// Flags also accepted with a single dash, e.g. `-session work`.
const LONG_FLAGS: [&str; 3] = ["session", "window", "print"];

fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_terminator = false;
    args.into_iter()
        .map(|arg| {
            if after_terminator {
                return arg;
            }
            if arg == "--" {
                after_terminator = true;
                return arg;
            }
            let Some(flag) = arg.to_str().and_then(|a| a.strip_prefix('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("--{}", flag))
            } else {
                arg
            }
        })
        .collect()
}

/// tmux sets `TMUX` in every pane it spawns.
fn check_inside_tmux(tmux: Option<OsString>) -> Result<()> {
    match tmux {
        Some(value) if !value.is_empty() => Ok(()),
        _ => anyhow::bail!("please run inside tmux"),
    }
}

fn init_logging() {
    let filter = std::env::var("TMUX_WORKSPACE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();
}

/// Work out the command batch for this invocation without running it.
fn plan(cli: &Cli, runner: &impl TmuxRunner, current_pane: Option<String>) -> Result<CommandBatch> {
    let session = session_info::session_name(runner, cli.session.clone())?;

    match &cli.directory {
        // Create new workspace window for the given directory
        Some(directory) => {
            let dir = session_info::absolute_dir(directory).with_context(|| {
                format!("failed to get absolute path of {}", directory.display())
            })?;
            let window = cli
                .window
                .clone()
                .filter(|w| !w.is_empty())
                .unwrap_or_else(|| session_info::window_name_for(&dir));

            workspace::open_window(runner, &WindowTarget::new(session, window), &dir)
                .context("open failed")
        }

        // Flip layout for the given workspace window
        None => {
            let window = session_info::window_name(runner, cli.window.clone())?;
            let pane = current_pane
                .filter(|p| !p.is_empty())
                .context("TMUX_PANE is not set")?;

            workspace::flip_layout(runner, &WindowTarget::new(session, window), &pane)
                .context("failed to flip layouts")
        }
    }
}

fn execute(runner: &impl TmuxRunner, batch: &CommandBatch, print: bool, out: &mut impl Write) -> Result<()> {
    if print {
        writeln!(out, "{}", batch).context("failed to write commands")?;
        return Ok(());
    }

    tmux::run_batch(runner, batch).with_context(|| format!("failed to run {}", batch))
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            // nowhere left to report a failed write of the usage message
            e.print().ok();
            process::exit(code);
        }
    };
    init_logging();

    check_inside_tmux(std::env::var_os("TMUX"))?;

    let runner = TmuxExecutor::new(&cli.tmux_bin);
    let batch = plan(&cli, &runner, std::env::var("TMUX_PANE").ok())?;
    tracing::debug!(%batch, "planned tmux commands");

    execute(&runner, &batch, cli.print, &mut io::stdout().lock())
}
