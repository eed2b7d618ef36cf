use crate::command::{CommandBatch, TmuxCommand};
use crate::layout::Layout;
use crate::models::{WindowTarget, MAIN_PANE, SECONDARY_PANE};
use crate::tmux::{self, TmuxRunner};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Build the commands that open a three-pane workspace window rooted at `dir`.
pub fn open_window(runner: &impl TmuxRunner, win: &WindowTarget, dir: &Path) -> Result<CommandBatch> {
    let info = fs::metadata(dir).with_context(|| format!("failed to stat {}", dir.display()))?;
    if !info.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    if tmux::window_exists(runner, win)? {
        anyhow::bail!("session already exists: {}", win);
    }

    let dirname = dir.to_string_lossy().into_owned();
    let env = format!("HISTFILE={}/.bash_history", dirname);

    let mut batch = CommandBatch::new();
    batch.push(
        TmuxCommand::new("new-window")
            .args(["-e", &env, "-c", &dirname, "-t", &win.session_target(), "-n", &win.window]),
    );
    for _ in 0..2 {
        batch.push(
            TmuxCommand::new("split-window").args(["-e", &env, "-c", &dirname, "-t", &win.to_string()]),
        );
    }

    let widths = tmux::pane_attr(runner, "window_width").context("failed to read window width")?;
    let layout = Layout::for_window_width(widths.first().map(String::as_str).unwrap_or_default());
    tracing::debug!(window = %win, ?layout, width = ?widths.first(), "layout chosen for new window");

    batch.extend(layout.commands(win));
    Ok(batch)
}

/// Build the commands that swap the main pane and switch to the other layout.
///
/// `current_pane` is the invoking pane's id (`TMUX_PANE`), so focus only comes
/// back correctly when flipping the window the command was run from.
pub fn flip_layout(runner: &impl TmuxRunner, win: &WindowTarget, current_pane: &str) -> Result<CommandBatch> {
    let mut batch = CommandBatch::new();
    batch.push(TmuxCommand::new("swap-pane").args([
        "-s",
        &win.pane(MAIN_PANE),
        "-t",
        &win.pane(SECONDARY_PANE),
    ]));
    batch.push(TmuxCommand::new("select-pane").args(["-t", &win.pane(current_pane)]));

    let at_bottom = tmux::pane_attr(runner, "pane_at_bottom").context("failed to read pane positions")?;
    if at_bottom.len() != 3 {
        anyhow::bail!("expected 3 panes, got: {}", at_bottom.len());
    }

    let layout = Layout::toggled_from(&at_bottom[SECONDARY_PANE as usize]);
    tracing::debug!(window = %win, ?layout, ?at_bottom, "flipping layout");

    batch.extend(layout.commands(win));
    Ok(batch)
}
