use crate::command::TmuxCommand;
use crate::models::{WindowTarget, MAIN_PANE, SECONDARY_PANE};

/// Window width (in cells) from which a screen counts as wide, roughly a 4k display.
pub const WIDE_SCREEN_MIN_WIDTH: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Main pane on the left, secondaries stacked on the right.
    Narrow,
    /// Three columns side by side.
    Wide,
}

impl Layout {
    /// Pick a layout from the raw `window_width` attribute.
    pub fn for_window_width(width: &str) -> Self {
        match width.trim().parse::<u32>() {
            Ok(width) if width >= WIDE_SCREEN_MIN_WIDTH => Layout::Wide,
            _ => Layout::Narrow,
        }
    }

    /// Pick the layout to switch to from the `pane_at_bottom` flag of the
    /// secondary pane. Pane 1 only stops touching the bottom edge in the
    /// narrow layout, where it sits above pane 2.
    pub fn toggled_from(secondary_at_bottom: &str) -> Self {
        if secondary_at_bottom == "0" {
            Layout::Wide
        } else {
            Layout::Narrow
        }
    }

    pub fn commands(self, win: &WindowTarget) -> Vec<TmuxCommand> {
        match self {
            Layout::Narrow => narrow_screen_layout(win),
            Layout::Wide => wide_screen_layout(win),
        }
    }
}

fn narrow_screen_layout(win: &WindowTarget) -> Vec<TmuxCommand> {
    vec![
        TmuxCommand::new("select-layout").args(["-t", &win.to_string(), "main-vertical"]),
        TmuxCommand::new("resize-pane").args(["-x", "90", "-y", "20", "-t", &win.pane(SECONDARY_PANE)]),
        TmuxCommand::new("select-pane").args(["-t", &win.pane(MAIN_PANE)]),
    ]
}

fn wide_screen_layout(win: &WindowTarget) -> Vec<TmuxCommand> {
    vec![
        TmuxCommand::new("select-layout").args(["-t", &win.to_string(), "even-horizontal"]),
        TmuxCommand::new("resize-pane").args(["-x", "100", "-t", &win.pane(MAIN_PANE)]),
        TmuxCommand::new("select-pane").args(["-t", &win.pane(SECONDARY_PANE)]),
    ]
}
