use crate::command::CommandBatch;
use crate::models::WindowTarget;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("failed to run tmux command {args:?} ({output})")]
    CommandFailed { args: Vec<String>, output: String },

    #[error("failed to invoke tmux: {0}")]
    Io(#[from] std::io::Error),
}

/// Seam over the tmux process so the workspace logic can run against a mock.
pub trait TmuxRunner {
    /// Run tmux with `args`, returning stdout on success.
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;

    /// Run tmux with `args`, reporting whether it exited successfully.
    fn succeeds(&self, args: &[&str]) -> Result<bool, TmuxError> {
        match self.run(args) {
            Ok(_) => Ok(true),
            Err(TmuxError::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Runs the real tmux binary.
pub struct TmuxExecutor {
    tmux_bin: String,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
        }
    }
}

impl TmuxRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        tracing::debug!(bin = %self.tmux_bin, ?args, "running tmux");
        let output = Command::new(&self.tmux_bin).args(args).output()?;

        if !output.status.success() {
            // stdout and stderr together, the way a terminal would show them
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(TmuxError::CommandFailed {
                args: args.iter().map(|a| a.to_string()).collect(),
                output: format!("{}: {}", output.status, combined.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Fetch a pane attribute via `list-panes`, one entry per pane.
pub fn pane_attr(runner: &impl TmuxRunner, attr: &str) -> Result<Vec<String>, TmuxError> {
    let format = format!("#{{{}}}", attr);
    let output = runner.run(&["list-panes", "-F", &format])?;

    Ok(output.trim().split('\n').map(str::to_string).collect())
}

pub fn window_exists(runner: &impl TmuxRunner, win: &WindowTarget) -> Result<bool, TmuxError> {
    runner.succeeds(&["has-session", "-t", &win.to_string()])
}

/// Send the whole batch to tmux in one invocation.
pub fn run_batch(runner: &impl TmuxRunner, batch: &CommandBatch) -> Result<(), TmuxError> {
    let args = batch.to_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    runner.run(&args)?;

    tracing::info!(commands = batch.commands().len(), "tmux batch applied");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::mock::ScriptedTmux;
    use super::*;
    use crate::command::TmuxCommand;

    #[test]
    fn pane_attr_splits_lines() {
        let tmux = ScriptedTmux::new().ok("1\n0\n1\n");
        let attrs = pane_attr(&tmux, "pane_at_bottom").expect("attrs");

        assert_eq!(attrs, vec!["1", "0", "1"]);
        assert_eq!(
            tmux.calls(),
            vec![vec!["list-panes", "-F", "#{pane_at_bottom}"]]
        );
    }

    #[test]
    fn pane_attr_of_empty_output_is_one_empty_value() {
        let tmux = ScriptedTmux::new().ok("\n");
        assert_eq!(pane_attr(&tmux, "window_width").expect("attrs"), vec![""]);
    }

    #[test]
    fn pane_attr_propagates_failure() {
        let tmux = ScriptedTmux::new().fail("no server running");
        let err = pane_attr(&tmux, "session_name").unwrap_err();
        assert!(err.to_string().contains("no server running"));
    }

    #[test]
    fn window_exists_follows_exit_status() {
        let win = WindowTarget::new("s", "w");

        let tmux = ScriptedTmux::new().ok("");
        assert!(window_exists(&tmux, &win).expect("exists"));
        assert_eq!(tmux.calls(), vec![vec!["has-session", "-t", "s:w"]]);

        let tmux = ScriptedTmux::new().fail("can't find window: w");
        assert!(!window_exists(&tmux, &win).expect("missing"));
    }

    #[test]
    fn run_batch_sends_one_invocation() {
        let batch: CommandBatch = vec![
            TmuxCommand::new("select-pane").args(["-t", "s:w.0"]),
            TmuxCommand::new("select-pane").args(["-t", "s:w.1"]),
        ]
        .into_iter()
        .collect();

        let tmux = ScriptedTmux::new().ok("");
        run_batch(&tmux, &batch).expect("run");

        assert_eq!(
            tmux.calls(),
            vec![vec!["select-pane", "-t", "s:w.0", ";", "select-pane", "-t", "s:w.1", ";"]]
        );
    }

    #[test]
    fn run_batch_reports_output_on_failure() {
        let batch: CommandBatch = vec![TmuxCommand::new("select-pane").args(["-t", "s:w.9"])]
            .into_iter()
            .collect();

        let tmux = ScriptedTmux::new().fail("can't find pane: 9");
        let err = run_batch(&tmux, &batch).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("select-pane"));
        assert!(message.contains("can't find pane: 9"));
    }

    #[test]
    fn executor_reports_missing_binary() {
        let tmux = TmuxExecutor::new("/nonexistent/tmux-workspace-test-bin");
        let err = tmux.run(&["list-panes"]).unwrap_err();
        assert!(matches!(err, TmuxError::Io(_)));
        // a spawn failure is an error, not a "no"
        assert!(tmux.succeeds(&["has-session"]).is_err());
    }
}
