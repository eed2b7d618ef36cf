use crate::tmux::{self, TmuxRunner};
use anyhow::{Context, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

fn get_current_dir() -> Result<PathBuf> {
    env::current_dir().context("failed to get current directory")
}

/// Make `path` absolute against the current directory and drop `.`/`..`
/// components lexically. Symlinks are left alone.
pub fn absolute_dir(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_relative() {
        get_current_dir()?.join(path)
    } else {
        path.to_path_buf()
    };

    Ok(clean(&joined))
}

fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if !matches!(cleaned.components().next_back(), Some(Component::RootDir) | None) {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Window name derived from a directory: its path with dots replaced, since
/// tmux reads `.` in a target as the pane separator.
pub fn window_name_for(dir: &Path) -> String {
    dir.to_string_lossy().replace('.', "_")
}

/// The given session name, or the one tmux reports for the current pane.
pub fn session_name(runner: &impl TmuxRunner, given: Option<String>) -> Result<String> {
    match given.filter(|s| !s.is_empty()) {
        Some(session) => Ok(session),
        None => first_attr(runner, "session_name").context("couldn't find session name"),
    }
}

/// The given window name, or the one tmux reports for the current pane.
pub fn window_name(runner: &impl TmuxRunner, given: Option<String>) -> Result<String> {
    match given.filter(|w| !w.is_empty()) {
        Some(window) => Ok(window),
        None => first_attr(runner, "window_name").context("couldn't find window name"),
    }
}

fn first_attr(runner: &impl TmuxRunner, attr: &str) -> Result<String> {
    let values = tmux::pane_attr(runner, attr)?;
    values
        .into_iter()
        .next()
        .with_context(|| format!("tmux returned no value for {}", attr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmux::mock::ScriptedTmux;

    #[test]
    fn absolute_dir_keeps_absolute_paths() {
        let dir = absolute_dir(Path::new("/home/me/src/./proj/../api")).expect("abs");
        assert_eq!(dir, PathBuf::from("/home/me/src/api"));
    }

    #[test]
    fn absolute_dir_resolves_relative_paths() {
        let cwd = env::current_dir().expect("cwd");
        let dir = absolute_dir(Path::new("some/dir/..")).expect("abs");
        assert_eq!(dir, cwd.join("some"));
    }

    #[test]
    fn clean_does_not_climb_above_root() {
        assert_eq!(clean(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn window_name_replaces_dots() {
        assert_eq!(
            window_name_for(Path::new("/home/me/example.com/v1.2")),
            "/home/me/example_com/v1_2"
        );
    }

    #[test]
    fn explicit_names_skip_tmux() {
        let tmux = ScriptedTmux::new();
        assert_eq!(session_name(&tmux, Some("work".into())).expect("session"), "work");
        assert_eq!(window_name(&tmux, Some("api".into())).expect("window"), "api");
        assert!(tmux.calls().is_empty());
    }

    #[test]
    fn missing_names_come_from_tmux() {
        let tmux = ScriptedTmux::new().ok("work\nwork\n").ok("editor\n");
        assert_eq!(session_name(&tmux, None).expect("session"), "work");
        assert_eq!(window_name(&tmux, Some(String::new())).expect("window"), "editor");
        assert_eq!(
            tmux.calls(),
            vec![
                vec!["list-panes", "-F", "#{session_name}"],
                vec!["list-panes", "-F", "#{window_name}"],
            ]
        );
    }

    #[test]
    fn failed_lookup_is_reported() {
        let tmux = ScriptedTmux::new().fail("no server running");
        let err = session_name(&tmux, None).unwrap_err();
        assert_eq!(err.to_string(), "couldn't find session name");
    }
}
