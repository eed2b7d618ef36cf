use std::fmt;

/// Pane roles within a workspace window.
pub const MAIN_PANE: u32 = 0;
pub const SECONDARY_PANE: u32 = 1;

/// A `session:window` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTarget {
    pub session: String,
    pub window: String,
}

impl WindowTarget {
    pub fn new(session: impl Into<String>, window: impl Into<String>) -> Self {
        WindowTarget {
            session: session.into(),
            window: window.into(),
        }
    }

    /// Target for the session alone (`session:`), used when creating a window.
    pub fn session_target(&self) -> String {
        format!("{}:", self.session)
    }

    /// Target for a pane addressed by index or by id (`session:window.pane`).
    pub fn pane(&self, pane: impl fmt::Display) -> String {
        format!("{}.{}", self, pane)
    }
}

impl fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session, self.window)
    }
}
