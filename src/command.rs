use std::fmt;

pub const SEPARATOR: &str = ";";

/// One tmux sub-command, e.g. `select-pane -t work:api.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxCommand {
    tokens: Vec<String>,
}

impl TmuxCommand {
    pub fn new(name: &str) -> Self {
        TmuxCommand {
            tokens: vec![name.to_string()],
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// An ordered sequence of sub-commands sent to tmux in a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBatch {
    commands: Vec<TmuxCommand>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: TmuxCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[TmuxCommand] {
        &self.commands
    }

    /// Flatten into tmux arguments, terminating every sub-command with `;`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for command in &self.commands {
            args.extend(command.tokens().iter().cloned());
            if args.last().map(String::as_str) != Some(SEPARATOR) {
                args.push(SEPARATOR.to_string());
            }
        }
        args
    }
}

impl Extend<TmuxCommand> for CommandBatch {
    fn extend<T: IntoIterator<Item = TmuxCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

impl FromIterator<TmuxCommand> for CommandBatch {
    fn from_iter<T: IntoIterator<Item = TmuxCommand>>(iter: T) -> Self {
        CommandBatch {
            commands: iter.into_iter().collect(),
        }
    }
}

/// The form shown in print mode: all tokens joined by single spaces.
impl fmt::Display for CommandBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_args().join(" "))
    }
}
