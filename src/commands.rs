//! Command types produced by the edit session
//!
//! Commands represent side effects the host performs after an event has been
//! applied. The session itself never renders, focuses windows or talks to the
//! language-model backend.

/// Commands returned from [`EditSession::handle`](crate::session::EditSession::handle)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Buffer, cursor or selection changed; repaint the field
    Redraw,
    /// Hand the committed (trimmed) text to the language-model collaborator
    Submit(String),
    /// A press landed while the host window was unfocused
    RequestFocus,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening away `None` entries
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Submission clears the field
            Cmd::Submit(_) => true,
            Cmd::RequestFocus => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Text submitted by this command (or any batched command)
    pub fn submission(&self) -> Option<&str> {
        match self {
            Cmd::Submit(text) => Some(text),
            Cmd::Batch(cmds) => cmds.iter().find_map(|c| c.submission()),
            _ => None,
        }
    }

    /// Convert into the `Option` form returned by update functions
    pub fn into_option(self) -> Option<Cmd> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }
}
