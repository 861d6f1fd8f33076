//! Scripted replay of input events
//!
//! Drives an [`EditSession`] from a recorded event list the same way the
//! overlay's tick loop does: every submission is handed to the reply backend
//! on a worker thread and the answer is collected through a [`ReplyQueue`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::host::{Conversation, ReplyBackend, ReplyQueue};
use crate::session::{EditSession, InputEvent};

/// How long replay waits for each backend reply
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse a JSON array of input events
pub fn parse_script(json: &str) -> Result<Vec<InputEvent>> {
    serde_json::from_str(json).context("Failed to parse event script")
}

/// Read and parse an event script from disk
pub fn load_script(path: &Path) -> Result<Vec<InputEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event script {}", path.display()))?;
    parse_script(&json).with_context(|| format!("Invalid event script {}", path.display()))
}

/// One line of field state, e.g. `"hello" cursor=5 selection=1..3`
pub fn describe_state(session: &EditSession) -> String {
    let buffer = session.buffer();
    let selection = buffer.selection();
    let mut line = format!("{:?} cursor={}", buffer.text(), buffer.cursor());
    if !selection.is_empty() {
        line.push_str(&format!(" selection={}..{}", selection.anchor, selection.extent));
    }
    line
}

/// A submission and the reply it received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub submitted: String,
    pub reply: String,
}

/// Everything a replay produced
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    /// Field state after each event
    pub states: Vec<String>,
    pub exchanges: Vec<Exchange>,
    pub final_state: String,
}

/// Apply `events` to `session`, answering each submission through `backend`
pub fn replay(
    mut session: EditSession,
    events: Vec<InputEvent>,
    backend: Arc<dyn ReplyBackend>,
) -> ReplayReport {
    let mut queue = ReplyQueue::new();
    let mut conversation = Conversation::new();
    let mut report = ReplayReport::default();

    for event in events {
        let submission = session
            .handle(event)
            .and_then(|cmd| cmd.submission().map(str::to_string));

        if let Some(text) = submission {
            conversation.push_user(text.clone());
            queue.spawn_request(Arc::clone(&backend), conversation.messages().to_vec());

            let reply = match queue.wait_fresh(REPLY_TIMEOUT) {
                Some(reply) => reply.text,
                None => {
                    tracing::warn!("No reply within {:?}", REPLY_TIMEOUT);
                    String::new()
                }
            };
            conversation.push_assistant(reply.clone());
            report.exchanges.push(Exchange {
                submitted: text,
                reply,
            });
        }

        report.states.push(describe_state(&session));
    }

    report.final_state = describe_state(&session);
    report
}
