//! Host-side plumbing around the edit session: the chat conversation, the
//! language-model backend seam, and the queue that carries replies from worker
//! threads back to the tick loop.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Shown in place of a reply when the backend call fails
pub const APOLOGY: &str = "I'm having trouble connecting to my brain right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of the conversation sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Role/content message log for one chat
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The language-model collaborator
pub trait ReplyBackend: Send + Sync {
    fn reply(&self, conversation: &[ChatMessage]) -> Result<String>;
}

/// Ask `backend` for a reply, substituting [`APOLOGY`] on failure.
/// An empty conversation gets an empty reply without calling the backend.
pub fn reply_or_apology(backend: &dyn ReplyBackend, conversation: &[ChatMessage]) -> String {
    if conversation.is_empty() {
        return String::new();
    }

    match backend.reply(conversation) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Backend reply failed: {:#}", e);
            APOLOGY.to_string()
        }
    }
}

/// Offline backend that echoes the last user message
#[derive(Debug, Clone)]
pub struct EchoBackend {
    pub model_name: String,
}

impl EchoBackend {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl ReplyBackend for EchoBackend {
    fn reply(&self, conversation: &[ChatMessage]) -> Result<String> {
        let last = conversation
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .ok_or_else(|| anyhow::anyhow!("conversation has no user message"))?;
        Ok(format!("[{}] You said: {}", self.model_name, last.content))
    }
}

/// A backend reply tagged with the submission it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub seq: u64,
    pub text: String,
}

/// Hand-off queue from backend worker threads to the tick loop
///
/// Every submission gets a sequence number; replies to anything but the
/// newest submission are stale and dropped when drained.
pub struct ReplyQueue {
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
    latest_seq: u64,
}

impl Default for ReplyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            latest_seq: 0,
        }
    }

    /// Sequence number of the newest submission (0 before the first)
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Sender for hosts that run their own workers
    pub fn sender(&self) -> Sender<Reply> {
        self.tx.clone()
    }

    /// Allocate the sequence number for a new submission
    pub fn next_seq(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Fire-and-forget: ask `backend` on a worker thread. Returns the
    /// submission's sequence number.
    pub fn spawn_request(
        &mut self,
        backend: Arc<dyn ReplyBackend>,
        conversation: Vec<ChatMessage>,
    ) -> u64 {
        let seq = self.next_seq();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let text = reply_or_apology(backend.as_ref(), &conversation);
            let _ = tx.send(Reply { seq, text });
        });
        tracing::debug!(seq, "spawned backend request");
        seq
    }

    fn is_fresh(&self, reply: &Reply) -> bool {
        if reply.seq < self.latest_seq {
            tracing::debug!(seq = reply.seq, latest = self.latest_seq, "dropping stale reply");
            false
        } else {
            true
        }
    }

    /// Non-blocking: every reply that arrived since the last drain and still
    /// answers the newest submission
    pub fn drain_fresh(&self) -> Vec<Reply> {
        let mut fresh = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            if self.is_fresh(&reply) {
                fresh.push(reply);
            }
        }
        fresh
    }

    /// Block until a fresh reply arrives or `timeout` passes
    pub fn wait_fresh(&self, timeout: Duration) -> Option<Reply> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(reply) if self.is_fresh(&reply) => return Some(reply),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;

    impl ReplyBackend for FailingBackend {
        fn reply(&self, _conversation: &[ChatMessage]) -> Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    #[test]
    fn test_echo_backend_replies_to_last_user_message() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        conversation.push_assistant("hello");
        conversation.push_user("how are you");

        let backend = EchoBackend::new("llama3.2");
        assert_eq!(
            reply_or_apology(&backend, conversation.messages()),
            "[llama3.2] You said: how are you"
        );
    }

    #[test]
    fn test_failure_yields_apology() {
        let messages = vec![ChatMessage::user("hi")];
        assert_eq!(reply_or_apology(&FailingBackend, &messages), APOLOGY);
    }

    #[test]
    fn test_empty_conversation_yields_empty_reply() {
        assert_eq!(reply_or_apology(&FailingBackend, &[]), "");
    }

    #[test]
    fn test_stale_replies_are_dropped() {
        let mut queue = ReplyQueue::new();
        let first = queue.next_seq();
        let second = queue.next_seq();

        let tx = queue.sender();
        tx.send(Reply {
            seq: first,
            text: "old".into(),
        })
        .unwrap();
        tx.send(Reply {
            seq: second,
            text: "new".into(),
        })
        .unwrap();

        let fresh = queue.drain_fresh();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].text, "new");
        assert!(queue.drain_fresh().is_empty());
    }

    #[test]
    fn test_spawned_request_delivers_reply() {
        let mut queue = ReplyQueue::new();
        let backend: Arc<dyn ReplyBackend> = Arc::new(EchoBackend::new("test"));
        let seq = queue.spawn_request(backend, vec![ChatMessage::user("ping")]);

        let reply = queue.wait_fresh(Duration::from_secs(5)).unwrap();
        assert_eq!(reply.seq, seq);
        assert_eq!(reply.text, "[test] You said: ping");
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("x")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"x"}"#);
    }
}
