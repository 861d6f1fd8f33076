//! Clipboard access for the input field
//!
//! The platform clipboard is best-effort: every write is mirrored into an
//! in-process slot, and reads fall back to that slot whenever the platform
//! clipboard cannot be opened or read. Nothing here ever surfaces an error to
//! the editing code.

use anyhow::{Context, Result};

/// A text clipboard the bridge can talk to
pub trait ClipboardBackend {
    fn read(&mut self) -> Result<String>;
    fn write(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via `arboard`, opened lazily and retried on failure
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().context("failed to open system clipboard")?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .context("system clipboard unavailable")
    }
}

impl ClipboardBackend for SystemClipboard {
    fn read(&mut self) -> Result<String> {
        let result = self
            .clipboard()?
            .get_text()
            .context("failed to read system clipboard");
        if result.is_err() {
            // Drop the handle so the next access reconnects
            self.inner = None;
        }
        result
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let result = self
            .clipboard()?
            .set_text(text.to_string())
            .context("failed to write system clipboard");
        if result.is_err() {
            self.inner = None;
        }
        result
    }
}

/// Clipboard with an in-process fallback slot
pub struct ClipboardBridge {
    backend: Option<Box<dyn ClipboardBackend>>,
    fallback: Option<String>,
}

impl std::fmt::Debug for ClipboardBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardBridge")
            .field("has_backend", &self.backend.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Default for ClipboardBridge {
    fn default() -> Self {
        Self::in_process()
    }
}

impl ClipboardBridge {
    /// Bridge over the platform clipboard
    pub fn system() -> Self {
        Self::with_backend(Box::new(SystemClipboard::new()))
    }

    /// Bridge over any backend
    pub fn with_backend(backend: Box<dyn ClipboardBackend>) -> Self {
        Self {
            backend: Some(backend),
            fallback: None,
        }
    }

    /// Bridge with no platform clipboard at all (headless hosts, tests)
    pub fn in_process() -> Self {
        Self {
            backend: None,
            fallback: None,
        }
    }

    /// Best-effort write; the text always lands in the in-process slot
    pub fn write(&mut self, text: &str) {
        self.fallback = Some(text.to_string());

        if let Some(backend) = self.backend.as_mut() {
            match backend.write(text) {
                Ok(()) => tracing::debug!(target: "clipboard", len = text.len(), "wrote"),
                Err(e) => tracing::warn!(target: "clipboard", "falling back to in-process clipboard: {:#}", e),
            }
        }
    }

    /// Platform text if readable, else the in-process slot, else ""
    pub fn read(&mut self) -> String {
        if let Some(backend) = self.backend.as_mut() {
            match backend.read() {
                Ok(text) => return text,
                Err(e) => tracing::debug!(target: "clipboard", "reading in-process clipboard: {:#}", e),
            }
        }
        self.fallback.clone().unwrap_or_default()
    }
}
