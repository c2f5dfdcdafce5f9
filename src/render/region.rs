//! Result regions: where responses are rendered.

use std::io::Write;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

/// The element a handler writes server responses into.
///
/// `replace` overwrites the whole content; concurrent writers race and the
/// last one wins.
pub trait ResultRegion: Send + Sync {
    /// Current content.
    fn content(&self) -> String;

    /// Replace the content.
    fn replace(&self, content: String);
}

/// In-memory region. Clones share the same content.
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    content: Arc<ArcSwap<String>>,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::with_content(String::new())
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Arc::new(ArcSwap::from_pointee(content.into())),
        }
    }
}

impl Default for MemoryRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultRegion for MemoryRegion {
    fn content(&self) -> String {
        String::clone(&self.content.load())
    }

    fn replace(&self, content: String) {
        self.content.store(Arc::new(content));
    }
}

/// Region backed by an output stream (stdout in the CLI).
///
/// Each replacement is written out followed by a newline; the last content
/// is kept so `content` still works.
pub struct WriterRegion<W> {
    writer: Mutex<W>,
    last: ArcSwap<String>,
}

impl<W: Write + Send> WriterRegion<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            last: ArcSwap::from_pointee(String::new()),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl WriterRegion<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ResultRegion for WriterRegion<W> {
    fn content(&self) -> String {
        String::clone(&self.last.load())
    }

    fn replace(&self, content: String) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", content).and_then(|_| writer.flush()) {
            tracing::error!(error = %e, "Failed to write result region");
        }
        self.last.store(Arc::new(content));
    }
}
