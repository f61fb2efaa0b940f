use super::MessageEntry;

/// Ordered, append-only conversation history.
///
/// Insertion order is display order. Every append bumps `version`, which view
/// code keys its scroll-to-latest behaviour on.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
    version: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return the new version
    pub fn push(&mut self, entry: MessageEntry) -> u64 {
        self.entries.push(entry);
        self.version += 1;
        self.version
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
