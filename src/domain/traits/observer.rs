use crate::domain::entities::MessageEntry;

/// Observer of chat session state changes.
///
/// Callbacks run after the session has released its state lock, so an
/// observer may read the session back. All methods default to no-ops.
pub trait SessionObserver: Send + Sync {
    /// Called once per transcript append with the entry just added.
    /// Never called for draft or busy changes.
    fn transcript_changed(&self, _latest: &MessageEntry, _version: u64) {}

    /// Called when a submission starts or settles
    fn busy_changed(&self, _busy: bool) {}

    /// Called whenever the draft text is replaced or edited
    fn draft_changed(&self, _draft: &str) {}
}
