use crate::types::StackEvent;

/// Where watchers report what they see.
///
/// Called concurrently from every watcher task; each call must write its
/// output as one unit so lines from different stacks never interleave.
pub trait EventSink: Send + Sync + 'static {
    /// A watcher was admitted for `stack` and starts polling.
    fn watching(&self, stack: &str);

    /// A new event for `stack`, delivered in chronological order per stack.
    fn emit(&self, stack: &str, event: &StackEvent);
}
