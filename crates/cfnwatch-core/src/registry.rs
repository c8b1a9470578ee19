//! Admission control for stack watchers.
//!
//! A stack can be reported by more than one parent poll (or the root can be
//! nested in itself through a re-delivered page), so every watcher must
//! claim its stack identifier here before polling. Claims are never
//! released: watchers only end with the process or on shutdown.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Default)]
pub struct AdmissionRegistry {
    stacks: Arc<Mutex<HashSet<String>>>,
}

impl AdmissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `stack` for the caller. Returns `true` iff this call inserted
    /// it; every later call for the same identifier returns `false`.
    pub fn try_admit(&self, stack: &str) -> bool {
        let mut stacks = self.lock();
        if stacks.contains(stack) {
            return false;
        }
        stacks.insert(stack.to_string())
    }

    pub fn is_admitted(&self, stack: &str) -> bool {
        self.lock().contains(stack)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the set half-updated.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.stacks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
