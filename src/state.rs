//! Atomic snapshot publication.
//!
//! The loaded dictionary state is shared as an immutable snapshot behind an
//! atomically swappable pointer. Readers acquire a handle in constant time
//! and keep it for the duration of one operation; publishers replace the
//! whole snapshot at once. A replaced snapshot stays alive until its last
//! handle drops, then reclaims.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

/// Holds at most one published value of `T`.
///
/// Reads never block, not on other readers and not on an in-flight
/// publish. Publishers serialize against each other so publication order is
/// well defined.
pub struct SnapshotCell<T> {
    current: ArcSwapOption<T>,
    publish_lock: Mutex<()>,
}

impl<T> SnapshotCell<T> {
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            publish_lock: Mutex::new(()),
        }
    }

    /// Install `snapshot` as the current value.
    ///
    /// An acquire that begins after `publish` returns sees at least this
    /// snapshot. Readers holding an earlier handle keep it until they drop
    /// it.
    pub fn publish(&self, snapshot: Arc<T>) {
        let _serialize = self
            .publish_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.current.store(Some(snapshot));
    }

    /// Shared handle to the current snapshot, or `None` before the first
    /// publish. Constant-time; clones a reference, never the snapshot.
    pub fn acquire(&self) -> Option<Arc<T>> {
        self.current.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }
}

impl<T> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_empty() {
        let cell: SnapshotCell<u32> = SnapshotCell::new();
        assert!(cell.acquire().is_none());
        assert!(!cell.is_loaded());
    }

    #[test]
    fn test_publish_then_acquire() {
        let cell = SnapshotCell::new();
        cell.publish(Arc::new(41u32));
        cell.publish(Arc::new(42u32));
        assert_eq!(*cell.acquire().expect("loaded"), 42);
    }

    #[test]
    fn test_old_handle_survives_replacement() {
        let cell = SnapshotCell::new();
        cell.publish(Arc::new("old".to_string()));
        let held = cell.acquire().expect("loaded");
        cell.publish(Arc::new("new".to_string()));
        assert_eq!(*held, "old");
        assert_eq!(*cell.acquire().expect("loaded"), "new");
    }

    #[test]
    fn test_replaced_snapshot_reclaims_when_unreferenced() {
        let cell = SnapshotCell::new();
        let first = Arc::new(1u32);
        let weak = Arc::downgrade(&first);
        cell.publish(first);
        cell.publish(Arc::new(2u32));
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_concurrent_readers_see_whole_values() {
        let cell = Arc::new(SnapshotCell::new());
        cell.publish(Arc::new(0usize));

        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for n in 1..=100usize {
                    cell.publish(Arc::new(n));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    let mut last = 0usize;
                    for _ in 0..200 {
                        let seen = *cell.acquire().expect("loaded");
                        // Monotonic per publish order; never a torn value.
                        assert!(seen <= 100);
                        assert!(seen >= last);
                        last = seen;
                    }
                })
            })
            .collect();

        writer.join().expect("writer");
        for r in readers {
            r.join().expect("reader");
        }
    }
}
