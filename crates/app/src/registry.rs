//! In-memory registry — a mutex-guarded map with an atomic id counter.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::ports::Registry;

/// Process-scoped [`Registry`] implementation.
///
/// A single mutex guards the whole map; every read and write is scoped
/// under it. Registry operations are short, bounded, in-memory
/// computations, so device-level parallelism is not worth the extra locks.
/// Identifiers come from an `AtomicU64` starting at 1 and are never handed
/// out twice, removals included.
pub struct MemoryRegistry<I, T> {
    entries: Mutex<BTreeMap<u64, T>>,
    counter: AtomicU64,
    _id: PhantomData<I>,
}

impl<I, T> Default for MemoryRegistry<I, T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            counter: AtomicU64::new(0),
            _id: PhantomData,
        }
    }
}

impl<I, T> MemoryRegistry<I, T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<u64, T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I, T> Registry for MemoryRegistry<I, T>
where
    I: Copy + Eq + From<u64> + Into<u64> + Send + Sync,
    T: Clone + Send + Sync,
{
    type Id = I;
    type Entry = T;

    fn next_id(&self) -> I {
        I::from(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn get(&self, id: I) -> Option<T> {
        self.lock().get(&id.into()).cloned()
    }

    fn put(&self, id: I, entry: T) {
        self.lock().insert(id.into(), entry);
    }

    fn remove(&self, id: I) -> Option<T> {
        self.lock().remove(&id.into())
    }

    fn all_with_id(&self) -> Vec<(I, T)> {
        self.lock()
            .iter()
            .map(|(id, entry)| (I::from(*id), entry.clone()))
            .collect()
    }

    fn update<F, R>(&self, id: I, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.lock().get_mut(&id.into()).map(f)
    }
}
