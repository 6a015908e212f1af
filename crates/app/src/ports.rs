//! Port traits implemented by adapters and in-process infrastructure.

/// A keyed store with an atomic id generator.
///
/// Registries are the only stateful collaborators in the core: devices,
/// rooms, and scenarios each live in their own registry. Implementations
/// must hand out ids that are unique, monotonically increasing, and never
/// reused, even after a removal.
pub trait Registry: Send + Sync {
    /// The identifier type handed out by [`next_id`](Self::next_id).
    type Id: Copy + Eq;
    /// The stored entry type.
    type Entry: Clone;

    /// Reserve the next identifier.
    fn next_id(&self) -> Self::Id;

    /// Fetch a copy of the entry stored under `id`.
    fn get(&self, id: Self::Id) -> Option<Self::Entry>;

    /// Store `entry` under `id`, replacing any previous entry.
    fn put(&self, id: Self::Id, entry: Self::Entry);

    /// Remove and return the entry stored under `id`.
    fn remove(&self, id: Self::Id) -> Option<Self::Entry>;

    /// Snapshot of every entry with its id, ordered by id.
    fn all_with_id(&self) -> Vec<(Self::Id, Self::Entry)>;

    /// Mutate the entry stored under `id` in place, inside the registry's
    /// critical section.
    ///
    /// The closure runs against the shared instance: whatever it mutates
    /// stays mutated even when it reports a failure through its return
    /// value. Returns `None` when no entry exists under `id`.
    fn update<F, R>(&self, id: Self::Id, f: F) -> Option<R>
    where
        F: FnOnce(&mut Self::Entry) -> R;
}
