use std::cell::Cell;

/// Counter that can be bumped through `&self`.
///
/// Used for lookups that do not reorder the cache (`peek`, `peek_lru`). The
/// owning core is `Send` but not `Sync`; shared access always goes through the
/// cache mutex, so no atomics are needed.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}
