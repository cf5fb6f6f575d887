use alloc::collections::BTreeSet;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type RowMap<V> = HashMap<usize, V>;
#[cfg(not(feature = "std"))]
type RowMap<V> = BTreeMap<usize, V>;

#[derive(Clone, Debug)]
struct CacheEntry<R> {
    row: R,
    /// Sync tick at which the row was last visible.
    last_visible: u64,
}

/// Row representations keyed by row index.
///
/// Unbounded unless a capacity is given. A bounded cache drops the entries that have been out
/// of the window the longest, and never drops a row that is currently visible.
#[derive(Clone, Debug)]
pub(crate) struct RowCache<R> {
    entries: RowMap<CacheEntry<R>>,
    capacity: Option<usize>,
}

impl<R> RowCache<R> {
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: RowMap::new(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&R> {
        self.entries.get(&index).map(|e| &e.row)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.entries.get_mut(&index).map(|e| &mut e.row)
    }

    pub(crate) fn insert(&mut self, index: usize, row: R, tick: u64) {
        self.entries.insert(
            index,
            CacheEntry {
                row,
                last_visible: tick,
            },
        );
    }

    pub(crate) fn touch(&mut self, index: usize, tick: u64) {
        if let Some(entry) = self.entries.get_mut(&index) {
            entry.last_visible = tick;
        }
    }

    /// Drops entries for rows at or past `row_count`.
    pub(crate) fn truncate(&mut self, row_count: usize) {
        self.entries.retain(|&index, _| index < row_count);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Enforces the capacity bound, skipping rows in `visible`. Returns the number of entries
    /// dropped.
    pub(crate) fn prune(&mut self, visible: &BTreeSet<usize>) -> usize {
        let Some(capacity) = self.capacity else {
            return 0;
        };

        let mut pruned = 0usize;
        while self.entries.len() > capacity {
            let victim = self
                .entries
                .iter()
                .filter(|(index, _)| !visible.contains(*index))
                .min_by_key(|(index, entry)| (entry.last_visible, **index))
                .map(|(index, _)| *index);
            let Some(victim) = victim else {
                break;
            };
            self.entries.remove(&victim);
            pruned += 1;
        }
        pruned
    }
}
