//! Transfer buffer bridging container contents across destroy/recreate gaps.
//!
//! When a storage-providing item is unequipped or dropped, its container is
//! torn down and the ordered contents are parked here, keyed by the item's
//! handle. Re-equipping the same item consumes the snapshot into the freshly
//! built container. There is no time bound between the two events.

use std::collections::HashMap;

use crate::item::{Footprint, ItemHandle};

/// One entry of a parked container snapshot: everything needed to re-place
/// the item through the normal placement rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredItem {
    pub handle: ItemHandle,
    pub footprint: Footprint,
}

impl StoredItem {
    pub const fn new(handle: ItemHandle, footprint: Footprint) -> Self {
        Self { handle, footprint }
    }
}

/// Map from item handle to its last-known ordered container contents.
///
/// An item has at most one pending snapshot at a time: a second snapshot for
/// the same handle overwrites the first (last write wins). [`Self::snapshot`]
/// returns the displaced contents so callers can surface the data loss
/// instead of losing it silently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransferBuffer {
    snapshots: HashMap<ItemHandle, Vec<StoredItem>>,
}

impl TransferBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `contents` under `handle`, returning the previous snapshot for
    /// that handle if one was still pending.
    pub fn snapshot(
        &mut self,
        handle: ItemHandle,
        contents: Vec<StoredItem>,
    ) -> Option<Vec<StoredItem>> {
        self.snapshots.insert(handle, contents)
    }

    /// Removes and returns the pending snapshot for `handle`.
    ///
    /// The read is destructive: a given snapshot is consumed at most once.
    pub fn take_snapshot(&mut self, handle: ItemHandle) -> Option<Vec<StoredItem>> {
        self.snapshots.remove(&handle)
    }

    /// Non-destructive presence probe.
    pub fn has_snapshot(&self, handle: ItemHandle) -> bool {
        self.snapshots.contains_key(&handle)
    }

    /// Non-destructive view of a pending snapshot.
    pub fn pending(&self, handle: ItemHandle) -> Option<&[StoredItem]> {
        self.snapshots.get(&handle).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(handle: u32) -> StoredItem {
        StoredItem::new(ItemHandle(handle), Footprint::single())
    }

    #[test]
    fn take_is_destructive() {
        let mut buffer = TransferBuffer::new();
        buffer.snapshot(ItemHandle(1), vec![stored(10), stored(11)]);

        assert!(buffer.has_snapshot(ItemHandle(1)));
        let contents = buffer.take_snapshot(ItemHandle(1)).unwrap();
        assert_eq!(contents.len(), 2);
        assert!(!buffer.has_snapshot(ItemHandle(1)));
        assert_eq!(buffer.take_snapshot(ItemHandle(1)), None);
    }

    #[test]
    fn second_snapshot_overwrites_and_returns_previous() {
        let mut buffer = TransferBuffer::new();
        assert_eq!(buffer.snapshot(ItemHandle(1), vec![stored(10)]), None);

        let displaced = buffer.snapshot(ItemHandle(1), vec![stored(20)]).unwrap();
        assert_eq!(displaced, vec![stored(10)]);

        let contents = buffer.take_snapshot(ItemHandle(1)).unwrap();
        assert_eq!(contents, vec![stored(20)]);
    }

    #[test]
    fn snapshots_are_independent_per_handle() {
        let mut buffer = TransferBuffer::new();
        buffer.snapshot(ItemHandle(1), vec![stored(10)]);
        buffer.snapshot(ItemHandle(2), vec![stored(20)]);

        buffer.take_snapshot(ItemHandle(1));
        assert!(buffer.has_snapshot(ItemHandle(2)));
        assert_eq!(buffer.len(), 1);
    }
}
