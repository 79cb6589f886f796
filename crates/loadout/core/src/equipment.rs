//! Equipment slots, the slot registry, and change notification.
//!
//! The registry is the single point of mutation for equipment state. It owns
//! one [`EquipmentSlot`] per [`SlotCategory`], the [`TransferBuffer`] that
//! carries container contents across teardown/rebuild, and an explicit
//! observer list for change notification. There is no ambient global: the
//! registry is constructed once at composition time and passed by reference
//! to collaborators.
//!
//! Per-slot state machine (independent per category):
//!
//! ```text
//! Empty --equip(item)--> Occupied(item)        container built if item.storage > 0
//! Occupied(item) --unequip--> Empty            container torn down, contents snapshotted
//! equip while Occupied --> rejected, no state change
//! ```

use strum::IntoEnumIterator;

use crate::config::InventoryConfig;
use crate::error::{ErrorSeverity, InventoryError};
use crate::grid::{GridContainer, GridError};
use crate::item::{ItemDefinition, ItemHandle, SlotCategory};
use crate::transfer::{StoredItem, TransferBuffer};

/// Notification fired after every successful mutation, on a single channel
/// so display and drag collaborators need only one subscription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Gear was equipped into `category`.
    Equipped {
        item: ItemHandle,
        category: SlotCategory,
    },
    /// The slot for `category` was cleared.
    Unequipped { category: SlotCategory },
    /// A plain item was deposited into the container equipped in `category`.
    Stored {
        item: ItemHandle,
        category: SlotCategory,
    },
    /// A plain item was removed from the container equipped in `category`.
    Removed {
        item: ItemHandle,
        category: SlotCategory,
    },
}

/// Subscriber to registry change notifications.
///
/// The engine is single-threaded; observers run synchronously on the calling
/// thread, after the mutation has fully committed. The registry works with
/// zero subscribers.
pub trait EquipmentObserver {
    fn equipment_changed(&self, event: &ChangeEvent);
}

impl<F: Fn(&ChangeEvent)> EquipmentObserver for F {
    fn equipment_changed(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Outcome of a successful equip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipReport {
    pub category: SlotCategory,
    /// Items restored into the fresh container from a pending snapshot.
    pub restored: usize,
    /// Snapshot items that no longer fit during restoration.
    ///
    /// Should stay empty while capacity and grid width are unchanged between
    /// teardown and rebuild; surfaced so callers can warn instead of losing
    /// items silently.
    pub dropped: Vec<StoredItem>,
}

/// Outcome of a successful unequip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnequipReport {
    pub item: ItemHandle,
    pub category: SlotCategory,
    /// Container items parked in the transfer buffer.
    pub snapshotted: usize,
    /// A previous pending snapshot for the same item that this teardown
    /// overwrote (last write wins).
    pub displaced: Option<Vec<StoredItem>>,
}

/// Errors from registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    /// The item has no required slot category.
    #[error("item {item:?} is not gear and cannot be equipped")]
    NotGear { item: ItemHandle },

    /// The slot for the item's category already holds an item. Equip never
    /// implicitly replaces; the caller must unequip first.
    #[error("slot {category} is already occupied by {occupant:?}")]
    SlotOccupied {
        category: SlotCategory,
        occupant: ItemHandle,
    },

    /// No slot currently holds the item.
    #[error("item {item:?} is not equipped in any slot")]
    NotEquipped { item: ItemHandle },

    /// Container construction failed (misconfigured grid width).
    #[error(transparent)]
    Container(#[from] GridError),
}

impl InventoryError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EquipError::SlotOccupied { .. } | EquipError::NotEquipped { .. } => {
                ErrorSeverity::Recoverable
            }
            EquipError::NotGear { .. } => ErrorSeverity::Validation,
            EquipError::Container(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EquipError::NotGear { .. } => "EQUIP_NOT_GEAR",
            EquipError::SlotOccupied { .. } => "EQUIP_SLOT_OCCUPIED",
            EquipError::NotEquipped { .. } => "EQUIP_NOT_EQUIPPED",
            EquipError::Container(inner) => inner.error_code(),
        }
    }
}

/// One equipment slot: a category, an optionally equipped item, and the
/// container that item provides if it is a storage item.
///
/// Created once at registry construction; never destroyed while the registry
/// lives. Mutated only through the registry's equip/unequip operations.
#[derive(Clone, Debug, PartialEq)]
pub struct EquipmentSlot {
    category: SlotCategory,
    equipped: Option<ItemHandle>,
    container: Option<GridContainer>,
}

impl EquipmentSlot {
    fn new(category: SlotCategory) -> Self {
        Self {
            category,
            equipped: None,
            container: None,
        }
    }

    pub fn category(&self) -> SlotCategory {
        self.category
    }

    pub fn equipped(&self) -> Option<ItemHandle> {
        self.equipped
    }

    /// Present iff the equipped item provides storage.
    pub fn container(&self) -> Option<&GridContainer> {
        self.container.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.equipped.is_none()
    }

    pub fn provides_storage(&self) -> bool {
        self.container.is_some()
    }
}

/// The fixed set of equipment slots and the single point of mutation for
/// equipment state.
pub struct EquipmentRegistry {
    config: InventoryConfig,
    /// One slot per category, in declaration order.
    slots: Vec<EquipmentSlot>,
    buffer: TransferBuffer,
    observers: Vec<Box<dyn EquipmentObserver>>,
}

impl EquipmentRegistry {
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            config,
            slots: SlotCategory::iter().map(EquipmentSlot::new).collect(),
            buffer: TransferBuffer::new(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Registers an observer for change notifications.
    ///
    /// Subscription is explicit and permanent for the registry's lifetime;
    /// there is no discovery of listeners.
    pub fn subscribe(&mut self, observer: impl EquipmentObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Equips gear into the slot for its category.
    ///
    /// Fails with [`EquipError::SlotOccupied`] (recoverable, never a fault)
    /// if the slot already holds an item. On success, a storage-providing
    /// item gets a fresh container, and any pending transfer-buffer snapshot
    /// for this item is restored into it (consuming the buffer entry).
    pub fn equip(&mut self, item: &ItemDefinition) -> Result<EquipReport, EquipError> {
        let category = item.slot.ok_or(EquipError::NotGear { item: item.handle })?;
        let index = category.index();

        if let Some(occupant) = self.slots[index].equipped {
            return Err(EquipError::SlotOccupied { category, occupant });
        }

        // Build and restore the container before touching the slot so a
        // construction failure leaves the registry unchanged.
        let mut report = EquipReport {
            category,
            restored: 0,
            dropped: Vec::new(),
        };
        let mut container = None;
        if item.provides_storage() {
            let mut grid = GridContainer::new(item.storage, self.config.grid_width)?;
            if let Some(contents) = self.buffer.take_snapshot(item.handle) {
                report.dropped = grid.replace_contents(&contents);
                report.restored = contents.len() - report.dropped.len();
            }
            container = Some(grid);
        }

        let slot = &mut self.slots[index];
        slot.equipped = Some(item.handle);
        slot.container = container;

        self.notify(&ChangeEvent::Equipped {
            item: item.handle,
            category,
        });
        Ok(report)
    }

    /// Clears the slot for `category`. No-op (returns `None`) on an empty
    /// slot.
    ///
    /// A live container is torn down; non-empty contents are snapshotted
    /// into the transfer buffer keyed by the unequipped item's handle.
    pub fn unequip(&mut self, category: SlotCategory) -> Option<UnequipReport> {
        let index = category.index();
        let item = self.slots[index].equipped.take()?;
        Some(self.tear_down(index, item))
    }

    /// Same teardown as [`Self::unequip`], but locates the slot by the
    /// equipped item instead of by category.
    pub fn unequip_item(&mut self, handle: ItemHandle) -> Result<UnequipReport, EquipError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.equipped == Some(handle))
            .ok_or(EquipError::NotEquipped { item: handle })?;
        self.slots[index].equipped = None;
        Ok(self.tear_down(index, handle))
    }

    /// Deposits a plain item into the first storage container that accepts
    /// it, scanning categories in declaration order. `None` if every
    /// container rejects the item (full or too fragmented).
    pub fn store(&mut self, item: &ItemDefinition) -> Option<SlotCategory> {
        for index in 0..self.slots.len() {
            let category = self.slots[index].category;
            let Some(container) = self.slots[index].container.as_mut() else {
                continue;
            };
            if container.add(item).is_some() {
                self.notify(&ChangeEvent::Stored {
                    item: item.handle,
                    category,
                });
                return Some(category);
            }
        }
        None
    }

    /// Deposits a plain item into the container equipped in a specific
    /// category (drag-and-drop target). `false` if the slot has no container
    /// or the container rejects the item.
    pub fn store_in(&mut self, category: SlotCategory, item: &ItemDefinition) -> bool {
        let Some(container) = self.slots[category.index()].container.as_mut() else {
            return false;
        };
        if container.add(item).is_none() {
            return false;
        }
        self.notify(&ChangeEvent::Stored {
            item: item.handle,
            category,
        });
        true
    }

    /// Removes the first occurrence of a contained item from whichever
    /// container holds it. `None` if no container contains the handle.
    pub fn remove_item(&mut self, handle: ItemHandle) -> Option<SlotCategory> {
        for index in 0..self.slots.len() {
            let category = self.slots[index].category;
            let Some(container) = self.slots[index].container.as_mut() else {
                continue;
            };
            if container.remove(handle) {
                self.notify(&ChangeEvent::Removed {
                    item: handle,
                    category,
                });
                return Some(category);
            }
        }
        None
    }

    /// Sum of storage capacity over all equipped storage-providing items.
    ///
    /// Used by display collaborators to size their layout; no internal
    /// invariant depends on it.
    pub fn total_storage_capacity(&self) -> u32 {
        self.storage_slots()
            .map(|slot| slot.container().map_or(0, GridContainer::capacity))
            .sum()
    }

    /// Slots currently holding a storage-providing item, in category
    /// declaration order. The ordering is stable and deterministic, so
    /// collaborators may rely on it for consistent layout.
    pub fn storage_slots(&self) -> impl Iterator<Item = &EquipmentSlot> {
        self.slots.iter().filter(|slot| slot.provides_storage())
    }

    pub fn slot(&self, category: SlotCategory) -> &EquipmentSlot {
        &self.slots[category.index()]
    }

    pub fn equipped(&self, category: SlotCategory) -> Option<ItemHandle> {
        self.slots[category.index()].equipped
    }

    pub fn container(&self, category: SlotCategory) -> Option<&GridContainer> {
        self.slots[category.index()].container()
    }

    /// Non-destructive view of a pending transfer-buffer snapshot.
    pub fn pending_snapshot(&self, handle: ItemHandle) -> Option<&[StoredItem]> {
        self.buffer.pending(handle)
    }

    pub fn has_pending_snapshot(&self, handle: ItemHandle) -> bool {
        self.buffer.has_snapshot(handle)
    }

    /// Shared teardown path: the caller has already cleared `equipped`.
    fn tear_down(&mut self, index: usize, item: ItemHandle) -> UnequipReport {
        let category = self.slots[index].category;
        let container = self.slots[index].container.take();

        let mut snapshotted = 0;
        let mut displaced = None;
        if let Some(container) = container {
            let contents = container.contents_snapshot();
            if !contents.is_empty() {
                snapshotted = contents.len();
                displaced = self.buffer.snapshot(item, contents);
            }
        }

        self.notify(&ChangeEvent::Unequipped { category });
        UnequipReport {
            item,
            category,
            snapshotted,
            displaced,
        }
    }

    fn notify(&self, event: &ChangeEvent) {
        for observer in &self.observers {
            observer.equipment_changed(event);
        }
    }
}

impl Default for EquipmentRegistry {
    fn default() -> Self {
        Self::new(InventoryConfig::default())
    }
}
