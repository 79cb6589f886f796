//! Session orchestration around the equipment registry.
//!
//! [`InventorySession`] is the composition root the engine's collaborators
//! wire against: it owns the registry and the item catalog, resolves handles
//! to definitions at the boundary, and adds `tracing` diagnostics around
//! every mutation. World collaborators hand it pickup and drop events and
//! act on the returned disposition (despawn on consumed pickups, spawn on
//! drops); display collaborators use the read-only query surface and the
//! registry's change notifications.

use loadout_content::CatalogIndex;
use loadout_core::{
    EquipReport, EquipmentObserver, EquipmentRegistry, EquipmentSlot, InventoryConfig,
    ItemDefinition, ItemHandle, PickupOutcome, PickupResolver, SlotCategory, UnequipReport,
};

use crate::error::{Result, SessionError};

/// One character's equipment and storage, driven synchronously by the
/// surrounding interactive loop.
pub struct InventorySession {
    registry: EquipmentRegistry,
    catalog: CatalogIndex,
}

impl InventorySession {
    pub fn new(config: InventoryConfig, catalog: CatalogIndex) -> Self {
        Self {
            registry: EquipmentRegistry::new(config),
            catalog,
        }
    }

    /// Read-only access to the registry's query surface.
    pub fn registry(&self) -> &EquipmentRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Registers an observer on the registry's notification channel.
    pub fn subscribe(&mut self, observer: impl EquipmentObserver + 'static) {
        self.registry.subscribe(observer);
    }

    /// Applies an inbound pickup event: equips gear, or deposits a plain
    /// item into the first container with room.
    ///
    /// A `Rejected` outcome means the item stays free-floating in the world;
    /// `consumed()` tells the collaborator whether to despawn the world
    /// object.
    pub fn pickup(&mut self, handle: ItemHandle) -> Result<PickupOutcome> {
        let item = self.definition(handle)?;
        let outcome = PickupResolver::resolve(&mut self.registry, &item);
        match &outcome {
            PickupOutcome::Equipped { report } => {
                tracing::info!(?handle, category = %report.category, "picked up and equipped");
                self.warn_on_partial_restore(handle, report);
            }
            PickupOutcome::Stored { category } => {
                tracing::info!(?handle, %category, "picked up into storage");
            }
            PickupOutcome::Rejected => {
                tracing::debug!(?handle, "pickup rejected, item stays in world");
            }
        }
        Ok(outcome)
    }

    /// Equips gear directly (menu-driven equip rather than a world pickup).
    pub fn equip(&mut self, handle: ItemHandle) -> Result<EquipReport> {
        let item = self.definition(handle)?;
        let report = self.registry.equip(&item)?;
        tracing::info!(?handle, category = %report.category, "equipped");
        self.warn_on_partial_restore(handle, &report);
        Ok(report)
    }

    /// Clears a slot by category. `None` if the slot was already empty.
    pub fn unequip(&mut self, category: SlotCategory) -> Option<UnequipReport> {
        let report = self.registry.unequip(category)?;
        self.log_teardown(&report);
        Some(report)
    }

    /// Inbound drop event for equipped gear: clears the slot (snapshotting
    /// container contents first) and returns the handle for the world
    /// collaborator to spawn as a free-floating item.
    pub fn drop_equipped(&mut self, category: SlotCategory) -> Option<ItemHandle> {
        let report = self.registry.unequip(category)?;
        self.log_teardown(&report);
        Some(report.item)
    }

    /// Drop event addressed by item rather than by slot.
    pub fn drop_equipped_item(&mut self, handle: ItemHandle) -> Result<SlotCategory> {
        let report = self.registry.unequip_item(handle)?;
        self.log_teardown(&report);
        Ok(report.category)
    }

    /// Removes a plain item from whichever container holds it (drag out of a
    /// bag into the world). Returns the container's category, or `None` if
    /// nothing holds the item.
    pub fn drop_item(&mut self, handle: ItemHandle) -> Option<SlotCategory> {
        let category = self.registry.remove_item(handle)?;
        tracing::info!(?handle, %category, "removed from storage");
        Some(category)
    }

    // ----- read-only queries for display collaborators -----

    pub fn total_storage_capacity(&self) -> u32 {
        self.registry.total_storage_capacity()
    }

    pub fn storage_slots(&self) -> impl Iterator<Item = &EquipmentSlot> {
        self.registry.storage_slots()
    }

    fn definition(&self, handle: ItemHandle) -> Result<ItemDefinition> {
        self.catalog
            .definition(handle)
            .cloned()
            .ok_or(SessionError::UnknownItem { handle })
    }

    fn warn_on_partial_restore(&self, handle: ItemHandle, report: &EquipReport) {
        if !report.dropped.is_empty() {
            tracing::warn!(
                ?handle,
                dropped = report.dropped.len(),
                restored = report.restored,
                "partial restore: some snapshot items no longer fit"
            );
        }
    }

    fn log_teardown(&self, report: &UnequipReport) {
        tracing::info!(
            item = ?report.item,
            category = %report.category,
            snapshotted = report.snapshotted,
            "unequipped"
        );
        if let Some(displaced) = &report.displaced {
            tracing::warn!(
                item = ?report.item,
                lost = displaced.len(),
                "snapshot overwritten before restoration; previous contents lost"
            );
        }
    }
}
