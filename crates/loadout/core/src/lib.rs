//! Spatial inventory allocation engine shared across clients.
//!
//! `loadout-core` defines the canonical rules for equipped gear and the
//! nested, spatially-constrained storage that gear provides: the 2D
//! bin-packing [`GridContainer`], the [`EquipmentRegistry`] slot state
//! machine, the [`TransferBuffer`] that carries container contents across
//! teardown/rebuild, and the [`PickupResolver`] that applies free-floating
//! items to the registry.
//!
//! Everything here is synchronous and deterministic: operations execute on
//! the single control thread driving the surrounding interactive loop, and
//! each one is an atomic state transition that either completes or leaves
//! state unchanged. Rendering, drag feedback, and world-space drop physics
//! are external collaborators that consume the query surface and the change
//! notifications.
pub mod config;
pub mod equipment;
pub mod error;
pub mod grid;
pub mod item;
pub mod pickup;
pub mod transfer;

pub use config::InventoryConfig;
pub use equipment::{
    ChangeEvent, EquipError, EquipReport, EquipmentObserver, EquipmentRegistry, EquipmentSlot,
    UnequipReport,
};
pub use error::{ErrorSeverity, InventoryError};
pub use grid::{CellOrigin, GridContainer, GridError, PlacedItem};
pub use item::{Footprint, ItemDefinition, ItemHandle, SlotCategory};
pub use pickup::{PickupOutcome, PickupResolver};
pub use transfer::{StoredItem, TransferBuffer};
