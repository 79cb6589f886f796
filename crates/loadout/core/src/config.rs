use crate::item::SlotCategory;

/// Inventory configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryConfig {
    /// Fixed column count for every grid container built by the registry.
    pub grid_width: u32,
}

impl InventoryConfig {
    // ===== compile-time constants =====
    /// One equipment slot per category, created at registry construction.
    pub const MAX_EQUIPMENT_SLOTS: usize = SlotCategory::COUNT;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_WIDTH: u32 = 5;

    pub fn new() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_WIDTH,
        }
    }

    pub fn with_grid_width(grid_width: u32) -> Self {
        Self { grid_width }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
