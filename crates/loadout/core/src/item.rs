//! Item definitions and slot categories.
//!
//! Items are value-like definitions: shared, never mutated at runtime.
//! World instances and container entries reference a definition by its
//! [`ItemHandle`]; all identity comparisons (removal, transfer-buffer keys,
//! unequip-by-item) go through the handle.

/// Reference to an item definition stored outside the engine (lookup via catalog).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemHandle(pub u32);

/// Footprint of an item in grid cells. Both dimensions are at least 1.
///
/// Orientation is baked into the footprint: a 2x1 blade and a 1x2 blade are
/// distinct footprints, not a rotation flag on one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A 1x1 footprint, the common case for small loot.
    pub const fn single() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }

    /// Number of cells this footprint covers.
    pub const fn cells(&self) -> u32 {
        self.width * self.height
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::single()
    }
}

/// The closed set of equipment slot kinds.
///
/// Fixed at compile time; never added to or removed at runtime. The derive
/// order is the canonical declaration order used everywhere ordering matters
/// (storage-slot iteration, display layout).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SlotCategory {
    /// Main-hand weapon.
    PrimaryWeapon,
    Head,
    Chest,
    Legs,
    Boots,
    /// Off-hand weapon or shield.
    SecondaryWeapon,
    Necklace,
    /// The usual storage provider.
    Bag,
    Belt,
    Ring,
}

impl SlotCategory {
    /// Number of slot categories (and therefore equipment slots).
    pub const COUNT: usize = <Self as strum::EnumCount>::COUNT;

    /// Stable index of this category in declaration order.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Immutable item definition.
///
/// `storage` is capacity in grid cells; 0 means the item is not a container.
/// `slot: Some(_)` marks the item as gear that equips into that category.
/// `description` and `price` are display data for UI collaborators and are
/// never read by the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub footprint: Footprint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub storage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: Option<SlotCategory>,
}

impl ItemDefinition {
    pub fn new(handle: ItemHandle, name: impl Into<String>, footprint: Footprint) -> Self {
        Self {
            handle,
            name: name.into(),
            description: String::new(),
            price: 0,
            footprint,
            storage: 0,
            slot: None,
        }
    }

    /// Marks the item as gear for the given slot category.
    #[must_use]
    pub fn with_slot(mut self, slot: SlotCategory) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Sets the storage capacity in cells (bags, belts).
    #[must_use]
    pub fn with_storage(mut self, storage: u32) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    /// True if this item equips into a slot.
    pub fn is_gear(&self) -> bool {
        self.slot.is_some()
    }

    /// True if equipping this item creates a storage container.
    pub fn provides_storage(&self) -> bool {
        self.storage > 0
    }
}
