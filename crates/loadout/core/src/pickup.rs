//! Pickup resolution: what happens when a free-floating item meets the
//! registry.
//!
//! Gear attempts to equip into its slot; plain items go to the first storage
//! container with room. A rejected pickup leaves the world item where it is —
//! the resolver never swaps equipped gear or stashes gear into containers.

use crate::equipment::{EquipReport, EquipmentRegistry};
use crate::item::{ItemDefinition, SlotCategory};

/// Disposition of a presented item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickupOutcome {
    /// The item was gear and its slot was free.
    Equipped { report: EquipReport },
    /// The item was plain and a container accepted it.
    Stored { category: SlotCategory },
    /// Nothing accepted the item; it remains free-floating in the world.
    Rejected,
}

impl PickupOutcome {
    /// True if the item was consumed and the world object should despawn.
    pub fn consumed(&self) -> bool {
        !matches!(self, PickupOutcome::Rejected)
    }
}

/// Applies an incoming free-floating item to a registry.
pub struct PickupResolver;

impl PickupResolver {
    /// Resolves a pickup against the registry.
    ///
    /// Successful outcomes emit on the registry's normal notification
    /// channel (equip or store events); a rejection emits nothing.
    pub fn resolve(registry: &mut EquipmentRegistry, item: &ItemDefinition) -> PickupOutcome {
        if item.is_gear() {
            match registry.equip(item) {
                Ok(report) => PickupOutcome::Equipped { report },
                // Occupied slot: the item stays in the world. No swap, no
                // attempt to stash the gear in a container instead.
                Err(_) => PickupOutcome::Rejected,
            }
        } else {
            match registry.store(item) {
                Some(category) => PickupOutcome::Stored { category },
                None => PickupOutcome::Rejected,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Footprint, ItemHandle};

    fn bag(handle: u32, storage: u32) -> ItemDefinition {
        ItemDefinition::new(ItemHandle(handle), "Bag", Footprint::new(2, 2))
            .with_slot(SlotCategory::Bag)
            .with_storage(storage)
    }

    fn coin(handle: u32) -> ItemDefinition {
        ItemDefinition::new(ItemHandle(handle), "Coin", Footprint::single())
    }

    #[test]
    fn gear_equips_when_slot_is_free() {
        let mut registry = EquipmentRegistry::default();
        let outcome = PickupResolver::resolve(&mut registry, &bag(1, 12));
        assert!(matches!(outcome, PickupOutcome::Equipped { .. }));
        assert!(outcome.consumed());
    }

    #[test]
    fn gear_is_rejected_when_slot_is_occupied() {
        let mut registry = EquipmentRegistry::default();
        registry.equip(&bag(1, 12)).unwrap();

        let outcome = PickupResolver::resolve(&mut registry, &bag(2, 10));
        assert_eq!(outcome, PickupOutcome::Rejected);
        assert!(!outcome.consumed());
        // The occupying bag is untouched.
        assert_eq!(registry.equipped(SlotCategory::Bag), Some(ItemHandle(1)));
    }

    #[test]
    fn plain_item_goes_to_first_container_with_room() {
        let mut registry = EquipmentRegistry::default();
        registry.equip(&bag(1, 12)).unwrap();

        let outcome = PickupResolver::resolve(&mut registry, &coin(10));
        assert_eq!(
            outcome,
            PickupOutcome::Stored {
                category: SlotCategory::Bag,
            }
        );
    }

    #[test]
    fn plain_item_is_rejected_without_storage() {
        let mut registry = EquipmentRegistry::default();
        let outcome = PickupResolver::resolve(&mut registry, &coin(10));
        assert_eq!(outcome, PickupOutcome::Rejected);
    }

    #[test]
    fn re_equipping_a_dropped_bag_restores_its_contents() {
        let mut registry = EquipmentRegistry::default();
        let the_bag = bag(1, 12);

        registry.equip(&the_bag).unwrap();
        registry.store(&coin(10)).unwrap();
        registry.unequip_item(ItemHandle(1)).unwrap();

        let outcome = PickupResolver::resolve(&mut registry, &the_bag);
        let PickupOutcome::Equipped { report } = outcome else {
            panic!("expected the bag to equip");
        };
        assert_eq!(report.restored, 1);
        assert_eq!(
            registry.container(SlotCategory::Bag).unwrap().items().len(),
            1
        );
    }
}
