//! Item catalog loading and indexed lookup.

use std::collections::HashMap;
use std::path::Path;

use loadout_core::{ItemDefinition, ItemHandle};
use serde::{Deserialize, Serialize};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load an item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    /// Parse an item catalog from RON text.
    pub fn from_str(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        Ok(catalog)
    }
}

/// Error building a catalog index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two definitions share a handle; handles are identity.
    #[error("duplicate item handle {handle:?} in catalog")]
    DuplicateHandle { handle: ItemHandle },
}

/// Handle-keyed view over a loaded catalog.
///
/// The engine stores handles; collaborators resolve them to definitions
/// through this index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    definitions: HashMap<ItemHandle, ItemDefinition>,
}

impl CatalogIndex {
    /// Builds an index, rejecting duplicate handles.
    pub fn from_catalog(catalog: ItemCatalog) -> Result<Self, CatalogError> {
        let mut definitions = HashMap::with_capacity(catalog.items.len());
        for item in catalog.items {
            let handle = item.handle;
            if definitions.insert(handle, item).is_some() {
                return Err(CatalogError::DuplicateHandle { handle });
            }
        }
        Ok(Self { definitions })
    }

    pub fn definition(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.definitions.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::{Footprint, SlotCategory};
    use std::io::Write;

    const CATALOG_RON: &str = r#"
(
    items: [
        (
            handle: 1,
            name: "Rusty Sword",
            description: "Seen better days.",
            price: 25,
            footprint: (width: 1, height: 2),
            slot: Some(PrimaryWeapon),
        ),
        (
            handle: 2,
            name: "Leather Satchel",
            footprint: (width: 2, height: 2),
            storage: 12,
            slot: Some(Bag),
        ),
        (
            handle: 3,
            name: "Gold Coin",
            price: 1,
        ),
    ],
)
"#;

    #[test]
    fn parses_catalog_ron() {
        let catalog = CatalogLoader::from_str(CATALOG_RON).unwrap();
        assert_eq!(catalog.items.len(), 3);

        let satchel = &catalog.items[1];
        assert_eq!(satchel.handle, ItemHandle(2));
        assert_eq!(satchel.footprint, Footprint::new(2, 2));
        assert_eq!(satchel.storage, 12);
        assert_eq!(satchel.slot, Some(SlotCategory::Bag));

        // Omitted fields take their defaults.
        let coin = &catalog.items[2];
        assert_eq!(coin.footprint, Footprint::single());
        assert_eq!(coin.storage, 0);
        assert_eq!(coin.slot, None);
    }

    #[test]
    fn loads_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG_RON.as_bytes()).unwrap();

        let catalog = CatalogLoader::load(file.path()).unwrap();
        assert_eq!(catalog.items.len(), 3);
    }

    #[test]
    fn index_rejects_duplicate_handles() {
        let catalog = ItemCatalog {
            items: vec![
                ItemDefinition::new(ItemHandle(1), "A", Footprint::single()),
                ItemDefinition::new(ItemHandle(1), "B", Footprint::single()),
            ],
        };
        assert_eq!(
            CatalogIndex::from_catalog(catalog),
            Err(CatalogError::DuplicateHandle {
                handle: ItemHandle(1),
            })
        );
    }

    #[test]
    fn index_resolves_handles() {
        let catalog = CatalogLoader::from_str(CATALOG_RON).unwrap();
        let index = CatalogIndex::from_catalog(catalog).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.definition(ItemHandle(3)).unwrap().name, "Gold Coin");
        assert!(index.definition(ItemHandle(99)).is_none());
    }
}
