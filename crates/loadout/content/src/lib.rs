//! Data-driven item content and loaders.
//!
//! This crate houses item catalogs and the loader that reads them from RON
//! data files. Definitions use `loadout-core` types directly with serde for
//! deserialization; the engine itself never reads files.
//!
//! A starter catalog ships under `data/items.ron`.

pub mod catalog;

pub use catalog::{CatalogError, CatalogIndex, CatalogLoader, ItemCatalog, LoadResult};
