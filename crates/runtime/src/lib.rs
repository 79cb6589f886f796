//! Runtime orchestration for the inventory engine.
//!
//! This crate wires the pure `loadout-core` engine to its surroundings:
//! catalog-backed handle resolution, pickup/drop event handling, and
//! `tracing` diagnostics. Consumers embed [`InventorySession`] as the
//! explicit composition root instead of reaching for any ambient global.
pub mod error;
pub mod session;

pub use error::{Result, SessionError};
pub use session::InventorySession;
