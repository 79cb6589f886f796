use loadout_core::{EquipError, ItemHandle};

/// Session-level errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The handle resolves to nothing in the loaded catalog. Indicates a
    /// defect in the calling collaborator (stale world object, bad data).
    #[error("item {handle:?} is not in the catalog")]
    UnknownItem { handle: ItemHandle },

    /// A registry operation failed.
    #[error(transparent)]
    Equip(#[from] EquipError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
