//! Bounded 2D cell grid that places footprint-bearing items without overlap.
//!
//! A [`GridContainer`] has a fixed column count and a row count derived from
//! its capacity (`rows = ceil(capacity / columns)`). Placement scans candidate
//! origins in row-major order and takes the first origin whose full footprint
//! is in bounds and unoccupied, so placement is deterministic: the
//! lexicographically smallest (row, col) valid origin wins.
//!
//! Cells whose row-major index is at or beyond `capacity` are permanently
//! masked off; a capacity-12 grid with 5 columns has 3 rows with only the
//! first 2 cells of the last row usable. No compaction or defragmentation is
//! ever attempted: a fragmented grid may report available space yet reject a
//! wide footprint, and that is a normal outcome, not a fault.

use crate::error::{ErrorSeverity, InventoryError};
use crate::item::{Footprint, ItemDefinition, ItemHandle};
use crate::transfer::StoredItem;

/// Top-left cell of a placed item's footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellOrigin {
    pub row: u32,
    pub col: u32,
}

impl CellOrigin {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A contained item together with where it sits in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub handle: ItemHandle,
    pub origin: CellOrigin,
    pub footprint: Footprint,
}

/// Errors constructing a grid container.
///
/// These are contract violations: the registry only builds containers for
/// items whose storage capacity is positive, and the configured width is
/// validated at composition time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Container capacity must be positive.
    #[error("container capacity must be positive (got {capacity})")]
    InvalidCapacity { capacity: u32 },

    /// Grid width must be positive.
    #[error("grid width must be positive")]
    InvalidWidth,
}

impl InventoryError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GridError::InvalidCapacity { .. } | GridError::InvalidWidth => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::InvalidCapacity { .. } => "GRID_INVALID_CAPACITY",
            GridError::InvalidWidth => "GRID_INVALID_WIDTH",
        }
    }
}

/// Fixed-width, capacity-derived 2D grid of item placements.
///
/// Owned exclusively by one equipment slot (or briefly unowned while its
/// contents travel through the transfer buffer). Every mutation is
/// all-or-nothing: a failed `add` leaves the grid untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridContainer {
    columns: u32,
    rows: u32,
    capacity: u32,
    /// Row-major occupancy table; `cells[row * columns + col]`.
    cells: Vec<Option<ItemHandle>>,
    /// Contained items in insertion order.
    items: Vec<PlacedItem>,
}

impl GridContainer {
    /// Creates an empty grid with the given capacity in cells.
    ///
    /// Rows are derived as `ceil(capacity / columns)`.
    pub fn new(capacity: u32, columns: u32) -> Result<Self, GridError> {
        if capacity == 0 {
            return Err(GridError::InvalidCapacity { capacity });
        }
        if columns == 0 {
            return Err(GridError::InvalidWidth);
        }

        let rows = capacity.div_ceil(columns);
        Ok(Self {
            columns,
            rows,
            capacity,
            cells: vec![None; (rows * columns) as usize],
            items: Vec::new(),
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Usable cell count; trailing cells of the last row beyond this are masked.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Contained items in insertion order.
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// Number of occupied cells.
    pub fn used_cells(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.is_some()).count() as u32
    }

    /// Number of usable, unoccupied cells.
    pub fn free_cells(&self) -> u32 {
        self.capacity - self.used_cells()
    }

    /// The handle occupying the given cell, if any.
    pub fn occupant(&self, origin: CellOrigin) -> Option<ItemHandle> {
        if origin.row >= self.rows || origin.col >= self.columns {
            return None;
        }
        self.cells[self.cell_index(origin)]
    }

    /// True iff at least one usable cell is unoccupied.
    ///
    /// Does not guarantee any particular footprint fits: a fragmented grid
    /// may have free cells yet reject a wide item.
    pub fn has_available_space(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .any(|(index, cell)| (index as u32) < self.capacity && cell.is_none())
    }

    /// Returns the first origin (row-major scan, top row first, left to
    /// right) where the footprint fits entirely on usable, unoccupied cells.
    pub fn find_placement(&self, footprint: Footprint) -> Option<CellOrigin> {
        if footprint.width > self.columns || footprint.height > self.rows {
            return None;
        }
        for row in 0..=(self.rows - footprint.height) {
            for col in 0..=(self.columns - footprint.width) {
                let origin = CellOrigin::new(row, col);
                if self.fits_at(origin, footprint) {
                    return Some(origin);
                }
            }
        }
        None
    }

    /// Places the item at the first valid origin, marking its cells occupied
    /// and appending it to the contained list.
    ///
    /// `None` means no placement exists (full or too fragmented); the grid is
    /// left unchanged. This is an expected outcome, never a fault.
    pub fn add(&mut self, item: &ItemDefinition) -> Option<CellOrigin> {
        self.place(item.handle, item.footprint)
    }

    /// Removes the first contained item with the given handle, clearing every
    /// cell it covers. Returns false if the handle is not present.
    pub fn remove(&mut self, handle: ItemHandle) -> bool {
        let Some(index) = self.items.iter().position(|item| item.handle == handle) else {
            return false;
        };
        let placed = self.items.remove(index);
        self.set_cells(placed.origin, placed.footprint, None);
        true
    }

    /// Clears the grid and re-adds `new_items` in sequence via the normal
    /// placement rule. Items that no longer fit are returned rather than
    /// silently dropped, so callers can surface a partial restore.
    pub fn replace_contents(&mut self, new_items: &[StoredItem]) -> Vec<StoredItem> {
        self.cells.fill(None);
        self.items.clear();

        let mut dropped = Vec::new();
        for stored in new_items {
            if self.place(stored.handle, stored.footprint).is_none() {
                dropped.push(*stored);
            }
        }
        dropped
    }

    /// Snapshot of the current contents, suitable for the transfer buffer.
    pub fn contents_snapshot(&self) -> Vec<StoredItem> {
        self.items
            .iter()
            .map(|placed| StoredItem::new(placed.handle, placed.footprint))
            .collect()
    }

    fn place(&mut self, handle: ItemHandle, footprint: Footprint) -> Option<CellOrigin> {
        let origin = self.find_placement(footprint)?;
        self.set_cells(origin, footprint, Some(handle));
        self.items.push(PlacedItem {
            handle,
            origin,
            footprint,
        });
        Some(origin)
    }

    fn fits_at(&self, origin: CellOrigin, footprint: Footprint) -> bool {
        for row in origin.row..origin.row + footprint.height {
            for col in origin.col..origin.col + footprint.width {
                let index = row * self.columns + col;
                if index >= self.capacity || self.cells[index as usize].is_some() {
                    return false;
                }
            }
        }
        true
    }

    fn set_cells(&mut self, origin: CellOrigin, footprint: Footprint, value: Option<ItemHandle>) {
        for row in origin.row..origin.row + footprint.height {
            for col in origin.col..origin.col + footprint.width {
                let index = (row * self.columns + col) as usize;
                debug_assert!(
                    value.is_none() || self.cells[index].is_none(),
                    "placing over an occupied cell at row {row}, col {col}"
                );
                self.cells[index] = value;
            }
        }
    }

    fn cell_index(&self, origin: CellOrigin) -> usize {
        (origin.row * self.columns + origin.col) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(handle: u32, width: u32, height: u32) -> ItemDefinition {
        ItemDefinition::new(
            ItemHandle(handle),
            format!("item-{handle}"),
            Footprint::new(width, height),
        )
    }

    fn occupied_set(grid: &GridContainer) -> Vec<CellOrigin> {
        let mut set = Vec::new();
        for row in 0..grid.rows() {
            for col in 0..grid.columns() {
                if grid.occupant(CellOrigin::new(row, col)).is_some() {
                    set.push(CellOrigin::new(row, col));
                }
            }
        }
        set
    }

    fn footprint_union(grid: &GridContainer) -> Vec<CellOrigin> {
        let mut set = Vec::new();
        for placed in grid.items() {
            for row in placed.origin.row..placed.origin.row + placed.footprint.height {
                for col in placed.origin.col..placed.origin.col + placed.footprint.width {
                    set.push(CellOrigin::new(row, col));
                }
            }
        }
        set.sort_by_key(|origin| (origin.row, origin.col));
        set
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            GridContainer::new(0, 5),
            Err(GridError::InvalidCapacity { capacity: 0 })
        );
        assert_eq!(GridContainer::new(10, 0), Err(GridError::InvalidWidth));
    }

    #[test]
    fn derives_rows_from_capacity() {
        let grid = GridContainer::new(12, 5).unwrap();
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.capacity(), 12);
    }

    #[test]
    fn placement_is_row_major_first_fit() {
        let mut grid = GridContainer::new(12, 5).unwrap();

        // Five 1x1 items fill row 0 exactly.
        for handle in 0..5 {
            let origin = grid.add(&item(handle, 1, 1)).unwrap();
            assert_eq!(origin, CellOrigin::new(0, handle));
        }

        // A 2x1 item then lands at row 1, cols 0-1.
        let origin = grid.add(&item(10, 2, 1)).unwrap();
        assert_eq!(origin, CellOrigin::new(1, 0));
    }

    #[test]
    fn placement_returns_lexicographically_smallest_origin() {
        let mut grid = GridContainer::new(15, 5).unwrap();
        grid.add(&item(1, 5, 1)).unwrap(); // fills row 0
        grid.add(&item(2, 1, 1)).unwrap(); // row 1, col 0

        // Smallest valid origin for a 2x2 is (1, 1), not anything on row 2.
        assert_eq!(
            grid.find_placement(Footprint::new(2, 2)),
            Some(CellOrigin::new(1, 1))
        );
    }

    #[test]
    fn add_never_overlaps() {
        let mut grid = GridContainer::new(10, 5).unwrap();
        grid.add(&item(1, 2, 2)).unwrap();
        grid.add(&item(2, 3, 2)).unwrap();
        assert_eq!(grid.used_cells(), 10);

        // Grid is full: next add fails and the grid is unchanged.
        let before = grid.clone();
        assert_eq!(grid.add(&item(3, 1, 1)), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn cells_beyond_capacity_are_masked() {
        // Capacity 12 with 5 columns: last row has only 2 usable cells.
        let mut grid = GridContainer::new(12, 5).unwrap();
        for handle in 0..10 {
            assert!(grid.add(&item(handle, 1, 1)).is_some());
        }
        assert!(grid.add(&item(20, 3, 1)).is_none());
        assert_eq!(grid.add(&item(21, 2, 1)), Some(CellOrigin::new(2, 0)));
        assert!(!grid.has_available_space());
    }

    #[test]
    fn oversized_footprint_never_fits() {
        let grid = GridContainer::new(10, 5).unwrap();
        assert_eq!(grid.find_placement(Footprint::new(6, 1)), None);
        assert_eq!(grid.find_placement(Footprint::new(1, 3)), None);
    }

    #[test]
    fn remove_clears_footprint_cells() {
        let mut grid = GridContainer::new(15, 5).unwrap();
        grid.add(&item(1, 2, 2)).unwrap();
        grid.add(&item(2, 1, 1)).unwrap();

        assert!(grid.remove(ItemHandle(1)));
        assert!(!grid.remove(ItemHandle(1)));
        assert_eq!(grid.items().len(), 1);

        // The 2x2 hole opens up again for a new placement at (0, 0).
        assert_eq!(
            grid.find_placement(Footprint::new(2, 2)),
            Some(CellOrigin::new(0, 0))
        );
    }

    #[test]
    fn occupancy_matches_contained_footprints() {
        let mut grid = GridContainer::new(20, 5).unwrap();
        grid.add(&item(1, 2, 2)).unwrap();
        grid.add(&item(2, 3, 1)).unwrap();
        grid.add(&item(3, 1, 1)).unwrap();
        grid.remove(ItemHandle(2));
        grid.add(&item(4, 2, 1)).unwrap();

        assert_eq!(occupied_set(&grid), footprint_union(&grid));
    }

    #[test]
    fn fragmentation_can_reject_despite_free_space() {
        let mut grid = GridContainer::new(5, 5).unwrap();
        grid.add(&item(1, 1, 1)).unwrap();
        grid.add(&item(2, 1, 1)).unwrap();
        grid.remove(ItemHandle(1));

        // One free cell at col 0 and three at cols 2..5, but no 4-wide run.
        assert!(grid.has_available_space());
        assert_eq!(grid.find_placement(Footprint::new(4, 1)), None);
    }

    #[test]
    fn replace_contents_reports_non_fitting_remainder() {
        let mut grid = GridContainer::new(5, 5).unwrap();
        let contents = vec![
            StoredItem::new(ItemHandle(1), Footprint::new(3, 1)),
            StoredItem::new(ItemHandle(2), Footprint::new(2, 1)),
            StoredItem::new(ItemHandle(3), Footprint::new(1, 1)),
        ];
        let dropped = grid.replace_contents(&contents);
        assert_eq!(dropped, vec![StoredItem::new(ItemHandle(3), Footprint::new(1, 1))]);
        assert_eq!(grid.items().len(), 2);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut grid = GridContainer::new(10, 5).unwrap();
        grid.add(&item(3, 1, 1)).unwrap();
        grid.add(&item(1, 2, 1)).unwrap();
        grid.add(&item(2, 1, 1)).unwrap();

        let snapshot = grid.contents_snapshot();
        let handles: Vec<_> = snapshot.iter().map(|stored| stored.handle).collect();
        assert_eq!(handles, vec![ItemHandle(3), ItemHandle(1), ItemHandle(2)]);
    }
}
