//! Cell index for addressing items in tabular models.
//!
//! [`CellIndex`] is the fundamental way to reference a cell within a
//! [`TabularModel`](super::traits::TabularModel). Models hand out indices for
//! in-bounds positions and an invalid index otherwise.

/// Represents a cell position within a tabular model.
///
/// # Index Validity
///
/// Indices should be used immediately and not stored long-term. After
/// structural modifications (insertions, deletions, bulk replaces),
/// previously obtained indices may no longer address the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    row: usize,
    column: usize,
    valid: bool,
}

impl Default for CellIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl CellIndex {
    /// Creates an invalid (null) index.
    ///
    /// An invalid index represents a non-existent or out-of-bounds cell.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: 0,
            column: 0,
            valid: false,
        }
    }

    /// Creates a new valid index.
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            valid: true,
        }
    }

    /// Returns `true` if this is a valid index.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the row of this index. Returns 0 for invalid indices.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the column of this index. Returns 0 for invalid indices.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Creates an index at the same column but a different row.
    #[inline]
    pub fn sibling_at_row(&self, row: usize) -> CellIndex {
        if !self.is_valid() {
            return CellIndex::invalid();
        }
        CellIndex::new(row, self.column)
    }

    /// Creates an index at the same row but a different column.
    #[inline]
    pub fn sibling_at_column(&self, column: usize) -> CellIndex {
        if !self.is_valid() {
            return CellIndex::invalid();
        }
        CellIndex::new(self.row, column)
    }
}

impl PartialOrd for CellIndex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellIndex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Invalid indices sort before valid ones; then row-major order.
        match (self.is_valid(), other.is_valid()) {
            (false, false) => std::cmp::Ordering::Equal,
            (false, true) => std::cmp::Ordering::Less,
            (true, false) => std::cmp::Ordering::Greater,
            (true, true) => match self.row.cmp(&other.row) {
                std::cmp::Ordering::Equal => self.column.cmp(&other.column),
                order => order,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index() {
        let index = CellIndex::invalid();
        assert!(!index.is_valid());
        assert_eq!(index.row(), 0);
        assert_eq!(index.column(), 0);
    }

    #[test]
    fn test_valid_index() {
        let index = CellIndex::new(5, 3);
        assert!(index.is_valid());
        assert_eq!(index.row(), 5);
        assert_eq!(index.column(), 3);
    }

    #[test]
    fn test_siblings() {
        let index = CellIndex::new(1, 2);
        assert_eq!(index.sibling_at_row(4), CellIndex::new(4, 2));
        assert_eq!(index.sibling_at_column(0), CellIndex::new(1, 0));
        assert!(!CellIndex::invalid().sibling_at_row(1).is_valid());
    }

    #[test]
    fn test_ordering() {
        let a = CellIndex::new(0, 0);
        let b = CellIndex::new(1, 0);
        let c = CellIndex::new(0, 1);

        assert!(a < b);
        assert!(a < c);
        assert!(CellIndex::invalid() < a);
    }
}
