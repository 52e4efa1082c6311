//! # Table Model
//!
//! The in-memory tabular model the codecs serialise: an ordered column
//! list plus two disjoint row lists (live and tombstoned).
//!
//! ## Two-Phase Lifecycle
//!
//! A table is created empty and passes through two phases:
//!
//! 1. **Columns mutable** — `add_column` accepts definitions, rows are
//!    rejected.
//! 2. **Locked** — after `lock()` the column set is frozen and rows may be
//!    appended until the table is serialised.
//!
//! There is no unlocking, no row or column mutation, and no deletion; a
//! "deleted" row is simply appended to the tombstone list and serialised
//! with the `0x2A` marker.
//!
//! ## Value Model
//!
//! Every field value is carried as a string at this layer, including the
//! binary-encoded types: integers and doubles as decimal text, timestamps
//! as `"<days> <ms>"`. The writer validates each value against its
//! column's type contract at serialisation time.

pub mod convert;

use crate::error::{ColumnAddError, RowAddError};
use crate::types::{Column, ColumnType};

/// Column list plus live and tombstoned rows, with the column-lock flag.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    locked: bool,
    rows: Vec<Vec<String>>,
    deleted_rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty, unlocked table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column definition.
    ///
    /// Fails once the table is locked. Width handling follows the type's
    /// rule: fixed-width types are corrected to their default (with an
    /// advisory log), variable-width types accept 1..=254.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        column_type: ColumnType,
        width: usize,
    ) -> Result<(), ColumnAddError> {
        if self.locked {
            return Err(ColumnAddError::Locked);
        }
        self.columns.push(Column::new(name, column_type, width)?);
        Ok(())
    }

    /// Freezes the column set, enabling row insertion. One-way.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// True while `add_column` is still accepted.
    pub fn can_add_columns(&self) -> bool {
        !self.locked
    }

    /// True once `lock()` has been called.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Appends a live row. One string value per column, in column order.
    pub fn add_row(&mut self, values: Vec<String>) -> Result<(), RowAddError> {
        self.check_row(&values)?;
        self.rows.push(values);
        Ok(())
    }

    /// Appends a tombstoned row, serialised with the deleted marker.
    pub fn add_row_deleted(&mut self, values: Vec<String>) -> Result<(), RowAddError> {
        self.check_row(&values)?;
        self.deleted_rows.push(values);
        Ok(())
    }

    fn check_row(&self, values: &[String]) -> Result<(), RowAddError> {
        if !self.locked {
            return Err(RowAddError::ColumnsNotLocked);
        }
        if values.len() != self.columns.len() {
            return Err(RowAddError::ArityMismatch {
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        Ok(())
    }

    /// Returns the column definitions in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the live rows in insertion order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the tombstoned rows in insertion order.
    pub fn deleted_rows(&self) -> &[Vec<String>] {
        &self.deleted_rows
    }

    /// Total record count, live plus tombstoned.
    pub fn record_count(&self) -> usize {
        self.rows.len() + self.deleted_rows.len()
    }

    /// Serialised record byte length: one marker byte plus the column widths.
    pub fn record_len(&self) -> usize {
        1 + self
            .columns
            .iter()
            .map(|c| c.width() as usize)
            .sum::<usize>()
    }

    /// Rebuilds a locked table from decoded parts. Reader-only path; the
    /// columns carry the widths the file declared.
    pub(crate) fn from_decoded(
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
        deleted_rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            columns,
            locked: true,
            rows,
            deleted_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> Table {
        let mut table = Table::new();
        table.add_column("id", ColumnType::Numeric, 6).unwrap();
        table.add_column("name", ColumnType::Character, 20).unwrap();
        table
    }

    #[test]
    fn columns_rejected_after_lock() {
        let mut table = two_column_table();
        assert!(table.can_add_columns());
        table.lock();
        assert!(!table.can_add_columns());
        assert_eq!(
            table.add_column("late", ColumnType::Numeric, 4),
            Err(ColumnAddError::Locked)
        );
    }

    #[test]
    fn rows_rejected_before_lock() {
        let mut table = two_column_table();
        assert_eq!(
            table.add_row(vec!["1".into(), "a".into()]),
            Err(RowAddError::ColumnsNotLocked)
        );
        assert_eq!(
            table.add_row_deleted(vec!["1".into(), "a".into()]),
            Err(RowAddError::ColumnsNotLocked)
        );
    }

    #[test]
    fn arity_is_enforced() {
        let mut table = two_column_table();
        table.lock();
        assert_eq!(
            table.add_row(vec!["1".into()]),
            Err(RowAddError::ArityMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn live_and_deleted_rows_stay_disjoint() {
        let mut table = two_column_table();
        table.lock();
        table.add_row(vec!["1".into(), "alice".into()]).unwrap();
        table.add_row(vec!["2".into(), "bob".into()]).unwrap();
        table
            .add_row_deleted(vec!["3".into(), "carol".into()])
            .unwrap();

        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.deleted_rows().len(), 1);
        assert_eq!(table.record_count(), 3);
        assert_eq!(table.deleted_rows()[0][1], "carol");
    }

    #[test]
    fn record_len_counts_marker_and_widths() {
        let mut table = two_column_table();
        table.add_column("when", ColumnType::Date, 8).unwrap();
        assert_eq!(table.record_len(), 1 + 6 + 20 + 8);
    }
}
