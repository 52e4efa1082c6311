//! # Column Definitions
//!
//! A `Column` pairs a name with a [`ColumnType`] and a byte width. Columns
//! are immutable once constructed; all normalisation happens in
//! [`Column::new`].

use tracing::warn;

use crate::error::ColumnAddError;
use crate::types::{ColumnType, FieldWidth};

/// Longest accepted column name, in bytes, after trimming.
pub const MAX_NAME_LEN: usize = 32;

/// Name bytes that survive a round-trip through a field descriptor.
pub const DESCRIPTOR_NAME_LEN: usize = 10;

/// A single table column: name, type tag, and field byte width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    width: u8,
}

impl Column {
    /// Builds a column, normalising the width against the type's rule.
    ///
    /// Fixed-width types silently correct a mismatched caller width to the
    /// type's default and log an advisory; variable-width types accept any
    /// width in 1..=254. The name is trimmed and must be non-empty and at
    /// most [`MAX_NAME_LEN`] bytes.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        width: usize,
    ) -> Result<Self, ColumnAddError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ColumnAddError::EmptyName);
        }
        if trimmed.len() > MAX_NAME_LEN {
            return Err(ColumnAddError::NameTooLong {
                name: trimmed.to_string(),
                len: trimmed.len(),
            });
        }

        let width = match column_type.width_rule() {
            FieldWidth::Fixed(default) => {
                if width != default as usize {
                    warn!(
                        column = trimmed,
                        requested = width,
                        corrected = default,
                        "width for fixed-width column type corrected to its default"
                    );
                }
                default
            }
            FieldWidth::Variable => {
                if !(1..=254).contains(&width) {
                    return Err(ColumnAddError::InvalidWidth { width });
                }
                width as u8
            }
        };

        Ok(Self {
            name: trimmed.to_string(),
            column_type,
            width,
        })
    }

    /// Rebuilds a column from descriptor bytes, bypassing width
    /// normalisation so a decoded file is sliced with the widths it
    /// actually declares.
    pub(crate) fn from_descriptor(name: &str, column_type: ColumnType, width: u8) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            width,
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type tag.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Returns the field byte width.
    pub fn width(&self) -> u8 {
        self.width
    }
}
