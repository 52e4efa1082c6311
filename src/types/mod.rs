//! # Column Model
//!
//! The type system for table columns: the closed [`ColumnType`] tag set,
//! the [`Column`] definition, and the caller-selected [`TextEncoding`]
//! for `C` field payloads.

mod column;
mod column_type;
mod text;

pub use column::{Column, DESCRIPTOR_NAME_LEN, MAX_NAME_LEN};
pub use column_type::{ColumnType, FieldWidth};
pub use text::TextEncoding;
