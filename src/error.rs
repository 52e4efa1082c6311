//! # Error Types
//!
//! Three error kinds surface at the crate boundary:
//!
//! - [`ColumnAddError`] — schema violations while the column set is still
//!   mutable.
//! - [`RowAddError`] — row-level violations, both structural (arity, lock
//!   state) and value-level (a field value that breaks its column's type
//!   contract during serialisation).
//! - [`ReadError`] — decode failures for `.dbf` and `.dbt` byte images.
//!
//! All errors are terminal for the operation that raised them; there is no
//! retry or partial recovery. Advisory conditions (width auto-correction for
//! fixed-width column types) are logged through `tracing` and never fail.

use thiserror::Error;

/// Rejections raised by [`Table::add_column`](crate::Table::add_column).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnAddError {
    #[error("columns cannot be added after the table is locked")]
    Locked,

    #[error("column name is empty after trimming whitespace")]
    EmptyName,

    #[error("column name {name:?} is {len} bytes, the limit is 32")]
    NameTooLong { name: String, len: usize },

    #[error("column width {width} is outside 1..=254")]
    InvalidWidth { width: usize },
}

/// Rejections raised while adding rows or serialising them into records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowAddError {
    #[error("rows cannot be added until the column set is locked")]
    ColumnsNotLocked,

    #[error("row has {got} values but the table has {expected} columns")]
    ArityMismatch { expected: usize, got: usize },

    #[error("value {value:?} for column {column:?} is not a valid integer")]
    InvalidInteger { column: String, value: String },

    #[error("value {value:?} for column {column:?} is not a valid number")]
    InvalidNumber { column: String, value: String },

    #[error("value {value:?} for column {column:?} is not an 8-digit YYYYMMDD date")]
    InvalidDate { column: String, value: String },

    #[error("value {value:?} for column {column:?} is not a logical flag (T, Y, F, N, ?, space)")]
    InvalidFlag { column: String, value: String },

    #[error("value {value:?} for column {column:?} is not a \"<days> <ms>\" timestamp pair")]
    InvalidTimestamp { column: String, value: String },

    #[error("value for column {column:?} encodes to {got} bytes but the column width is {width}")]
    ValueTooWide {
        column: String,
        width: usize,
        got: usize,
    },

    #[error("value for column {column:?} cannot be represented in {encoding}")]
    Unencodable {
        column: String,
        encoding: &'static str,
    },
}

/// Decode failures for `.dbf` and `.dbt` byte images.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("buffer is {len} bytes, at least {expected} are required")]
    Truncated { len: usize, expected: usize },

    #[error("unknown field type tag 0x{tag:02X}")]
    UnknownFieldType { tag: u8 },

    #[error("field descriptor carries an empty or non-ASCII name")]
    BadFieldName,

    #[error("{flag} flag byte is 0x{value:02X}, expected 0 or 1")]
    InvalidFlagByte { flag: &'static str, value: u8 },

    #[error("record length mismatch: descriptors total {described} bytes, header declares {declared}")]
    RecordLengthMismatch { described: usize, declared: usize },

    #[error("record marker byte is 0x{marker:02X}, expected 0x20 (live) or 0x2A (deleted)")]
    InvalidRecordMarker { marker: u8 },

    #[error("file does not end with the 0x1A end-of-file marker")]
    MissingEofMarker,

    #[error("record area is {area} bytes, not a multiple of the {record_len}-byte record size")]
    RecordAreaMisaligned { area: usize, record_len: usize },

    #[error("memo file is {len} bytes, the minimum is 1024")]
    MemoTooShort { len: usize },

    #[error("memo file is {len} bytes, not a multiple of the 512-byte block size")]
    MemoMisaligned { len: usize },

    #[error("memo block index {index} is out of range for a {blocks}-block file")]
    MemoIndexOutOfRange { index: u32, blocks: usize },

    #[error("memo block {index} has no 0x1A terminator")]
    UnterminatedMemo { index: u32 },
}
