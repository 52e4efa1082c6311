//! # Table Writer
//!
//! Materialises a locked [`Table`] into its on-disk byte image in one
//! pass: header, descriptor array, terminator, live records, tombstoned
//! records, EOF marker. Memo payloads encountered along the way are
//! appended to a [`MemoHeap`] and both buffers come back together in a
//! [`TableImage`].

use chrono::{Datelike, Utc};
use tracing::debug;
use zerocopy::IntoBytes;

use super::{
    FieldDescriptor, TableHeader, DESCRIPTOR_SIZE, DESCRIPTOR_TERMINATOR, EOF_MARKER, HEADER_SIZE,
    RECORD_DELETED, RECORD_LIVE, VERSION_PLAIN, VERSION_WITH_MEMO,
};
use crate::dbt::MemoHeap;
use crate::encoding::{is_ascii_digits, pad_left, pad_right};
use crate::error::RowAddError;
use crate::table::Table;
use crate::types::{Column, ColumnType, TextEncoding};

/// Memo block indices occupy ten ASCII digits, left-padded with `'0'`.
const MEMO_FIELD_WIDTH: usize = 10;

/// The serialised table: the `.dbf` image plus its `.dbt` companion when
/// any memo payload was written.
#[derive(Debug)]
pub struct TableImage {
    pub dbf: Vec<u8>,
    pub dbt: Option<Vec<u8>>,
}

/// One-pass `.dbf`/`.dbt` serialiser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Writer {
    encoding: TextEncoding,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the text encoding applied to `C` field payloads.
    pub fn with_encoding(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// Serialises the table. Fails when the table is not locked or any
    /// field value breaks its column's type contract.
    pub fn write(&self, table: &Table) -> Result<TableImage, RowAddError> {
        if !table.is_locked() {
            return Err(RowAddError::ColumnsNotLocked);
        }

        let mut memo = MemoHeap::new();
        let mut records = Vec::with_capacity(table.record_count() * table.record_len());
        for row in table.rows() {
            self.encode_record(table.columns(), row, RECORD_LIVE, &mut memo, &mut records)?;
        }
        for row in table.deleted_rows() {
            self.encode_record(table.columns(), row, RECORD_DELETED, &mut memo, &mut records)?;
        }

        let has_memo = table
            .columns()
            .iter()
            .any(|c| c.column_type().uses_memo());
        let version = if has_memo {
            VERSION_WITH_MEMO
        } else {
            VERSION_PLAIN
        };

        let today = Utc::now().date_naive();
        let header = TableHeader::new(
            version,
            (today.year() - 1900).clamp(0, 255) as u8,
            today.month() as u8,
            today.day() as u8,
            table.record_count() as u32,
            (DESCRIPTOR_SIZE * table.columns().len() + HEADER_SIZE + 1) as u16,
            table.record_len() as u16,
        );

        let mut dbf = Vec::with_capacity(
            HEADER_SIZE + DESCRIPTOR_SIZE * table.columns().len() + 1 + records.len() + 1,
        );
        dbf.extend_from_slice(header.as_bytes());
        for column in table.columns() {
            let descriptor =
                FieldDescriptor::new(column.name(), column.column_type().tag(), column.width());
            dbf.extend_from_slice(descriptor.as_bytes());
        }
        dbf.push(DESCRIPTOR_TERMINATOR);
        dbf.extend_from_slice(&records);
        dbf.push(EOF_MARKER);

        debug!(
            columns = table.columns().len(),
            records = table.record_count(),
            dbf_len = dbf.len(),
            memo = !memo.is_empty(),
            "encoded table image"
        );
        Ok(TableImage {
            dbf,
            dbt: memo.into_bytes(),
        })
    }

    fn encode_record(
        &self,
        columns: &[Column],
        values: &[String],
        marker: u8,
        memo: &mut MemoHeap,
        out: &mut Vec<u8>,
    ) -> Result<(), RowAddError> {
        out.push(marker);
        for (column, value) in columns.iter().zip(values) {
            self.encode_field(column, value, memo, out)?;
        }
        Ok(())
    }

    fn encode_field(
        &self,
        column: &Column,
        value: &str,
        memo: &mut MemoHeap,
        out: &mut Vec<u8>,
    ) -> Result<(), RowAddError> {
        let width = column.width() as usize;
        match column.column_type() {
            ColumnType::Character => {
                let bytes =
                    self.encoding
                        .encode(value)
                        .ok_or_else(|| RowAddError::Unencodable {
                            column: column.name().to_string(),
                            encoding: self.encoding.name(),
                        })?;
                if bytes.len() > width {
                    return Err(RowAddError::ValueTooWide {
                        column: column.name().to_string(),
                        width,
                        got: bytes.len(),
                    });
                }
                out.extend_from_slice(&pad_right(&bytes, width, 0));
            }
            ColumnType::Numeric => {
                value
                    .parse::<i64>()
                    .map_err(|_| self.invalid_integer(column, value))?;
                out.extend_from_slice(&self.right_justified(column, value, width, b' ')?);
            }
            ColumnType::Float => {
                value
                    .parse::<f64>()
                    .map_err(|_| self.invalid_number(column, value))?;
                out.extend_from_slice(&self.right_justified(column, value, width, b' ')?);
            }
            ColumnType::Date => {
                if value.len() != 8 || !is_ascii_digits(value.as_bytes()) {
                    return Err(RowAddError::InvalidDate {
                        column: column.name().to_string(),
                        value: value.to_string(),
                    });
                }
                out.extend_from_slice(value.as_bytes());
            }
            ColumnType::Logical => {
                let [flag] = value.as_bytes() else {
                    return Err(self.invalid_flag(column, value));
                };
                if !b"TYFN? ".contains(flag) {
                    return Err(self.invalid_flag(column, value));
                }
                out.push(*flag);
            }
            ColumnType::Memo | ColumnType::General | ColumnType::Binary => {
                let index = memo.append(value);
                out.extend_from_slice(&pad_left(
                    index.to_string().as_bytes(),
                    MEMO_FIELD_WIDTH,
                    b'0',
                ));
            }
            ColumnType::Long | ColumnType::Autoincrement => {
                let parsed: i32 = value
                    .parse()
                    .map_err(|_| self.invalid_integer(column, value))?;
                out.extend_from_slice(&parsed.to_le_bytes());
            }
            ColumnType::Double => {
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| self.invalid_number(column, value))?;
                out.extend_from_slice(&parsed.to_le_bytes());
            }
            ColumnType::Timestamp => {
                let invalid = || RowAddError::InvalidTimestamp {
                    column: column.name().to_string(),
                    value: value.to_string(),
                };
                let (days, ms) = value.split_once(' ').ok_or_else(invalid)?;
                let days: i32 = days.parse().map_err(|_| invalid())?;
                let ms: i32 = ms.parse().map_err(|_| invalid())?;
                out.extend_from_slice(&days.to_le_bytes());
                out.extend_from_slice(&ms.to_le_bytes());
            }
        }
        Ok(())
    }

    fn right_justified(
        &self,
        column: &Column,
        value: &str,
        width: usize,
        fill: u8,
    ) -> Result<Vec<u8>, RowAddError> {
        if value.len() > width {
            return Err(RowAddError::ValueTooWide {
                column: column.name().to_string(),
                width,
                got: value.len(),
            });
        }
        Ok(pad_left(value.as_bytes(), width, fill))
    }

    fn invalid_integer(&self, column: &Column, value: &str) -> RowAddError {
        RowAddError::InvalidInteger {
            column: column.name().to_string(),
            value: value.to_string(),
        }
    }

    fn invalid_number(&self, column: &Column, value: &str) -> RowAddError {
        RowAddError::InvalidNumber {
            column: column.name().to_string(),
            value: value.to_string(),
        }
    }

    fn invalid_flag(&self, column: &Column, value: &str) -> RowAddError {
        RowAddError::InvalidFlag {
            column: column.name().to_string(),
            value: value.to_string(),
        }
    }
}
