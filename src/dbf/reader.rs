//! # Table Reader
//!
//! Decodes a `.dbf` byte image into a locked [`Table`]. The parse is
//! literal: header first, then the descriptor walk until the `0x0D`
//! terminator, then fixed-width record slices until the declared record
//! count or the EOF marker.
//!
//! Memo-bearing fields decode to their ten-digit block index; resolving
//! the payload is a separate step against the `.dbt` image (see
//! [`crate::dbt::read_memo`]).

use super::{
    FieldDescriptor, TableHeader, DESCRIPTOR_SIZE, DESCRIPTOR_TERMINATOR, EOF_MARKER, HEADER_SIZE,
    RECORD_DELETED, RECORD_LIVE,
};
use tracing::debug;

use crate::encoding::{read_f64_le, read_u32_le};
use crate::error::ReadError;
use crate::table::Table;
use crate::types::{Column, ColumnType, TextEncoding};

/// `.dbf` image parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reader {
    encoding: TextEncoding,
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the text encoding applied to ASCII-class field payloads.
    pub fn with_encoding(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// Parses a complete `.dbf` byte image into a locked table.
    pub fn read(&self, bytes: &[u8]) -> Result<Table, ReadError> {
        let header = TableHeader::from_bytes(bytes)?;

        let (columns, record_start) = self.read_descriptors(bytes)?;
        let record_len =
            1 + columns.iter().map(|c| c.width() as usize).sum::<usize>();
        if record_len != header.record_len() as usize {
            return Err(ReadError::RecordLengthMismatch {
                described: record_len,
                declared: header.record_len() as usize,
            });
        }

        if bytes.last() != Some(&EOF_MARKER) {
            return Err(ReadError::MissingEofMarker);
        }
        let area = bytes.len() - 1 - record_start;
        if area % record_len != 0 {
            return Err(ReadError::RecordAreaMisaligned { area, record_len });
        }

        let available = area / record_len;
        let count = available.min(header.record_count() as usize);

        let mut rows = Vec::new();
        let mut deleted_rows = Vec::new();
        for slot in bytes[record_start..record_start + count * record_len].chunks_exact(record_len)
        {
            let values = self.decode_record(&columns, &slot[1..])?;
            match slot[0] {
                RECORD_LIVE => rows.push(values),
                RECORD_DELETED => deleted_rows.push(values),
                marker => return Err(ReadError::InvalidRecordMarker { marker }),
            }
        }

        debug!(
            columns = columns.len(),
            live = rows.len(),
            deleted = deleted_rows.len(),
            "decoded table image"
        );
        Ok(Table::from_decoded(columns, rows, deleted_rows))
    }

    /// Walks the descriptor array; returns the columns and the offset of
    /// the first record, one past the `0x0D` terminator.
    fn read_descriptors(&self, bytes: &[u8]) -> Result<(Vec<Column>, usize), ReadError> {
        let mut columns = Vec::new();
        let mut offset = HEADER_SIZE;
        loop {
            let &first = bytes.get(offset).ok_or(ReadError::Truncated {
                len: bytes.len(),
                expected: offset + 1,
            })?;
            if first == DESCRIPTOR_TERMINATOR {
                return Ok((columns, offset + 1));
            }

            let slot = bytes
                .get(offset..offset + DESCRIPTOR_SIZE)
                .ok_or(ReadError::Truncated {
                    len: bytes.len(),
                    expected: offset + DESCRIPTOR_SIZE,
                })?;
            let descriptor = FieldDescriptor::from_bytes(slot)?;
            let column_type = ColumnType::try_from(descriptor.field_type())?;
            columns.push(Column::from_descriptor(
                descriptor.name()?,
                column_type,
                descriptor.length(),
            ));
            offset += DESCRIPTOR_SIZE;
        }
    }

    fn decode_record(
        &self,
        columns: &[Column],
        fields: &[u8],
    ) -> Result<Vec<String>, ReadError> {
        let mut values = Vec::with_capacity(columns.len());
        let mut offset = 0;
        for column in columns {
            let width = column.width() as usize;
            let field = &fields[offset..offset + width];
            values.push(self.decode_field(column.column_type(), field)?);
            offset += width;
        }
        Ok(values)
    }

    fn decode_field(&self, column_type: ColumnType, field: &[u8]) -> Result<String, ReadError> {
        let short = |expected: usize| ReadError::Truncated {
            len: field.len(),
            expected,
        };

        Ok(match column_type {
            // Stored as signed, surfaced as unsigned: values >= 2^31 do
            // not round-trip through the writer's i32 parse.
            ColumnType::Long | ColumnType::Autoincrement => {
                read_u32_le(field, 0).ok_or_else(|| short(4))?.to_string()
            }
            ColumnType::Double => read_f64_le(field, 0).ok_or_else(|| short(8))?.to_string(),
            ColumnType::Timestamp => {
                let days = read_u32_le(field, 0).ok_or_else(|| short(4))?;
                let ms = read_u32_le(field, 4).ok_or_else(|| short(8))?;
                format!("{days} {ms}")
            }
            // ASCII-class fields keep their raw width, trailing NULs
            // included; callers trim if they want the bare value.
            _ => self.encoding.decode(field),
        })
    }
}
