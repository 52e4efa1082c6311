//! # Header and Field Descriptor Layout
//!
//! Zerocopy definitions for the two fixed 32-byte structures at the front
//! of a `.dbf` file.
//!
//! ## File Header
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | version (`0x03`, or `0x83` with a memo companion) |
//! | 1 | 1 | last-update year − 1900 |
//! | 2 | 1 | last-update month |
//! | 3 | 1 | last-update day |
//! | 4 | 4 | record count, live + tombstoned, u32 LE |
//! | 8 | 2 | header byte length = `32·columns + 33`, u16 LE |
//! | 10 | 2 | record byte length = `1 + Σ width`, u16 LE |
//! | 14 | 1 | incomplete-transaction flag, 0/1 |
//! | 15 | 1 | encryption flag, 0/1 (surfaced, not honoured) |
//! | 28 | 1 | production `.mdx` flag, written 0 |
//! | 29 | 1 | language driver id, written 0 |
//!
//! Remaining bytes are reserved and written as zero.
//!
//! ## Field Descriptor
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 11 | column name, ASCII, zero-padded |
//! | 11 | 1 | type tag byte |
//! | 16 | 1 | field byte width |
//! | 17 | 1 | decimal count, written 0 |
//!
//! The width fits one byte because column widths cap at 254. The array is
//! closed by a single `0x0D` byte after the last descriptor.

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::{DESCRIPTOR_SIZE, HEADER_SIZE, VERSION_WITH_MEMO};
use crate::error::ReadError;
use crate::types::DESCRIPTOR_NAME_LEN;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct TableHeader {
    version: u8,
    year: u8,
    month: u8,
    day: u8,
    record_count: U32,
    header_len: U16,
    record_len: U16,
    reserved0: [u8; 2],
    transaction_flag: u8,
    encryption_flag: u8,
    reserved1: [u8; 12],
    mdx_flag: u8,
    language_driver: u8,
    reserved2: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<TableHeader>() == HEADER_SIZE);

impl TableHeader {
    pub fn new(
        version: u8,
        year: u8,
        month: u8,
        day: u8,
        record_count: u32,
        header_len: u16,
        record_len: u16,
    ) -> Self {
        Self {
            version,
            year,
            month,
            day,
            record_count: U32::new(record_count),
            header_len: U16::new(header_len),
            record_len: U16::new(record_len),
            reserved0: [0; 2],
            transaction_flag: 0,
            encryption_flag: 0,
            reserved1: [0; 12],
            mdx_flag: 0,
            language_driver: 0,
            reserved2: [0; 2],
        }
    }

    /// Parses and validates the leading header bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self, ReadError> {
        let slot = bytes.get(..HEADER_SIZE).ok_or(ReadError::Truncated {
            len: bytes.len(),
            expected: HEADER_SIZE,
        })?;
        let header = Self::ref_from_bytes(slot).map_err(|_| ReadError::Truncated {
            len: bytes.len(),
            expected: HEADER_SIZE,
        })?;

        if header.transaction_flag > 1 {
            return Err(ReadError::InvalidFlagByte {
                flag: "incomplete-transaction",
                value: header.transaction_flag,
            });
        }
        if header.encryption_flag > 1 {
            return Err(ReadError::InvalidFlagByte {
                flag: "encryption",
                value: header.encryption_flag,
            });
        }
        Ok(header)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// True when the version byte declares a `.dbt` companion.
    pub fn has_memo(&self) -> bool {
        self.version == VERSION_WITH_MEMO
    }

    /// Last-update date as stored: (year − 1900, month, day).
    pub fn last_update(&self) -> (u8, u8, u8) {
        (self.year, self.month, self.day)
    }

    pub fn incomplete_transaction(&self) -> bool {
        self.transaction_flag == 1
    }

    /// Whether the table declares itself encrypted. The flag is surfaced
    /// only; no decryption is attempted.
    pub fn encrypted(&self) -> bool {
        self.encryption_flag == 1
    }

    zerocopy_accessors! {
        record_count: u32,
        header_len: u16,
        record_len: u16,
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FieldDescriptor {
    name: [u8; 11],
    field_type: u8,
    reserved0: [u8; 4],
    length: u8,
    decimal_count: u8,
    reserved1: [u8; 14],
}

const _: () = assert!(std::mem::size_of::<FieldDescriptor>() == DESCRIPTOR_SIZE);

impl FieldDescriptor {
    /// Builds a descriptor slot. Only the first [`DESCRIPTOR_NAME_LEN`]
    /// name bytes are stored; longer names do not survive a round-trip.
    pub fn new(name: &str, field_type: u8, length: u8) -> Self {
        let mut name_bytes = [0u8; 11];
        let take = name.len().min(DESCRIPTOR_NAME_LEN);
        name_bytes[..take].copy_from_slice(&name.as_bytes()[..take]);
        Self {
            name: name_bytes,
            field_type,
            reserved0: [0; 4],
            length,
            decimal_count: 0,
            reserved1: [0; 14],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<&Self, ReadError> {
        let slot = bytes.get(..DESCRIPTOR_SIZE).ok_or(ReadError::Truncated {
            len: bytes.len(),
            expected: DESCRIPTOR_SIZE,
        })?;
        Self::ref_from_bytes(slot).map_err(|_| ReadError::Truncated {
            len: bytes.len(),
            expected: DESCRIPTOR_SIZE,
        })
    }

    /// Column name: bytes up to the first NUL, at most 11 scanned.
    pub fn name(&self) -> Result<&str, ReadError> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(11);
        let name = std::str::from_utf8(&self.name[..end]).map_err(|_| ReadError::BadFieldName)?;
        if name.trim().is_empty() {
            return Err(ReadError::BadFieldName);
        }
        Ok(name)
    }

    pub fn field_type(&self) -> u8 {
        self.field_type
    }

    pub fn length(&self) -> u8 {
        self.length
    }
}
