//! # Column Type Tags
//!
//! The xBase field type system is a closed set of eleven tags, each keyed
//! by a single ASCII byte stored in the field descriptor. Both codecs
//! dispatch exhaustively over this set.
//!
//! ## Storage Classes
//!
//! | Tags | Storage | Width |
//! |------|---------|-------|
//! | `C` `F` `N` | fixed-width ASCII | caller-chosen, 1..=254 |
//! | `D` | 8 ASCII digits `YYYYMMDD` | fixed 8 |
//! | `L` | one flag byte | fixed 1 |
//! | `M` `G` `B` | 10 ASCII digits, a memo block index | fixed 10 |
//! | `I` `+` | i32 little-endian | fixed 4 |
//! | `O` | f64 little-endian | fixed 8 |
//! | `@` | two u32 little-endian (day count, ms since midnight) | fixed 8 |

use crate::error::ReadError;

/// Width rule for a column type: a mandatory byte width, or a
/// caller-chosen one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    Fixed(u8),
    Variable,
}

/// Field type tag, one per descriptor byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `C` — text payload under the caller-selected encoding.
    Character = b'C',
    /// `D` — `YYYYMMDD` digits.
    Date = b'D',
    /// `F` — decimal ASCII, right-justified.
    Float = b'F',
    /// `N` — integer ASCII, right-justified.
    Numeric = b'N',
    /// `L` — `T`/`Y` true, `F`/`N` false, `?`/space unknown.
    Logical = b'L',
    /// `M` — memo block index into the companion `.dbt` file.
    Memo = b'M',
    /// `G` — OLE object, stored like a memo.
    General = b'G',
    /// `B` — binary payload, stored like a memo.
    Binary = b'B',
    /// `I` — 32-bit signed integer.
    Long = b'I',
    /// `+` — autoincrement; values pass through verbatim.
    Autoincrement = b'+',
    /// `O` — IEEE-754 double.
    Double = b'O',
    /// `@` — day count since 4713-01-01 BC plus milliseconds since midnight.
    Timestamp = b'@',
}

impl ColumnType {
    /// Returns the single-byte tag stored in a field descriptor.
    #[inline]
    pub fn tag(&self) -> u8 {
        *self as u8
    }

    /// Returns the width rule enforced at column insertion.
    pub fn width_rule(&self) -> FieldWidth {
        match self {
            ColumnType::Character | ColumnType::Float | ColumnType::Numeric => {
                FieldWidth::Variable
            }
            ColumnType::Date => FieldWidth::Fixed(8),
            ColumnType::Logical => FieldWidth::Fixed(1),
            ColumnType::Memo | ColumnType::General | ColumnType::Binary => FieldWidth::Fixed(10),
            ColumnType::Long | ColumnType::Autoincrement => FieldWidth::Fixed(4),
            ColumnType::Double => FieldWidth::Fixed(8),
            ColumnType::Timestamp => FieldWidth::Fixed(8),
        }
    }

    /// True for the indirection types whose field stores a `.dbt` block index.
    pub fn uses_memo(&self) -> bool {
        matches!(
            self,
            ColumnType::Memo | ColumnType::General | ColumnType::Binary
        )
    }

    /// True for types whose field bytes are little-endian binary rather
    /// than ASCII.
    pub fn is_binary_encoded(&self) -> bool {
        matches!(
            self,
            ColumnType::Long | ColumnType::Autoincrement | ColumnType::Double | ColumnType::Timestamp
        )
    }
}

impl TryFrom<u8> for ColumnType {
    type Error = ReadError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            b'C' => Ok(ColumnType::Character),
            b'D' => Ok(ColumnType::Date),
            b'F' => Ok(ColumnType::Float),
            b'N' => Ok(ColumnType::Numeric),
            b'L' => Ok(ColumnType::Logical),
            b'M' => Ok(ColumnType::Memo),
            b'G' => Ok(ColumnType::General),
            b'B' => Ok(ColumnType::Binary),
            b'I' => Ok(ColumnType::Long),
            b'+' => Ok(ColumnType::Autoincrement),
            b'O' => Ok(ColumnType::Double),
            b'@' => Ok(ColumnType::Timestamp),
            _ => Err(ReadError::UnknownFieldType { tag }),
        }
    }
}
