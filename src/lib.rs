//! # xbase - dBase/FoxPro Table Files in Memory
//!
//! `xbase` reads and writes xBase-family database files: the `.dbf`
//! main-table format and its companion `.dbt` memo-block file, as
//! produced by dBase III/IV and the FoxPro dialects. The crate presents
//! an in-memory tabular model (columns + records) and serialises it
//! to and from the on-disk byte layout in a single pass.
//!
//! ## Quick Start
//!
//! ```ignore
//! use xbase::{ColumnType, Table, Writer, Reader};
//!
//! let mut table = Table::new();
//! table.add_column("id", ColumnType::Numeric, 6)?;
//! table.add_column("name", ColumnType::Character, 20)?;
//! table.lock();
//! table.add_row(vec!["1".into(), "Alice".into()])?;
//!
//! let image = Writer::new().write(&table)?;
//! // image.dbf is the .dbf byte buffer; image.dbt the memo heap, if any.
//!
//! let decoded = Reader::new().read(&image.dbf)?;
//! assert_eq!(decoded.record_count(), 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Path Convenience I/O (file)       │
//! ├─────────────────────────────────────┤
//! │   Table Model (table)               │
//! │   columns-mutable → locked → rows   │
//! ├──────────────────┬──────────────────┤
//! │  DBF Codec (dbf) │  DBT Codec (dbt) │
//! │  header, fields, │  512-byte block  │
//! │  records         │  heap, spanning  │
//! ├──────────────────┴──────────────────┤
//! │   Field Primitives (encoding)       │
//! │   LE loads, justified padding       │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//!
//! ```text
//! table.dbf                          table.dbt (only with M/G/B columns)
//! ├── 32-byte header                 ├── 512-byte header block
//! ├── 32-byte descriptor per column  ├── 512-byte data block 1
//! ├── 0x0D terminator                ├── 512-byte data block 2
//! ├── fixed-width records            └── ...
//! └── 0x1A end-of-file marker
//! ```
//!
//! ## Scope
//!
//! The codec works on fully materialised byte buffers; it does not
//! stream and is single-threaded by design. There is no SQL layer, no
//! `.mdx`/`.ndx`/`.cdx` index support, no in-place record update, and
//! no decryption (the encryption flag is surfaced, not honoured).
//!
//! ## Module Overview
//!
//! - [`table`]: the two-phase tabular model and value conversion helpers
//! - [`types`]: column types, widths, and payload text encodings
//! - [`dbf`]: main-table byte codec (header, descriptors, records)
//! - [`dbt`]: memo-block heap codec
//! - [`encoding`]: fixed-width field primitives
//! - [`file`]: path-based convenience wrappers
//! - [`error`]: the three boundary error kinds

#[macro_use]
mod macros;

pub mod dbf;
pub mod dbt;
pub mod encoding;
pub mod error;
pub mod file;
pub mod table;
pub mod types;

pub use dbf::{Reader, TableImage, Writer};
pub use error::{ColumnAddError, ReadError, RowAddError};
pub use table::Table;
pub use types::{Column, ColumnType, FieldWidth, TextEncoding};
