//! # Path Convenience I/O
//!
//! Thin wrappers that connect the byte-buffer codecs to the filesystem.
//! The codecs themselves never touch a path; everything here is
//! `std::fs` plus context-wrapped error reports.

use std::fs;
use std::path::Path;

use eyre::{bail, Result, WrapErr};

use crate::dbf::{Reader, Writer};
use crate::table::Table;

/// Serialises `table` to `dbf_path`, and its memo heap to `dbt_path`.
///
/// Fails when the table produced a memo heap but no `dbt_path` was
/// given; silently losing memo payloads would leave dangling block
/// indices in the main table.
pub fn write_table(
    table: &Table,
    dbf_path: impl AsRef<Path>,
    dbt_path: Option<&Path>,
) -> Result<()> {
    write_table_with(Writer::new(), table, dbf_path, dbt_path)
}

/// [`write_table`] with an explicit text encoding.
pub fn write_table_with(
    writer: Writer,
    table: &Table,
    dbf_path: impl AsRef<Path>,
    dbt_path: Option<&Path>,
) -> Result<()> {
    let dbf_path = dbf_path.as_ref();
    let image = writer.write(table)?;

    fs::write(dbf_path, &image.dbf)
        .wrap_err_with(|| format!("failed to write {}", dbf_path.display()))?;

    if let Some(dbt) = image.dbt {
        let Some(dbt_path) = dbt_path else {
            bail!(
                "table serialised a memo heap but no .dbt path was given alongside {}",
                dbf_path.display()
            );
        };
        fs::write(dbt_path, &dbt)
            .wrap_err_with(|| format!("failed to write {}", dbt_path.display()))?;
    }
    Ok(())
}

/// Reads and decodes the table at `path` with the default UTF-8 encoding.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    read_table_with(Reader::new(), path)
}

/// [`read_table`] with an explicit text encoding.
pub fn read_table_with(reader: Reader, path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    reader
        .read(&bytes)
        .wrap_err_with(|| format!("failed to decode {}", path.display()))
}

/// Reads a table and its memo companion. The raw `.dbt` image comes back
/// alongside the table so memo fields can be resolved with
/// [`crate::dbt::read_memo`].
pub fn read_table_with_memo(
    dbf_path: impl AsRef<Path>,
    dbt_path: impl AsRef<Path>,
) -> Result<(Table, Vec<u8>)> {
    let table = read_table(&dbf_path)?;
    let dbt_path = dbt_path.as_ref();
    let dbt = fs::read(dbt_path)
        .wrap_err_with(|| format!("failed to read {}", dbt_path.display()))?;
    Ok((table, dbt))
}
