//! # Memo-Block Heap (`.dbt`)
//!
//! Variable-length memo payloads live in a companion `.dbt` file laid out
//! as 512-byte blocks. Block 0 is the header; data blocks are numbered
//! from 1, and those 1-based indices are what `M`/`G`/`B` fields in the
//! main table store.
//!
//! ## File Layout
//!
//! ```text
//! +--------------------+
//! | Header block (512) |  byte 0..4: next-free block index, u32 LE
//! |                    |  byte 16:   version 0x03
//! +--------------------+
//! | Block 1 (512)      |  payload bytes, 0x1A terminated
//! +--------------------+
//! | Block 2 (512)      |
//! +--------------------+
//! | ...                |
//! ```
//!
//! A payload shorter than 510 bytes takes a single block with one `0x1A`
//! at the block's final byte. Longer payloads span `ceil(len / 512)`
//! consecutive blocks and the final two bytes of the span are `0x1A 0x1A`.
//!
//! The next-free index is written as a u32 little-endian. Files whose
//! producers stored it as a single byte parse identically, because bytes
//! 1..=3 are reserved zeros in that layout.

use hashbrown::HashMap;
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::ReadError;

/// Byte size of every memo block, header included.
pub const BLOCK_SIZE: usize = 512;

/// Terminator byte; doubled at the end of a multi-block span.
pub const MEMO_EOF: u8 = 0x1A;

/// Version byte stored at header offset 16.
pub const MEMO_VERSION: u8 = 0x03;

/// Longest payload that fits a single block alongside its terminator.
const SINGLE_BLOCK_MAX: usize = 510;

/// Header block: next-free index, version, reserved zeros.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MemoHeader {
    next_block: U32,
    reserved0: [u8; 12],
    version: u8,
    reserved1: [u8; 495],
}

const _: () = assert!(std::mem::size_of::<MemoHeader>() == BLOCK_SIZE);

impl MemoHeader {
    pub fn new() -> Self {
        Self {
            next_block: U32::new(1),
            reserved0: [0; 12],
            version: MEMO_VERSION,
            reserved1: [0; 495],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<&Self, ReadError> {
        Self::ref_from_bytes(bytes.get(..BLOCK_SIZE).ok_or(ReadError::MemoTooShort {
            len: bytes.len(),
        })?)
        .map_err(|_| ReadError::MemoTooShort { len: bytes.len() })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    zerocopy_accessors! {
        next_block: u32,
    }
}

impl Default for MemoHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Write-side block heap. Lazily initialised on the first append, so a
/// table without memo values produces no `.dbt` image at all.
#[derive(Debug, Default)]
pub struct MemoHeap {
    buf: Vec<u8>,
}

impl MemoHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first payload is appended.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The index the next appended payload will occupy.
    pub fn next_block(&self) -> u32 {
        if self.buf.is_empty() {
            1
        } else {
            u32::from_le_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]])
        }
    }

    /// Appends a payload and returns the 1-based block index it occupies,
    /// which is the value the owning record field must store.
    pub fn append(&mut self, payload: &str) -> u32 {
        if self.buf.is_empty() {
            self.buf.extend_from_slice(MemoHeader::new().as_bytes());
        }

        let index = self.next_block();
        let bytes = payload.as_bytes();
        let span = if bytes.len() < SINGLE_BLOCK_MAX {
            let start = self.buf.len();
            self.buf.resize(start + BLOCK_SIZE, 0);
            self.buf[start..start + bytes.len()].copy_from_slice(bytes);
            self.buf[start + BLOCK_SIZE - 1] = MEMO_EOF;
            1
        } else {
            let span = bytes.len().div_ceil(BLOCK_SIZE);
            let start = self.buf.len();
            self.buf.resize(start + span * BLOCK_SIZE, 0);
            self.buf[start..start + bytes.len()].copy_from_slice(bytes);
            let end = self.buf.len();
            self.buf[end - 2] = MEMO_EOF;
            self.buf[end - 1] = MEMO_EOF;
            span
        };

        let next = index + span as u32;
        self.buf[..4].copy_from_slice(&next.to_le_bytes());
        index
    }

    /// Consumes the heap, returning the `.dbt` image, or None when no
    /// payload was ever appended.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        (!self.buf.is_empty()).then_some(self.buf)
    }
}

fn validate(dbt: &[u8]) -> Result<(), ReadError> {
    if dbt.len() < 2 * BLOCK_SIZE {
        return Err(ReadError::MemoTooShort { len: dbt.len() });
    }
    if dbt.len() % BLOCK_SIZE != 0 {
        return Err(ReadError::MemoMisaligned { len: dbt.len() });
    }
    Ok(())
}

/// Reads the memo stored at `index`.
///
/// The terminator scan starts at offset 0 of the whole buffer rather than
/// at the requested block, matching the legacy xBase tooling this codec
/// stays byte-compatible with; a terminator in an earlier block masks
/// later ones, and a masked block reports [`ReadError::UnterminatedMemo`].
pub fn read_memo(dbt: &[u8], index: u32) -> Result<String, ReadError> {
    validate(dbt)?;
    let start = BLOCK_SIZE * index as usize;
    if start >= dbt.len() {
        return Err(ReadError::MemoIndexOutOfRange {
            index,
            blocks: dbt.len() / BLOCK_SIZE,
        });
    }

    let eof = dbt
        .iter()
        .position(|&b| b == MEMO_EOF)
        .ok_or(ReadError::UnterminatedMemo { index })?;
    if eof < start {
        return Err(ReadError::UnterminatedMemo { index });
    }
    if eof - start >= BLOCK_SIZE && dbt.get(eof + 1) != Some(&MEMO_EOF) {
        return Err(ReadError::UnterminatedMemo { index });
    }

    Ok(String::from_utf8_lossy(&dbt[start..eof]).into_owned())
}

/// Enumerates the heap with payload spans merged.
///
/// Key 0 carries the header's next-free index as a decimal string; every
/// other key is the first block index of the payload stored under it.
pub fn blocks_merged(dbt: &[u8]) -> Result<HashMap<u32, String>, ReadError> {
    validate(dbt)?;
    let header = MemoHeader::from_bytes(dbt)?;

    let mut blocks = HashMap::new();
    blocks.insert(0, header.next_block().to_string());

    let mut index = 1usize;
    while index * BLOCK_SIZE < dbt.len() {
        let tail = &dbt[index * BLOCK_SIZE..];
        let Some(eof) = tail.iter().position(|&b| b == MEMO_EOF) else {
            break;
        };
        blocks.insert(
            index as u32,
            String::from_utf8_lossy(&tail[..eof]).into_owned(),
        );
        index += if eof >= BLOCK_SIZE {
            eof.div_ceil(BLOCK_SIZE)
        } else {
            1
        };
    }

    Ok(blocks)
}

/// Enumerates the heap block by block, no merging and no terminator
/// handling. Element 0 is the header's next-free index as a decimal
/// string; each data block contributes its first 511 bytes.
pub fn blocks_unmerged(dbt: &[u8]) -> Result<Vec<String>, ReadError> {
    validate(dbt)?;
    let header = MemoHeader::from_bytes(dbt)?;

    let mut blocks = vec![header.next_block().to_string()];
    for index in 1..dbt.len() / BLOCK_SIZE {
        let start = index * BLOCK_SIZE;
        blocks.push(String::from_utf8_lossy(&dbt[start..start + BLOCK_SIZE - 1]).into_owned());
    }
    Ok(blocks)
}
