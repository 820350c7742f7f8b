//! On-disk layout of a `.gamemusic` container.
//!
//! ```text
//! 0               16 bytes   magic "Game Music Files"
//! 16              u32 BE     file count
//! 20              u32 BE * n absolute payload offsets
//! 20 + 4n         ...        payloads, back to back
//! ```

use crate::types::errors::PackError;
use std::io::{self, Write};

pub const MAGIC: &[u8; 16] = b"Game Music Files";

/// Magic plus the file count field.
pub const HEADER_LEN: u64 = MAGIC.len() as u64 + 4;

/// Suffix appended to the source archive's file name.
pub const CONTAINER_SUFFIX: &str = ".gamemusic";

/// Byte position of the first payload for `file_count` entries.
pub fn base_offset(file_count: usize) -> u64 {
    HEADER_LEN + 4 * file_count as u64
}

/// Offsets precomputed from entry lengths so the container can be
/// streamed front to back without seeking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    offsets: Vec<u32>,
    total_len: u64,
}

impl ContainerLayout {
    pub fn from_lengths(lengths: &[u64]) -> Result<Self, PackError> {
        let mut cursor = base_offset(lengths.len());
        let mut offsets = Vec::with_capacity(lengths.len());

        for &len in lengths {
            let offset =
                u32::try_from(cursor).map_err(|_| PackError::ContainerTooLarge { total_len: cursor })?;
            offsets.push(offset);
            cursor = cursor
                .checked_add(len)
                .ok_or(PackError::ContainerTooLarge { total_len: u64::MAX })?;
        }

        // The last payload must end inside the addressable range too.
        if cursor > u64::from(u32::MAX) {
            return Err(PackError::ContainerTooLarge { total_len: cursor });
        }

        Ok(Self {
            offsets,
            total_len: cursor,
        })
    }

    pub fn file_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Write magic, file count and offset table.
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(MAGIC)?;
        out.write_all(&(self.offsets.len() as u32).to_be_bytes())?;
        for offset in &self.offsets {
            out.write_all(&offset.to_be_bytes())?;
        }
        Ok(())
    }
}
