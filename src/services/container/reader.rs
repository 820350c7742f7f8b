use super::format::{base_offset, HEADER_LEN, MAGIC};
use crate::types::errors::FormatError;
use serde::Serialize;
use std::ops::Range;

/// Location of one payload inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub offset: u32,
    pub length: u32,
}

impl IndexEntry {
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.length as usize
    }
}

/// Parsed and validated header of a `.gamemusic` container.
///
/// Only locates payloads; nothing is copied out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerIndex {
    entries: Vec<IndexEntry>,
}

impl ContainerIndex {
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        let actual = data.len() as u64;
        if actual < HEADER_LEN {
            return Err(FormatError::Truncated {
                needed: HEADER_LEN,
                actual,
            });
        }
        if &data[..MAGIC.len()] != MAGIC {
            return Err(FormatError::BadMagic);
        }
        check_addressable(actual)?;

        let file_count = read_u32_be(data, MAGIC.len()) as usize;
        let table_end = base_offset(file_count);
        if actual < table_end {
            return Err(FormatError::Truncated {
                needed: table_end,
                actual,
            });
        }

        let offsets: Vec<u32> = (0..file_count)
            .map(|i| read_u32_be(data, HEADER_LEN as usize + 4 * i))
            .collect();

        let mut entries = Vec::with_capacity(file_count);
        let mut expected_start = table_end;
        for (index, &offset) in offsets.iter().enumerate() {
            let start = u64::from(offset);
            // Payloads are contiguous, the first one right after the table.
            let in_order = if index == 0 {
                start == table_end
            } else {
                start >= expected_start
            };
            if !in_order || start > actual {
                return Err(FormatError::BadOffset { index, offset });
            }

            let end = offsets
                .get(index + 1)
                .map(|&next| u64::from(next))
                .unwrap_or(actual);
            if end < start || end > actual {
                return Err(FormatError::BadOffset {
                    index: index + 1,
                    offset: end as u32,
                });
            }

            // Both bounds are <= actual, which fits in u32 after check_addressable.
            entries.push(IndexEntry {
                offset,
                length: (end - start) as u32,
            });
            expected_start = end;
        }

        Ok(Self { entries })
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Payload bytes of entry `index`, borrowed from the parsed buffer.
    pub fn payload<'a>(&self, data: &'a [u8], index: usize) -> Option<&'a [u8]> {
        self.entries.get(index).and_then(|e| data.get(e.range()))
    }
}

/// Offsets are u32, so no valid container is larger than `u32::MAX` bytes.
pub(super) fn check_addressable(actual: u64) -> Result<(), FormatError> {
    if actual > u64::from(u32::MAX) {
        return Err(FormatError::TooLarge { actual });
    }
    Ok(())
}

fn read_u32_be(data: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&data[at..at + 4]);
    u32::from_be_bytes(raw)
}

/// Guess a payload's format from its leading signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Spc,
    Vgm,
    Unknown,
}

impl PayloadKind {
    pub fn detect(payload: &[u8]) -> Self {
        if payload.starts_with(b"SNES-SPC700 Sound File Data") {
            Self::Spc
        } else if payload.starts_with(b"Vgm ") {
            Self::Vgm
        } else {
            Self::Unknown
        }
    }
}
