//! The `gamemusic2json` command.

use crate::services::container::{ContainerIndex, PayloadKind};
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct EntryReport {
    pub index: usize,
    pub offset: u32,
    pub length: u32,
    pub kind: PayloadKind,
}

#[derive(Debug, Serialize)]
pub struct ContainerReport {
    pub file_count: usize,
    pub total_len: u64,
    pub entries: Vec<EntryReport>,
}

pub fn inspect_container(path: &Path) -> anyhow::Result<ContainerReport> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let index = ContainerIndex::parse(&data)
        .with_context(|| format!("{} is not a valid container", path.display()))?;

    let entries = index
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| EntryReport {
            index: i,
            offset: entry.offset,
            length: entry.length,
            kind: index
                .payload(&data, i)
                .map(PayloadKind::detect)
                .unwrap_or(PayloadKind::Unknown),
        })
        .collect();

    Ok(ContainerReport {
        file_count: index.file_count(),
        total_len: data.len() as u64,
        entries,
    })
}
