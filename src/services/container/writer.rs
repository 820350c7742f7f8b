use super::format::ContainerLayout;
use crate::types::errors::PackError;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Where one input ended up inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedEntry {
    pub path: PathBuf,
    pub offset: u32,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub entries: Vec<PackedEntry>,
    pub total_len: u64,
}

impl PackSummary {
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// A header-only container was written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pack `input_files`, in the given order, into a new container at `output_path`.
///
/// Pass one stats every input and fixes the offset table, pass two streams
/// header and payloads sequentially. Nothing is created on disk until pass
/// one succeeds. A failure during pass two leaves a partial output behind.
pub fn pack(input_files: &[PathBuf], output_path: &Path) -> Result<PackSummary, PackError> {
    let layout = plan(input_files)?;

    let file = File::create(output_path).map_err(|source| PackError::OutputWrite {
        path: output_path.to_path_buf(),
        source,
    })?;

    write_planned(input_files, &layout, BufWriter::new(file), output_path)
}

/// Same as [`pack`] but into an arbitrary writer.
pub fn pack_to_writer<W: Write>(input_files: &[PathBuf], out: W) -> Result<PackSummary, PackError> {
    let layout = plan(input_files)?;
    write_planned(input_files, &layout, out, Path::new("<writer>"))
}

/// Pack in-memory buffers. Only fails if the result exceeds 32-bit offsets.
pub fn pack_buffers<B: AsRef<[u8]>>(buffers: &[B]) -> Result<Vec<u8>, PackError> {
    let lengths: Vec<u64> = buffers.iter().map(|b| b.as_ref().len() as u64).collect();
    let layout = ContainerLayout::from_lengths(&lengths)?;

    let mut out = Vec::with_capacity(layout.total_len() as usize);
    layout
        .write_header(&mut out)
        .map_err(|source| PackError::OutputWrite {
            path: PathBuf::from("<memory>"),
            source,
        })?;
    for buffer in buffers {
        out.extend_from_slice(buffer.as_ref());
    }
    Ok(out)
}

fn plan(input_files: &[PathBuf]) -> Result<ContainerLayout, PackError> {
    let lengths = input_files
        .iter()
        .map(|path| {
            fs::metadata(path)
                .map(|meta| meta.len())
                .map_err(|source| PackError::InputRead {
                    path: path.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ContainerLayout::from_lengths(&lengths)
}

fn write_planned<W: Write>(
    input_files: &[PathBuf],
    layout: &ContainerLayout,
    mut out: W,
    output_path: &Path,
) -> Result<PackSummary, PackError> {
    let write_err = |source: io::Error| PackError::OutputWrite {
        path: output_path.to_path_buf(),
        source,
    };

    layout.write_header(&mut out).map_err(write_err)?;

    let mut entries = Vec::with_capacity(input_files.len());
    let offsets = layout.offsets();

    for (i, path) in input_files.iter().enumerate() {
        let offset = offsets[i];
        let expected = match offsets.get(i + 1) {
            Some(next) => u64::from(next - offset),
            None => layout.total_len() - u64::from(offset),
        };

        let actual = copy_input(path, expected, &mut out, &write_err)?;
        if actual != expected {
            return Err(PackError::InputChanged {
                path: path.clone(),
                expected,
                actual,
            });
        }

        log::info!("{}", path.display());
        entries.push(PackedEntry {
            path: path.clone(),
            offset,
            length: expected,
        });
    }

    out.flush().map_err(write_err)?;

    Ok(PackSummary {
        entries,
        total_len: layout.total_len(),
    })
}

/// Copy at most `expected + 1` bytes so growth after the stat is detected
/// without streaming the whole grown file.
pub(super) fn copy_input<W: Write>(
    path: &Path,
    expected: u64,
    out: &mut W,
    write_err: &impl Fn(io::Error) -> PackError,
) -> Result<u64, PackError> {
    let read_err = |source: io::Error| PackError::InputRead {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = File::open(path).map_err(read_err)?.take(expected + 1);
    let mut buf = [0u8; 64 * 1024];
    let mut copied = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_err(e)),
        };
        let keep = (n as u64).min(expected.saturating_sub(copied)) as usize;
        out.write_all(&buf[..keep]).map_err(write_err)?;
        copied += n as u64;
    }

    Ok(copied)
}
