//! Package assembly
//!
//! HWPX files are ZIP archives of XML parts. The output package is the
//! skeleton archive with a few parts swapped out: every other entry is
//! copied raw (compressed bytes, CRC and header fields unchanged), and
//! the entry order, including `mimetype` first, is preserved.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{HwpxError, Result};

/// Build an output package from skeleton bytes and replacement parts
///
/// Replacement parts are written with the compression method,
/// modification time and permissions of the entry they replace. Each
/// replacement must name an entry that exists in the skeleton.
pub fn assemble_package(skeleton: &[u8], replacements: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(skeleton))
        .map_err(|e| HwpxError::MissingSkeleton(format!("not a readable archive: {}", e)))?;

    for (name, _) in replacements {
        if !archive.file_names().any(|entry| entry == *name) {
            return Err(HwpxError::MissingPart(name.to_string()));
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        let name = entry.name().to_string();

        match replacements.iter().find(|(part, _)| *part == name) {
            Some((_, contents)) => {
                let mut options =
                    SimpleFileOptions::default().compression_method(entry.compression());
                if let Some(modified) = entry.last_modified() {
                    options = options.last_modified_time(modified);
                }
                if let Some(mode) = entry.unix_mode() {
                    options = options.unix_permissions(mode);
                }
                drop(entry);

                debug!(part = %name, size = contents.len(), "writing replaced part");
                writer.start_file(name, options)?;
                writer.write_all(contents)?;
            }
            None => writer.raw_copy_file(entry)?,
        }
    }

    Ok(writer.finish()?.into_inner())
}
