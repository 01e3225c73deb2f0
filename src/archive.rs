//! Bundling generated memos into one downloadable ZIP.

use crate::error::{Error, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Compress a set of files into one in-memory deflated ZIP archive.
///
/// Every file lands under its base file name; directory components are
/// discarded. The returned buffer is seekable and positioned at the start,
/// ready to hand to a download response.
///
/// Any missing or nameless input path is [`Error::FileUnavailable`] and the
/// whole operation aborts; partial archives are never produced.
pub fn archive_files<P: AsRef<Path>>(paths: &[P]) -> Result<Cursor<Vec<u8>>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::FileUnavailable(path.to_path_buf()))?;
        let bytes = std::fs::read(path)
            .map_err(|_| Error::FileUnavailable(path.to_path_buf()))?;

        writer.start_file(name, options)?;
        writer.write_all(&bytes)?;
    }

    let mut buffer = writer.finish()?;
    buffer.set_position(0);
    Ok(buffer)
}
