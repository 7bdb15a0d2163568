//! Zip packaging for Office Open XML parts.

use std::io::{Seek, Write};

use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use crate::render::SinkError;

/// Writes named parts into a zip archive.
///
/// Every entry gets the same fixed timestamp, so the archive bytes depend
/// only on the parts written and their order.
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    parts: Vec<String>,
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default()),
            parts: Vec::new(),
        }
    }

    /// Adds a part at `path` (e.g. `word/document.xml`). Paths must be unique.
    pub fn add_part(&mut self, path: &str, content: &[u8]) -> Result<(), SinkError> {
        if self.parts.iter().any(|p| p == path) {
            return Err(SinkError::DuplicatePart(path.to_string()));
        }
        self.zip.start_file(path, self.options)?;
        self.zip.write_all(content)?;
        self.parts.push(path.to_string());
        Ok(())
    }

    /// Writes the central directory and returns the underlying writer.
    pub fn finish(self) -> Result<W, SinkError> {
        Ok(self.zip.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn in_memory() -> PackageWriter<Cursor<Vec<u8>>> {
        PackageWriter::with_writer(Cursor::new(Vec::new()))
    }

    #[test]
    fn test_parts_round_trip_through_archive() {
        let mut writer = in_memory();
        writer.add_part("a.xml", b"<a/>").unwrap();
        writer.add_part("dir/b.xml", b"<b/>").unwrap();

        let bytes = writer.finish().unwrap().into_inner();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names, vec!["a.xml", "dir/b.xml"]);
        let mut content = String::new();
        archive
            .by_name("dir/b.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<b/>");
    }

    #[test]
    fn test_duplicate_part_is_rejected() {
        let mut writer = in_memory();
        writer.add_part("a.xml", b"<a/>").unwrap();
        let err = writer.add_part("a.xml", b"<a/>").unwrap_err();
        assert!(matches!(err, SinkError::DuplicatePart(p) if p == "a.xml"));
    }

    #[test]
    fn test_identical_input_gives_identical_bytes() {
        let build = || {
            let mut writer = in_memory();
            writer.add_part("x.xml", b"<x>same</x>").unwrap();
            writer.finish().unwrap().into_inner()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_writes_to_file_on_disk() {
        let file = tempfile::tempfile().unwrap();
        let mut writer = PackageWriter::with_writer(file);
        writer.add_part("on-disk.xml", b"<disk/>").unwrap();
        let mut file = writer.finish().unwrap();
        file.rewind().unwrap();
        let archive = ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
