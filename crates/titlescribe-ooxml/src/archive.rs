//! Archive handling for DOCX files
//!
//! DOCX files are ZIP archives containing XML parts and resources. The
//! archive is unpacked into memory in its original entry order so that a
//! rewritten package keeps the same layout: only parts that were explicitly
//! replaced differ from the input.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};

/// Path of the primary markup part
pub const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    contents: Vec<u8>,
    stored: bool,
    directory: bool,
}

/// Represents an unpacked OOXML package
#[derive(Debug, Clone, Default)]
pub struct OoxmlArchive {
    /// Entries in archive order
    entries: Vec<Entry>,
    /// Entry name -> position in `entries`
    index: HashMap<String, usize>,
}

impl OoxmlArchive {
    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut unpacked = Self::default();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if file.is_dir() {
                unpacked.push_entry(Entry {
                    name,
                    contents: Vec::new(),
                    stored: true,
                    directory: true,
                });
                continue;
            }

            let stored = file.compression() == CompressionMethod::Stored;
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            unpacked.push_entry(Entry {
                name,
                contents,
                stored,
                directory: false,
            });
        }

        log::debug!("Unpacked {} archive entries", unpacked.entries.len());
        Ok(unpacked)
    }

    /// Create from an in-memory byte slice
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(std::io::Cursor::new(bytes))
    }

    fn push_entry(&mut self, entry: Entry) {
        match self.index.get(&entry.name) {
            Some(&pos) => {
                self.entries[pos].contents = entry.contents;
            }
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.index
            .get(path)
            .map(|&pos| self.entries[pos].contents.as_slice())
    }

    /// Get a file's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Check if a file exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// List all entries in archive order, directories included
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set or update a file's contents. New files are appended at the end.
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.push_entry(Entry {
            name: path.into(),
            contents,
            stored: false,
            directory: false,
        });
    }

    /// Set a file's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.set(path, contents.into().into_bytes());
    }

    /// Write the archive to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the archive to any writer, keeping entry order and each
    /// entry's stored/deflated choice
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);

        for entry in &self.entries {
            let method = if entry.stored {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            let options = SimpleFileOptions::default().compression_method(method);
            if entry.directory {
                zip.add_directory(entry.name.as_str(), options)?;
                continue;
            }
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&entry.contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Serialize the archive into a new byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = std::io::Cursor::new(Vec::new());
        self.write_to(&mut output)?;
        Ok(output.into_inner())
    }
}
