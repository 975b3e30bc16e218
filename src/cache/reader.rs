use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::domain::errors::{CacheError, CacheResult};

/// Reader over a cached object
///
/// Objects are stored gzip-compressed in the bucket; the default reader
/// decodes transparently. `raw` skips decoding.
pub struct ObjectReader {
    inner: ReaderKind,
}

enum ReaderKind {
    Gzip(GzDecoder<BufReader<File>>),
    Raw(BufReader<File>),
}

impl ObjectReader {
    /// Open a cached entry with transparent gzip decoding
    pub fn gzip(path: impl AsRef<Path>) -> CacheResult<Self> {
        let file = Self::open_file(path.as_ref())?;
        Ok(Self {
            inner: ReaderKind::Gzip(GzDecoder::new(BufReader::new(file))),
        })
    }

    /// Open a cached entry without decoding
    pub fn raw(path: impl AsRef<Path>) -> CacheResult<Self> {
        let file = Self::open_file(path.as_ref())?;
        Ok(Self {
            inner: ReaderKind::Raw(BufReader::new(file)),
        })
    }

    fn open_file(path: &Path) -> CacheResult<File> {
        File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CacheError::EntryNotFound {
                path: path.to_path_buf(),
            },
            _ => CacheError::io(path, e),
        })
    }
}

impl Read for ObjectReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            ReaderKind::Gzip(reader) => reader.read(buf),
            ReaderKind::Raw(reader) => reader.read(buf),
        }
    }
}
