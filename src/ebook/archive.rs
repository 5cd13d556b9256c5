use crate::ebook::errors::{ArchiveError, ArchiveResult};
use std::cell::RefCell;
use std::io;
use std::io::{Read, Seek};
use zip::ZipArchive as Zip;

/// Read access to the files bundled within a packaged document.
///
/// Paths are forward-slash separated and relative to the archive root;
/// a leading `/` is tolerated and stripped.
pub(super) trait Archive {
    fn contains(&self, path: &str) -> bool;

    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>>;
}

pub(super) struct ZipArchive<R>(RefCell<Zip<R>>);

impl<R: Read + Seek> ZipArchive<R> {
    pub(super) fn new(reader: R) -> ArchiveResult<Self> {
        Zip::new(reader)
            .map(|zip| Self(RefCell::new(zip)))
            .map_err(|error| ArchiveError::UnreadableArchive {
                source: io::Error::from(error),
            })
    }
}

impl<R: Read + Seek> Archive for ZipArchive<R> {
    fn contains(&self, path: &str) -> bool {
        self.0.borrow().index_for_name(strip_root(path)).is_some()
    }

    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        let path = strip_root(path);
        let mut zip = self.0.borrow_mut();
        let mut file = zip
            .by_name(path)
            .map_err(|_| ArchiveError::MissingFile { path: path.into() })?;
        let mut buf = Vec::new();

        file.read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|error| ArchiveError::CannotRead {
                source: error,
                path: path.into(),
            })
    }
}

/// Zip archives only support relative paths:
/// `/OEBPS/ch1.xhtml` -> `OEBPS/ch1.xhtml`
fn strip_root(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
