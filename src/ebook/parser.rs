mod container;
mod package;

use crate::ebook::archive::Archive;
use crate::ebook::consts;
use crate::ebook::errors::{ArchiveError, EbookError, EbookResult, FormatError};
use crate::ebook::parser::package::PackageData;
use crate::util::uri;
use log::{debug, warn};

/// Container-resolution output: document metadata fields plus the raw
/// markup of every resolved spine item, in reading order.
pub(super) struct ParsedDocument {
    pub(super) title: Option<String>,
    pub(super) author: Option<String>,
    pub(super) parts: Vec<Vec<u8>>,
}

pub(super) struct EpubParser<'a> {
    archive: &'a dyn Archive,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(archive: &'a dyn Archive) -> Self {
        Self { archive }
    }

    pub(super) fn parse(&self) -> EbookResult<ParsedDocument> {
        // Parse "META-INF/container.xml"
        let container = self
            .archive
            .read_bytes(consts::CONTAINER)
            .map_err(|error| match error {
                ArchiveError::MissingFile { .. } => EbookError::from(FormatError::MissingContainer),
                other => EbookError::from(other),
            })?;
        let package_path = Self::parse_container(&container)?;

        if !self.archive.contains(&package_path) {
            return Err(FormatError::PackageNotFound { path: package_path }.into());
        }

        // Parse the package document
        let package = self.archive.read_bytes(&package_path)?;
        let data = Self::parse_package(&package);
        debug!(
            "package `{package_path}`: {} manifest items, {} spine entries",
            data.manifest.len(),
            data.spine.len(),
        );

        let parts = self.resolve_spine(&package_path, &data);

        Ok(ParsedDocument {
            title: data.title,
            author: data.author,
            parts,
        })
    }

    /// Resolves every spine `idref` through the manifest to content bytes.
    ///
    /// Entries that cannot be resolved are skipped, never failing the
    /// whole document; reading order of the result equals spine order.
    fn resolve_spine(&self, package_path: &str, data: &PackageData) -> Vec<Vec<u8>> {
        let package_dir = uri::parent(package_path);
        let mut parts = Vec::with_capacity(data.spine.len());

        for idref in &data.spine {
            let Some(href) = data.manifest.get(idref) else {
                warn!("spine entry `{idref}` has no manifest item; skipping");
                continue;
            };
            let path = uri::resolve(package_dir, &uri::decode(href));

            match self.archive.read_bytes(&path) {
                Ok(bytes) => parts.push(bytes),
                Err(error) => {
                    warn!("spine entry `{idref}` -> `{path}` is unreadable; skipping: {error}");
                }
            }
        }
        parts
    }
}
