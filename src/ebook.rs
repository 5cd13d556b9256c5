//! Packaged-document resolution and plain-text extraction.
//!
//! This module turns the bytes of a zip-packaged EPUB document into a
//! [`Document`]: metadata plus one concatenated plain-text body ordered
//! by the package spine.

mod archive;
mod consts;
pub mod errors;
mod extract;
mod parser;
mod xml;

use crate::ebook::archive::ZipArchive;
use crate::ebook::errors::{EbookResult, FormatError};
use crate::ebook::parser::EpubParser;
use log::debug;
use std::io::Cursor;

/// Immutable descriptive details of a parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMetadata {
    title: String,
    author: String,
    byte_size: u64,
}

impl DocumentMetadata {
    /// The first title declared by the package,
    /// or `"Unknown Title"` if none is.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The first creator declared by the package,
    /// or `"Unknown Author"` if none is.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The size of the source archive in bytes.
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }
}

/// A fully extracted document: metadata plus its reading-order text.
///
/// Produced once per parse and owned by the caller; feeding
/// [`text`](Self::text) to [`segment`](crate::segment) yields the
/// token and chapter sequences played back by a
/// [`Player`](crate::Player).
#[derive(Clone, Debug)]
pub struct Document {
    metadata: DocumentMetadata,
    text: String,
}

impl Document {
    /// Parses a fully buffered archive into a [`Document`].
    ///
    /// Structural failures (unindexable archive, missing container
    /// pointer or package document) abort the parse; item-level
    /// failures such as an unresolvable spine entry are skipped.
    /// A document whose every spine entry failed to resolve has empty
    /// text, which is valid, if degenerate, output.
    pub fn from_bytes(bytes: &[u8]) -> EbookResult<Self> {
        if !bytes.starts_with(consts::ZIP_MAGIC) {
            return Err(FormatError::InvalidFileType.into());
        }

        let archive = ZipArchive::new(Cursor::new(bytes))?;
        let parsed = EpubParser::new(&archive).parse()?;

        // Blank-line separators keep paragraph boundaries between
        // spine parts intact after tokenization.
        let text = parsed
            .parts
            .iter()
            .map(|part| extract::extract_text(part))
            .collect::<Vec<_>>()
            .join("\n\n");

        let metadata = DocumentMetadata {
            title: parsed.title.unwrap_or_else(|| consts::UNKNOWN_TITLE.into()),
            author: parsed.author.unwrap_or_else(|| consts::UNKNOWN_AUTHOR.into()),
            byte_size: bytes.len() as u64,
        };
        debug!(
            "extracted `{}` by `{}`: {} bytes of text from {} spine parts",
            metadata.title,
            metadata.author,
            text.len(),
            parsed.parts.len(),
        );

        Ok(Self { metadata, text })
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// The concatenated plain-text body in spine order.
    pub fn text(&self) -> &str {
        &self.text
    }
}
