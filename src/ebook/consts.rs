// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const IDREF: &str = "idref";

// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// Container elements/attributes
pub(crate) const ROOT_FILE: &str = "rootfile";
pub(crate) const FULL_PATH: &str = "full-path";

// Package elements
pub(crate) const METADATA: &str = "metadata";
pub(crate) const ITEM: &str = "item";
pub(crate) const ITEMREF: &str = "itemref";
pub(crate) const TITLE: &str = "title";
pub(crate) const CREATOR: &str = "creator";

// Metadata defaults
pub(crate) const UNKNOWN_TITLE: &str = "Unknown Title";
pub(crate) const UNKNOWN_AUTHOR: &str = "Unknown Author";

// Zip local-file signature, checked before any parse attempt
pub(crate) const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
