use crate::ebook::consts;
use crate::ebook::errors::FormatError;
use crate::ebook::parser::EpubParser;
use crate::ebook::xml::{XmlElement, XmlReader, permissive_reader};
use quick_xml::events::Event;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package file location.
    ///
    /// Although rare, multiple `rootfile` locations may exist; only the
    /// first carrying a `full-path` attribute is accepted.
    pub(super) fn parse_container(data: &[u8]) -> Result<String, FormatError> {
        let mut reader = permissive_reader(data);

        while let Some(event) = reader.next_event() {
            let el = match event {
                Event::Start(el) | Event::Empty(el) if el.is_local_name(consts::ROOT_FILE) => el,
                _ => continue,
            };
            if let Some(full_path) = el.attribute(consts::FULL_PATH) {
                return Ok(full_path);
            }
        }
        Err(FormatError::MissingPackagePath)
    }
}
