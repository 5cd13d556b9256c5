use crate::ebook::consts;
use crate::ebook::parser::EpubParser;
use crate::ebook::xml::{XmlElement, XmlReader, permissive_reader};
use log::warn;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Data gathered from a single pass over the package document:
/// metadata fields, the id->href manifest lookup, and spine order.
pub(super) struct PackageData {
    pub(super) title: Option<String>,
    pub(super) author: Option<String>,
    pub(super) manifest: HashMap<String, String>,
    pub(super) spine: Vec<String>,
}

impl EpubParser<'_> {
    pub(super) fn parse_package(data: &[u8]) -> PackageData {
        let mut reader = permissive_reader(data);
        let mut package = PackageData {
            title: None,
            author: None,
            manifest: HashMap::new(),
            spine: Vec::new(),
        };
        let mut in_metadata = false;

        while let Some(event) = reader.next_event() {
            // An `Empty` element has no end tag, so its text may never be read
            let (el, has_end_tag) = match event {
                Event::Start(el) => (el, true),
                Event::Empty(el) => (el, false),
                Event::End(el) if el.local_name().as_ref() == consts::METADATA.as_bytes() => {
                    in_metadata = false;
                    continue;
                }
                _ => continue,
            };

            if el.is_local_name(consts::METADATA) {
                in_metadata = has_end_tag;
            } else if in_metadata && has_end_tag && el.is_local_name(consts::TITLE) {
                if package.title.is_none() {
                    package.title = non_empty(reader.element_text(&el));
                }
            } else if in_metadata && has_end_tag && el.is_local_name(consts::CREATOR) {
                if package.author.is_none() {
                    package.author = non_empty(reader.element_text(&el));
                }
            } else if el.is_local_name(consts::ITEM) {
                // Manifest entries missing either field are unusable for
                // spine resolution and skipped, not fatal.
                match (el.attribute(consts::ID), el.attribute(consts::HREF)) {
                    (Some(id), Some(href)) => {
                        package.manifest.insert(id, href);
                    }
                    (id, _) => warn!(
                        "manifest item without {}; skipping",
                        if id.is_none() { "an id" } else { "an href" }
                    ),
                }
            } else if el.is_local_name(consts::ITEMREF) {
                match el.attribute(consts::IDREF) {
                    Some(idref) => package.spine.push(idref),
                    None => warn!("spine itemref without an idref; skipping"),
                }
            }
        }
        package
    }
}

/// An empty metadata element is treated the same as an absent one.
fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
