//! Thin extensions over the `quick-xml` event reader.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

pub(super) type ByteReader<'a> = Reader<&'a [u8]>;

/// A reader that never surfaces parse errors to the caller.
///
/// Malformed markup ends or skips the event stream instead of aborting,
/// so parsing is always best-effort over whatever is readable.
pub(super) fn permissive_reader(data: &[u8]) -> ByteReader<'_> {
    let mut reader = Reader::from_reader(data);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    reader
}

pub(super) trait XmlReader<'a> {
    /// Iterator-like method to read the next [`Event`].
    ///
    /// Returns [`None`] at end of input or on an unrecoverable reader error.
    fn next_event(&mut self) -> Option<Event<'a>>;

    /// Consolidated text content of `start`'s subtree, up to its end tag.
    fn element_text(&mut self, start: &BytesStart) -> String {
        let mut value = String::new();

        while let Some(event) = self.next_event() {
            match event {
                Event::End(el) if el.name() == start.name() => break,
                Event::Text(text) => value.push_str(
                    &text
                        .decode()
                        .unwrap_or_else(|_| String::from_utf8_lossy(text.as_ref())),
                ),
                Event::CData(cdata) => {
                    value.push_str(&String::from_utf8_lossy(cdata.as_ref()));
                }
                Event::GeneralRef(entity) => {
                    if let Some(resolved) = resolve_entity(&String::from_utf8_lossy(entity.as_ref()))
                    {
                        value.push(resolved);
                    }
                }
                _ => {}
            }
        }
        value.trim().to_string()
    }
}

impl<'a> XmlReader<'a> for ByteReader<'a> {
    fn next_event(&mut self) -> Option<Event<'a>> {
        // Bounded so a reader stuck on one construct cannot spin forever
        for _ in 0..32 {
            match self.read_event() {
                Ok(Event::Eof) => return None,
                Ok(event) => return Some(event),
                // Skip over ill-formed constructs
                Err(quick_xml::Error::IllFormed(_)) => continue,
                Err(_) => return None,
            }
        }
        None
    }
}

/// Resolves predefined XML entities and numeric character references,
/// which the reader surfaces as [`Event::GeneralRef`] rather than text.
pub(super) fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => return Some('\''),
        "quot" => return Some('"'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "amp" => return Some('&'),
        "nbsp" => return Some('\u{a0}'),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

pub(super) trait XmlElement {
    fn is_local_name(&self, target: &str) -> bool;

    /// Unescaped attribute value by `key`, if present and readable.
    fn attribute(&self, key: &str) -> Option<String>;
}

impl XmlElement for BytesStart<'_> {
    fn is_local_name(&self, target: &str) -> bool {
        self.local_name().as_ref() == target.as_bytes()
    }

    fn attribute(&self, key: &str) -> Option<String> {
        match self.try_get_attribute(key) {
            Ok(Some(attribute)) => Some(
                attribute
                    .unescape_value()
                    .map(|value| value.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attribute.value).into_owned()),
            ),
            _ => None,
        }
    }
}
