//! Markup-to-text linearization for spine content parts.
//!
//! Content documents are parsed permissively into a small node tree and
//! walked depth-first. Malformed markup never aborts extraction; the walk
//! runs over whatever tree could be recovered.

use crate::ebook::xml::{XmlReader, permissive_reader, resolve_entity};
use quick_xml::events::Event;

/// Tags whose entire subtree carries no reader-visible text.
const SKIPPED_TAGS: [&str; 2] = ["script", "style"];

/// The fixed set of block-level tags that delimit paragraphs and
/// structural lines once whitespace is collapsed downstream.
const BLOCK_TAGS: [&str; 10] = ["p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "br"];

enum Node {
    Text(String),
    Element { tag: String, children: Vec<Node> },
}

/// Linearizes one markup buffer into plain text.
///
/// Text nodes contribute their character content; block-level elements
/// inject a line break before and after their children so tokenization
/// treats them as paragraph boundaries.
pub(super) fn extract_text(data: &[u8]) -> String {
    let mut out = String::new();
    walk(&parse_fragment(data), &mut out);
    out
}

fn parse_fragment(data: &[u8]) -> Vec<Node> {
    let mut reader = permissive_reader(data);
    let mut open: Vec<(String, Vec<Node>)> = Vec::new();
    let mut roots = Vec::new();

    while let Some(event) = reader.next_event() {
        match event {
            Event::Start(el) => {
                open.push((lowercase_tag(el.local_name().as_ref()), Vec::new()));
            }
            Event::Empty(el) => attach(
                &mut open,
                &mut roots,
                Node::Element {
                    tag: lowercase_tag(el.local_name().as_ref()),
                    children: Vec::new(),
                },
            ),
            Event::End(el) => {
                let tag = lowercase_tag(el.local_name().as_ref());

                // Close up to the nearest matching open element;
                // stray end tags are ignored entirely.
                if let Some(position) = open.iter().rposition(|(name, _)| *name == tag) {
                    while open.len() > position {
                        let (tag, children) = open.pop().unwrap_or_default();
                        attach(&mut open, &mut roots, Node::Element { tag, children });
                    }
                }
            }
            Event::Text(text) => {
                let content = text
                    .decode()
                    .unwrap_or_else(|_| String::from_utf8_lossy(text.as_ref()));

                if !content.is_empty() {
                    attach(&mut open, &mut roots, Node::Text(content.into_owned()));
                }
            }
            Event::CData(cdata) => attach(
                &mut open,
                &mut roots,
                Node::Text(String::from_utf8_lossy(cdata.as_ref()).into_owned()),
            ),
            Event::GeneralRef(entity) => {
                if let Some(resolved) = resolve_entity(&String::from_utf8_lossy(entity.as_ref())) {
                    attach(&mut open, &mut roots, Node::Text(resolved.to_string()));
                }
            }
            _ => {}
        }
    }

    // End of input closes every element still open
    while let Some((tag, children)) = open.pop() {
        attach(&mut open, &mut roots, Node::Element { tag, children });
    }
    roots
}

fn attach(open: &mut Vec<(String, Vec<Node>)>, roots: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some((_, children)) => children.push(node),
        None => roots.push(node),
    }
}

fn walk(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element { tag, children } => {
                if SKIPPED_TAGS.contains(&tag.as_str()) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&tag.as_str());

                if block {
                    out.push('\n');
                }
                walk(children, out);
                if block {
                    out.push('\n');
                }
            }
        }
    }
}

fn lowercase_tag(local_name: &[u8]) -> String {
    String::from_utf8_lossy(local_name).to_ascii_lowercase()
}
