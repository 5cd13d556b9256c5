//! Href handling for paths inside an archive.
//!
//! Manifest hrefs are percent-encoded, relative to the package document,
//! and may carry fragments or queries that are meaningless when fetching
//! file contents from a zip archive.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Returns the directory portion of `href` (everything before the last `/`).
pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Resolves a relative `href` against `parent_dir`, dropping any fragment
/// or query and collapsing `.`/`..` components.
///
/// The result is always separated by forward slashes, the only separator
/// zip archives accept.
pub(crate) fn resolve(parent_dir: &str, href: &str) -> String {
    let file_part = href
        .find(['?', '#'])
        .map_or(href, |position| &href[..position]);

    let joined = if file_part.starts_with('/') {
        // Already absolute within the archive
        PathBuf::from(file_part)
    } else {
        Path::new(parent_dir).join(file_part)
    };

    // `joined` is UTF-8 as it derives from `&str` input
    normalize(&joined).to_string_lossy().replace('\\', "/")
}

fn normalize(path: &Path) -> PathBuf {
    let mut stack = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                // Never pop past the root
                if stack
                    .last()
                    .is_some_and(|kept| !matches!(kept, Component::RootDir))
                {
                    stack.pop();
                }
            }
            Component::CurDir => {}
            _ => stack.push(component),
        }
    }

    PathBuf::from_iter(stack)
}
