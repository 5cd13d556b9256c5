//! End-to-end tests over in-memory archives: container resolution,
//! text extraction, segmentation, and playback.

use lector::errors::{ArchiveError, EbookError, FormatError};
use lector::{Document, Player, segment};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn build_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (path, contents) in files {
        writer.start_file(*path, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// A two-part book: `ch1.xhtml` and `ch2.xhtml` under `OEBPS/`.
fn two_part_book(part_one: &str, part_two: &str) -> Vec<u8> {
    let opf = r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Voyage</dc:title>
    <dc:creator>A. Mariner</dc:creator>
  </metadata>
  <manifest>
    <item id="c1" href="ch1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="ch2.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="c1"/>
    <itemref idref="c2"/>
  </spine>
</package>"#;

    build_archive(&[
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/ch1.xhtml", part_one),
        ("OEBPS/ch2.xhtml", part_two),
    ])
}

#[test]
fn end_to_end_two_spine_items() {
    let bytes = two_part_book("<p>One two.</p>", "<p>Three four!</p>");
    let document = Document::from_bytes(&bytes).unwrap();

    let result = segment(document.text());
    let words: Vec<&str> = result.tokens.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(vec!["One", "two.", "Three", "four!"], words);
    // The parts end up in separate paragraphs
    assert_ne!(
        result.tokens[1].paragraph_index,
        result.tokens[2].paragraph_index
    );
}

#[test]
fn metadata_is_parsed() {
    let bytes = two_part_book("<p>a</p>", "<p>b</p>");
    let document = Document::from_bytes(&bytes).unwrap();

    assert_eq!("Voyage", document.metadata().title());
    assert_eq!("A. Mariner", document.metadata().author());
    assert_eq!(bytes.len() as u64, document.metadata().byte_size());
}

#[test]
fn missing_metadata_falls_back_to_defaults() {
    let opf = r#"<package>
  <metadata/>
  <manifest><item id="c1" href="ch1.xhtml"/></manifest>
  <spine><itemref idref="c1"/></spine>
</package>"#;
    let bytes = build_archive(&[
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/ch1.xhtml", "<p>text</p>"),
    ]);

    let document = Document::from_bytes(&bytes).unwrap();

    assert_eq!("Unknown Title", document.metadata().title());
    assert_eq!("Unknown Author", document.metadata().author());
}

#[test]
fn non_archive_input_is_rejected_before_parsing() {
    let result = Document::from_bytes(b"%PDF-1.4 definitely not a zip");

    assert!(matches!(
        result,
        Err(EbookError::Format(FormatError::InvalidFileType))
    ));
}

#[test]
fn corrupt_archive_fails_the_parse() {
    // Correct signature, unindexable contents
    let result = Document::from_bytes(b"PK\x03\x04garbage garbage garbage");

    assert!(matches!(
        result,
        Err(EbookError::Archive(ArchiveError::UnreadableArchive { .. }))
    ));
}

#[test]
fn missing_container_pointer_is_fatal() {
    let bytes = build_archive(&[("mimetype", "application/epub+zip")]);

    assert!(matches!(
        Document::from_bytes(&bytes),
        Err(EbookError::Format(FormatError::MissingContainer))
    ));
}

#[test]
fn rootfile_without_full_path_is_fatal() {
    let bytes = build_archive(&[(
        "META-INF/container.xml",
        "<container><rootfiles><rootfile/></rootfiles></container>",
    )]);

    assert!(matches!(
        Document::from_bytes(&bytes),
        Err(EbookError::Format(FormatError::MissingPackagePath))
    ));
}

#[test]
fn referenced_package_must_exist() {
    let bytes = build_archive(&[("META-INF/container.xml", CONTAINER_XML)]);

    assert!(matches!(
        Document::from_bytes(&bytes),
        Err(EbookError::Format(FormatError::PackageNotFound { .. }))
    ));
}

#[test]
fn unresolved_spine_entries_are_skipped() {
    let opf = r#"<package>
  <metadata/>
  <manifest>
    <item id="c1" href="ch1.xhtml"/>
    <item id="gone" href="missing.xhtml"/>
  </manifest>
  <spine>
    <itemref idref="phantom"/>
    <itemref idref="gone"/>
    <itemref idref="c1"/>
  </spine>
</package>"#;
    let bytes = build_archive(&[
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/ch1.xhtml", "<p>Still here.</p>"),
    ]);

    let document = Document::from_bytes(&bytes).unwrap();

    assert_eq!("Still here.", document.text().trim());
}

#[test]
fn all_spine_entries_unresolved_yields_empty_text() {
    let opf = r#"<package>
  <metadata/>
  <manifest><item id="c1" href="missing.xhtml"/></manifest>
  <spine><itemref idref="c1"/></spine>
</package>"#;
    let bytes = build_archive(&[
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
    ]);

    let document = Document::from_bytes(&bytes).unwrap();
    let result = segment(document.text());

    assert!(document.text().is_empty());
    assert!(result.tokens.is_empty());
    assert!(result.chapters.is_empty());
}

#[test]
fn reading_order_follows_the_spine_not_the_manifest() {
    let opf = r#"<package>
  <metadata/>
  <manifest>
    <item id="a" href="a.xhtml"/>
    <item id="b" href="b.xhtml"/>
  </manifest>
  <spine>
    <itemref idref="b"/>
    <itemref idref="a"/>
  </spine>
</package>"#;
    let bytes = build_archive(&[
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/a.xhtml", "<p>second</p>"),
        ("OEBPS/b.xhtml", "<p>first</p>"),
    ]);

    let document = Document::from_bytes(&bytes).unwrap();
    let words: Vec<String> = segment(document.text())
        .tokens
        .into_iter()
        .map(|t| t.text)
        .collect();

    assert_eq!(vec!["first", "second"], words);
}

#[test]
fn hrefs_resolve_against_the_package_directory() {
    let opf = r#"<package>
  <metadata/>
  <manifest>
    <item id="c1" href="text/ch%201.xhtml"/>
    <item id="c2" href="../shared/notes.xhtml"/>
  </manifest>
  <spine>
    <itemref idref="c1"/>
    <itemref idref="c2"/>
  </spine>
</package>"#;
    let bytes = build_archive(&[
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/text/ch 1.xhtml", "<p>body</p>"),
        ("shared/notes.xhtml", "<p>notes</p>"),
    ]);

    let document = Document::from_bytes(&bytes).unwrap();
    let words: Vec<String> = segment(document.text())
        .tokens
        .into_iter()
        .map(|t| t.text)
        .collect();

    assert_eq!(vec!["body", "notes"], words);
}

#[test]
fn chapters_detected_through_the_full_pipeline() {
    let bytes = two_part_book(
        "<h1>Chapter 1</h1><p>Hello world.</p>",
        "<h1>Chapter 2</h1><p>Goodbye now.</p>",
    );
    let document = Document::from_bytes(&bytes).unwrap();
    let result = segment(document.text());

    assert_eq!(2, result.chapters.len());
    assert_eq!("Chapter 1", result.chapters[0].title);
    assert_eq!("Chapter 2", result.chapters[1].title);
    assert_eq!(
        result.chapters[0].end_index + 1,
        result.chapters[1].start_index
    );
}

#[test]
fn segmentation_round_trip_is_stable() {
    let bytes = two_part_book(
        "<h1>Chapter 1</h1><p>One two three.</p>",
        "<p>Four five six.</p>",
    );
    let document = Document::from_bytes(&bytes).unwrap();

    let first = segment(document.text());
    let second = segment(document.text());

    assert_eq!(first.tokens, second.tokens);
    assert_eq!(first.chapters, second.chapters);
}

#[test]
fn playback_over_a_parsed_document() {
    let bytes = two_part_book(
        "<h1>Chapter 1</h1><p>Hello there.</p>",
        "<h1>Chapter 2</h1><p>Goodbye.</p>",
    );
    let document = Document::from_bytes(&bytes).unwrap();
    let mut player = Player::new(segment(document.text()));

    player.play(0);
    let state = player.tick(200);
    assert_eq!(1, state.current_index);
    assert_eq!("1", player.current_token().unwrap().text);

    // Jump into the second chapter and confirm the cursor lands on it
    let state = player.jump_to_chapter(1);
    assert!(!state.is_playing);
    assert_eq!("Chapter", player.current_token().unwrap().text);
    assert_eq!(1, player.current_token().unwrap().chapter_index);
}
