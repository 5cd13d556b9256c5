//! Tokenization and chapter segmentation over extracted text.
//!
//! [`segment`] is a pure function of its input: the same text always
//! yields identical token and chapter sequences, making playback fully
//! restartable from the text alone.

/// One whitespace-delimited display unit with positional and
/// structural metadata. Indices are contiguous and zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The word itself; never empty.
    pub text: String,
    /// Zero-based position in the full sequence.
    pub index: usize,
    /// Whether [`text`](Self::text) ends in `.`, `!`, or `?`.
    pub is_sentence_end: bool,
    /// Index into the chapter list of the chapter owning this token.
    pub chapter_index: usize,
    /// Title of the owning chapter.
    pub chapter_title: String,
    /// Zero-based count of body lines preceding this token's line.
    pub paragraph_index: usize,
}

/// A contiguous, inclusive range of tokens under one detected heading.
#[derive(Clone, Debug, PartialEq)]
pub struct Chapter {
    pub title: String,
    /// First token index belonging to this chapter.
    pub start_index: usize,
    /// Last token index belonging to this chapter, inclusive.
    pub end_index: usize,
    /// Position of the chapter start as a percentage of the whole
    /// sequence, in `[0, 100)`.
    pub progress: f64,
}

/// The segmenter's full output over one document text.
#[derive(Clone, Debug, Default)]
pub struct Segmentation {
    pub tokens: Vec<Token>,
    pub chapters: Vec<Chapter>,
}

/// Title of the implicit chapter covering documents without any
/// detected heading, and any text preceding the first one.
const FALLBACK_CHAPTER: &str = "Beginning";

/// Heading lines longer than this are assumed to be ordinary prose;
/// short numeric or Roman-numeral sentences are the known false
/// positives this bound exists to avoid. A hard constant by contract.
const MAX_HEADING_LEN: usize = 30;

const HEADING_KEYWORDS: [&str; 7] = [
    "Chapter",
    "Part",
    "Section",
    "Prologue",
    "Epilogue",
    "Introduction",
    "Conclusion",
];

/// Splits `text` into word tokens and detects chapter boundaries.
///
/// Lines are trimmed and empty ones discarded; every surviving line is
/// classified as a heading or body line, and every line's words become
/// tokens. A heading line's own tokens belong to the chapter it opens.
/// Zero-length chapters are dropped, so the chapter list is contiguous
/// over the token index space whenever at least one token exists.
pub fn segment(text: &str) -> Segmentation {
    let mut tokens: Vec<Token> = Vec::new();
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut active_title = String::from(FALLBACK_CHAPTER);
    let mut active_start = 0;
    let mut paragraph = 0;

    for raw_line in text.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let heading = is_heading_line(line);

        if heading {
            // Close the active chapter, unless it never received a token
            if tokens.len() > active_start {
                chapters.push(Chapter {
                    title: std::mem::take(&mut active_title),
                    start_index: active_start,
                    end_index: tokens.len() - 1,
                    progress: 0.0,
                });
            }
            active_title = line.to_string();
            active_start = tokens.len();
        }

        // The heading line itself is tokenized into the chapter it opens
        let chapter_index = chapters.len();
        for word in line.split_whitespace() {
            tokens.push(Token {
                text: word.to_string(),
                index: tokens.len(),
                is_sentence_end: word.ends_with(['.', '!', '?']),
                chapter_index,
                chapter_title: active_title.clone(),
                paragraph_index: paragraph,
            });
        }

        if !heading {
            paragraph += 1;
        }
    }

    // The final chapter always closes, even at zero length, so the
    // chapter list is never empty when a token exists.
    if !tokens.is_empty() {
        chapters.push(Chapter {
            title: active_title,
            start_index: active_start,
            end_index: tokens.len() - 1,
            progress: 0.0,
        });
    }

    // Progress is only final once the total count is known
    let total = tokens.len();
    for chapter in &mut chapters {
        chapter.progress = 100.0 * chapter.start_index as f64 / total as f64;
    }

    Segmentation { tokens, chapters }
}

/// Ordered heading heuristic; the first matching rule decides.
///
/// Inherently ambiguous over real-world books (a short numbered
/// sentence can false-positive, an unnumbered heading can
/// false-negative); the rule order and length bound are fixed.
fn is_heading_line(line: &str) -> bool {
    if starts_with_keyword(line) {
        return true;
    }
    if line.chars().count() >= MAX_HEADING_LEN {
        return false;
    }

    let roman_len = line.chars().take_while(|c| "IVXLCDM".contains(*c)).count();
    if roman_len > 0 && nth_is_separator(line, roman_len) {
        return true;
    }

    let digit_len = line.chars().take_while(char::is_ascii_digit).count();
    digit_len > 0 && nth_is_separator(line, digit_len)
}

fn starts_with_keyword(line: &str) -> bool {
    HEADING_KEYWORDS.iter().any(|keyword| {
        line.get(..keyword.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
            && line[keyword.len()..].starts_with(char::is_whitespace)
    })
}

fn nth_is_separator(line: &str, n: usize) -> bool {
    line.chars()
        .nth(n)
        .is_some_and(|c| c.is_whitespace() || matches!(c, '.' | ':' | '-' | ')'))
}
