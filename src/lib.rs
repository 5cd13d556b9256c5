//! # lector
//!
//! A speed-reading engine for EPUB documents, in three stages:
//! - [`Document`]: container/manifest resolution and markup-to-text
//!   extraction over a fully buffered archive.
//! - [`segment`]: tokenization of the extracted text into word
//!   [`Token`]s with [`Chapter`] boundaries detected heuristically.
//! - [`Player`]: a cooperative playback scheduler that advances one
//!   token at a time at punctuation-aware variable intervals and
//!   supports seeking, skipping, and chapter jumps.
//!
//! ## Examples
//! Opening a buffered archive and starting playback:
//! ```no_run
//! # fn main() -> lector::errors::EbookResult<()> {
//! let bytes = std::fs::read("example.epub").unwrap();
//! let document = lector::Document::from_bytes(&bytes)?;
//!
//! println!("{} by {}", document.metadata().title(), document.metadata().author());
//!
//! let mut player = lector::Player::new(lector::segment(document.text()));
//! player.play(0);
//! # Ok(())
//! # }
//! ```
//! Driving the scheduler with a millisecond clock:
//! ```
//! use lector::{Player, segment};
//!
//! let mut player = Player::new(segment("Chapter 1\nHello brave new world."));
//! player.on_progress(|percent| println!("{percent}%"));
//!
//! player.play(0);
//! let state = player.tick(200); // 200ms per token at the default 300 wpm
//!
//! assert_eq!(1, state.current_index);
//! ```

mod ebook;
mod player;
mod segment;
mod util;

pub use self::ebook::{Document, DocumentMetadata};
pub use self::player::{
    DEFAULT_WPM, MAX_WPM, MIN_WPM, PlaybackState, Player, pause_multiplier, progress_percent,
};
pub use self::segment::{Chapter, Segmentation, Token, segment};

pub mod errors {
    pub use super::ebook::errors::{
        ArchiveError, ArchiveResult, EbookError, EbookResult, FormatError,
    };
}
