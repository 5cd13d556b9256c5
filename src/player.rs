//! Variable-speed, single-token playback over a segmented document.
//!
//! The scheduler is single-threaded and cooperative: the host calls
//! [`Player::tick`] with a monotonic millisecond clock, and at most one
//! advancement deadline is armed at a time. Every operation that
//! repositions the cursor cancels that deadline before moving, so a
//! stale advancement can never overwrite a fresh seek.

use crate::segment::{Chapter, Segmentation, Token};
use log::{debug, warn};

/// Slowest supported playback speed, in words per minute.
pub const MIN_WPM: u32 = 100;
/// Fastest supported playback speed, in words per minute.
pub const MAX_WPM: u32 = 1000;
/// Initial playback speed of a newly created [`Player`].
pub const DEFAULT_WPM: u32 = 300;

/// A snapshot of the scheduler's mutable state.
///
/// Mutated exclusively through [`Player`] operations; `current_index`
/// ranges over `[0, token_count]`, where `token_count` means the end
/// of the sequence has been reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    pub words_per_minute: u32,
}

/// Drives a cursor through a token sequence on a punctuation-aware
/// variable timer, with play/pause/seek/skip/restart and chapter jumps.
///
/// The token and chapter collections are owned and never mutated; only
/// the cursor into them moves. Dropping the player drops its pending
/// deadline with it, so no advancement can outlive the state it mutates.
pub struct Player {
    tokens: Vec<Token>,
    chapters: Vec<Chapter>,
    state: PlaybackState,
    /// Deadline of the single pending advancement, if armed.
    deadline_ms: Option<u64>,
    observer: Option<Box<dyn FnMut(u8)>>,
}

impl Player {
    pub fn new(segmentation: Segmentation) -> Self {
        Self {
            tokens: segmentation.tokens,
            chapters: segmentation.chapters,
            state: PlaybackState {
                current_index: 0,
                is_playing: false,
                words_per_minute: DEFAULT_WPM,
            },
            deadline_ms: None,
            observer: None,
        }
    }

    /// Registers the progress observer, invoked with the rounded
    /// percentage on every cursor change from any operation.
    pub fn on_progress(&mut self, observer: impl FnMut(u8) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// The token under the cursor, or [`None`] past the end.
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.state.current_index)
    }

    /// Rounded progress percentage of the cursor, `0` when empty.
    pub fn progress(&self) -> u8 {
        progress_percent(self.state.current_index, self.tokens.len())
    }

    /// Starts playback by arming the current token's delay.
    ///
    /// A no-op while already playing, and at the end of the sequence,
    /// where the caller must [`restart`](Self::restart) first.
    pub fn play(&mut self, now_ms: u64) -> PlaybackState {
        if self.state.is_playing {
            return self.state;
        }
        if self.state.current_index >= self.tokens.len() {
            debug!("play rejected at end of sequence");
            return self.state;
        }
        self.state.is_playing = true;
        self.deadline_ms = Some(now_ms + self.current_delay_ms());
        self.state
    }

    /// Stops playback, keeping the cursor. Idempotent.
    pub fn pause(&mut self) -> PlaybackState {
        self.interrupt();
        self.state
    }

    /// Advances the cursor when the armed deadline has elapsed.
    ///
    /// Reaching the end of the sequence is a terminal pause, not an
    /// error: the machine transitions back to idle on its own.
    pub fn tick(&mut self, now_ms: u64) -> PlaybackState {
        let due = self
            .state
            .is_playing
            .then_some(self.deadline_ms)
            .flatten()
            .is_some_and(|deadline| now_ms >= deadline);

        if due {
            self.move_cursor(self.state.current_index + 1);
            if self.state.current_index >= self.tokens.len() {
                self.interrupt();
            } else {
                self.deadline_ms = Some(now_ms + self.current_delay_ms());
            }
        }
        self.state
    }

    /// Cancels playback and moves the cursor to `index`,
    /// clamped to the last token.
    pub fn seek_to_index(&mut self, index: usize) -> PlaybackState {
        self.interrupt();
        self.move_cursor(index.min(self.tokens.len().saturating_sub(1)));
        self.state
    }

    /// Cancels playback and maps `percent` in `[0, 100]` onto the
    /// token space; `100` lands on the end of the sequence.
    pub fn seek_to_percent(&mut self, percent: f64) -> PlaybackState {
        let ratio = percent.clamp(0.0, 100.0) / 100.0;

        self.interrupt();
        self.move_cursor((ratio * self.tokens.len() as f64).floor() as usize);
        self.state
    }

    /// Cancels playback and moves the cursor by `delta` tokens,
    /// clamped to the sequence bounds.
    pub fn skip(&mut self, delta: i64) -> PlaybackState {
        let last = self.tokens.len().saturating_sub(1) as i64;
        let target = (self.state.current_index as i64 + delta).clamp(0, last);

        self.interrupt();
        self.move_cursor(target as usize);
        self.state
    }

    /// Cancels playback and rewinds to the first token.
    pub fn restart(&mut self) -> PlaybackState {
        self.interrupt();
        self.move_cursor(0);
        self.state
    }

    /// Cancels playback and moves the cursor to the chapter's first
    /// token. An invalid chapter index is reported, never fatal.
    pub fn jump_to_chapter(&mut self, chapter_index: usize) -> PlaybackState {
        let Some(chapter) = self.chapters.get(chapter_index) else {
            warn!("chapter jump to invalid index {chapter_index} ignored");
            return self.state;
        };
        let start = chapter.start_index;

        self.interrupt();
        self.move_cursor(start);
        self.state
    }

    /// Clamps `wpm` into `[MIN_WPM, MAX_WPM]` and applies it.
    ///
    /// An already-armed deadline is not recomputed; the new speed takes
    /// effect on the next advancement.
    pub fn set_speed(&mut self, wpm: u32) -> PlaybackState {
        self.state.words_per_minute = wpm.clamp(MIN_WPM, MAX_WPM);
        self.state
    }

    /// Delay before the cursor leaves the current token.
    fn current_delay_ms(&self) -> u64 {
        let base = 60_000.0 / f64::from(self.state.words_per_minute);
        let multiplier = self
            .current_token()
            .map_or(1.0, |token| pause_multiplier(&token.text));

        (base * multiplier) as u64
    }

    /// Transition out of Running; always cancels the pending deadline.
    fn interrupt(&mut self) {
        self.deadline_ms = None;
        self.state.is_playing = false;
    }

    fn move_cursor(&mut self, index: usize) {
        if self.state.current_index == index {
            return;
        }
        self.state.current_index = index;

        let percent = self.progress();
        if let Some(observer) = &mut self.observer {
            observer(percent);
        }
    }
}

/// Scalar applied to the base per-token interval, slowing playback at
/// clause and sentence boundaries. Pure in the token text.
pub fn pause_multiplier(token_text: &str) -> f64 {
    if token_text.ends_with(['.', '!', '?']) {
        2.0
    } else if token_text.ends_with([',', ':', ';']) {
        1.5
    } else if token_text.contains(['-', '\u{2013}', '\u{2014}', '(', ')']) {
        1.2
    } else {
        1.0
    }
}

/// Rounded percentage of `index` over `total`; `0` for an empty
/// sequence regardless of `index`.
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        0
    } else {
        (100.0 * index as f64 / total as f64).round() as u8
    }
}
