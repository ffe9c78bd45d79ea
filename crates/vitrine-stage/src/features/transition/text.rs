use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{TransitionKind, TransitionState};
use crate::common::TimerId;

const FALLBACK_GLYPH: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRevealMode {
    /// Characters appear one at a time; the rest is absent.
    Typewriter,
    /// The unrevealed remainder cycles through random glyphs.
    #[default]
    Scramble,
}

/// Interval-driven reveal of a target string, one character per tick.
#[derive(Debug, Clone)]
pub struct TextReveal {
    text: String,
    target: Vec<char>,
    mode: TextRevealMode,
    revealed: usize,
    display: String,
    timer: Option<TimerId>,
    completion_reported: bool,
    pub transition: TransitionState,
}

impl TextReveal {
    pub fn new(text: &str, mode: TextRevealMode) -> Self {
        let kind = match mode {
            TextRevealMode::Typewriter => TransitionKind::TextReveal,
            TextRevealMode::Scramble => TransitionKind::CharacterScramble,
        };
        Self {
            text: text.to_string(),
            target: text.chars().collect(),
            mode,
            revealed: 0,
            display: String::new(),
            timer: None,
            completion_reported: false,
            transition: TransitionState::new(kind),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> TextRevealMode {
        self.mode
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn take_timer(&mut self) -> Option<TimerId> {
        self.timer.take()
    }

    pub fn is_complete(&self) -> bool {
        self.transition.is_complete()
    }

    /// Begins the reveal driven by `timer`. Empty text completes immediately
    /// and needs no timer.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        timer: Option<TimerId>,
        now_ms: u64,
        rng: &mut R,
        alphabet: &[char],
    ) {
        self.transition.start(now_ms);
        self.revealed = 0;
        self.completion_reported = false;
        if self.target.is_empty() {
            self.transition.complete();
            self.display.clear();
            self.timer = None;
            return;
        }
        self.timer = timer;
        self.render(rng, alphabet);
    }

    /// Reveals one more character. Returns true exactly once, on the tick
    /// that completes the text.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, alphabet: &[char]) -> bool {
        if !self.transition.is_running() {
            return false;
        }
        self.revealed = (self.revealed + 1).min(self.target.len());
        self.render(rng, alphabet);
        if self.revealed < self.target.len() {
            return false;
        }
        self.transition.complete();
        self.take_completion()
    }

    /// Consumes the one-time completion signal.
    pub fn take_completion(&mut self) -> bool {
        if !self.is_complete() || self.completion_reported {
            return false;
        }
        self.completion_reported = true;
        true
    }

    fn render<R: Rng + ?Sized>(&mut self, rng: &mut R, alphabet: &[char]) {
        self.display.clear();
        self.display.extend(&self.target[..self.revealed]);
        if self.mode == TextRevealMode::Typewriter {
            return;
        }
        for ch in &self.target[self.revealed..] {
            let glyph = if ch.is_whitespace() {
                *ch
            } else if alphabet.is_empty() {
                FALLBACK_GLYPH
            } else {
                alphabet[rng.random_range(0..alphabet.len())]
            };
            self.display.push(glyph);
        }
    }
}
