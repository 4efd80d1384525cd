//! Calculator display state driven by keypad and keyboard events.
//!
//! # Responsibility
//! - Map key events onto the single display buffer.
//! - Derive transient visual state (key highlight, font size, theme).
//!
//! # Invariants
//! - A failed evaluation shows `Error`; the next key starts from empty.
//! - A key highlight expires `KEY_HIGHLIGHT_DURATION` after the key press.
//! - Time never advances implicitly; callers pass `Instant`s in.

use super::expr::{evaluate, format_number};
use log::debug;
use std::time::{Duration, Instant};

/// Text shown after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";
pub const KEY_HIGHLIGHT_DURATION: Duration = Duration::from_millis(150);

const DISPLAY_FIT_CHARS: usize = 10;
const DEFAULT_FONT_SIZE_PX: f32 = 32.0;
const MIN_FONT_SIZE_PX: f32 = 20.0;
const APPEND_KEYS: &str = "0123456789/*-+.%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalcKey {
    /// Digit, operator or decimal point appended to the display.
    Append(char),
    Evaluate,
    Backspace,
    Clear,
}

impl CalcKey {
    /// Maps a keyboard key name (`"7"`, `"Enter"`, `"Escape"`, ...).
    ///
    /// Returns `None` for keys the calculator ignores.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "=" | "Enter" => Some(Self::Evaluate),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if APPEND_KEYS.contains(ch) => Some(Self::Append(ch)),
                    _ => None,
                }
            }
        }
    }

    /// Label of the on-screen button this key lights up.
    pub fn button_label(self) -> String {
        match self {
            Self::Append(ch) => ch.to_string(),
            Self::Evaluate => "=".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Clear => "Escape".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyHighlight {
    key: CalcKey,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Calculator {
    display: String,
    errored: bool,
    theme: Theme,
    highlight: Option<KeyHighlight>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.errored
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Applies an on-screen button press.
    pub fn press(&mut self, key: CalcKey) {
        if self.errored {
            self.display.clear();
            self.errored = false;
        }

        match key {
            CalcKey::Append(ch) => self.display.push(ch),
            CalcKey::Backspace => {
                self.display.pop();
            }
            CalcKey::Clear => self.display.clear(),
            CalcKey::Evaluate => self.evaluate_display(),
        }
    }

    /// Applies a physical key press and lights up the matching button.
    ///
    /// Returns `false` for keys the calculator ignores.
    pub fn key_down(&mut self, name: &str, now: Instant) -> bool {
        let Some(key) = CalcKey::from_key_name(name) else {
            return false;
        };
        self.press(key);
        self.highlight = Some(KeyHighlight {
            key,
            expires_at: now + KEY_HIGHLIGHT_DURATION,
        });
        true
    }

    /// Button highlighted at `now`, if its highlight has not expired.
    pub fn highlighted_key(&self, now: Instant) -> Option<CalcKey> {
        self.highlight
            .filter(|highlight| now < highlight.expires_at)
            .map(|highlight| highlight.key)
    }

    /// Display font size shrinking once the text outgrows the display.
    pub fn font_size_px(&self) -> f32 {
        let overflow = self.display.chars().count() as f32 - DISPLAY_FIT_CHARS as f32;
        let scale = DEFAULT_FONT_SIZE_PX / DISPLAY_FIT_CHARS as f32;
        (DEFAULT_FONT_SIZE_PX - overflow * scale).clamp(MIN_FONT_SIZE_PX, DEFAULT_FONT_SIZE_PX)
    }

    fn evaluate_display(&mut self) {
        match evaluate(&self.display) {
            Ok(value) => self.display = format_number(value),
            Err(err) => {
                debug!("event=calc_eval module=calculator status=error error={}", err);
                self.display = ERROR_DISPLAY.to_string();
                self.errored = true;
            }
        }
    }
}
