//! Scoreboard state and layout.
//!
//! The 256x32 display shows a `HH:MM` clock on the left, an optional logo in the middle and
//! two lines (home and away) of team name plus score on the right.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::{
    rasterizer::{self, draw_text},
    Bitmap, GlyphLookup, PixelBuffer,
};

/// Letters the scoreboard font has no glyphs for.
pub const FORBIDDEN_CHARS: [char; 3] = ['W', 'Y', 'K'];

pub const MAX_SCORE: u8 = 9;

/// Returns the forbidden characters of `text` (upper-cased), in order of appearance.
pub fn invalid_chars(text: &str) -> Vec<char> {
    text.to_uppercase().chars().filter(|c| FORBIDDEN_CHARS.contains(c)).collect()
}

/// Upper-cases `text` and drops forbidden characters.
pub fn sanitize_team_name(text: &str) -> String {
    text.to_uppercase().chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect()
}

pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, MAX_SCORE as i64) as u8
}

pub fn format_clock<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardLayout {
    pub display_width: usize,
    pub display_height: usize,
    pub clock_x: i32,
    pub clock_y: i32,
    pub clock_area_width: i32,
    pub clock_area_height: i32,
    pub logo_x: i32,
    pub logo_y: i32,
    pub team_x: i32,
    pub home_row: i32,
    pub away_row: i32,
    /// Distance of the score from the right edge of the display.
    pub score_margin: i32,
}

impl Default for ScoreboardLayout {
    fn default() -> Self {
        Self {
            display_width: 256,
            display_height: 32,
            clock_x: 10,
            clock_y: 12,
            clock_area_width: 72,
            clock_area_height: 7,
            logo_x: 70,
            logo_y: 6,
            team_x: 175,
            home_row: 5,
            away_row: 20,
            score_margin: 10,
        }
    }
}

impl ScoreboardLayout {
    pub fn score_x(&self) -> i32 {
        self.display_width as i32 - self.score_margin
    }

    pub fn create_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(self.display_width, self.display_height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    home_team: String,
    home_score: Option<u8>,
    away_team: String,
    away_score: Option<u8>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    pub fn home_score(&self) -> Option<u8> {
        self.home_score
    }

    pub fn away_score(&self) -> Option<u8> {
        self.away_score
    }

    /// Stores the sanitized name and returns the characters that were rejected.
    pub fn set_home_team(&mut self, name: &str) -> Vec<char> {
        self.home_team = sanitize_team_name(name);
        invalid_chars(name)
    }

    /// Stores the sanitized name and returns the characters that were rejected.
    pub fn set_away_team(&mut self, name: &str) -> Vec<char> {
        self.away_team = sanitize_team_name(name);
        invalid_chars(name)
    }

    pub fn set_home_score(&mut self, score: Option<i64>) {
        self.home_score = score.map(clamp_score);
    }

    pub fn set_away_score(&mut self, score: Option<i64>) {
        self.away_score = score.map(clamp_score);
    }

    /// Redraws the whole display.
    pub fn render<L: GlyphLookup + ?Sized>(&self, buffer: &mut PixelBuffer, layout: &ScoreboardLayout, lookup: &L, logo: Option<&Bitmap>, clock: &str) {
        buffer.clear();

        draw_text(buffer, clock, layout.clock_x, layout.clock_y, lookup);

        if let Some(logo) = logo {
            rasterizer::draw_image(buffer, logo, layout.logo_x, layout.logo_y);
        }

        let lines = [
            (&self.home_team, self.home_score, layout.home_row),
            (&self.away_team, self.away_score, layout.away_row),
        ];
        for (team, score, row) in lines {
            if !team.is_empty() {
                draw_text(buffer, team, layout.team_x, row, lookup);
            }
            if let Some(score) = score {
                draw_text(buffer, &score.to_string(), layout.score_x(), row, lookup);
            }
        }
    }

    /// Request body of the backend's `/config` endpoint.
    pub fn config_payload(&self, image: Option<String>) -> ScoreboardConfig {
        ScoreboardConfig {
            home_team: self.home_team.clone(),
            home_score: self.home_score,
            away_team: self.away_team.clone(),
            away_score: self.away_score,
            image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardConfig {
    pub home_team: String,
    pub home_score: Option<u8>,
    pub away_team: String,
    pub away_score: Option<u8>,
    pub image: Option<String>,
}

/// Redraws only the clock area, and only when the displayed time changed.
#[derive(Debug, Default)]
pub struct ClockUpdater {
    last: Option<String>,
}

impl ClockUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a clock text drawn by a full render.
    pub fn remember(&mut self, clock: &str) {
        self.last = Some(clock.to_string());
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Returns `true` if the buffer was touched.
    pub fn update<L: GlyphLookup + ?Sized>(&mut self, buffer: &mut PixelBuffer, layout: &ScoreboardLayout, lookup: &L, clock: &str) -> bool {
        if self.last.as_deref() == Some(clock) {
            return false;
        }
        rasterizer::clear_area(buffer, layout.clock_x, layout.clock_y, layout.clock_area_width, layout.clock_area_height);
        draw_text(buffer, clock, layout.clock_x, layout.clock_y, lookup);
        self.remember(clock);
        true
    }
}
