//! Score lines, ship health panels and full-screen messages.

use glam::Vec2;

use crate::compute::Game;
use crate::entities::{BarLayout, Player};
use crate::surface::{Font, Rgb, Surface, TextAnchor};

pub const TITLE: &str = "Boom";
pub const START_PROMPT: &str = "Press [Enter] to start a new game.";

const TOP: f32 = 15.0;
const LINE_HEIGHT: f32 = 25.0;
const MARGIN: f32 = 15.0;
const SHIP_BAR_Y: f32 = 7.0 + LINE_HEIGHT * 2.0;
const PROMPT_OFFSET: f32 = 30.0;

/// `1234567` → `"1,234,567"`.
pub fn with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Where `player`'s health bar sits: player one hugs the left edge, player
/// two the right.
pub fn ship_bar_layout(player: Player, arena: Vec2) -> BarLayout {
    match player {
        Player::One => BarLayout::LeftAnchored { x: MARGIN, y: SHIP_BAR_Y },
        Player::Two => BarLayout::RightAnchored { x: arena.x - MARGIN, y: SHIP_BAR_Y },
    }
}

/// Level, score and record lines down the middle; per-ship labels and
/// scores in the corners.
pub fn draw_scoreboard<S>(surface: &mut dyn Surface, game: &Game<S>) {
    let center_x = game.arena.x / 2.0;
    let lines = [
        format!("Level : {}", with_commas(game.level)),
        format!("Score : {}", with_commas(game.score)),
        format!("High Score : {}", with_commas(game.high_score)),
        format!("Highest Level : {}", with_commas(game.highest_level)),
    ];
    for (row, line) in lines.iter().enumerate() {
        let y = TOP + LINE_HEIGHT * row as f32;
        surface.text(line, TextAnchor::Center(Vec2::new(center_x, y)), Font::Normal, Rgb::SNOW);
    }

    for player in Player::ALL {
        let score = with_commas(game.player_scores[player]);
        let (label, points) = match player {
            Player::One => (
                TextAnchor::Left(Vec2::new(MARGIN, TOP)),
                TextAnchor::Left(Vec2::new(MARGIN, TOP + LINE_HEIGHT)),
            ),
            Player::Two => (
                TextAnchor::Right(Vec2::new(game.arena.x - MARGIN, TOP)),
                TextAnchor::Right(Vec2::new(game.arena.x - MARGIN, TOP + LINE_HEIGHT)),
            ),
        };
        surface.text(player.label(), label, Font::Normal, Rgb::SNOW);
        surface.text(&score, points, Font::Normal, Rgb::SNOW);
    }
}

/// Large centred headline with the start prompt underneath.
pub fn draw_overlay(surface: &mut dyn Surface, headline: &str, arena: Vec2) {
    let center = arena / 2.0;
    surface.text(headline, TextAnchor::Center(center), Font::Large, Rgb::SNOW);
    let prompt_at = Vec2::new(center.x, center.y + PROMPT_OFFSET);
    surface.text(START_PROMPT, TextAnchor::Center(prompt_at), Font::Normal, Rgb::SNOW);
}
