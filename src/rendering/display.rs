//! # Display Management
//!
//! 2D drawing of a [`Snapshot`] using macroquad. The display never touches
//! the simulation; it only reads the frame it is handed.

use crate::game::{GameStatus, Position, Snapshot, TileType};
use macroquad::prelude::*;

/// Macroquad display manager for the game.
///
/// Draws the grid, entities, the swing marker, a one-line HUD and the
/// start / game-over overlays, plus a short message log.
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl MacroquadDisplay {
    /// Creates a display that draws tiles `tile_size` pixels wide.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::MacroquadDisplay;
    ///
    /// let display = MacroquadDisplay::new(32.0);
    /// assert!(display.messages.is_empty());
    /// ```
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            messages: Vec::new(),
            max_messages: 50,
        }
    }

    /// Window size in pixels needed to show a `columns` x `rows` grid.
    pub fn window_size(tile_size: u32, columns: u32, rows: u32) -> (i32, i32) {
        ((tile_size * columns) as i32, (tile_size * rows) as i32)
    }

    /// Renders the complete frame.
    pub fn render(&self, snapshot: &Snapshot) {
        clear_background(BLACK);

        self.render_grid(snapshot);
        self.render_swing(snapshot);
        self.render_entities(snapshot);
        self.render_hud(snapshot);
        self.render_messages();

        match snapshot.status {
            GameStatus::Start => self.render_overlay(
                "DUNJY KRAWL",
                &format!("Difficulty {} - press Enter to begin", snapshot.difficulty),
            ),
            GameStatus::GameOver => self.render_overlay(
                "GAME OVER",
                &format!("Fell on level {} - press R to restart", snapshot.level),
            ),
            GameStatus::Running => {}
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    fn render_grid(&self, snapshot: &Snapshot) {
        for (y, row) in snapshot.grid.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let (px, py) = self.to_pixels(Position::new(x as i32, y as i32));
                draw_rectangle(px, py, self.tile_size, self.tile_size, tile_color(*tile));
            }
        }
    }

    fn render_swing(&self, snapshot: &Snapshot) {
        if let Some(swing) = &snapshot.swing {
            let (px, py) = self.to_pixels(swing.target);
            draw_rectangle_lines(px, py, self.tile_size, self.tile_size, 3.0, ORANGE);
        }
    }

    fn render_entities(&self, snapshot: &Snapshot) {
        let half = self.tile_size / 2.0;

        for enemy in &snapshot.enemies {
            let (px, py) = self.to_pixels(enemy.position);
            draw_rectangle(
                px + 4.0,
                py + 4.0,
                self.tile_size - 8.0,
                self.tile_size - 8.0,
                RED,
            );
        }

        for projectile in &snapshot.projectiles {
            let (px, py) = self.to_pixels(projectile.position);
            draw_circle(px + half, py + half, self.tile_size / 6.0, YELLOW);
        }

        let (px, py) = self.to_pixels(snapshot.player.position);
        draw_circle(px + half, py + half, half - 3.0, SKYBLUE);

        // Facing notch
        let delta = snapshot.player.facing.to_delta();
        draw_line(
            px + half,
            py + half,
            px + half + delta.x as f32 * half,
            py + half + delta.y as f32 * half,
            2.0,
            WHITE,
        );
    }

    fn render_hud(&self, snapshot: &Snapshot) {
        let hud = format!(
            "HP {}  Ammo {}  Level {}  Difficulty {}",
            snapshot.player.hp, snapshot.ammo, snapshot.level, snapshot.difficulty
        );
        draw_rectangle(0.0, 0.0, screen_width(), 24.0, Color::new(0.0, 0.0, 0.0, 0.6));
        draw_text(&hud, 8.0, 17.0, 20.0, WHITE);
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let message_count = 3;
        let line_height = 18.0;
        let message_area_y = screen_height() - message_count as f32 * line_height;

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, LIGHTGRAY);
        }
    }

    fn render_overlay(&self, title: &str, subtitle: &str) {
        let (width, height) = (screen_width(), screen_height());
        draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.7));

        let title_size = measure_text(title, None, 48, 1.0);
        draw_text(
            title,
            (width - title_size.width) / 2.0,
            height / 2.0 - 10.0,
            48.0,
            WHITE,
        );

        let subtitle_size = measure_text(subtitle, None, 22, 1.0);
        draw_text(
            subtitle,
            (width - subtitle_size.width) / 2.0,
            height / 2.0 + 30.0,
            22.0,
            GRAY,
        );
    }

    fn to_pixels(&self, pos: Position) -> (f32, f32) {
        (pos.x as f32 * self.tile_size, pos.y as f32 * self.tile_size)
    }
}

/// Fill color for a tile type.
fn tile_color(tile: TileType) -> Color {
    match tile {
        TileType::Wall => Color::new(0.25, 0.22, 0.2, 1.0),
        TileType::Floor => Color::new(0.08, 0.08, 0.1, 1.0),
    }
}
