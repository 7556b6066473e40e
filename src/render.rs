use macroquad::color::{hsl_to_rgb, Color, BLACK, WHITE};
use macroquad::math::{Rect, Vec2};
use macroquad::shapes::{draw_circle, draw_rectangle};
use macroquad::text::draw_text;

use crate::game::{Cell, Game};

pub const SCORE_PANEL_HEIGHT: f32 = 60.0;

pub const FIELD_BG: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const PANEL_BG: Color = Color::new(0.94, 0.94, 0.94, 1.0);

const HEAD: Color = Color::new(0.298, 0.686, 0.314, 1.0); // #4CAF50
const FOOD: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const CORNER_RADIUS: f32 = 10.0;
const EYE_RADIUS: f32 = 5.0;

/// A 2D drawing target with its own coordinate space starting at (0, 0).
pub trait Surface {
    fn bounds(&self) -> Rect;
    fn clear(&mut self, area: Rect);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
}

/// A rectangular region of the macroquad window.
pub struct MacroquadSurface {
    origin: Vec2,
    size: Vec2,
    background: Color,
}

impl MacroquadSurface {
    pub fn new(origin: Vec2, size: Vec2, background: Color) -> Self {
        Self { origin, size, background }
    }
}

impl Surface for MacroquadSurface {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.x, self.size.y)
    }

    fn clear(&mut self, area: Rect) {
        draw_rectangle(self.origin.x + area.x, self.origin.y + area.y, area.w, area.h, self.background);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        // Cells off the field (a crashed head) are clipped entirely
        if !self.bounds().overlaps(&rect) {
            return;
        }
        let r = radius.min(rect.w * 0.5).min(rect.h * 0.5);
        let x = self.origin.x + rect.x;
        let y = self.origin.y + rect.y;
        draw_rectangle(x + r, y, rect.w - 2.0 * r, rect.h, color);
        draw_rectangle(x, y + r, rect.w, rect.h - 2.0 * r, color);
        for (cx, cy) in [
            (x + r, y + r),
            (x + rect.w - r, y + r),
            (x + r, y + rect.h - r),
            (x + rect.w - r, y + rect.h - r),
        ] {
            draw_circle(cx, cy, r, color);
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        draw_text(text, self.origin.x + x, self.origin.y + y, font_size, color);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        if !self.bounds().contains(Vec2::new(x, y)) {
            return;
        }
        draw_circle(self.origin.x + x, self.origin.y + y, radius, color);
    }
}

/// Body colour for segment `index` (counted from the tail): hue turns 30° per segment.
pub fn segment_color(index: usize) -> Color {
    let hue = ((index * 30) % 360) as f32 / 360.0;
    hsl_to_rgb(hue, 0.7, 0.5)
}

fn cell_rect(c: Cell, size: f32) -> Rect {
    Rect::new(c.x as f32, c.y as f32, size, size)
}

pub fn draw_field(game: &Game, surface: &mut impl Surface) {
    let size = game.field().cell_size as f32;
    let area = surface.bounds();
    surface.clear(area);

    let head_index = game.snake.len() - 1;
    for (i, c) in game.snake.cells().enumerate() {
        let color = if i == head_index { HEAD } else { segment_color(i) };
        surface.fill_rounded_rect(cell_rect(*c, size), CORNER_RADIUS, color);
    }
    draw_eyes(game, surface);

    surface.fill_rounded_rect(cell_rect(game.food, size), CORNER_RADIUS, FOOD);

    if game.is_over() {
        surface.fill_text("Game Over", 200.0, 180.0, 30.0, WHITE);
        surface.fill_text(&format!("Final Score: {}", game.score), 200.0, 230.0, 30.0, WHITE);
        surface.fill_text("Press any key to restart", 200.0, 280.0, 30.0, WHITE);
    }
}

fn draw_eyes(game: &Game, surface: &mut impl Surface) {
    let head = game.snake.head();
    let (x, y) = (head.x as f32, head.y as f32);
    // Eyes sit across the direction of travel
    let eyes = if game.snake.direction.is_horizontal() {
        [(x + 10.0, y + 8.0), (x + 10.0, y + 17.0)]
    } else {
        [(x + 8.0, y + 10.0), (x + 17.0, y + 10.0)]
    };
    for (ex, ey) in eyes {
        surface.fill_circle(ex, ey, EYE_RADIUS, WHITE);
    }
}

pub fn draw_scores(game: &Game, surface: &mut impl Surface) {
    let area = surface.bounds();
    surface.clear(area);
    surface.fill_text(&format!("Score: {}", game.score), 10.0, 25.0, 18.0, BLACK);
    surface.fill_text(&format!("High Score: {}", game.high_score), 10.0, 45.0, 18.0, BLACK);
}
