use macroquad::input::KeyCode;

use crate::game::{Direction, Game};

/// Arrow keys steer; every other key leaves the direction alone.
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

impl Game {
    /// Apply one key press. Returns true when the press restarted a finished round.
    ///
    /// The reversal lock compares against the direction the snake is moving in
    /// right now, so two quick presses inside one tick can still turn it around.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if let Some(dir) = direction_for_key(key) {
            if dir != self.snake.direction.opposite() {
                self.snake.direction = dir;
            }
        }

        if self.is_over() {
            self.restart();
            return true;
        }
        false
    }
}
