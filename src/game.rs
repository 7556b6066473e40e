use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::config::{FieldConfig, GameConfig, SpeedConfig};
use crate::store::{self, KeyValueStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Grid position in pixels; always a multiple of the cell size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self { Cell { x, y } }

    pub fn offset(self, dir: Direction, cell_size: i32) -> Self {
        match dir {
            Direction::Up => Cell { x: self.x, y: self.y - cell_size },
            Direction::Down => Cell { x: self.x, y: self.y + cell_size },
            Direction::Left => Cell { x: self.x - cell_size, y: self.y },
            Direction::Right => Cell { x: self.x + cell_size, y: self.y },
        }
    }
}

/// Body cells ordered tail (front) to head (back). Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    pub direction: Direction,
    pub speed_ms: u32,
}

impl Snake {
    pub fn new(start: Cell, direction: Direction, speed_ms: u32) -> Self {
        Snake { body: VecDeque::from([start]), direction, speed_ms }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], direction: Direction, speed_ms: u32) -> Self {
        assert!(!cells.is_empty(), "snake needs at least one cell");
        Snake { body: cells.iter().copied().collect(), direction, speed_ms }
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize { self.body.len() }

    /// Cells from tail to head.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// New head, tail kept.
    pub fn grow(&mut self, head: Cell) {
        self.body.push_back(head);
    }

    /// New head, tail dropped.
    pub fn advance(&mut self, head: Cell) {
        self.body.push_back(head);
        self.body.pop_front();
    }

    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().rev().skip(1).any(|c| *c == head)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Called while the game is over; nothing changed.
    Idle,
    Moved,
    Ate,
    Crashed,
}

pub struct Game {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    field: FieldConfig,
    speed: SpeedConfig,
    high_score_key: String,
}

impl Game {
    pub fn new(config: &GameConfig, high_score: u32) -> Self {
        let field = config.field.clone();
        let speed = config.speed.clone();
        Self {
            snake: Snake::new(Cell::ORIGIN, Direction::Right, speed.base_ms),
            food: spawn_food(&field),
            score: 0,
            high_score,
            phase: Phase::Running,
            field,
            speed,
            high_score_key: config.storage.high_score_key.clone(),
        }
    }

    /// Fresh round. The high score carries over.
    pub fn restart(&mut self) {
        self.snake = Snake::new(Cell::ORIGIN, Direction::Right, self.speed.base_ms);
        self.food = spawn_food(&self.field);
        self.score = 0;
        self.phase = Phase::Running;
    }

    pub fn field(&self) -> &FieldConfig { &self.field }

    pub fn is_over(&self) -> bool { self.phase == Phase::GameOver }

    /// Advance the snake by one cell. On the step that ends the round a new
    /// high score is written to `store` straight away.
    pub fn step(&mut self, store: &mut dyn KeyValueStore) -> StepOutcome {
        if self.is_over() {
            return StepOutcome::Idle;
        }

        let new_head = self.snake.head().offset(self.snake.direction, self.field.cell_size);
        let mut outcome = StepOutcome::Moved;

        // Food is not removed from the body: the snake keeps its tail this step
        if new_head == self.food {
            self.snake.grow(new_head);
            self.score += 1;
            self.snake.speed_ms = self.speed.interval_for(self.score);
            self.food = spawn_food(&self.field);
            debug!("ate at {:?}, score {}, interval {}ms", new_head, self.score, self.snake.speed_ms);
            outcome = StepOutcome::Ate;
        } else {
            self.snake.advance(new_head);
        }

        if !self.in_bounds(new_head) || self.snake.collides_with_self() {
            self.phase = Phase::GameOver;
            info!("game over at {:?}, final score {}", new_head, self.score);
            self.finalize_score(store);
            return StepOutcome::Crashed;
        }

        outcome
    }

    fn in_bounds(&self, c: Cell) -> bool {
        c.x >= 0 && c.x < self.field.width && c.y >= 0 && c.y < self.field.height
    }

    fn finalize_score(&mut self, store: &mut dyn KeyValueStore) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        info!("new high score {}", self.high_score);
        if let Err(e) = store::save_high_score(store, &self.high_score_key, self.high_score) {
            warn!("could not persist high score: {e}");
        }
    }
}

/// Uniform over all columns and rows except the last ones. Not checked
/// against the snake body, so food may land underneath it.
pub fn spawn_food(field: &FieldConfig) -> Cell {
    let max_col = (field.cols() - 1).max(1);
    let max_row = (field.rows() - 1).max(1);
    let x = macroquad::rand::gen_range(0, max_col);
    let y = macroquad::rand::gen_range(0, max_row);
    Cell::new(x * field.cell_size, y * field.cell_size)
}
