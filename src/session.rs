use tracing::{debug, info};

use crate::error::Result;
use crate::food::FoodSpawner;
use crate::grid::Grid;
use crate::render::{Anchor, Color, Drawable, Frontend, InputEvent, Key};
use crate::snake::{Direction::{self, *}, Snake};
use crate::Cell;

const INITIAL_HEAD: Cell = (5, 5);
const INITIAL_SNAKE_LENGTH: usize = 3;
const INITIAL_DIRECTION: Direction = Right;
pub const LEVEL_TARGET_SCORE: u32 = 10;
const PAUSED_RATE: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver,
    LevelComplete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated(Outcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub outcome: Outcome,
    pub level: u32,
    pub score: u32,
}

/// Ticks per second at a given level.
pub fn speed(level: u32) -> u32 {
    10 + level * 2
}

/// The most recent input that doesn't turn the snake back on itself.
pub fn resolve_direction(current: Direction, inputs: &[Direction]) -> Direction {
    inputs
        .iter()
        .rev()
        .copied()
        .find(|dir| *dir != current.opposite())
        .unwrap_or(current)
}

/// One level's worth of play: a fresh snake, one piece of food, score from zero.
pub struct GameSession<'a> {
    grid: Grid,
    spawner: &'a mut FoodSpawner,
    snake: Snake,
    direction: Direction,
    food: Cell,
    level: u32,
    score: u32,
    paused: bool,
    status: Status,
}

impl<'a> GameSession<'a> {
    pub fn new(grid: Grid, level: u32, spawner: &'a mut FoodSpawner) -> Result<Self> {
        let snake = Snake::new(INITIAL_HEAD, INITIAL_SNAKE_LENGTH, INITIAL_DIRECTION);
        let food = spawner.spawn(&grid, &snake)?;

        Ok(GameSession {
            grid,
            spawner,
            snake,
            direction: INITIAL_DIRECTION,
            food,
            level,
            score: 0,
            paused: false,
            status: Status::Running,
        })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steer(&mut self, inputs: &[Direction]) {
        self.direction = resolve_direction(self.direction, inputs);
    }

    /// Advances the snake by one cell and decides whether the session is over.
    pub fn step(&mut self) -> Result<Status> {
        if self.status != Status::Running {
            return Ok(self.status);
        }

        let new_head = self.snake.move_head(self.direction);
        let ate = new_head == self.food;

        if ate {
            self.score += 1;
            self.food = self.spawner.spawn(&self.grid, &self.snake)?;
            debug!(score = self.score, food = ?self.grid.to_pixels(self.food), "ate food");
        }
        self.snake.grow_or_shrink(ate);

        // A crash on the same tick as a meal still keeps the point
        if !self.grid.contains(new_head) || self.snake.collides_with_self() {
            self.status = Status::Terminated(Outcome::GameOver);
        } else if self.score >= LEVEL_TARGET_SCORE {
            self.status = Status::Terminated(Outcome::LevelComplete);
        }

        Ok(self.status)
    }

    pub fn result(&self) -> Option<SessionResult> {
        match self.status {
            Status::Running => None,
            Status::Terminated(outcome) => {
                Some(SessionResult { outcome, level: self.level, score: self.score })
            }
        }
    }

    pub fn frame(&self, player: &str) -> Vec<Drawable> {
        let mut frame = vec![Drawable::Arena];

        frame.extend(self.snake().body().enumerate().map(|(i, &cell)| Drawable::Cell {
            cell,
            color: if i == 0 { Color::Green } else { Color::DarkGreen },
        }));
        frame.push(Drawable::Cell { cell: self.food(), color: Color::Red });

        frame.push(Drawable::label(
            format!("Player: {}", player),
            Anchor::TopLeft { col: 1, row: 0 },
            Color::Yellow,
        ));
        frame.push(Drawable::label(
            format!("Score: {}  Level: {}", self.score(), self.level),
            Anchor::TopLeft { col: 24, row: 0 },
            Color::White,
        ));

        if self.paused {
            frame.push(Drawable::centered("Paused", 0, Color::Yellow));
            frame.push(Drawable::centered("Press P to resume", 1, Color::Blue));
        }
        frame
    }

    /// Plays until the session ends. `None` means the player asked to quit.
    pub fn run<F: Frontend>(mut self, frontend: &mut F, player: &str) -> Result<Option<SessionResult>> {
        info!(level = self.level, speed = speed(self.level), "session started");
        frontend.draw_frame(&self.frame(player))?;

        loop {
            let mut dir_inputs = vec![];

            for event in frontend.poll_events()? {
                match event {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::Key(key) => match key {
                        Key::Char('w') | Key::Up => dir_inputs.push(Up),
                        Key::Char('a') | Key::Left => dir_inputs.push(Left),
                        Key::Char('s') | Key::Down => dir_inputs.push(Down),
                        Key::Char('d') | Key::Right => dir_inputs.push(Right),
                        Key::Char('p') | Key::Char('P') => self.paused = !self.paused,
                        _ => {}
                    },
                }
            }

            if self.paused {
                frontend.draw_frame(&self.frame(player))?;
                frontend.tick(PAUSED_RATE);
                continue;
            }

            self.steer(&dir_inputs);

            if let Status::Terminated(outcome) = self.step()? {
                info!(?outcome, level = self.level, score = self.score, "session ended");
                return Ok(self.result());
            }

            frontend.draw_frame(&self.frame(player))?;
            frontend.tick(speed(self.level));
        }
    }

    #[cfg(test)]
    pub fn set_food(&mut self, cell: Cell) {
        self.food = cell;
    }
}
