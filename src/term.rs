use std::{io::{Stdout, Write, stdout}, thread::sleep, time::{Duration, Instant}};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};
use tracing::debug;

use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::render::{Anchor, Color, Drawable, Frontend, InputEvent, Key};
use crate::{Coords, TermInt};

const SNAKE_BODY_CHAR: char = '█';
// Terminal characters are about twice as tall as they are wide
const CELL_WIDTH: TermInt = 2;
const HUD_ROWS: TermInt = 1;

#[derive(Copy, Clone, PartialEq, Eq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::White };

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    grid: Grid,
    screen: Vec<Glyph>,
    last_tick: Instant,
}

impl TermManager {
    /// Smallest terminal that fits the HUD and the bordered arena.
    pub fn required_size(grid: &Grid) -> Coords {
        let width = grid.cols() as TermInt * CELL_WIDTH + 2;
        let height = grid.rows() as TermInt + 2 + HUD_ROWS;
        (width, height)
    }

    pub fn new(grid: Grid) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let (min_width, min_height) = Self::required_size(&grid);
        if width < min_width || height < min_height {
            return Err(GameError::TerminalTooSmall { width, height, min_width, min_height });
        }

        let screen = vec![BLANK; width as usize * height as usize];
        let mut term = TermManager { width, height, stdout: stdout(), grid, screen, last_tick: Instant::now() };
        term.setup()?;
        Ok(term)
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn arena_origin(&self) -> Coords {
        let (arena_width, _) = Self::required_size(&self.grid);
        (self.width.saturating_sub(arena_width) / 2, HUD_ROWS)
    }

    fn compose(&self, frame: &[Drawable]) -> Vec<Glyph> {
        let mut back = vec![BLANK; self.screen.len()];
        let (ox, oy) = self.arena_origin();
        let mut put = |x: i32, y: i32, glyph: Glyph| {
            if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
                back[self.width as usize * y as usize + x as usize] = glyph;
            }
        };

        for item in frame {
            match item {
                Drawable::Arena => {
                    let (w, h) = Self::required_size(&self.grid);
                    let (w, h) = (w as i32, (h - HUD_ROWS) as i32);
                    let (ox, oy) = (ox as i32, oy as i32);
                    for x in 0..w {
                        let ch = if x == 0 || x == w - 1 { '+' } else { '-' };
                        put(ox + x, oy, Glyph { ch, color: Color::Gray });
                        put(ox + x, oy + h - 1, Glyph { ch, color: Color::Gray });
                    }
                    for y in 1..h - 1 {
                        put(ox, oy + y, Glyph { ch: '|', color: Color::Gray });
                        put(ox + w - 1, oy + y, Glyph { ch: '|', color: Color::Gray });
                    }
                }
                Drawable::Cell { cell, color } => {
                    if !self.grid.contains(*cell) {
                        continue;
                    }
                    let x = ox as i32 + 1 + cell.0 * CELL_WIDTH as i32;
                    let y = oy as i32 + 1 + cell.1;
                    for dx in 0..CELL_WIDTH as i32 {
                        put(x + dx, y, Glyph { ch: SNAKE_BODY_CHAR, color: *color });
                    }
                }
                Drawable::Label { text, anchor, color } => {
                    let len = text.chars().count() as i32;
                    let (x, y) = match *anchor {
                        Anchor::TopLeft { col, row } => (ox as i32 + col, row),
                        Anchor::Center { row_offset } => {
                            ((self.width as i32 - len) / 2, self.height as i32 / 2 + row_offset)
                        }
                        Anchor::BottomLeft { col, row_offset } => (col, self.height as i32 - 1 - row_offset),
                    };
                    for (i, ch) in text.chars().enumerate() {
                        put(x + i as i32, y, Glyph { ch, color: *color });
                    }
                }
            }
        }

        back
    }

    fn resize(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        debug!(width, height, "terminal resized");
        self.width = width;
        self.height = height;
        self.clear()
    }
}

impl Frontend for TermManager {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) if ev.kind != KeyEventKind::Release => {
                    if let Some(event) = map_key(&ev) {
                        events.push(event);
                    }
                }
                Event::Resize(w, h) => self.resize(w, h)?,
                _ => {}
            }
        }

        Ok(events)
    }

    fn draw_frame(&mut self, frame: &[Drawable]) -> Result<()> {
        let back = self.compose(frame);
        let mut pen = None;

        for (i, (new, old)) in back.iter().zip(self.screen.iter()).enumerate() {
            if new == old {
                continue;
            }
            let x = (i % self.width as usize) as TermInt;
            let y = (i / self.width as usize) as TermInt;
            if pen != Some(new.color) {
                queue!(self.stdout, style::SetForegroundColor(to_term_color(new.color)))?;
                pen = Some(new.color);
            }
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(new.ch))?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        self.screen = back;
        Ok(())
    }

    fn tick(&mut self, rate: u32) {
        let frame = Duration::from_secs_f64(1.0 / rate.max(1) as f64);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            sleep(frame - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let key = match ev.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(ch) => Key::Char(ch),
        _ => return None,
    };
    Some(InputEvent::Key(key))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

fn to_term_color(color: Color) -> style::Color {
    match color {
        Color::Green => style::Color::Green,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::Red => style::Color::Red,
        Color::White => style::Color::White,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Gray => style::Color::DarkGrey,
    }
}
