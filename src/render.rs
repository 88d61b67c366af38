use crate::error::Result;
use crate::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Green,
    DarkGreen,
    Red,
    White,
    Yellow,
    Blue,
    Gray,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    Backspace,
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(Key),
}

/// Where a label goes. Rows and columns are in screen character units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// `col` counts from the arena's left edge, `row` from the top of the screen.
    TopLeft { col: i32, row: i32 },
    /// Horizontally centered, `row_offset` rows away from the middle row.
    Center { row_offset: i32 },
    /// `row_offset` rows up from the bottom edge.
    BottomLeft { col: i32, row_offset: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Drawable {
    /// The border around the playfield.
    Arena,
    Cell { cell: Cell, color: Color },
    Label { text: String, anchor: Anchor, color: Color },
}

impl Drawable {
    pub fn label(text: impl Into<String>, anchor: Anchor, color: Color) -> Self {
        Drawable::Label { text: text.into(), anchor, color }
    }

    pub fn centered(text: impl Into<String>, row_offset: i32, color: Color) -> Self {
        Drawable::label(text, Anchor::Center { row_offset }, color)
    }
}

/// What the game needs from a window or terminal.
pub trait Frontend {
    /// Drains every pending event without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Replaces whatever is on screen with `frame`.
    fn draw_frame(&mut self, frame: &[Drawable]) -> Result<()>;

    /// Sleeps until the next frame boundary at `rate` frames per second.
    fn tick(&mut self, rate: u32);
}

/// Title, subtitle and prompt in the middle, quit hint at the bottom.
pub fn message_screen(title: &str, subtitle: &str, prompt: &str) -> Vec<Drawable> {
    vec![
        Drawable::centered(title, -2, Color::Yellow),
        Drawable::centered(subtitle, 0, Color::White),
        Drawable::centered(prompt, 2, Color::Blue),
        Drawable::label("Press ESC to Quit", Anchor::BottomLeft { col: 1, row_offset: 1 }, Color::Gray),
    ]
}

pub fn name_screen(name: &str) -> Vec<Drawable> {
    let shown = if name.is_empty() { "_" } else { name };
    vec![
        Drawable::centered("Enter Your Name", -2, Color::Yellow),
        Drawable::centered(shown, 0, Color::White),
        Drawable::centered("Press ENTER to Start", 2, Color::Blue),
    ]
}
