use tracing::info;

use crate::error::Result;
use crate::food::FoodSpawner;
use crate::grid::Grid;
use crate::name::NameBuffer;
use crate::render::{self, Frontend, InputEvent, Key};
use crate::session::{GameSession, Outcome, SessionResult};

pub const MAX_LEVEL: u32 = 10;
const IDLE_RATE: u32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AppState {
    NameInput,
    Welcome,
    Playing,
    GameOver,
    LevelComplete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    NameSubmitted,
    Confirmed,
    SessionEnded(SessionResult),
}

/// Level and last score, carried between screens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub level: u32,
    pub score: u32,
}

impl Progress {
    pub fn new(level: u32) -> Self {
        Progress { level, score: 0 }
    }

    fn reset(&mut self) {
        *self = Progress::new(1);
    }
}

impl AppState {
    /// Events that mean nothing in the current state leave it unchanged.
    pub fn transition(self, event: AppEvent, progress: &mut Progress) -> AppState {
        use AppState::*;

        match (self, event) {
            (NameInput, AppEvent::NameSubmitted) => Welcome,
            (Welcome, AppEvent::Confirmed) => Playing,
            (Playing, AppEvent::SessionEnded(result)) => {
                progress.level = result.level;
                progress.score = result.score;
                match result.outcome {
                    Outcome::GameOver => GameOver,
                    Outcome::LevelComplete => LevelComplete,
                }
            }
            (GameOver, AppEvent::Confirmed) => {
                progress.reset();
                Welcome
            }
            (LevelComplete, AppEvent::Confirmed) if progress.level < MAX_LEVEL => {
                progress.level += 1;
                progress.score = 0;
                Playing
            }
            (LevelComplete, AppEvent::Confirmed) => {
                progress.reset();
                Welcome
            }
            (state, _) => state,
        }
    }
}

pub struct Options {
    pub player: Option<String>,
    pub level: u32,
    pub seed: Option<u64>,
}

pub struct App<F: Frontend> {
    frontend: F,
    grid: Grid,
    spawner: FoodSpawner,
    state: AppState,
    progress: Progress,
    player: String,
}

impl<F: Frontend> App<F> {
    pub fn new(frontend: F, grid: Grid, options: Options) -> Self {
        let (state, player) = match options.player {
            Some(name) => (AppState::Welcome, name),
            None => (AppState::NameInput, String::new()),
        };

        App {
            frontend,
            grid,
            spawner: FoodSpawner::new(options.seed),
            state,
            progress: Progress::new(options.level.clamp(1, MAX_LEVEL)),
            player,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[cfg(test)]
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Runs screens until the player quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let event = match self.state {
                AppState::NameInput => self.read_name()?,
                AppState::Welcome => self.wait_for_confirm(
                    &format!("Welcome {}!", self.player),
                    "Get ready to play!",
                    "Press SPACE to Start",
                )?,
                AppState::Playing => {
                    let session = GameSession::new(self.grid, self.progress.level, &mut self.spawner)?;
                    session.run(&mut self.frontend, &self.player)?.map(AppEvent::SessionEnded)
                }
                AppState::GameOver => self.wait_for_confirm(
                    "Game Over!",
                    &format!("Score: {}", self.progress.score),
                    "Press SPACE to Restart",
                )?,
                AppState::LevelComplete if self.progress.level < MAX_LEVEL => self.wait_for_confirm(
                    &format!("Level {} Complete!", self.progress.level),
                    &format!("Score: {}", self.progress.score),
                    "Press SPACE for Next Level",
                )?,
                AppState::LevelComplete => self.wait_for_confirm(
                    "All Levels Complete!",
                    &format!("Final Score: {}", self.progress.score),
                    "Press SPACE to Play Again",
                )?,
            };

            let event = match event {
                Some(event) => event,
                None => {
                    info!(state = ?self.state, "player quit");
                    return Ok(());
                }
            };

            let next = self.state.transition(event, &mut self.progress);
            info!(from = ?self.state, to = ?next, level = self.progress.level, "state change");
            self.state = next;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn read_name(&mut self) -> Result<Option<AppEvent>> {
        let mut name = NameBuffer::new();

        loop {
            self.frontend.draw_frame(&render::name_screen(name.as_str()))?;

            for event in self.frontend.poll_events()? {
                match event {
                    InputEvent::Quit => return Ok(None),
                    InputEvent::Key(Key::Enter) => {
                        if let Some(player) = name.submit() {
                            self.player = player;
                            return Ok(Some(AppEvent::NameSubmitted));
                        }
                    }
                    InputEvent::Key(Key::Backspace) => name.backspace(),
                    InputEvent::Key(Key::Space) => {
                        name.push(' ');
                    }
                    InputEvent::Key(Key::Char(ch)) => {
                        name.push(ch);
                    }
                    InputEvent::Key(_) => {}
                }
            }

            self.frontend.tick(IDLE_RATE);
        }
    }

    fn wait_for_confirm(&mut self, title: &str, subtitle: &str, prompt: &str) -> Result<Option<AppEvent>> {
        let frame = render::message_screen(title, subtitle, prompt);

        loop {
            self.frontend.draw_frame(&frame)?;

            for event in self.frontend.poll_events()? {
                match event {
                    InputEvent::Quit | InputEvent::Key(Key::Escape) => return Ok(None),
                    InputEvent::Key(Key::Space) | InputEvent::Key(Key::Enter) => {
                        return Ok(Some(AppEvent::Confirmed))
                    }
                    InputEvent::Key(_) => {}
                }
            }

            self.frontend.tick(IDLE_RATE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::ScriptedFrontend;
    use AppState::*;

    fn ended(outcome: Outcome, level: u32, score: u32) -> AppEvent {
        AppEvent::SessionEnded(SessionResult { outcome, level, score })
    }

    fn app(frontend: ScriptedFrontend, player: Option<&str>) -> App<ScriptedFrontend> {
        let options = Options { player: player.map(String::from), level: 1, seed: Some(5) };
        App::new(frontend, Grid::default(), options)
    }

    #[test]
    fn happy_path_transitions() {
        let mut p = Progress::new(1);
        let mut state = NameInput;
        state = state.transition(AppEvent::NameSubmitted, &mut p);
        assert_eq!(state, Welcome);
        state = state.transition(AppEvent::Confirmed, &mut p);
        assert_eq!(state, Playing);
        state = state.transition(ended(Outcome::LevelComplete, 1, 10), &mut p);
        assert_eq!(state, LevelComplete);
        assert_eq!(p, Progress { level: 1, score: 10 });
        state = state.transition(AppEvent::Confirmed, &mut p);
        assert_eq!(state, Playing);
        assert_eq!(p, Progress { level: 2, score: 0 });
    }

    #[test]
    fn game_over_resets_progress() {
        let mut p = Progress { level: 4, score: 0 };
        let state = Playing.transition(ended(Outcome::GameOver, 4, 7), &mut p);
        assert_eq!(state, GameOver);
        assert_eq!(p, Progress { level: 4, score: 7 });

        let state = state.transition(AppEvent::Confirmed, &mut p);
        assert_eq!(state, Welcome);
        assert_eq!(p, Progress { level: 1, score: 0 });
    }

    #[test]
    fn max_level_loops_back() {
        let mut p = Progress { level: MAX_LEVEL, score: 0 };
        let state = Playing.transition(ended(Outcome::LevelComplete, MAX_LEVEL, 10), &mut p);
        assert_eq!(state, LevelComplete);

        let state = state.transition(AppEvent::Confirmed, &mut p);
        assert_eq!(state, Welcome);
        assert_eq!(p, Progress { level: 1, score: 0 });
    }

    #[test]
    fn irrelevant_events_are_ignored() {
        let mut p = Progress::new(3);
        assert_eq!(NameInput.transition(AppEvent::Confirmed, &mut p), NameInput);
        assert_eq!(Welcome.transition(AppEvent::NameSubmitted, &mut p), Welcome);
        assert_eq!(Playing.transition(AppEvent::Confirmed, &mut p), Playing);
        assert_eq!(GameOver.transition(ended(Outcome::GameOver, 3, 1), &mut p), GameOver);
        assert_eq!(p, Progress::new(3));
    }

    #[test]
    fn blank_name_is_not_submitted() {
        let frontend = ScriptedFrontend::new().keys(&[Key::Space, Key::Enter, Key::Char('!'), Key::Enter]);
        let mut app = app(frontend, None);
        app.run().unwrap();
        assert_eq!(app.state(), NameInput);
    }

    #[test]
    fn name_then_welcome() {
        let frontend = ScriptedFrontend::new()
            .text("Ada")
            .keys(&[Key::Char('#'), Key::Space, Key::Enter]);
        let mut app = app(frontend, None);
        app.run().unwrap();

        assert_eq!(app.state(), Welcome);
        assert!(app.frontend().saw_label("Welcome Ada!"));
    }

    #[test]
    fn escape_quits_from_message_screens() {
        let frontend = ScriptedFrontend::new().keys(&[Key::Escape]).idle(5);
        let mut app = app(frontend, Some("Bo"));
        app.run().unwrap();
        assert_eq!(app.state(), Welcome);
        assert!(app.frontend().frames.len() == 1);
    }

    #[test]
    fn crash_then_restart() {
        // Steer up into the top wall, then confirm twice.
        let frontend = ScriptedFrontend::new()
            .keys(&[Key::Space, Key::Up])
            .idle(10)
            .keys(&[Key::Space]);
        let mut app = app(frontend, Some("Bo"));
        app.run().unwrap();

        assert!(app.frontend().saw_label("Game Over!"));
        assert_eq!(app.state(), Welcome);
        assert_eq!(app.progress(), Progress::new(1));
    }

    #[test]
    fn starting_level_is_clamped() {
        let options = Options { player: Some("Bo".into()), level: 42, seed: None };
        let app = App::new(ScriptedFrontend::new(), Grid::default(), options);
        assert_eq!(app.progress().level, MAX_LEVEL);
    }
}
