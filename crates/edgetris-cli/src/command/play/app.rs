use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use edgetris_engine::{Edge, GameKey, GameSession, SessionState, TickOutcome};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Tui},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

/// What a terminal key asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Stop,
    Quit,
    Game(GameKey),
}

impl Command {
    fn from_key_code(code: KeyCode) -> Option<Self> {
        let command = match code {
            KeyCode::Enter => Self::Start,
            KeyCode::Esc => Self::Stop,
            KeyCode::Char('q') => Self::Quit,
            KeyCode::Char('w') => Self::Game(GameKey::ChooseEdge(Edge::Up)),
            KeyCode::Char('a') => Self::Game(GameKey::ChooseEdge(Edge::Left)),
            KeyCode::Char('s') => Self::Game(GameKey::ChooseEdge(Edge::Down)),
            KeyCode::Char('d') => Self::Game(GameKey::ChooseEdge(Edge::Right)),
            KeyCode::Up => Self::Game(GameKey::Direction(Edge::Up)),
            KeyCode::Down => Self::Game(GameKey::Direction(Edge::Down)),
            KeyCode::Left => Self::Game(GameKey::Direction(Edge::Left)),
            KeyCode::Right => Self::Game(GameKey::Direction(Edge::Right)),
            _ => return None,
        };
        Some(command)
    }
}

const RUNNING_BINDINGS: &[KeyBinding] = &[
    (&["W", "A", "S", "D"], "Choose edge"),
    (&["←", "→", "↑", "↓"], "Nudge/Rotate"),
    (&["Esc"], "Stop"),
    (&["Q"], "Quit"),
];

const IDLE_BINDINGS: &[KeyBinding] = &[(&["Enter"], "Start"), (&["Q"], "Quit")];

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    tick_interval: Duration,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, tick_interval: Duration) -> Self {
        Self {
            session,
            tick_interval,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn start(&mut self, tui: &mut Tui) {
        self.session.reset();
        if self.session.state().is_running() {
            tui.set_tick_interval(Some(self.tick_interval));
        } else {
            tui.set_tick_interval(None);
        }
    }

    fn stop(&mut self, tui: &mut Tui) {
        self.session.stop();
        if tui.is_ticking() {
            tracing::debug!("tick source halted");
            tui.set_tick_interval(None);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(None);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        match Command::from_key_code(key.code) {
            Some(Command::Start) => self.start(tui),
            Some(Command::Stop) => self.stop(tui),
            Some(Command::Quit) => self.is_exiting = true,
            Some(Command::Game(key)) => _ = self.session.handle_key(key),
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.session.state() {
            SessionState::Running => RUNNING_BINDINGS,
            SessionState::NotStarted | SessionState::GameOver => IDLE_BINDINGS,
        };
        let session_display = SessionDisplay::new(&self.session);
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if let TickOutcome::GameOver { .. } = self.session.tick() {
            tracing::debug!("tick source halted");
            tui.set_tick_interval(None);
        }
    }
}
