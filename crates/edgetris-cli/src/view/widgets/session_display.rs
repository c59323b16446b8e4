use edgetris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Board in the middle, preview and stats to its right, and a popup over the
/// board whenever the session is not running.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn height(&self) -> u16 {
        let (board, preview, stats) = self.panels();
        u16::max(board.height(), preview.height() + 1 + stats.height())
    }

    fn border_color(&self) -> Color {
        match self.session.state() {
            SessionState::NotStarted => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel_block(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    fn panels(&self) -> (BoardDisplay<'a>, PieceDisplay<'a>, SessionStatsDisplay<'a>) {
        let is_started = !self.session.state().is_not_started();

        let mut board = BoardDisplay::new(self.session.board()).block(
            Block::bordered()
                .border_style(self.border_color())
                .style(style::DEFAULT),
        );
        let mut preview = PieceDisplay::new().block(self.panel_block("NEXT"));
        if is_started {
            board = board.active_piece(self.session.active_piece());
            preview = preview.piece(self.session.preview_piece());
        }
        let stats = SessionStatsDisplay::new(self.session).block(self.panel_block("STATS"));
        (board, preview, stats)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (game_board, preview, stats) = self.panels();

        let [center_column, right_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(u16::max(preview.width(), stats.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [preview_area, stats_area] = Layout::vertical([
            Constraint::Length(preview.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let preview_area = preview_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(preview.width())]).flex(Flex::Start),
        )[0];

        let game_board_width = game_board.width();
        game_board.render(board_area, buf);
        preview.render(preview_area, buf);
        stats.render(stats_area, buf);

        let popup = match self.session.state() {
            SessionState::Running => None,
            SessionState::NotStarted => Some((
                "PRESS ENTER TO START",
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
