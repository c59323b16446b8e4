use std::iter;

use edgetris_engine::{Edge, GameSession};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameSession) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameSession) -> String),
    Travel,
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|session| session.stats().score().to_string()),
    Row::Empty,
    Row::LabelValue("PIECES:", &|session| {
        session.stats().placed_pieces().to_string()
    }),
    Row::LabelValue("LINES:", &|session| {
        session.stats().cleared_lines().to_string()
    }),
    Row::Empty,
    Row::LabelValue(" UP:", &|session| lines_toward(session, Edge::Up)),
    Row::LabelValue(" DOWN:", &|session| lines_toward(session, Edge::Down)),
    Row::LabelValue(" LEFT:", &|session| lines_toward(session, Edge::Left)),
    Row::LabelValue(" RIGHT:", &|session| lines_toward(session, Edge::Right)),
    Row::Empty,
    Row::Travel,
];

fn lines_toward(session: &GameSession, edge: Edge) -> String {
    session.stats().cleared_lines_toward(edge).to_string()
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            let (label, value) = match row {
                Row::Empty => continue,
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                    continue;
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(area, buf);
                    continue;
                }
                Row::LabelValue(label, value) => (label, Line::styled(value(self.session), style)),
                Row::Travel => {
                    let value = self
                        .session
                        .travel()
                        .committed_edge()
                        .map_or_else(|| "-".to_owned(), |edge| edge.to_string());
                    ("EDGE:", Line::styled(value, style::ACCENT))
                }
            };
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(label, style)
                .left_aligned()
                .render(label_area, buf);
            value.right_aligned().render(value_area, buf);
        }
    }
}
