use std::iter;

use edgetris_engine::{Board, COLS, Piece, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::BlockDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: &'a Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLS as u16 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut board = self.board.clone();
        if let Some(piece) = self.active_piece {
            board.place(piece);
        }

        let col_constraints = (0..COLS).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, board.rows()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(*block, true).render(grid_cell, buf);
            }
        }
    }
}
