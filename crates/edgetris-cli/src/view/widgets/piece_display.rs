use edgetris_engine::{Block, MAX_SHAPE_SIZE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// A single piece in its current orientation, centered in a fixed-size panel.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a Piece) -> Self {
        Self {
            piece: Some(piece),
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
        MAX_SHAPE_SIZE as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_block = BlockDisplay::from_block(Block::Empty, false);
        empty_block.render(area, buf);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let (width, height) = (shape.width() as u16, shape.height() as u16);
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::from_color(piece.color());
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied(x, y) {
                    Widget::render(&occupied_block, grid_cell, buf);
                }
            }
        }
    }
}
