use edgetris_engine::{Block, BlockColor};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Filled(color) => Self::from_color(color),
        }
    }

    pub fn from_color(color: BlockColor) -> Self {
        let style = match color {
            BlockColor::Cyan => style::CYAN_BLOCK,
            BlockColor::Blue => style::BLUE_BLOCK,
            BlockColor::Orange => style::ORANGE_BLOCK,
            BlockColor::Yellow => style::YELLOW_BLOCK,
            BlockColor::Green => style::GREEN_BLOCK,
            BlockColor::Purple => style::PURPLE_BLOCK,
            BlockColor::Red => style::RED_BLOCK,
        };
        Self::new(style, "")
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
