//! Positioned glyphs produced by the visualizer and consumed by a driver.

use pathstep_core::{Point, Style};

/// A single glyph at a screen position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub pos: Point,
    pub ch: char,
    pub style: Style,
}

/// Everything on screen for one redraw, in a stable order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: Point, ch: char, style: Style) {
        self.cells.push(FrameCell { pos, ch, style });
    }

    /// Write `text` left to right from `pos`, padded with spaces to `width`
    /// glyphs. Longer text is cut.
    pub fn text(&mut self, pos: Point, width: i32, text: &str, style: Style) {
        let mut chars = text.chars();
        for dx in 0..width.max(0) {
            let ch = chars.next().unwrap_or(' ');
            self.push(pos.shift(dx, 0), ch, style);
        }
    }

    /// The glyph at `pos`, if any. Later writes win.
    pub fn at(&self, pos: Point) -> Option<&FrameCell> {
        self.cells.iter().rev().find(|c| c.pos == pos)
    }

    /// Whether both frames cover the same positions in the same order.
    pub fn aligned(&self, prev: &Frame) -> bool {
        self.cells.len() == prev.cells.len()
            && self
                .cells
                .iter()
                .zip(&prev.cells)
                .all(|(a, b)| a.pos == b.pos)
    }

    /// Cells that differ from `prev`. When the two frames are not
    /// [`aligned`](Frame::aligned), every cell is returned.
    pub fn diff<'a>(&'a self, prev: &Frame) -> Vec<&'a FrameCell> {
        if !self.aligned(prev) {
            return self.cells.iter().collect();
        }
        self.cells
            .iter()
            .zip(&prev.cells)
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a)
            .collect()
    }
}
