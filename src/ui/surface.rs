//! Drawing surface in world units and its terminal implementation.
//!
//! Scenes draw in the 800 x 400 world viewport. `CellCanvas` scales those
//! coordinates to a grid of colored terminal cells, which is then stamped
//! row-by-row as Paragraph widgets.

use super::sprites::Sprite;
use crate::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Where a frame gets drawn. Coordinates are world units relative to the
/// viewport's top-left corner.
pub trait RenderSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Stretch `sprite` over the rectangle. `opacity` <= 0 draws nothing,
    /// anything below 1 draws dimmed. `flip` mirrors horizontally.
    #[allow(clippy::too_many_arguments)]
    fn draw_sprite(
        &mut self,
        sprite: &Sprite,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        opacity: f64,
        flip: bool,
    );

    /// Unscaled text starting at the cell containing (x, y).
    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color);

    /// Width `text` takes up, in world units.
    fn text_width(&self, text: &str) -> f64;
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub dim: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
            dim: false,
        }
    }
}

impl Cell {
    fn style(&self) -> Style {
        let style = Style::default().fg(self.fg).bg(self.bg);
        if self.dim {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }
}

/// Terminal cell buffer covering the whole viewport.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(index)
    }

    fn to_col(&self, x: f64) -> f64 {
        x * self.cols as f64 / VIEWPORT_WIDTH
    }

    fn to_row(&self, y: f64) -> f64 {
        y * self.rows as f64 / VIEWPORT_HEIGHT
    }

    fn col_span(&self, x: f64, width: f64) -> (i32, i32) {
        Self::span(self.to_col(x), self.to_col(x + width))
    }

    fn row_span(&self, y: f64, height: f64) -> (i32, i32) {
        Self::span(self.to_row(y), self.to_row(y + height))
    }

    /// Cells covered by a scaled extent. Always at least one cell wide so
    /// thin things stay visible.
    fn span(start: f64, end: f64) -> (i32, i32) {
        let first = start.floor() as i32;
        let last = end.ceil() as i32;
        (first, last.max(first + 1))
    }

    /// Characters of one row, for tests and debugging.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row))
            .map(|c| c.ch)
            .collect()
    }

    /// Row `row` as styled spans, merging runs of equal style.
    pub fn row_line(&self, row: u16) -> Line<'static> {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_style = Style::default();
        let mut current_text = String::new();

        for col in 0..self.cols {
            let Some(cell) = self.cell(col, row) else {
                continue;
            };
            let style = cell.style();
            if style != current_style && !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), current_style));
            }
            current_style = style;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, current_style));
        }
        Line::from(spans)
    }

    /// Stamp the buffer into `area`, clipped to whatever fits.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = self.rows.min(area.height);
        let width = self.cols.min(area.width);
        for row in 0..height {
            let line = Paragraph::new(self.row_line(row));
            frame.render_widget(line, Rect::new(area.x, area.y + row, width, 1));
        }
    }
}

impl RenderSurface for CellCanvas {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let (c0, c1) = self.col_span(x, width);
        let (r0, r1) = self.row_span(y, height);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        ch: ' ',
                        fg: Color::Reset,
                        bg: color,
                        dim: false,
                    };
                }
            }
        }
    }

    fn draw_sprite(
        &mut self,
        sprite: &Sprite,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        opacity: f64,
        flip: bool,
    ) {
        if opacity <= 0.0 || sprite.width() == 0 || sprite.height() == 0 {
            return;
        }
        let (c0, c1) = self.col_span(x, width);
        let (r0, r1) = self.row_span(y, height);
        let target_w = (c1 - c0) as usize;
        let target_h = (r1 - r0) as usize;

        for dy in 0..target_h {
            let src_row = dy * sprite.height() / target_h;
            for dx in 0..target_w {
                let mut src_col = dx * sprite.width() / target_w;
                if flip {
                    src_col = sprite.width() - 1 - src_col;
                }
                let mut ch = sprite.char_at(src_col, src_row);
                if ch == ' ' {
                    continue;
                }
                if flip {
                    ch = super::sprites::mirror_char(ch);
                }
                if let Some(cell) = self.cell_mut(c0 + dx as i32, r0 + dy as i32) {
                    cell.ch = ch;
                    cell.fg = sprite.color;
                    cell.dim = opacity < 1.0;
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        let col = self.to_col(x).floor() as i32;
        let row = self.to_row(y).floor() as i32;
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = color;
                cell.dim = false;
            }
        }
    }

    fn text_width(&self, text: &str) -> f64 {
        if self.cols == 0 {
            return 0.0;
        }
        text.chars().count() as f64 * VIEWPORT_WIDTH / self.cols as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_scales_to_cells() {
        // 80 x 40 cells: 10 world units per cell each way
        let mut canvas = CellCanvas::new(80, 40);
        canvas.fill_rect(100.0, 200.0, 50.0, 50.0, Color::Blue);
        assert_eq!(canvas.cell(10, 20).map(|c| c.bg), Some(Color::Blue));
        assert_eq!(canvas.cell(14, 24).map(|c| c.bg), Some(Color::Blue));
        assert_eq!(canvas.cell(15, 20).map(|c| c.bg), Some(Color::Reset));
        assert_eq!(canvas.cell(10, 25).map(|c| c.bg), Some(Color::Reset));
    }

    #[test]
    fn test_fill_rect_clips_outside() {
        let mut canvas = CellCanvas::new(80, 40);
        canvas.fill_rect(-100.0, -100.0, 2000.0, 2000.0, Color::Green);
        assert!((0..40).all(|r| canvas.cell(79, r).map(|c| c.bg) == Some(Color::Green)));
        canvas.fill_rect(900.0, 0.0, 50.0, 50.0, Color::Red);
        assert!((0..80).all(|c| canvas.cell(c, 0).map(|c| c.bg) == Some(Color::Green)));
    }

    #[test]
    fn test_thin_rect_stays_visible() {
        let mut canvas = CellCanvas::new(80, 40);
        canvas.fill_rect(101.0, 101.0, 1.0, 1.0, Color::Yellow);
        assert_eq!(canvas.cell(10, 10).map(|c| c.bg), Some(Color::Yellow));
    }

    #[test]
    fn test_draw_text() {
        let mut canvas = CellCanvas::new(80, 40);
        canvas.draw_text("Score: 3", 0.0, 0.0, Color::White);
        assert!(canvas.row_text(0).starts_with("Score: 3"));
        // Runs off the right edge without panicking
        canvas.draw_text("overflowing text", 790.0, 10.0, Color::White);
        assert!(canvas.row_text(1).ends_with('o'));
        assert_eq!(canvas.text_width("abcd"), 40.0);
    }

    #[test]
    fn test_sprite_flip_and_opacity() {
        let sprite = Sprite::parse("ab\ncd", Color::White).unwrap();
        let mut canvas = CellCanvas::new(80, 40);
        canvas.draw_sprite(&sprite, 0.0, 0.0, 20.0, 20.0, 1.0, false);
        assert!(canvas.row_text(0).starts_with("ab"));
        assert!(canvas.row_text(1).starts_with("cd"));

        canvas.draw_sprite(&sprite, 0.0, 0.0, 20.0, 20.0, 0.5, true);
        assert!(canvas.row_text(0).starts_with("ba"));
        assert_eq!(canvas.cell(0, 0).map(|c| c.dim), Some(true));

        let mut blank = CellCanvas::new(80, 40);
        blank.draw_sprite(&sprite, 0.0, 0.0, 20.0, 20.0, 0.0, false);
        assert!(blank.row_text(0).chars().all(|c| c == ' '));
    }

    #[test]
    fn test_row_line_merges_styles() {
        let mut canvas = CellCanvas::new(8, 4);
        canvas.draw_text("ab", 0.0, 0.0, Color::Red);
        canvas.draw_text("cd", 200.0, 0.0, Color::Blue);
        let line = canvas.row_line(0);
        // "ab", "cd", trailing blanks
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "ab");
    }
}
