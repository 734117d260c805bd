//! Terminal cell-grid implementation of the rain drawing surface.

use neorain_core::ColorTheme;
use neorain_rain::Surface;
use ratatui::text::{Line, Span};
use ratatui::style::{Style, Stylize};

/// Units per terminal cell vertically; also the width of one glyph
/// slot, so each slot lands on exactly one cell column.
pub const UNITS_PER_CELL: f32 = 16.0;

/// Units per terminal column for non-slot geometry (banner travel,
/// crackle lengths); cells are roughly twice as tall as they are wide.
pub const UNITS_PER_COL: f32 = 8.0;

/// Intensity below which a cell is considered empty again.
const INTENSITY_FLOOR: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    intensity: f32,
    emphasis: bool,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    intensity: 0.0,
    emphasis: false,
};

/// A cols x rows buffer of decaying glyph cells.
///
/// The fade applied each frame multiplies every cell's intensity down
/// instead of clearing it, which is what draws the trail behind each
/// column head when the buffer is turned into styled lines.
#[derive(Debug)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols as usize * rows as usize],
        }
    }

    /// Rebuild for a new terminal size, clearing every cell.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![EMPTY; cols as usize * rows as usize];
    }

    /// Render the buffer as one styled line per terminal row.
    pub fn lines(&self, theme: ColorTheme) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols)
                    .map(|col| {
                        let cell = self.cells[row as usize * self.cols as usize + col as usize];
                        if cell.intensity <= 0.0 {
                            Span::raw(" ")
                        } else if cell.emphasis {
                            Span::styled(
                                cell.glyph.to_string(),
                                Style::new().fg(theme.head_color()),
                            )
                            .bold()
                        } else {
                            Span::styled(
                                cell.glyph.to_string(),
                                Style::new().fg(theme.trail_color(cell.intensity)),
                            )
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for CellGrid {
    fn width(&self) -> f32 {
        self.cols as f32 * UNITS_PER_CELL
    }

    fn height(&self) -> f32 {
        self.rows as f32 * UNITS_PER_CELL
    }

    fn fade(&mut self, opacity: f32) {
        for cell in &mut self.cells {
            cell.intensity *= 1.0 - opacity;
            // Emphasis lasts a single frame; a faded head is just trail.
            cell.emphasis = false;
            if cell.intensity < INTENSITY_FLOOR {
                *cell = EMPTY;
            }
        }
    }

    fn draw_glyph(&mut self, x: f32, y: f32, glyph: char, emphasis: bool) {
        let col = (x / UNITS_PER_CELL).floor() as i32;
        let row = (y / UNITS_PER_CELL).floor() as i32;
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell {
            glyph,
            intensity: 1.0,
            emphasis,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_in_units() {
        let grid = CellGrid::new(80, 24);
        assert_eq!(grid.width(), 80.0 * 16.0);
        assert_eq!(grid.height(), 24.0 * 16.0);
    }

    #[test]
    fn test_draw_lands_on_cell() {
        let mut grid = CellGrid::new(80, 24);
        grid.draw_glyph(32.0, 160.0, 'ア', false);
        let cell = grid.cells[10 * 80 + 2];
        assert_eq!(cell.glyph, 'ア');
        assert_eq!(cell.intensity, 1.0);
    }

    #[test]
    fn test_offscreen_draw_is_ignored() {
        let mut grid = CellGrid::new(80, 24);
        grid.draw_glyph(0.0, -48.0, 'ア', false);
        grid.draw_glyph(-16.0, 0.0, 'ア', false);
        grid.draw_glyph(80.0 * 16.0, 0.0, 'ア', false);
        grid.draw_glyph(0.0, 24.0 * 16.0, 'ア', false);
        assert!(grid.cells.iter().all(|c| c.intensity == 0.0));
    }

    #[test]
    fn test_fade_decays_and_eventually_clears() {
        let mut grid = CellGrid::new(4, 4);
        grid.draw_glyph(0.0, 0.0, 'ア', false);
        grid.fade(0.08);
        let cell = grid.cells[0];
        assert_eq!(cell.glyph, 'ア');
        assert!((cell.intensity - 0.92).abs() < 1e-6);

        for _ in 0..100 {
            grid.fade(0.08);
        }
        assert_eq!(grid.cells[0].glyph, ' ');
        assert_eq!(grid.cells[0].intensity, 0.0);
    }

    #[test]
    fn test_emphasis_lasts_one_frame() {
        let mut grid = CellGrid::new(4, 4);
        grid.draw_glyph(0.0, 0.0, 'ア', true);
        assert!(grid.cells[0].emphasis);
        grid.fade(0.08);
        assert!(!grid.cells[0].emphasis);
        assert_eq!(grid.cells[0].glyph, 'ア');
    }

    #[test]
    fn test_resize_clears() {
        let mut grid = CellGrid::new(4, 4);
        grid.draw_glyph(0.0, 0.0, 'ア', true);
        grid.resize(8, 8);
        assert_eq!(grid.cells.len(), 64);
        assert!(grid.cells.iter().all(|c| c.intensity == 0.0));
    }

    #[test]
    fn test_lines_cover_grid() {
        let mut grid = CellGrid::new(4, 3);
        grid.draw_glyph(16.0, 16.0, 'X', false);
        let lines = grid.lines(ColorTheme::Green);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].spans.len(), 4);
        assert_eq!(lines[1].spans[1].content, "X");
    }
}
