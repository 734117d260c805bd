//! Banner rendering: block letters with sway, shear and glitch applied.

use neorain_core::ColorTheme;
use neorain_font::{GLYPH_ROWS, build_banner};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::widgets::Paragraph;

use crate::grid::{UNITS_PER_CELL, UNITS_PER_COL};

/// Cells of horizontal lean per degree of rotation, per row away from
/// the banner's center row.
const SHEAR_PER_DEGREE: f32 = 0.5;

/// The block-letter banner and its placement math.
#[derive(Debug)]
pub struct Banner {
    rows: Vec<String>,
    width: u16,
}

impl Banner {
    pub fn new(text: &str) -> Self {
        let rows = build_banner(text);
        let width = rows
            .first()
            .map(|row| row.chars().count())
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        Self { rows, width }
    }

    /// Render the banner centered in the upper third of `area`,
    /// displaced by `offset` surface units, leaned by `rotation`
    /// degrees and shifted sideways by `glitch` units.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: ColorTheme,
        offset: (f32, f32),
        rotation: f32,
        glitch: f32,
    ) {
        if self.width == 0 || area.width == 0 {
            return;
        }
        let dx = ((offset.0 + glitch) / UNITS_PER_COL).round() as i32;
        let dy = (offset.1 / UNITS_PER_CELL).round() as i32;
        let base_x = (area.width as i32 - self.width as i32) / 2 + dx;
        let base_y = area.height as i32 / 3 - GLYPH_ROWS as i32 / 2 + dy;

        let style = Style::new().fg(theme.color()).bold();
        for (r, row) in self.rows.iter().enumerate() {
            let y = base_y + r as i32;
            if y < 0 || y >= area.height as i32 {
                continue;
            }
            // Rows lean opposite ways around the center row.
            let lean =
                (rotation * SHEAR_PER_DEGREE * (r as f32 - GLYPH_ROWS as f32 / 2.0)).round() as i32;
            let x = base_x + lean;

            // Clip to the drawable area, slicing by display character.
            let skip = (-x).max(0) as usize;
            let visible_x = x.max(0) as u16;
            if visible_x >= area.width {
                continue;
            }
            let take = (area.width - visible_x) as usize;
            let text: String = row.chars().skip(skip).take(take).collect();
            if text.is_empty() {
                continue;
            }
            let rect = Rect {
                x: area.x + visible_x,
                y: area.y + y as u16,
                width: text.chars().count() as u16,
                height: 1,
            };
            frame.render_widget(Paragraph::new(text).style(style), rect);
        }
    }
}
