//! Drawing port between the simulation and a concrete render target.

/// A drawable area addressed in abstract units.
///
/// One glyph slot is `slot_width` units wide (see
/// [`ColumnField`](crate::ColumnField)); implementations decide how
/// units map onto their backing store. The terminal front end uses 16
/// units per cell so that the classic slot geometry carries over.
pub trait Surface {
    /// Current drawable width in units.
    fn width(&self) -> f32;

    /// Current drawable height in units.
    fn height(&self) -> f32;

    /// Dim the entire surface by `opacity` (0..1). Applied once per
    /// frame instead of clearing, which is what leaves the fading trail
    /// behind each falling glyph.
    fn fade(&mut self, opacity: f32);

    /// Draw one glyph at `(x, y)` units. Positions outside the surface
    /// (columns start above the top edge) are simply not visible.
    /// `emphasis` applies to this glyph only and never persists.
    fn draw_glyph(&mut self, x: f32, y: f32, glyph: char, emphasis: bool);
}
