//! Block letterforms for the banner.
//!
//! Seven-row block glyphs for A-Z, 0-9 and space, plus a builder that
//! assembles a text line into banner rows. Characters without a glyph
//! render as a blank block so the banner keeps its shape.

/// Rows in every banner glyph.
pub const GLYPH_ROWS: usize = 7;

/// Block digits (7 lines tall, 6 chars wide).
const DIGITS: [[&str; GLYPH_ROWS]; 10] = [
    // 0
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 1
    [
        "  ██  ",
        " ███  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        " ████ ",
    ],
    // 2
    [
        " ████ ",
        "██  ██",
        "    ██",
        "  ██  ",
        " ██   ",
        "██    ",
        "██████",
    ],
    // 3
    [
        " ████ ",
        "██  ██",
        "    ██",
        "  ███ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // 4
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██████",
        "    ██",
        "    ██",
        "    ██",
    ],
    // 5
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // 6
    [
        " ████ ",
        "██    ",
        "██    ",
        "█████ ",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 7
    [
        "██████",
        "    ██",
        "   ██ ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // 8
    [
        " ████ ",
        "██  ██",
        "██  ██",
        " ████ ",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 9
    [
        " ████ ",
        "██  ██",
        "██  ██",
        " █████",
        "    ██",
        "    ██",
        " ████ ",
    ],
];

/// Block letters A-Z (7 lines tall, 6 chars wide; M and W are 7).
const LETTERS: [[&str; GLYPH_ROWS]; 26] = [
    // A
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██████",
        "██  ██",
        "██  ██",
        "██  ██",
    ],
    // B
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
    ],
    // C
    [
        " ████ ",
        "██  ██",
        "██    ",
        "██    ",
        "██    ",
        "██  ██",
        " ████ ",
    ],
    // D
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "█████ ",
    ],
    // E
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "██    ",
        "██    ",
        "██████",
    ],
    // F
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "██    ",
        "██    ",
        "██    ",
    ],
    // G
    [
        " ████ ",
        "██  ██",
        "██    ",
        "██ ███",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // H
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██████",
        "██  ██",
        "██  ██",
        "██  ██",
    ],
    // I
    [
        " ████ ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        " ████ ",
    ],
    // J
    [
        "  ████",
        "   ██ ",
        "   ██ ",
        "   ██ ",
        "   ██ ",
        "██ ██ ",
        " ███  ",
    ],
    // K
    [
        "██  ██",
        "██ ██ ",
        "████  ",
        "███   ",
        "████  ",
        "██ ██ ",
        "██  ██",
    ],
    // L
    [
        "██    ",
        "██    ",
        "██    ",
        "██    ",
        "██    ",
        "██    ",
        "██████",
    ],
    // M
    [
        "██   ██",
        "███ ███",
        "███████",
        "██ █ ██",
        "██   ██",
        "██   ██",
        "██   ██",
    ],
    // N
    [
        "██  ██",
        "███ ██",
        "██████",
        "██ ███",
        "██  ██",
        "██  ██",
        "██  ██",
    ],
    // O
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // P
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
        "██    ",
        "██    ",
        "██    ",
    ],
    // Q
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██ ███",
        "██ ██ ",
        " ██ ██",
    ],
    // R
    [
        "█████ ",
        "██  ██",
        "██  ██",
        "█████ ",
        "████  ",
        "██ ██ ",
        "██  ██",
    ],
    // S
    [
        " █████",
        "██    ",
        "██    ",
        " ████ ",
        "    ██",
        "    ██",
        "█████ ",
    ],
    // T
    [
        "██████",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // U
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // V
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
        "  ██  ",
    ],
    // W
    [
        "██   ██",
        "██   ██",
        "██   ██",
        "██ █ ██",
        "███████",
        "███ ███",
        "██   ██",
    ],
    // X
    [
        "██  ██",
        "██  ██",
        " ████ ",
        "  ██  ",
        " ████ ",
        "██  ██",
        "██  ██",
    ],
    // Y
    [
        "██  ██",
        "██  ██",
        " ████ ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // Z
    [
        "██████",
        "    ██",
        "   ██ ",
        "  ██  ",
        " ██   ",
        "██    ",
        "██████",
    ],
];

/// Word gap (7 lines tall, 4 chars wide).
const SPACE: [&str; GLYPH_ROWS] = ["    ", "    ", "    ", "    ", "    ", "    ", "    "];

/// Placeholder for characters without a letterform.
const BLANK: [&str; GLYPH_ROWS] = [
    "      ", "      ", "      ", "      ", "      ", "      ", "      ",
];

/// Glyph rows for a single character, uppercased.
fn glyph(ch: char) -> &'static [&'static str; GLYPH_ROWS] {
    match ch.to_ascii_uppercase() {
        'A'..='Z' => &LETTERS[(ch.to_ascii_uppercase() as u8 - b'A') as usize],
        '0'..='9' => &DIGITS[(ch as u8 - b'0') as usize],
        ' ' => &SPACE,
        _ => &BLANK,
    }
}

/// Assemble banner rows for `text`.
///
/// Returns [`GLYPH_ROWS`] strings of equal display width, glyphs
/// separated by a single column of space.
pub fn build_banner(text: &str) -> Vec<String> {
    let glyphs: Vec<_> = text.chars().map(glyph).collect();
    (0..GLYPH_ROWS)
        .map(|row| {
            let mut line = String::new();
            for (i, g) in glyphs.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(g[row]);
            }
            line
        })
        .collect()
}

/// Display width of the banner for `text`, in terminal columns.
pub fn banner_width(text: &str) -> usize {
    build_banner(text)
        .first()
        .map(|row| row.chars().count())
        .unwrap_or(0)
}
