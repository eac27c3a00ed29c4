/// Contents of one grid cell.
///
/// Any cell with a non-zero height is solid in X/Z; the height itself only
/// matters for how many blocks a renderer stacks there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Empty,
    /// `%` in map text.
    Wall,
    /// `8` in map text.
    TallWall,
    /// Numeric stack of `n` unit blocks.
    Stack(u8),
}

/// Glyphs of the symbolic classes.  Digits are handled separately.
const GLYPHS: [(char, Tile); 3] = [
    ('.', Tile::Empty),
    ('%', Tile::Wall),
    ('8', Tile::TallWall),
];

impl Tile {
    /// Stack of `n` blocks; zero collapses to [`Tile::Empty`].
    #[inline]
    pub const fn stack(n: u8) -> Self {
        if n == 0 { Tile::Empty } else { Tile::Stack(n) }
    }

    /// Height in unit blocks.
    #[inline]
    pub const fn height(self) -> u8 {
        match self {
            Tile::Empty => 0,
            Tile::Wall => 2,
            Tile::TallWall => 3,
            Tile::Stack(n) => n,
        }
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.height() > 0
    }

    /// Decode one map-text glyph.
    ///
    /// `8` is the tall-wall glyph, so a numeric stack of eight cannot be
    /// written in map text.
    pub fn from_glyph(c: char) -> Option<Self> {
        if let Some(&(_, tile)) = GLYPHS.iter().find(|(g, _)| *g == c) {
            return Some(tile);
        }
        c.to_digit(10).map(|d| Tile::stack(d as u8))
    }

    /// Map-text glyph, or `None` for stacks that have no single-digit form.
    pub fn glyph(self) -> Option<char> {
        if let Some(&(g, _)) = GLYPHS.iter().find(|(_, t)| *t == self) {
            return Some(g);
        }
        match self {
            Tile::Stack(n) if n != 8 && n <= 9 => char::from_digit(n as u32, 10),
            _ => None,
        }
    }
}
