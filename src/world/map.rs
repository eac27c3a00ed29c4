use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::Vec2;
use once_cell::sync::Lazy;
use thiserror::Error;

use super::Tile;

/// Cells along each side of the grid.
pub const MAP_SIZE: usize = 8;

/// Tile `(0, 0)` starts this many world units below the origin on X and Z.
const HALF: i32 = (MAP_SIZE / 2) as i32;

/// Stock layout: one wall at `x = 2, z = 5`.  Rows are `x`, columns `z`.
const STOCK_LAYOUT: &str = "\
........
........
.....%..
........
........
........
........
........
";

static STOCK: Lazy<TileMap> =
    Lazy::new(|| STOCK_LAYOUT.parse().expect("stock layout is well formed"));

/*──────────────────────────── Errors ───────────────────────────────*/

#[derive(Debug, Error)]
pub enum MapError {
    #[error("cannot read map `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expected {max} rows, found {0}", max = MAP_SIZE)]
    RowCount(usize),

    #[error("row {row} has {width} cells, expected {max}", max = MAP_SIZE)]
    RowWidth { row: usize, width: usize },

    #[error("unknown glyph `{glyph}` at row {row}, column {col}")]
    BadGlyph { row: usize, col: usize, glyph: char },
}

/*──────────────────────────── Geometry ─────────────────────────────*/

/// Axis-aligned box in the X/Z plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Point of the box nearest to `p`.
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Grid index.  Signed so that neighbours of edge tiles can be named
/// before they are bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Tile whose footprint contains world X/Z `p`.
    #[inline]
    pub fn containing(p: Vec2) -> Self {
        Self {
            x: (p.x + HALF as f32).floor() as i32,
            z: (p.y + HALF as f32).floor() as i32,
        }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..MAP_SIZE as i32).contains(&self.x) && (0..MAP_SIZE as i32).contains(&self.z)
    }

    /// World-space unit square this tile covers.
    #[inline]
    pub fn footprint(self) -> Aabb {
        let min = Vec2::new((self.x - HALF) as f32, (self.z - HALF) as f32);
        Aabb {
            min,
            max: min + Vec2::ONE,
        }
    }

    /// The 3×3 block centred on `self`, clipped to the grid.  `containing`
    /// saturates far off the grid, so the range bounds saturate too.
    pub fn neighbourhood(self) -> impl Iterator<Item = TileCoord> {
        let (x0, x1) = (self.x.saturating_sub(1), self.x.saturating_add(1));
        let (z0, z1) = (self.z.saturating_sub(1), self.z.saturating_add(1));
        (x0..=x1)
            .flat_map(move |x| (z0..=z1).map(move |z| TileCoord::new(x, z)))
            .filter(|c| c.in_bounds())
    }
}

/*──────────────────────────── TileMap ──────────────────────────────*/

/// Fixed 8×8 obstacle grid, indexed `[x][z]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    cells: [[Tile; MAP_SIZE]; MAP_SIZE],
}

impl Default for TileMap {
    fn default() -> Self {
        STOCK.clone()
    }
}

impl TileMap {
    /// A grid with no obstacles.
    pub fn empty() -> Self {
        Self {
            cells: [[Tile::Empty; MAP_SIZE]; MAP_SIZE],
        }
    }

    /// Read a map in text form from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map: TileMap = text.parse()?;
        log::info!(
            "loaded map {} ({} solid tiles)",
            path.display(),
            map.solid_tiles().count()
        );
        Ok(map)
    }

    /// Cell at `c`, or `None` outside the grid.
    #[inline]
    pub fn height_class_at(&self, c: TileCoord) -> Option<Tile> {
        c.in_bounds().then(|| self.cells[c.x as usize][c.z as usize])
    }

    /// Overwrite a cell between queries.  Returns the previous contents, or
    /// `None` (and changes nothing) when `c` is outside the grid.
    pub fn set(&mut self, c: TileCoord, tile: Tile) -> Option<Tile> {
        if !c.in_bounds() {
            return None;
        }
        let slot = &mut self.cells[c.x as usize][c.z as usize];
        Some(std::mem::replace(slot, tile))
    }

    /// Coordinates of every solid cell, row-major.
    pub fn solid_tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, t)| t.is_solid())
                .map(move |(z, _)| TileCoord::new(x as i32, z as i32))
        })
    }
}

impl FromStr for TileMap {
    type Err = MapError;

    /// Eight non-blank lines of eight glyphs each; blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != MAP_SIZE {
            return Err(MapError::RowCount(rows.len()));
        }

        let mut map = TileMap::empty();
        for (x, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != MAP_SIZE {
                return Err(MapError::RowWidth { row: x, width });
            }
            for (z, glyph) in line.chars().enumerate() {
                map.cells[x][z] = Tile::from_glyph(glyph).ok_or(MapError::BadGlyph {
                    row: x,
                    col: z,
                    glyph,
                })?;
            }
        }
        Ok(map)
    }
}

impl fmt::Display for TileMap {
    /// Stacks without a glyph are written as `#`, which does not parse back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for tile in row {
                write!(f, "{}", tile.glyph().unwrap_or('#'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
