//! Static tile grid and pixel↔cell mapping.
//!
//! The grid's shape is fixed at construction; cell contents are mutable
//! (a question block becomes a used block when hit). Queries outside the
//! grid extent return `None`, which every caller treats as open space —
//! falling off the grid is how the game signals "died", not an error.

use thiserror::Error;

/// Default tile edge length in pixels.
pub const TILE_SIZE: f32 = 16.0;

/// The type code stored in a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Air,
    Ground,
    Brick,
    Question,
    PipeTopLeft,
    PipeTopRight,
    PipeLeft,
    PipeRight,
    /// A spent question/hidden block.
    Used,
    /// Invisible block: open space when falling onto it, solid when
    /// struck from below. That asymmetry is how hidden blocks are
    /// discovered, not a bug.
    Hidden,
}

impl TileKind {
    /// Decode the numeric code used by authored level data.
    pub fn from_code(code: u8) -> Option<TileKind> {
        Some(match code {
            0 => TileKind::Air,
            1 => TileKind::Ground,
            2 => TileKind::Brick,
            3 => TileKind::Question,
            4 => TileKind::PipeTopLeft,
            5 => TileKind::PipeTopRight,
            6 => TileKind::PipeLeft,
            7 => TileKind::PipeRight,
            8 => TileKind::Used,
            9 => TileKind::Hidden,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Air => 0,
            TileKind::Ground => 1,
            TileKind::Brick => 2,
            TileKind::Question => 3,
            TileKind::PipeTopLeft => 4,
            TileKind::PipeTopRight => 5,
            TileKind::PipeLeft => 6,
            TileKind::PipeRight => 7,
            TileKind::Used => 8,
            TileKind::Hidden => 9,
        }
    }
}

/// Result of a grid query: the cell coordinates plus its current kind.
/// Cell coordinates let the collision resolver compute the tile's pixel
/// edges for snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMatch {
    pub cx: i32,
    pub cy: i32,
    pub kind: TileKind,
}

/// Rows of unequal length in authored tile data.
#[derive(Debug, Error)]
#[error("tile row {row} has {got} cells, expected {expected}")]
pub struct RaggedRowsError {
    pub row: usize,
    pub expected: usize,
    pub got: usize,
}

/// Fixed-shape 2D grid of tile kinds.
///
/// Tiles are stored in row-major order: index = cy * width + cx.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: f32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Create a grid filled with air.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![TileKind::Air; (width * height) as usize],
        }
    }

    /// Build a grid from authored rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<TileKind>>, tile_size: f32) -> Result<Self, RaggedRowsError> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RaggedRowsError {
                    row: i,
                    expected: width,
                    got: row.len(),
                });
            }
        }
        Self::assemble(rows, width as u32, height, tile_size)
    }

    fn assemble(
        rows: Vec<Vec<TileKind>>,
        width: u32,
        height: u32,
        tile_size: f32,
    ) -> Result<Self, RaggedRowsError> {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for row in rows {
            tiles.extend(row);
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    /// Convert a pixel coordinate to a cell index (floor division, so
    /// negative pixels land in negative, out-of-bounds cells).
    pub fn to_index(&self, pos: f32) -> i32 {
        (pos / self.tile_size).floor() as i32
    }

    /// Convert a cell index to the pixel position of its near edge.
    pub fn to_pixel(&self, index: i32) -> f32 {
        index as f32 * self.tile_size
    }

    /// Bounds-checked O(1) cell lookup. `None` outside the grid extent —
    /// callers treat that as open space.
    pub fn get(&self, cx: i32, cy: i32) -> Option<TileMatch> {
        if cx < 0 || cy < 0 || cx >= self.width as i32 || cy >= self.height as i32 {
            return None;
        }
        let kind = self.tiles[(cy as u32 * self.width + cx as u32) as usize];
        Some(TileMatch { cx, cy, kind })
    }

    /// Lookup by pixel coordinates.
    pub fn get_by_pixel(&self, x: f32, y: f32) -> Option<TileMatch> {
        self.get(self.to_index(x), self.to_index(y))
    }

    /// Mutate a cell's kind in place. Silent no-op outside the extent.
    pub fn set(&mut self, cx: i32, cy: i32, kind: TileKind) {
        if cx >= 0 && cy >= 0 && cx < self.width as i32 && cy < self.height as i32 {
            self.tiles[(cy as u32 * self.width + cx as u32) as usize] = kind;
        }
    }

    /// Fill a rectangular cell region. Handy for tests and generated levels.
    pub fn fill_rect(&mut self, cx: i32, cy: i32, w: u32, h: u32, kind: TileKind) {
        for y in cy..cy + h as i32 {
            for x in cx..cx + w as i32 {
                self.set(x, y, kind);
            }
        }
    }
}
