//! CPU-side board state: the grid of tile indices being visualized.
//!
//! The board is owned by the simulation layer; the renderer only reads
//! snapshots of it via [`BoardRenderer::update_tiles`]. Each cell holds a
//! single byte that selects one of the 256 palette entries.
//!
//! [`BoardRenderer::update_tiles`]: crate::BoardRenderer::update_tiles

/// Board edge lengths used until the caller resizes.
pub const DEFAULT_BOARD_WIDTH: u32 = 64;
pub const DEFAULT_BOARD_HEIGHT: u32 = 64;

/// A `width × height` grid of tile indices, row-major, one byte per cell.
///
/// Invariant: `tiles.len() == width * height` at all times. Resizing
/// reallocates the storage zero-filled; prior contents are lost and never
/// resampled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    tiles: Vec<u8>,
}

impl Board {
    /// Creates a zero-filled board. Dimensions are clamped to at least 1.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major view of the cells, `width * height` bytes.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Mutable access for the simulation's direct cell writes.
    pub fn tiles_mut(&mut self) -> &mut [u8] {
        &mut self.tiles
    }

    /// Reads the tile index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the board.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.tiles[self.index_of(x, y)]
    }

    /// Writes the tile index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the board.
    pub fn set(&mut self, x: u32, y: u32, tile: u8) {
        let index = self.index_of(x, y);
        self.tiles[index] = tile;
    }

    /// Replaces the grid with a zero-filled `width × height` allocation.
    /// All prior contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.tiles = vec![0; self.width as usize * self.height as usize];
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} board",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_zero_filled() {
        let board = Board::new(8, 4);
        assert_eq!(board.tiles().len(), 32);
        assert!(board.tiles().iter().all(|&tile| tile == 0));
    }

    #[test]
    fn default_matches_startup_dimensions() {
        let board = Board::default();
        assert_eq!(board.width(), 64);
        assert_eq!(board.height(), 64);
        assert_eq!(board.tiles().len(), 64 * 64);
    }

    #[test]
    fn cells_are_row_major() {
        let mut board = Board::new(4, 3);
        board.set(2, 1, 9);
        assert_eq!(board.tiles()[1 * 4 + 2], 9);
        assert_eq!(board.get(2, 1), 9);
    }

    #[test]
    fn resize_reallocates_and_discards_contents() {
        let mut board = Board::new(2, 2);
        board.set(0, 0, 7);
        board.resize(5, 3);
        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 3);
        assert_eq!(board.tiles().len(), 15);
        assert!(board.tiles().iter().all(|&tile| tile == 0));
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let board = Board::new(0, 0);
        assert_eq!(board.width(), 1);
        assert_eq!(board.height(), 1);
        assert_eq!(board.tiles().len(), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_access_panics() {
        let board = Board::new(2, 2);
        board.get(2, 0);
    }
}
