//! The 256-entry colour table mapping tile indices to displayed pixels.

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Fixed capacity of the palette; also the width of the palette texture.
pub const PALETTE_SIZE: usize = 256;

/// One palette entry, 8 bits per component.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Colour assigned to entries the caller has not set: zero colour,
    /// opaque alpha.
    pub const UNSET: Self = Self::new(0, 0, 0, 255);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// The palette texture holds exactly [`PALETTE_SIZE`] entries;
    /// accepting more would overflow the committed texture memory.
    #[error("palette accepts at most {PALETTE_SIZE} colours, got {len}")]
    OutOfRange { len: usize },
}

/// CPU staging table mirrored into the 1D palette texture on upload.
///
/// Entry `i` is the colour displayed for tile index `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgba; PALETTE_SIZE],
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full table. Entries past `colours.len()` reset to
    /// [`Rgba::UNSET`]. Inputs longer than [`PALETTE_SIZE`] are rejected
    /// and leave the existing table untouched.
    pub fn set_colours(&mut self, colours: &[Rgba]) -> Result<(), PaletteError> {
        if colours.len() > PALETTE_SIZE {
            return Err(PaletteError::OutOfRange { len: colours.len() });
        }
        let mut entries = [Rgba::UNSET; PALETTE_SIZE];
        entries[..colours.len()].copy_from_slice(colours);
        self.entries = entries;
        Ok(())
    }

    /// Colour currently assigned to a tile index.
    pub fn colour_of(&self, index: u8) -> Rgba {
        self.entries[index as usize]
    }

    /// Byte view of the full table, `4 * PALETTE_SIZE` bytes, ready for a
    /// texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: [Rgba::UNSET; PALETTE_SIZE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);
    const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
    const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
    const YELLOW: Rgba = Rgba::new(255, 255, 0, 255);

    #[test]
    fn entries_map_tile_indices_to_colours() {
        let mut palette = Palette::new();
        palette
            .set_colours(&[RED, GREEN, BLUE, YELLOW])
            .expect("four colours fit");
        assert_eq!(palette.colour_of(0), RED);
        assert_eq!(palette.colour_of(1), GREEN);
        assert_eq!(palette.colour_of(2), BLUE);
        assert_eq!(palette.colour_of(3), YELLOW);
    }

    #[test]
    fn entries_past_supplied_length_reset_to_unset() {
        let mut palette = Palette::new();
        palette.set_colours(&[RED; PALETTE_SIZE]).unwrap();
        palette.set_colours(&[GREEN, BLUE]).unwrap();
        assert_eq!(palette.colour_of(0), GREEN);
        assert_eq!(palette.colour_of(1), BLUE);
        assert_eq!(palette.colour_of(2), Rgba::UNSET);
        assert_eq!(palette.colour_of(255), Rgba::UNSET);
    }

    #[test]
    fn oversized_input_is_rejected_and_table_unchanged() {
        let mut palette = Palette::new();
        palette.set_colours(&[RED]).unwrap();
        let too_many = vec![BLUE; PALETTE_SIZE + 1];
        assert_eq!(
            palette.set_colours(&too_many),
            Err(PaletteError::OutOfRange {
                len: PALETTE_SIZE + 1
            })
        );
        assert_eq!(palette.colour_of(0), RED);
    }

    #[test]
    fn exact_capacity_is_accepted() {
        let mut palette = Palette::new();
        assert!(palette.set_colours(&[BLUE; PALETTE_SIZE]).is_ok());
        assert_eq!(palette.colour_of(255), BLUE);
    }

    #[test]
    fn byte_view_is_rgba_order() {
        let mut palette = Palette::new();
        palette.set_colours(&[Rgba::new(1, 2, 3, 4)]).unwrap();
        let bytes = palette.as_bytes();
        assert_eq!(bytes.len(), 4 * PALETTE_SIZE);
        assert_eq!(&bytes[..4], &[1, 2, 3, 4]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 255]);
    }
}
