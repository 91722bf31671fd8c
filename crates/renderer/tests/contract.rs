//! CPU-side contract tests for the board/palette/scheduler public API.
//! GPU-interactive behaviour is exercised by running `boardview`.

use renderer::{Board, CancelToken, FrameScheduler, Palette, PaletteError, Rgba, PALETTE_SIZE};

const RED: Rgba = Rgba::new(255, 0, 0, 255);
const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
const YELLOW: Rgba = Rgba::new(255, 255, 0, 255);

#[test]
fn two_by_two_scenario_maps_tiles_to_colours() {
    let mut board = Board::new(2, 2);
    board.tiles_mut().copy_from_slice(&[0, 1, 2, 3]);

    let mut palette = Palette::new();
    palette.set_colours(&[RED, GREEN, BLUE, YELLOW]).unwrap();

    let expected = [RED, GREEN, BLUE, YELLOW];
    for y in 0..2 {
        for x in 0..2 {
            let tile = board.get(x, y);
            assert_eq!(palette.colour_of(tile), expected[(y * 2 + x) as usize]);
        }
    }
}

#[test]
fn resize_gives_a_fresh_zero_board() {
    let mut board = Board::new(64, 64);
    board.set(10, 10, 200);
    board.resize(128, 128);
    assert_eq!(board.tiles().len(), 128 * 128);
    assert!(board.tiles().iter().all(|&tile| tile == 0));
}

#[test]
fn oversized_palette_is_rejected_without_side_effects() {
    let mut palette = Palette::new();
    palette.set_colours(&[RED, GREEN]).unwrap();

    let result = palette.set_colours(&vec![BLUE; PALETTE_SIZE + 1]);
    assert_eq!(
        result,
        Err(PaletteError::OutOfRange {
            len: PALETTE_SIZE + 1
        })
    );
    assert_eq!(palette.colour_of(0), RED);
    assert_eq!(palette.colour_of(1), GREEN);
}

#[test]
fn palette_remap_changes_exactly_the_remapped_indices() {
    let mut first = Palette::new();
    first.set_colours(&[RED, GREEN, BLUE]).unwrap();
    let mut second = Palette::new();
    second.set_colours(&[RED, YELLOW, BLUE]).unwrap();

    assert_eq!(first.colour_of(0), second.colour_of(0));
    assert_ne!(first.colour_of(1), second.colour_of(1));
    assert_eq!(first.colour_of(2), second.colour_of(2));
}

#[test]
fn cancelled_scheduler_stops_rearming() {
    let token = CancelToken::new();
    let mut scheduler = FrameScheduler::new(token.clone());

    let mut frames = 0;
    while scheduler.arm() {
        frames += 1;
        if frames == 5 {
            token.cancel();
        }
    }
    assert_eq!(frames, 5);
    assert!(!scheduler.arm());
}
