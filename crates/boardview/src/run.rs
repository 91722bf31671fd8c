use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use renderer::{run_windowed, Board, CancelToken, Rgba, ViewOptions};
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_dimensions, Args};

/// Colours the demo scribbles with; tile indices past this stay unset.
const DEMO_COLOURS: [Rgba; 6] = [
    Rgba::new(16, 16, 24, 255),
    Rgba::new(235, 235, 225, 255),
    Rgba::new(214, 64, 69, 255),
    Rgba::new(66, 158, 88, 255),
    Rgba::new(63, 106, 204, 255),
    Rgba::new(233, 196, 68, 255),
];

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let (board_width, board_height) =
        parse_dimensions(&args.board).context("invalid --board value")?;
    let (window_width, window_height) =
        parse_dimensions(&args.size).context("invalid --size value")?;

    let mut board = Board::new(board_width, board_height);
    seed_pattern(&mut board);

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(
        board_width,
        board_height,
        seed,
        frozen = args.frozen,
        "starting boardview"
    );

    let options = ViewOptions {
        title: "boardview".to_string(),
        window_size: (window_width, window_height),
        colours: DEMO_COLOURS.to_vec(),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let frozen = args.frozen;
    let mut fps_meter = args.log_fps.map(FpsMeter::new);
    run_windowed(options, board, CancelToken::new(), move |board| {
        if let Some(meter) = fps_meter.as_mut() {
            if let Some(fps) = meter.tick(Instant::now()) {
                tracing::info!(fps = (fps * 10.0).round() / 10.0, "frame rate");
            }
        }
        if frozen {
            return false;
        }
        // Rewrite one random cell per frame so the tile-update path stays
        // busy without dragging the rule engine in.
        let x = rng.gen_range(0..board.width());
        let y = rng.gen_range(0..board.height());
        let tile = rng.gen_range(0..DEMO_COLOURS.len()) as u8;
        board.set(x, y, tile);
        true
    })
}

/// Checkerboard with a one-cell border so a frozen window still shows the
/// palette mapping at a glance.
fn seed_pattern(board: &mut Board) {
    let (width, height) = (board.width(), board.height());
    for y in 0..height {
        for x in 0..width {
            let tile = if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                2
            } else {
                ((x + y) % 2) as u8
            };
            board.set(x, y, tile);
        }
    }
}

/// Counts frames and reports the average rate once per logging window.
struct FpsMeter {
    interval: Duration,
    frames: u64,
    window_start: Option<Instant>,
}

impl FpsMeter {
    fn new(cadence_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(cadence_secs.max(1)),
            frames: 0,
            window_start: None,
        }
    }

    /// Records one frame. Returns the average frames per second when a full
    /// logging window has elapsed, then starts the next window.
    fn tick(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.duration_since(start);
        if elapsed < self.interval {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = Some(now);
        Some(fps)
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_pattern_uses_only_demo_tiles() {
        let mut board = Board::new(8, 8);
        seed_pattern(&mut board);
        assert!(board
            .tiles()
            .iter()
            .all(|&tile| (tile as usize) < DEMO_COLOURS.len()));
    }

    #[test]
    fn fps_meter_reports_once_per_window() {
        let mut meter = FpsMeter::new(2);
        let start = Instant::now();

        assert_eq!(meter.tick(start), None);
        assert_eq!(meter.tick(start + Duration::from_secs(1)), None);

        let fps = meter
            .tick(start + Duration::from_secs(2))
            .expect("window elapsed");
        assert!((fps - 1.5).abs() < 1e-9, "got {fps}");

        // The next window starts fresh.
        assert_eq!(meter.tick(start + Duration::from_secs(3)), None);
    }

    #[test]
    fn fps_meter_clamps_a_zero_cadence() {
        let mut meter = FpsMeter::new(0);
        let start = Instant::now();
        assert_eq!(meter.tick(start), None);
        assert!(meter.tick(start + Duration::from_secs(1)).is_some());
    }

    #[test]
    fn seed_pattern_draws_the_border() {
        let mut board = Board::new(4, 4);
        seed_pattern(&mut board);
        assert_eq!(board.get(0, 0), 2);
        assert_eq!(board.get(3, 3), 2);
        assert_eq!(board.get(1, 1), 0);
        assert_eq!(board.get(2, 1), 1);
    }
}
