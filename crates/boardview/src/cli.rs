use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "boardview",
    author,
    version,
    about = "Windowed preview for the tile-board renderer"
)]
pub struct Args {
    /// Board dimensions in cells (e.g. `64x64`).
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "64x64")]
    pub board: String,

    /// Window size in physical pixels (e.g. `640x640`).
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "640x640")]
    pub size: String,

    /// Seed for the demo scribble; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a static pattern instead of the animated demo.
    #[arg(long)]
    pub frozen: bool,

    /// Log the achieved frame rate every SECONDS seconds.
    #[arg(long, value_name = "SECONDS")]
    pub log_fps: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_dimensions(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 64x64"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in dimension specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in dimension specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_dimensions() {
        assert_eq!(parse_dimensions("64x64").unwrap(), (64, 64));
        assert_eq!(parse_dimensions(" 128X96 ").unwrap(), (128, 96));
    }

    #[test]
    fn rejects_malformed_dimensions() {
        assert!(parse_dimensions("64").is_err());
        assert!(parse_dimensions("0x64").is_err());
        assert!(parse_dimensions("64xoops").is_err());
    }
}
