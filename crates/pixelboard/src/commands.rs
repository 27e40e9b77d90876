use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::Context;
use clap::Args;
use pixelboard_engine::{
    codec::{self, pack_whole},
    formats::{BitLines, LedArrayDocument},
    image_io::{self, ImportOptions},
    scoreboard::format_clock,
    AssetStore, Bitmap, ClockUpdater, PackedBitmap, PixelBuffer, Scoreboard,
};

use crate::{remote::RemoteClient, BoardResult, Options};

#[derive(Args, Debug, Clone, Default)]
pub struct ScoreArgs {
    #[arg(long, help = "Home team name")]
    pub home: Option<String>,

    #[arg(long, help = "Home team score (0-9)", allow_negative_numbers = true)]
    pub home_score: Option<i64>,

    #[arg(long, help = "Away team name")]
    pub away: Option<String>,

    #[arg(long, help = "Away team score (0-9)", allow_negative_numbers = true)]
    pub away_score: Option<i64>,

    #[arg(long, help = "Clock text (HH:MM), defaults to the local time")]
    pub clock: Option<String>,

    #[arg(long, help = "Image asset shown in the logo slot")]
    pub logo: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(long, help = "Write the folded packed binary")]
    pub bin: Option<PathBuf>,

    #[arg(long, help = "Write the unfolded bitlines JSON")]
    pub json: Option<PathBuf>,

    #[arg(long, help = "Write the width/height/data JSON")]
    pub led_json: Option<PathBuf>,

    #[arg(long, help = "Write a PNG preview")]
    pub png: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Don't print the terminal preview")]
    pub quiet: bool,
}

fn scoreboard_from_args(args: &ScoreArgs) -> Scoreboard {
    let mut board = Scoreboard::new();
    if let Some(home) = &args.home {
        let rejected = board.set_home_team(home);
        if !rejected.is_empty() {
            log::warn!("Removed unsupported characters from home team: {rejected:?}");
        }
    }
    if let Some(away) = &args.away {
        let rejected = board.set_away_team(away);
        if !rejected.is_empty() {
            log::warn!("Removed unsupported characters from away team: {rejected:?}");
        }
    }
    board.set_home_score(args.home_score);
    board.set_away_score(args.away_score);
    board
}

fn current_clock(args: &ScoreArgs) -> String {
    args.clock.clone().unwrap_or_else(|| format_clock(&chrono::Local::now()))
}

fn load_logo(store: &AssetStore, name: Option<&str>) -> Option<Bitmap> {
    let name = name?;
    match store.load_image(name) {
        Ok(logo) => Some(logo),
        Err(err) => {
            log::warn!("Logo '{name}' not drawn: {err}");
            None
        }
    }
}

struct Frame {
    board: Scoreboard,
    logo: Option<Bitmap>,
    buffer: PixelBuffer,
    /// Clock text drawn into `buffer`.
    clock: String,
}

fn render_frame(options: &Options, store: &AssetStore, args: &ScoreArgs) -> Frame {
    let board = scoreboard_from_args(args);
    let logo = load_logo(store, args.logo.as_deref().or(options.logo.as_deref()));
    let mut buffer = options.layout.create_buffer();
    let clock = current_clock(args);
    board.render(&mut buffer, &options.layout, store, logo.as_ref(), &clock);
    Frame { board, logo, buffer, clock }
}

fn write_outputs(options: &Options, buffer: &PixelBuffer, out: &OutputArgs) -> BoardResult<()> {
    if let Some(path) = &out.bin {
        let packed = codec::pack(buffer, options.output_width, options.output_height)?;
        fs::write(path, packed.bytes()).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} bytes to {}", packed.bytes().len(), path.display());
    }
    if let Some(path) = &out.json {
        pack_whole(buffer).save(path)?;
        log::info!("Wrote bitlines to {}", path.display());
    }
    if let Some(path) = &out.led_json {
        fs::write(path, LedArrayDocument::from_buffer(buffer).to_json(true)?)?;
        log::info!("Wrote LED array to {}", path.display());
    }
    if let Some(path) = &out.png {
        image_io::buffer_to_image(buffer, &options.geometry()).save(path)?;
        log::info!("Wrote preview to {}", path.display());
    }
    if !out.quiet {
        println!("{buffer}");
    }
    Ok(())
}

pub fn render(options: &Options, scores: &ScoreArgs, out: &OutputArgs, upload: bool) -> BoardResult<()> {
    let store = AssetStore::new(&options.asset_dir);
    let frame = render_frame(options, &store, scores);
    write_outputs(options, &frame.buffer, out)?;

    if upload {
        let client = RemoteClient::new(&options.backend_url);
        let logo_name = scores.logo.clone().or_else(|| options.logo.clone());
        client.send_config(&frame.board.config_payload(logo_name))?;
        client.upload(&codec::pack(&frame.buffer, options.output_width, options.output_height)?)?;
        log::info!("Uploaded frame to {}", options.backend_url);
    }
    Ok(())
}

/// Keeps the clock current and pushes a frame every `interval`, until interrupted.
pub fn watch(options: &Options, scores: &ScoreArgs, interval: Duration, upload: bool) -> BoardResult<()> {
    let store = AssetStore::new(&options.asset_dir);
    let mut frame = render_frame(options, &store, scores);
    let mut clock = ClockUpdater::new();
    clock.remember(&frame.clock);
    log::info!("Watching scoreboard (logo: {})", if frame.logo.is_some() { "yes" } else { "no" });

    let client = RemoteClient::new(&options.backend_url);
    loop {
        if clock.update(&mut frame.buffer, &options.layout, &store, &current_clock(scores)) {
            log::info!("Clock changed to {}", clock.last().unwrap_or_default());
        }
        if upload {
            let packed = codec::pack(&frame.buffer, options.output_width, options.output_height)?;
            if let Err(err) = client.upload(&packed) {
                log::error!("{err:#}");
            }
        }
        thread::sleep(interval);
    }
}

pub fn decode(options: &Options, path: &Path, width: Option<usize>, height: Option<usize>, out: &OutputArgs) -> BoardResult<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let packed = PackedBitmap::from_bytes(bytes, width.unwrap_or(options.output_width), height.unwrap_or(options.output_height))?;
    let buffer = codec::unpack(&packed);
    let info = buffer.info();
    log::info!("Decoded {}x{} frame, {} of {} LEDs on", info.width, info.height, info.leds_on, info.total);
    write_outputs(options, &buffer, &OutputArgs { bin: None, ..out.clone() })
}

pub fn upload(options: &Options, path: &Path) -> BoardResult<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let packed = PackedBitmap::from_bytes(bytes, options.output_width, options.output_height)?;
    let result = RemoteClient::new(&options.backend_url).upload(&packed)?;
    println!("{result}");
    Ok(())
}

pub fn fetch(options: &Options, out: &OutputArgs) -> BoardResult<()> {
    let packed = RemoteClient::new(&options.backend_url).fetch_display(options.output_width, options.output_height)?;
    if let Some(path) = &out.bin {
        fs::write(path, packed.bytes())?;
    }
    write_outputs(options, &codec::unpack(&packed), &OutputArgs { bin: None, ..out.clone() })
}

/// Parses `WxH`.
pub fn parse_dimensions(text: &str) -> Result<(u32, u32), String> {
    let (w, h) = text.split_once(['x', 'X']).ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{text}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    if w == 0 || h == 0 {
        return Err("dimensions must be positive".to_string());
    }
    Ok((w, h))
}

pub fn png_to_json(input: &Path, output: &Path, options: &ImportOptions) -> BoardResult<()> {
    let lines = image_io::load_bitlines_from_image(input, options)?;
    lines.save(output)?;
    log::info!("{} converted to {}", input.display(), output.display());
    Ok(())
}

pub fn json_to_png(input: &Path, output: &Path) -> BoardResult<()> {
    let lines = BitLines::load(input)?;
    image_io::image_from_bitlines(&lines).save(output)?;
    log::info!("{} converted to {}", input.display(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("24x24"), Ok((24, 24)));
        assert_eq!(parse_dimensions("35X20"), Ok((35, 20)));
        assert!(parse_dimensions("24").is_err());
        assert!(parse_dimensions("0x5").is_err());
        assert!(parse_dimensions("ax5").is_err());
    }

    #[test]
    fn test_scoreboard_from_args() {
        let args = ScoreArgs {
            home: Some("Kashima".to_string()),
            home_score: Some(11),
            ..Default::default()
        };
        let board = scoreboard_from_args(&args);
        assert_eq!(board.home_team(), "ASHIMA");
        assert_eq!(board.home_score(), Some(9));
        assert_eq!(board.away_score(), None);
    }

    #[test]
    fn test_frame_keeps_drawn_clock() {
        let options = Options {
            asset_dir: std::env::temp_dir().join(format!("pixelboard_no_assets_{}", std::process::id())),
            ..Default::default()
        };
        let store = AssetStore::new(&options.asset_dir);
        let frame = render_frame(&options, &store, &ScoreArgs::default());
        assert_eq!(frame.clock.len(), 5);

        let fixed = ScoreArgs {
            clock: Some("12:34".to_string()),
            ..Default::default()
        };
        assert_eq!(render_frame(&options, &store, &fixed).clock, "12:34");

        let mut clock = ClockUpdater::new();
        clock.remember(&frame.clock);
        let mut buffer = frame.buffer.clone();
        assert!(!clock.update(&mut buffer, &options.layout, &store, &frame.clock));
        assert_eq!(buffer, frame.buffer);
    }
}
