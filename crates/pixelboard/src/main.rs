#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc, clippy::must_use_candidate, clippy::needless_pass_by_value)]

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use pixelboard_engine::image_io::ImportOptions;

use crate::commands::{OutputArgs, ScoreArgs};

mod commands;
mod options;
mod remote;

pub use options::*;

pub type BoardResult<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(version, about = "Renders and uploads scoreboard frames for LED matrix panels")]
pub struct Cli {
    #[arg(help = "Options file to use instead of the stored one", long, global = true)]
    config: Option<PathBuf>,

    #[arg(help = "Directory holding the glyph and image assets", long, global = true)]
    assets: Option<PathBuf>,

    #[arg(help = "Backend base URL", long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Render the scoreboard and write it in the requested formats")]
    Render {
        #[command(flatten)]
        scores: ScoreArgs,
        #[command(flatten)]
        out: OutputArgs,
        #[arg(help = "Send the config and the packed frame to the backend", long, default_value_t = false)]
        upload: bool,
    },

    #[command(about = "Refresh the clock periodically, uploading every frame")]
    Watch {
        #[command(flatten)]
        scores: ScoreArgs,
        #[arg(help = "Seconds between frames", long, default_value_t = 1)]
        interval: u64,
        #[arg(help = "Only render locally", long, default_value_t = false)]
        no_upload: bool,
    },

    #[command(about = "Decode a packed binary and show or convert it")]
    Decode {
        path: PathBuf,
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
        #[command(flatten)]
        out: OutputArgs,
    },

    #[command(about = "Upload a packed binary to the backend")]
    Upload { path: PathBuf },

    #[command(about = "Fetch the frame rendered by the backend")]
    Fetch {
        #[command(flatten)]
        out: OutputArgs,
    },

    #[command(about = "Convert a PNG into a bitlines JSON asset")]
    PngToJson {
        input: PathBuf,
        output: PathBuf,
        #[arg(help = "Light dark pixels instead of white ones", long, default_value_t = false)]
        invert: bool,
        #[arg(help = "Resize before thresholding, as WIDTHxHEIGHT", long, value_parser = commands::parse_dimensions)]
        resize: Option<(u32, u32)>,
        #[arg(help = "Luma a pixel needs to count as white", long, default_value_t = 255)]
        threshold: u8,
    },

    #[command(about = "Convert a bitlines JSON asset into a PNG")]
    JsonToPng { input: PathBuf, output: PathBuf },

    #[command(about = "Store the effective options as the defaults")]
    SaveOptions,
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "pixelboard") {
        let dir = proj_dirs.config_dir().to_path_buf();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<LoggerHandle> {
    let Some(log_dir) = get_log_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let logger = Logger::try_with_env_or_str("info, reqwest=warn, hyper=warn").ok()?;
    match logger
        .log_to_file(FileSpec::default().directory(&log_dir).basename("pixelboard").suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .start()
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn load_options(cli: &Cli) -> BoardResult<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::load_from(path)?,
        None => Options::load_options()?,
    };
    if let Some(assets) = &cli.assets {
        options.asset_dir.clone_from(assets);
    }
    if let Some(backend) = &cli.backend {
        options.backend_url.clone_from(backend);
    }
    Ok(options)
}

fn run(cli: Cli) -> BoardResult<()> {
    let options = load_options(&cli)?;
    match cli.command {
        Commands::Render { scores, out, upload } => commands::render(&options, &scores, &out, upload),
        Commands::Watch { scores, interval, no_upload } => commands::watch(&options, &scores, Duration::from_secs(interval.max(1)), !no_upload),
        Commands::Decode { path, width, height, out } => commands::decode(&options, &path, width, height, &out),
        Commands::Upload { path } => commands::upload(&options, &path),
        Commands::Fetch { out } => commands::fetch(&options, &out),
        Commands::PngToJson {
            input,
            output,
            invert,
            resize,
            threshold,
        } => commands::png_to_json(&input, &output, &ImportOptions { invert, resize, threshold }),
        Commands::JsonToPng { input, output } => commands::json_to_png(&input, &output),
        Commands::SaveOptions => {
            options.store_options()?;
            if let Some(path) = Options::config_path() {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logger = start_logger();

    log::info!("Starting pixelboard {}", env!("CARGO_PKG_VERSION"));
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
