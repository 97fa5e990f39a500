use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use morphfield::headless::{self, HeadlessOptions};
use morphfield::{window, CanvasSize, DustConfig, MorphConfig, Vec2};

#[derive(Parser)]
#[command(name = "morphfield")]
#[command(about = "A particle cloud that condenses into text as you scroll", long_about = None)]
#[command(version)]
struct Cli {
    /// Text the particles form
    #[arg(default_value = "HELLO")]
    text: String,

    /// Canvas width in pixels (logical pixels for the window)
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels (logical pixels for the window)
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Fixed font size; derived from the width when omitted
    #[arg(long)]
    font_size: Option<f32>,

    /// Sampling grid gap in pixels; derived from the width when omitted
    #[arg(long)]
    gap: Option<u32>,

    /// RNG seed for a reproducible cloud
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the ambient dust layer behind the text
    #[arg(long)]
    dust: bool,

    /// Render PNG frames instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Write every n-th frame in headless mode
    #[arg(long, default_value_t = 60)]
    every: u32,

    /// Output directory for headless frames
    #[arg(long, default_value = "frames")]
    out: PathBuf,

    /// Morph progress held during a headless run (0 = cloud, 1 = text)
    #[arg(long, default_value_t = 1.0)]
    progress: f32,

    /// Fixed pointer position "X,Y" for a headless run
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Vec2>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {:?}", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {}", e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {}", e))?;
    Ok(Vec2::new(x, y))
}

impl Cli {
    fn config(&self) -> MorphConfig {
        let mut config = MorphConfig::default();
        if let Some(font_size) = self.font_size {
            config = config.with_font_size(font_size);
        }
        if let Some(gap) = self.gap {
            config = config.with_sample_gap(gap);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.dust {
            config = config.with_dust(DustConfig::default());
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.config();
    let size = CanvasSize::new(cli.width, cli.height);

    let result = if cli.headless {
        let options = HeadlessOptions::default()
            .with_size(size)
            .with_frames(cli.frames)
            .with_every(cli.every)
            .with_progress(cli.progress)
            .with_pointer(cli.pointer);
        headless::render_frames(config, &cli.text, &options, &cli.out)
            .map(|paths| println!("wrote {} frames to {}", paths.len(), cli.out.display()))
            .map_err(|e| e.to_string())
    } else {
        window::run(config, cli.text.clone(), size).map_err(|e| e.to_string())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
