use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;

/// Render the living-image effect headlessly to a PNG sequence.
#[derive(Parser, Debug)]
#[command(name = "living-image", version)]
struct Cli {
    /// Input image (PNG, JPEG, ... or SVG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Effect config JSON; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Container width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Container height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seconds of animation to simulate.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Write only every K-th frame.
    #[arg(long, default_value_t = 1)]
    every: u32,

    /// Resize the container at a point in time, e.g. `4.5:800x600`. Repeatable.
    #[arg(long = "resize-at", value_parser = parse_resize)]
    resize_at: Vec<ResizeAt>,

    /// Log animation events to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug)]
struct ResizeAt {
    secs: f64,
    width: u32,
    height: u32,
}

fn parse_resize(s: &str) -> Result<ResizeAt, String> {
    let (secs, dims) = s
        .split_once(':')
        .ok_or_else(|| format!("expected SEC:WxH, got '{s}'"))?;
    let (w, h) = dims
        .split_once('x')
        .ok_or_else(|| format!("expected WxH after ':', got '{dims}'"))?;
    let secs: f64 = secs
        .parse()
        .map_err(|e| format!("bad time '{secs}': {e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("time must be >= 0, got {secs}"));
    }
    Ok(ResizeAt {
        secs,
        width: w.parse().map_err(|e| format!("bad width '{w}': {e}"))?,
        height: h.parse().map_err(|e| format!("bad height '{h}': {e}"))?,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();
    cmd_render(cli)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<living_image::EffectConfig> {
    let Some(path) = path else {
        return Ok(living_image::EffectConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    Ok(living_image::EffectConfig::from_json_reader(BufReader::new(f))?)
}

fn cmd_render(cli: Cli) -> anyhow::Result<()> {
    anyhow::ensure!(cli.fps > 0, "--fps must be > 0");
    anyhow::ensure!(cli.every > 0, "--every must be > 0");
    anyhow::ensure!(
        cli.seconds.is_finite() && cli.seconds >= 0.0,
        "--seconds must be >= 0"
    );

    let cfg = read_config(cli.config.as_deref())?;
    let image = living_image::load_image(&cli.in_path)?;

    let surface = living_image::CpuSurface::new(living_image::Canvas::new(cli.width, cli.height))?
        .with_paint(cfg.point_color)
        .with_clear_rgba(cfg.clear_rgba);
    let mut effect = living_image::LivingImage::new(&image, surface, &cfg)?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    let mut resizes = cli.resize_at.clone();
    resizes.sort_by(|a, b| a.secs.total_cmp(&b.secs));
    let mut resizes = resizes.into_iter().peekable();

    let dt = 1.0 / f64::from(cli.fps);
    let total = (cli.seconds * f64::from(cli.fps)).round() as u64;
    let mut written = 0u64;
    for frame in 0..total {
        effect.tick(dt);
        while let Some(r) = resizes.next_if(|r| r.secs <= effect.elapsed()) {
            effect.resize(r.width, r.height)?;
        }
        if frame % u64::from(cli.every) != 0 {
            continue;
        }

        effect.render_frame();
        effect.surface_mut().present();
        let out = effect.surface().to_frame();
        if out.data.is_empty() {
            // Zero-area container: nothing to encode.
            continue;
        }
        let path = cli.out_dir.join(format!("frame_{written:05}.png"));
        image::save_buffer_with_format(
            &path,
            &out.to_straight_rgba8(),
            out.width,
            out.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        written += 1;
    }

    eprintln!(
        "wrote {written} frames to {} ({} points, {} shuffles)",
        cli.out_dir.display(),
        effect.points().len(),
        effect.shuffles()
    );
    Ok(())
}
