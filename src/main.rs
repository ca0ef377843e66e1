use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glam::DVec2;

use morph_space::{
    ColorDirectory, NamedColors, NoNamedColors, Settings, ShapeFrame, ShapeSpace,
    StereoSoundSpace, renderer,
};

#[derive(Parser, Debug)]
#[command(name = "morph-space", version)]
struct Cli {
    /// Settings JSON; defaults are used when omitted.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend a shape space and describe the resulting primitives.
    Shape(ShapeArgs),
    /// Blend a sound space and render the sound to a WAV file.
    Sound(SoundArgs),
}

#[derive(Parser, Debug)]
struct ShapeArgs {
    /// Input shape space text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parameter value to blend at.
    #[arg(long, allow_negative_numbers = true)]
    parameter: f64,

    /// Level directory holding a `colors/` directory of named colors.
    #[arg(long)]
    level_dir: Option<PathBuf>,

    /// Print the primitives as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SoundArgs {
    /// Input sound space text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parameter value to blend at.
    #[arg(long, allow_negative_numbers = true)]
    parameter: f64,

    /// Output WAV path.
    #[arg(long)]
    out: PathBuf,

    /// Output sample rate in Hz; overrides the settings file.
    #[arg(long)]
    sample_rate: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    match cli.cmd {
        Command::Shape(args) => cmd_shape(args, &settings),
        Command::Sound(args) => cmd_sound(args, &settings),
    }
}

fn open_input(path: &Path) -> anyhow::Result<BufReader<File>> {
    let f = File::open(path).with_context(|| format!("open space '{}'", path.display()))?;
    Ok(BufReader::new(f))
}

fn cmd_shape(args: ShapeArgs, settings: &Settings) -> anyhow::Result<()> {
    let level_dir = args.level_dir.as_ref().or(settings.level_dir.as_ref());
    let colors: Box<dyn NamedColors> = match level_dir {
        Some(dir) => Box::new(ColorDirectory::for_level(dir)),
        None => Box::new(NoNamedColors),
    };

    let space = ShapeSpace::from_reader(open_input(&args.in_path)?, colors.as_ref())
        .with_context(|| format!("parse shape space '{}'", args.in_path.display()))?;
    let frame = space
        .drawable_primitives(args.parameter)
        .context("shape space has no control points")?;

    if args.json {
        let json = serde_json::to_string_pretty(&frame).context("serialize primitives")?;
        println!("{json}");
    } else {
        print_shape_summary(&frame);
    }
    Ok(())
}

fn print_shape_summary(frame: &ShapeFrame) {
    println!("rotation rate: {} rad/s", frame.rotation_rate);
    println!("primitives: {}", frame.primitives.len());
    for (i, primitive) in frame.primitives.iter().enumerate() {
        let vertices = primitive.tessellate(1.0, 0.0, DVec2::ZERO);
        println!(
            "  [{i}] triangles={} border={} width={} radius={:.3} vertices={} bytes={}",
            primitive.triangles.len() / 3,
            primitive.border.len(),
            primitive.border_width,
            primitive.border_max_distance(DVec2::ZERO),
            vertices.len(),
            renderer::as_bytes(&vertices).len(),
        );
    }
}

fn cmd_sound(args: SoundArgs, settings: &Settings) -> anyhow::Result<()> {
    let space = StereoSoundSpace::from_reader(open_input(&args.in_path)?)
        .with_context(|| format!("parse sound space '{}'", args.in_path.display()))?;

    let sample_rate = args.sample_rate.unwrap_or(settings.sample_rate);
    let mut sound = space
        .playable_sound(args.parameter, sample_rate)
        .context("sound space has no control points")?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&args.out, spec)
        .with_context(|| format!("create WAV '{}'", args.out.display()))?;

    let volume = settings.effective_volume();
    let chunk_size = settings.effective_chunk_size();
    while !sound.is_finished() {
        for sample in sound.more_samples(chunk_size).interleaved() {
            writer
                .write_sample(sample * volume)
                .context("write WAV sample")?;
        }
    }
    writer.finalize().context("finalize WAV")?;

    log::info!(
        "Wrote {} samples ({}s at {} Hz) to {}",
        sound.total_samples(),
        sound.duration_seconds(),
        sample_rate,
        args.out.display()
    );
    Ok(())
}
