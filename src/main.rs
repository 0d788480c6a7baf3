use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use photo_collage::{Layout, OutputFormat, ScaleMode, TargetSize, create_collage, encode, load_images};

/// Photo collage generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Images to combine (png, jpg, jpeg, gif, webp)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Layout: grid, horizontal, vertical, random, diagonal or circular
    #[arg(short, long, default_value = "grid")]
    layout: String,

    /// Scaling mode: fit, fill or stretch
    #[arg(short, long, default_value = "fit")]
    scale_mode: String,

    /// Tile size as WIDTHxHEIGHT (e.g. 800x600); defaults to the largest input dimensions
    #[arg(long)]
    size: Option<String>,

    /// Output format: jpeg or webp
    #[arg(short, long, default_value = "jpeg")]
    format: String,

    /// Output file path [default: collage.jpg or collage.webp]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random layout
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let layout = Layout::from_name(&args.layout);
    let scale_mode = ScaleMode::from_name(&args.scale_mode);
    let format = OutputFormat::from_name(&args.format);
    let target = args.size.as_deref().map(str::parse::<TargetSize>).transpose()?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("collage.{}", format.extension())));

    println!("Photo Collage Generator");
    println!("=======================");
    println!("Input files:  {}", args.files.len());
    println!("Layout:       {layout}");
    println!("Scale mode:   {scale_mode:?}");
    match target {
        Some(size) => println!("Tile size:    {size}"),
        None => println!("Tile size:    (largest input)"),
    }
    println!("Output:       {} ({})", output.display(), format.mime_type());
    println!();

    let images = load_images(&args.files).context("Failed to load input images")?;
    info!("Loaded {} images", images.len());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let collage = create_collage(&images, layout, scale_mode, target, &mut rng)?;
    let bytes = encode(&collage, format)?;
    fs::write(&output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✓ Collage generated: {} ({}x{})", output.display(), collage.width(), collage.height());

    Ok(())
}
