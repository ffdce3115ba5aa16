use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docclean::{bitmap, Mode, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "docclean")]
#[command(about = "Binarize a photographed document via adaptive thresholding")]
#[command(version)]
pub struct Args {
    /// Input image file
    pub input: PathBuf,

    /// Output image file
    #[arg(short, long, default_value = "enhanced.png")]
    pub output: PathBuf,

    /// Enhancement mode ("simple" or "background")
    #[arg(long, env = "DOCCLEAN_MODE", default_value = "simple")]
    pub mode: String,

    /// Print per-stage timings as JSON to stdout
    #[arg(long)]
    pub timings: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mode = Mode::from_str(&args.mode)
        .with_context(|| format!("unknown mode: {}", args.mode))?;

    tracing::info!(
        "docclean v{} enhancing {} ({})",
        env!("CARGO_PKG_VERSION"),
        args.input.display(),
        mode.as_str()
    );

    let decoded = image::open(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let input = bitmap::from_dynamic(&decoded)?;

    let result = Pipeline::new(mode).enhance(input)?;

    if args.timings {
        println!("{}", serde_json::to_string_pretty(&result.steps)?);
    }

    let output = bitmap::to_rgba8(&result.image)?;
    output
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        "Wrote {} in {}ms",
        args.output.display(),
        result.total_time_ms
    );

    Ok(())
}
