use clap::{Parser, Subcommand};
use overlay_compare::geometry::Size;
use overlay_compare::scale::PictureScaleModel;
use overlay_compare::{config, imaging, output, script};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "overlay-compare")]
#[command(about = "Fit and zoom two stacked photos for side-by-side comparison")]
#[command(long_about = "\
Fit and zoom two stacked photos for side-by-side comparison

Each photo is fitted into the display frame (aspect fit). A pinch gesture
zooms both photos together and the top photo's opacity can be faded between
0 and 1.

Scales are contents scales: source pixels per displayed point, so a larger
scale draws the photo smaller. A pinch keeps the scale within [1, fit + 2].

Replay scripts are TOML files with [[step]] tables:

  [[step]]
  action = \"frame\"        # width, height
  [[step]]
  action = \"picture\"      # role = \"bottom\"|\"top\", path or width + height
  [[step]]
  action = \"pinch\"        # scale (raw recognizer value, 1 = no change)
  [[step]]
  action = \"opacity\"      # value
  [[step]]
  action = \"clear\"        # role

Run 'overlay-compare gen-config' to generate a documented overlay.toml.")]
#[command(version)]
struct Cli {
    /// Config file (ignored when missing)
    #[arg(long, default_value = "overlay.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct FitArgs {
    /// Image file to probe
    #[arg(required_unless_present = "image")]
    path: Option<PathBuf>,

    /// Image size instead of a file, as WIDTHxHEIGHT
    #[arg(long, conflicts_with = "path")]
    image: Option<Size>,

    /// Frame size as WIDTHxHEIGHT (defaults to the configured frame)
    #[arg(long)]
    frame: Option<Size>,
}

#[derive(clap::Args)]
struct ReplayArgs {
    /// Script file
    script: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show how a picture fits into a frame
    Fit(FitArgs),
    /// Replay a scripted comparison session
    Replay(ReplayArgs),
    /// Print a stock overlay.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Fit(args) => {
            let config = config::load_config(&cli.config)?;
            let frame = args.frame.unwrap_or_else(|| config.frame.size());
            let (image, source) = match (&args.path, args.image) {
                (Some(path), _) => {
                    let probed = imaging::probe(path)?;
                    (probed.upright, Some(path.display().to_string()))
                }
                (None, Some(image)) => (image, None),
                (None, None) => return Err("either an image path or --image is required".into()),
            };
            let model = PictureScaleModel::new(image, frame)?;
            output::print_fit(&model, source.as_deref());
        }
        Command::Replay(args) => {
            let config = config::load_config(&cli.config)?;
            let loaded = script::load_script(&args.script)?;
            let base_dir = args.script.parent().unwrap_or(Path::new("."));
            let report = script::replay(&loaded, &config, base_dir)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_replay(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
