use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use argh::FromArgs;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use flocklines::canvas::Canvas;
use flocklines::config::{Settings, SketchKind};
use flocklines::draw::{Blank, Surface};
use flocklines::penplot;
use flocklines::random::Random;
use flocklines::sketch::{self, Artifact, RenderParams};

#[derive(FromArgs)]
/// Render a generative sketch to plotter-ready SVG frames.
struct Args {
    /// sketch to run: murmuration, lichen, waves or moon
    #[argh(positional)]
    sketch: Option<SketchKind>,

    /// JSON settings file used instead of the built-in preset
    #[argh(option)]
    config: Option<PathBuf>,

    /// random seed, the same seed redraws the same picture
    #[argh(option)]
    seed: Option<u64>,

    /// frames to render, defaults to one loop of the sketch
    #[argh(option)]
    frames: Option<usize>,

    /// output directory
    #[argh(option, default = "PathBuf::from(\"frames\")")]
    out: PathBuf,

    /// also rasterize every frame to PNG
    #[argh(switch)]
    png: bool,

    /// only write the final frame
    #[argh(switch)]
    last_only: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("could not load settings from {}", path.display()))?,
        None => Settings::preset(args.sketch.unwrap_or(SketchKind::Murmuration)),
    };
    if let Some(kind) = args.sketch {
        settings.sketch = kind;
    }
    Ok(settings)
}

fn output_path(
    out: &Path,
    settings: &Settings,
    seed: u64,
    frame: usize,
    extension: &str,
) -> PathBuf {
    out.join(format!(
        "{}-{}-{:0>8}{}",
        settings.sketch.name(),
        seed,
        frame,
        extension
    ))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();
    let mut settings = load_settings(&args)?;
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(Random::fresh_seed);
    settings.seed = Some(seed);
    info!(seed, "rerun with --seed {seed} to reproduce");

    fs::create_dir_all(&args.out)
        .with_context(|| format!("could not create {}", args.out.display()))?;

    let mut sketch = sketch::build(&settings, Random::new(seed))?;
    let mut canvas = if args.png {
        Some(Canvas::new(
            &settings.page,
            settings.pixels_per_unit,
            settings.paper_colour()?,
        ))
    } else {
        None
    };
    let mut blank = Blank;

    let frames = args.frames.unwrap_or_else(|| settings.frame_count());
    let pbar = ProgressBar::new(frames as u64);
    pbar.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}/{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )?);

    for frame in 0..frames {
        let params = RenderParams {
            page: &settings.page,
            playhead: settings.playhead(frame % settings.frame_count()),
            frame,
        };
        let surface: &mut dyn Surface = match canvas.as_mut() {
            Some(canvas) => canvas,
            None => &mut blank,
        };
        let artifacts = sketch.render(&params, surface);

        if !args.last_only || frame + 1 == frames {
            for artifact in artifacts {
                match artifact {
                    Artifact::Canvas => {
                        if let Some(canvas) = &canvas {
                            let path = output_path(&args.out, &settings, seed, frame, ".png");
                            canvas.save(&path)?;
                            debug!(path = %path.display(), "wrote raster");
                        }
                    }
                    Artifact::File { data, extension } => {
                        let path = output_path(&args.out, &settings, seed, frame, extension);
                        penplot::save(&path, &data)?;
                        debug!(path = %path.display(), "wrote plot");
                    }
                }
            }
        }
        pbar.inc(1);
    }
    pbar.finish_with_message("done");
    info!(frames, out = %args.out.display(), "finished");
    Ok(())
}
