use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use image::RgbaImage;

use stampbook::assets::atlas::build_atlas;
use stampbook::assets::preprocess::normalize_height;
use stampbook::assets::source::{load_atlas, load_stamp_dir};
use stampbook::deck::{build_profile, load_deck_stamps};
use stampbook::{
    AssetLibrary, AtlasSource, Point, PngPageDocument, Preprocessor,
    Shortcut, SourceBatch, StampBook, StampbookConfig,
};

#[derive(Parser, Debug)]
#[command(name = "stampbook", version)]
struct Cli {
    /// JSON config file; defaults apply to anything it leaves out.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preprocess stamps and write the processed rasters and thumbnails.
    Prepare(PrepareArgs),
    /// Pack a stamp directory into an atlas PNG plus JSON index.
    Atlas(AtlasArgs),
    /// Resize stamp files to a fixed height.
    Normalize(NormalizeArgs),
    /// Write a stream-deck profile with one hotkey button per stamp.
    Deck(DeckArgs),
    /// Replay a gesture script and export the finished page.
    Compose(ComposeArgs),
}

/// Where stamps come from: a directory of `1.png`..`13.png` or an atlas.
#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Directory holding the numbered stamp files.
    #[arg(long, conflicts_with_all = ["atlas", "index"])]
    stamps: Option<PathBuf>,

    /// Atlas raster.
    #[arg(long, requires = "index")]
    atlas: Option<PathBuf>,

    /// Atlas side-car JSON index.
    #[arg(long, requires = "atlas")]
    index: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PrepareArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AtlasArgs {
    /// Directory holding the numbered stamp files.
    #[arg(long)]
    stamps: PathBuf,

    /// Output atlas PNG.
    #[arg(long)]
    out_image: PathBuf,

    /// Output JSON index.
    #[arg(long)]
    out_index: PathBuf,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Directory holding the numbered stamp files.
    #[arg(long)]
    stamps: PathBuf,

    /// Target height in pixels; defaults to the configured normalize height.
    #[arg(long)]
    height: Option<u32>,

    /// Output directory. Files are rewritten in place when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DeckArgs {
    /// Directory holding the numbered stamp files.
    #[arg(long)]
    stamps: PathBuf,

    /// Output profile directory.
    #[arg(long)]
    out: PathBuf,

    /// Profile name shown on the device.
    #[arg(long, default_value = "Stamp Book")]
    name: String,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Gesture script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Exported page PNG; overrides the script's `output`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write the bare canvas (no paper, no margins) here.
    #[arg(long)]
    canvas_out: Option<PathBuf>,

    /// Upper bound on frames run after the script ends.
    #[arg(long, default_value_t = 100_000)]
    max_frames: usize,
}

/// A recorded session: gestures applied in order against a fresh page.
#[derive(serde::Deserialize, Debug)]
struct Script {
    #[serde(default)]
    seed: u64,
    actions: Vec<Action>,
    #[serde(default)]
    output: Option<PathBuf>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
enum Action {
    Select(usize),
    Shortcut(String),
    Click([f64; 2]),
    Erase([f64; 2]),
    Ticks(usize),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => StampbookConfig::from_json_file(path)?,
        None => StampbookConfig::default(),
    };
    match cli.cmd {
        Command::Prepare(args) => cmd_prepare(args, &config),
        Command::Atlas(args) => cmd_atlas(args),
        Command::Normalize(args) => cmd_normalize(args, &config),
        Command::Deck(args) => cmd_deck(args),
        Command::Compose(args) => cmd_compose(args, config),
    }
}

fn load_sources(args: &SourceArgs) -> anyhow::Result<SourceBatch> {
    match (&args.stamps, &args.atlas, &args.index) {
        (Some(dir), None, None) => Ok(load_stamp_dir(dir)),
        (None, Some(image_path), Some(index_path)) => {
            let src = AtlasSource {
                image_path: image_path.clone(),
                index_path: index_path.clone(),
            };
            Ok(load_atlas(&src, None)?)
        }
        _ => anyhow::bail!("pass either --stamps <dir> or --atlas <png> --index <json>"),
    }
}

fn report_failures(batch: &SourceBatch) {
    for f in &batch.failures {
        eprintln!("skipped {}: {}", f.file_name, f.reason);
    }
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

fn write_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir(parent)?;
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_prepare(args: PrepareArgs, config: &StampbookConfig) -> anyhow::Result<()> {
    let batch = load_sources(&args.source)?;
    report_failures(&batch);
    let library = AssetLibrary::build(batch, &Preprocessor::from_config(&config.preprocess));
    if library.is_empty() {
        anyhow::bail!("no stamps could be loaded");
    }

    let thumbs = args.out.join("thumbs");
    for asset in library.iter() {
        write_png(&asset.raster, &args.out.join(&asset.file_name))?;
        write_png(&asset.thumbnail, &thumbs.join(&asset.file_name))?;
    }
    eprintln!(
        "prepared {} stamps into {} ({} skipped)",
        library.len(),
        args.out.display(),
        library.failures().len()
    );
    Ok(())
}

fn cmd_atlas(args: AtlasArgs) -> anyhow::Result<()> {
    let batch = load_stamp_dir(&args.stamps);
    report_failures(&batch);
    let (atlas, index) = build_atlas(&batch.sources)?;
    write_png(&atlas, &args.out_image)?;
    let json = index.to_json_pretty()?;
    if let Some(parent) = args.out_index.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir(parent)?;
    }
    std::fs::write(&args.out_index, json)
        .with_context(|| format!("write atlas index '{}'", args.out_index.display()))?;
    eprintln!(
        "wrote {} ({} stamps) and {}",
        args.out_image.display(),
        index.entries.len(),
        args.out_index.display()
    );
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs, config: &StampbookConfig) -> anyhow::Result<()> {
    let height = args.height.unwrap_or(config.preprocess.normalize_height);
    anyhow::ensure!(height > 0, "--height must be > 0");
    let batch = load_stamp_dir(&args.stamps);
    report_failures(&batch);
    let out_dir = args.out.as_deref().unwrap_or(&args.stamps);
    for src in &batch.sources {
        let resized = normalize_height(&src.raster, height);
        write_png(&resized, &out_dir.join(&src.file_name))?;
    }
    eprintln!(
        "normalized {} stamps to {height}px into {}",
        batch.sources.len(),
        out_dir.display()
    );
    Ok(())
}

fn cmd_deck(args: DeckArgs) -> anyhow::Result<()> {
    let (stamps, failures) = load_deck_stamps(&args.stamps);
    for f in &failures {
        eprintln!("skipped {}: {}", f.file_name, f.reason);
    }
    let profile = build_profile(&args.name, &stamps)?;
    profile.write_to(&args.out)?;
    eprintln!(
        "wrote deck profile with {} buttons to {}",
        profile.manifest.keypad.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs, config: StampbookConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let script: Script = serde_json::from_str(&text)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;
    let out = args
        .out
        .or(script.output)
        .context("no output path: pass --out or set `output` in the script")?;

    let batch = load_sources(&args.source)?;
    report_failures(&batch);
    let library = AssetLibrary::build(batch, &Preprocessor::from_config(&config.preprocess));
    let dpi = config.page.export_dpi;
    let mut book = StampBook::new(library, config, script.seed)?;

    for action in script.actions {
        match action {
            Action::Select(idx) => {
                if !book.select(idx) {
                    tracing::warn!(idx, "no stamp at index");
                }
            }
            Action::Shortcut(text) => {
                let shortcut = Shortcut::parse(&text)
                    .with_context(|| format!("bad shortcut '{text}'"))?;
                book.shortcut(&shortcut);
            }
            Action::Click([x, y]) => {
                if book.click(Point::new(x, y)).is_none() {
                    tracing::warn!("click with no stamp selected");
                }
            }
            Action::Erase([x, y]) => {
                book.erase(Point::new(x, y));
            }
            Action::Ticks(n) => {
                for _ in 0..n {
                    book.tick();
                }
            }
        }
    }
    let frames = book.run_until_idle(args.max_frames);
    tracing::debug!(frames, "settled");

    if let Some(path) = &args.canvas_out {
        write_png(&book.render_export(), path)?;
    }
    let mut doc = PngPageDocument::new(&out, dpi)?;
    book.export(&mut doc)?;
    eprintln!(
        "placed {} stamps, progress {:.0}%, wrote {}",
        book.session().len(),
        book.progress().current(),
        out.display()
    );
    Ok(())
}
