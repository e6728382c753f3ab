use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use mapposter::capture::{CapturePipeline, CaptureSettings};
use mapposter::config::PosterConfig;
use mapposter::domain::{FONT_FAMILIES, ICONS, MAP_STYLES, OUTPUT_SIZES, Size};
use mapposter::fonts::FontCatalog;
use mapposter::render::Basemap;
use mapposter::session::SceneDescription;

#[derive(Parser, Debug)]
#[command(name = "mapposter", version, about = "Compose map posters and export them for print")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene file to a print-resolution PNG
    Render {
        /// Scene description (JSON)
        scene: PathBuf,
        /// Output size name, e.g. 18x24
        #[arg(long)]
        size: Option<String>,
        /// Container the print viewport is fitted into, e.g. 1200x800
        #[arg(long, value_parser = parse_container)]
        container: Option<Size>,
        /// Directory the PNG is written to
        #[arg(long)]
        out: Option<PathBuf>,
        /// Basemap image, overriding the scene's
        #[arg(long)]
        basemap: Option<PathBuf>,
    },
    /// List output sizes
    Sizes,
    /// List map styles
    Styles,
    /// List icons
    Icons,
    /// List font families and whether they are installed
    Fonts,
}

fn parse_container(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: f32 = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let height: f32 = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    if !(width > 0.0 && height > 0.0) {
        return Err(format!("container must be positive, got {s:?}"));
    }
    Ok(Size::new(width, height))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PosterConfig::load();
    match cli.command {
        Command::Render {
            scene,
            size,
            container,
            out,
            basemap,
        } => render(&config, &scene, size, container, out, basemap),
        Command::Sizes => {
            for size in OUTPUT_SIZES.iter() {
                println!(
                    "{:<8} {:>5} x {:<5} px  {}",
                    size.name,
                    size.pixel_width,
                    size.pixel_height,
                    size.export_file_name()
                );
            }
            Ok(())
        }
        Command::Styles => {
            for style in MAP_STYLES.iter() {
                println!("{:<12} {}", style.name, style.url);
            }
            Ok(())
        }
        Command::Icons => {
            for icon in ICONS.iter() {
                println!("{:<12} {}", icon.key, icon.name);
            }
            Ok(())
        }
        Command::Fonts => {
            let catalog = FontCatalog::system(&config.font_dirs);
            let installed = catalog.families();
            for family in FONT_FAMILIES.iter() {
                let mark = if installed.iter().any(|f| f == family) {
                    "installed"
                } else {
                    "fallback"
                };
                println!("{family:<18} {mark}");
            }
            Ok(())
        }
    }
}

fn render(
    config: &PosterConfig,
    scene_path: &Path,
    size: Option<String>,
    container: Option<Size>,
    out: Option<PathBuf>,
    basemap: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut scene = SceneDescription::load(scene_path)?;
    if size.is_some() {
        scene.output_size = size;
    }
    if let Some(container) = container {
        scene.container = container;
    }
    let base_dir = scene_path.parent().unwrap_or(Path::new("."));
    let basemap = match basemap {
        Some(path) => Basemap::open(&path)?,
        None => scene.basemap(base_dir)?,
    };

    let mut session = scene.build(config.clone())?;
    let mut settings = CaptureSettings::from_config(config)?;
    if let Some(out) = out {
        settings = settings.with_out_dir(out);
    }
    let pipeline = CapturePipeline::new(
        settings,
        FontCatalog::system(&config.font_dirs),
        Arc::new(basemap),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let path = runtime
        .block_on(pipeline.capture(&mut session))
        .context("capture failed, see log for details")?;
    println!("{}", path.display());
    Ok(())
}
