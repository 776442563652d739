use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oric_hires::{OricColour, MAX_BRUSH_RADIUS, MIN_BRUSH_RADIUS};
use oric_picture::assets::AssetLoader;
use oric_picture::error::DocumentError;
use oric_picture::models::{AppConfig, PictureInfo};
use oric_picture::services::{CompilePipeline, Session};

#[derive(Parser)]
#[command(name = "oric-picture")]
#[command(about = "ORIC hires picture editor - paint, check and convert .s pictures")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a blank picture
    New {
        /// Output .s file
        path: PathBuf,

        /// Picture label (defaults to default_label from config)
        #[arg(short, long)]
        label: Option<String>,

        /// Fill colour (0-7 or name)
        #[arg(short, long, default_value = "black")]
        colour: OricColour,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Show label, colour usage and conformance of a picture
    Info {
        path: PathBuf,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Fail unless every cell can be encoded
    Check { path: PathBuf },
    /// Paint a square brush
    Paint {
        path: PathBuf,
        x: usize,
        y: usize,

        /// Brush colour (0-7 or name)
        #[arg(short, long)]
        colour: OricColour,

        /// Brush radius (1 = single pixel, 20 = 39x39 square)
        #[arg(short, long, default_value_t = MIN_BRUSH_RADIUS)]
        radius: usize,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Replace each cell's background colour on one scanline
    RowBackground {
        path: PathBuf,
        y: usize,
        colour: OricColour,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Replace the most common colour of the whole picture
    Background {
        path: PathBuf,
        colour: OricColour,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Fill the whole picture with one colour
    Clear {
        path: PathBuf,
        colour: OricColour,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Reduce every cell to at most two colours
    Normalize {
        path: PathBuf,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Write the picture as a 240x200 PNG
    ExportPng { path: PathBuf, output: PathBuf },
    /// Convert any PNG into a picture through the converter
    Import {
        /// Source PNG
        png: PathBuf,

        /// Output .s file
        output: PathBuf,

        /// Picture label (defaults to default_label from config)
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Run the picture through the converter to make it conformant
    Compile {
        path: PathBuf,

        /// Write the result here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// Options shared by the editing commands
#[derive(Args)]
struct EditArgs {
    /// Run the converter before saving
    #[arg(long)]
    compile: bool,

    /// Write the result here instead of over the input
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command();
        return Ok(());
    };

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oric_picture=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if let Commands::Init { force, list } = command {
        return run_init_command(force, list);
    }

    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }
    let config = AppConfig::load_from_assets(&loader);

    match command {
        Commands::New {
            path,
            label,
            colour,
            force,
        } => {
            if !force && path.exists() {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let label = label.unwrap_or_else(|| config.default_label.clone());
            let mut session = Session::new(label, CompilePipeline::from_config(&config));
            session.document_mut().canvas_mut().clear(colour);
            session.save_as(&path)?;
            println!("Created {}", path.display());
        }
        Commands::Info { path, json } => {
            let session = open_session(&path, &config)?;
            print_info(&PictureInfo::from_document(session.document()), json)?;
        }
        Commands::Check { path } => {
            let session = open_session(&path, &config)?;
            let info = PictureInfo::from_document(session.document());
            match info.encode_error {
                None => println!("{}: OK", path.display()),
                Some(e) => anyhow::bail!("{}: {e}", path.display()),
            }
        }
        Commands::Paint {
            path,
            x,
            y,
            colour,
            radius,
            edit,
        } => {
            let mut session = open_session(&path, &config)?;
            let changed = session
                .document_mut()
                .canvas_mut()
                .paint(x, y, colour, radius)
                .with_context(|| {
                    format!("Brush radius must be {MIN_BRUSH_RADIUS}..={MAX_BRUSH_RADIUS}, centre inside 240x200")
                })?;
            finish_edit(&mut session, edit).await?;
            println!("Painted {changed} pixels");
        }
        Commands::RowBackground {
            path,
            y,
            colour,
            edit,
        } => {
            let mut session = open_session(&path, &config)?;
            let changed = session
                .document_mut()
                .canvas_mut()
                .replace_row_background(y, colour)?;
            finish_edit(&mut session, edit).await?;
            println!("Recoloured {changed} pixels on row {y}");
        }
        Commands::Background { path, colour, edit } => {
            let mut session = open_session(&path, &config)?;
            let replaced = session
                .document_mut()
                .canvas_mut()
                .replace_global_background(colour);
            finish_edit(&mut session, edit).await?;
            println!("Replaced {replaced} with {colour}");
        }
        Commands::Clear { path, colour, edit } => {
            let mut session = open_session(&path, &config)?;
            session.document_mut().canvas_mut().clear(colour);
            finish_edit(&mut session, edit).await?;
            println!("Cleared to {colour}");
        }
        Commands::Normalize { path, edit } => {
            let mut session = open_session(&path, &config)?;
            let cells = session.document_mut().canvas_mut().normalize();
            finish_edit(&mut session, edit).await?;
            println!("Rewrote {cells} cells");
        }
        Commands::ExportPng { path, output } => {
            let session = open_session(&path, &config)?;
            session.export_png(&output)?;
            println!("Exported {}", output.display());
        }
        Commands::Import { png, output, label } => {
            let label = label.unwrap_or_else(|| config.default_label.clone());
            let mut session = Session::new(label, CompilePipeline::from_config(&config));
            let log = session
                .import_png(&png)
                .await
                .with_context(|| format!("Failed to import {}", png.display()))?;
            print_log(&log);
            session.save_as(&output)?;
            println!("Imported {} into {}", png.display(), output.display());
        }
        Commands::Compile { path, output } => {
            let mut session = open_session(&path, &config)?;
            let edit = EditArgs {
                compile: true,
                output,
            };
            finish_edit(&mut session, edit).await?;
            println!(
                "Compiled {}",
                session.path().unwrap_or(&path).display()
            );
        }
        // Handled before config loading
        Commands::Init { .. } => {}
    }

    Ok(())
}

fn open_session(path: &Path, config: &AppConfig) -> anyhow::Result<Session> {
    Ok(Session::open(path, CompilePipeline::from_config(config))?)
}

/// Optionally compile, then save the edited picture
async fn finish_edit(session: &mut Session, edit: EditArgs) -> anyhow::Result<()> {
    if edit.compile {
        let log = session.compile().await.context("Compile failed, nothing saved")?;
        print_log(&log);
    }

    let result = match edit.output {
        Some(output) => session.save_as(output),
        None => session.save(),
    };
    match result {
        Err(DocumentError::Encode(e)) => Err(anyhow::anyhow!(
            "{e}\nNothing saved. Run `normalize`, or add --compile to let the converter fix it."
        )),
        other => Ok(other?),
    }
}

fn print_log(log: &str) {
    let log = log.trim_end();
    if !log.is_empty() {
        eprintln!("{log}");
    }
}

fn print_info(info: &PictureInfo, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
        return Ok(());
    }

    println!("Label:  {}", info.label);
    println!("Size:   {}x{}", info.width, info.height);
    println!("\nColours:");
    for colour in info.colours.iter().filter(|c| c.pixels > 0) {
        println!("  {} {:<8} {:>6}", colour.index, colour.name, colour.pixels);
    }
    println!();
    if info.non_conformant_cells.is_empty() {
        println!("All cells use at most two colours");
    } else {
        println!(
            "{} cells use more than two colours",
            info.non_conformant_cells.len()
        );
        for [row, cell] in info.non_conformant_cells.iter().take(10) {
            println!("  row {row}, cell {cell}");
        }
    }
    match &info.encode_error {
        None => println!("Encodable: yes"),
        Some(e) => println!("Encodable: no ({e})"),
    }
    Ok(())
}

/// Extract the embedded config
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    for path in &report.written {
        println!("  Created: {path}");
    }
    for path in &report.skipped {
        println!("  Skipped: {path} (exists, use --force to overwrite)");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("oric-picture v{VERSION} - ORIC hires picture editor\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("oric_picture=warn (default)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    let config = AppConfig::load_from_assets(&AssetLoader::from_env());

    println!("\nConfiguration:");
    println!("  Source:    {config_source}");
    println!("  Converter: {}", config.converter.path.display());
    println!("  Timeout:   {}s", config.converter.timeout_secs);
    println!("  Label:     {}", config.default_label);

    println!("\nRun `oric-picture --help` for commands.");
}
