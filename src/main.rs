use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eink_quant::render::MemorySurface;
use eink_quant::DitherMode;
use inkframe::error::PrepareError;
use inkframe::models::{fingerprint, AppConfig};
use inkframe::rendering::encode_indexed_png;
use inkframe::server;
use inkframe::services::{
    run_display_loop, write_artifact, CycleOutcome, HttpTransport, LocalTransport, LoopOptions,
    PreparePipeline, Transport,
};

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Photo frame pipeline for palette e-ink panels")]
struct Cli {
    /// Configuration file (defaults to $CONFIG_FILE, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the source photo into a frame artifact
    Prepare {
        #[command(flatten)]
        prepare: PrepareArgs,
    },
    /// Prepare the frame and serve it over HTTP
    Serve {
        #[command(flatten)]
        prepare: PrepareArgs,

        /// Listen address (overrides $BIND_ADDR and config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Run the display loop against an in-memory panel
    Show {
        /// Artifact URL (overrides config)
        #[arg(short, long)]
        url: Option<String>,

        /// Prepare this image locally instead of fetching
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Write a PNG of the panel after every commit
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Run a single cycle and exit with its result
        #[arg(long)]
        once: bool,

        /// Stop after this many cycles
        #[arg(long)]
        cycles: Option<usize>,
    },
    /// Print the palette in pen order with the format fingerprint
    Palette,
}

#[derive(Args, Default)]
struct PrepareArgs {
    /// Source photo
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Artifact destination
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preview PNG destination
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Skip the preview PNG
    #[arg(long, conflicts_with = "preview")]
    no_preview: bool,

    /// Dither mode: floyd-steinberg or none
    #[arg(short, long)]
    dither: Option<DitherMode>,

    #[arg(long)]
    brightness: Option<f32>,

    #[arg(long)]
    contrast: Option<f32>,
}

impl PrepareArgs {
    fn apply(&self, config: &mut AppConfig) {
        let prepare = &mut config.prepare;
        if let Some(source) = &self.source {
            prepare.source = source.clone();
        }
        if let Some(output) = &self.output {
            prepare.output = output.clone();
        }
        if let Some(preview) = &self.preview {
            prepare.preview = Some(preview.clone());
        }
        if self.no_preview {
            prepare.preview = None;
        }
        if let Some(dither) = self.dither {
            prepare.dither = dither;
        }
        if let Some(brightness) = self.brightness {
            prepare.brightness = brightness;
        }
        if let Some(contrast) = self.contrast {
            prepare.contrast = contrast;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Prepare { prepare }) => {
            init_cli_tracing();
            let mut config = AppConfig::load(config_path.as_deref())?;
            prepare.apply(&mut config);
            config.validate()?;
            run_prepare_command(&config)
        }
        Some(Commands::Serve { prepare, bind }) => {
            init_service_tracing();
            let mut config = AppConfig::load(config_path.as_deref())?;
            prepare.apply(&mut config);
            if let Some(bind) = bind.or_else(|| std::env::var("BIND_ADDR").ok()) {
                config.server.bind = bind;
            }
            config.validate()?;
            run_server(&config).await
        }
        Some(Commands::Show {
            url,
            source,
            snapshot,
            once,
            cycles,
        }) => {
            init_service_tracing();
            let mut config = AppConfig::load(config_path.as_deref())?;
            if let Some(url) = url {
                config.client.url = url;
            }
            let max_cycles = if once { Some(1) } else { cycles };
            run_show_command(&config, source, snapshot, max_cycles).await
        }
        Some(Commands::Palette) => {
            init_cli_tracing();
            let config = AppConfig::load(config_path.as_deref())?;
            run_palette_command(&config)
        }
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Full logging for long-running commands
fn init_service_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Convert the configured source photo and write the artifact
fn run_prepare_command(config: &AppConfig) -> anyhow::Result<()> {
    let pipeline = PreparePipeline::from_config(config)?;
    let prepare = &config.prepare;

    let frame = pipeline.prepare_file(&prepare.source)?;
    write_artifact(&prepare.output, &frame.bytes)?;

    if let Some(preview) = &prepare.preview {
        let png = pipeline.preview_png(&frame)?;
        write_artifact(preview, &png)?;
        tracing::info!(path = %preview.display(), "Preview written");
    }

    println!(
        "Wrote {} ({} bytes, {}x{})",
        prepare.output.display(),
        frame.bytes.len(),
        config.frame.width,
        config.frame.height
    );
    Ok(())
}

/// Run the HTTP server
async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let state = server::create_app_state(config)?;

    // Serve without a frame if the source is broken; requests get 503
    if let Err(e) = server::publish_source(&state, &config.prepare.source).await {
        tracing::error!(error = %e, "Initial frame could not be prepared");
    }

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %config.server.bind, "inkframe server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the consumer loop against an in-memory surface
async fn run_show_command(
    config: &AppConfig,
    source: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    max_cycles: Option<usize>,
) -> anyhow::Result<()> {
    let format = config.frame_format()?;
    let transport: Box<dyn Transport> = match source {
        Some(source) => {
            let pipeline = Arc::new(PreparePipeline::new(format.clone(), &config.prepare));
            Box::new(LocalTransport::new(pipeline, source))
        }
        None => Box::new(HttpTransport::with_timeout(
            config.client.url.clone(),
            &format,
            config.client.timeout(),
        )?),
    };

    let mut surface = MemorySurface::new(format.width(), format.height());
    let options = LoopOptions {
        max_cycles,
        ..LoopOptions::from(&config.client)
    };

    let summary = run_display_loop(
        transport.as_ref(),
        &mut surface,
        &format,
        config.client.background_pen,
        &options,
        |surface, outcome| {
            let Some(path) = &snapshot else {
                return;
            };
            let written = surface
                .to_index_grid()
                .map_err(PrepareError::from)
                .and_then(|grid| encode_indexed_png(&grid, format.palette()))
                .and_then(|png| write_artifact(path, &png));
            match written {
                Ok(()) => tracing::debug!(
                    path = %path.display(),
                    outcome = outcome.label(),
                    "Snapshot written"
                ),
                Err(e) => tracing::warn!(error = %e, "Snapshot failed"),
            }
        },
    )
    .await?;

    match summary.last {
        Some(CycleOutcome::Success(report)) => {
            println!(
                "Frame shown: {} pixels drawn ({} cycles, {} failed)",
                report.pixels_drawn(),
                summary.cycles,
                summary.failed
            );
            Ok(())
        }
        Some(outcome) => anyhow::bail!("Last cycle ended with {}: {:?}", outcome.label(), outcome),
        None => Ok(()),
    }
}

fn run_palette_command(config: &AppConfig) -> anyhow::Result<()> {
    let format = config.frame_format()?;

    println!("Frame {}x{}, {} bytes", format.width(), format.height(), format.byte_len());
    println!("Fingerprint {}\n", fingerprint(&format));
    for (index, color) in format.palette().colors().iter().enumerate() {
        println!("  {index:>3}  {color}");
    }
    Ok(())
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    println!("inkframe v{VERSION}");
    println!("Photo frame pipeline for palette e-ink panels\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (file not found)", path.display()),
        None => "built-in defaults".to_string(),
    };
    println!("  CONFIG_FILE = {config_source}");

    println!("\nCommands:");
    println!("  inkframe prepare   Convert the source photo into a frame artifact");
    println!("  inkframe serve     Prepare the frame and serve it over HTTP");
    println!("  inkframe show      Run the display loop against an in-memory panel");
    println!("  inkframe palette   Print the palette and format fingerprint");
    println!("\nRun 'inkframe --help' for more details.");
}
