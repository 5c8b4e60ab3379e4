use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use adcanvas_core::{
    AdcanvasConfig, CanvasError, Color, FrameHash, CONFIG_FILE_NAME, SURFACE_SIZE,
};
use adcanvas_ir::{bounds_warnings, validate_template, RenderState, TemplateModel};
use adcanvas_render::image_loader::{load_image, save_png};
use adcanvas_render::{
    wrap_lines, CompositingPipeline, RenderInputs, RenderOutcome, RenderSession, SharedSurface,
};

#[derive(Parser)]
#[command(
    name = "adcanvas",
    version,
    about = "adcanvas: template-driven ad creative renderer",
    long_about = "Composites a 1080x1080 ad creative from a template: background colour,\ndesign pattern, masked photo, wrapped caption and call-to-action button."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a creative to PNG
    Render(RenderArgs),

    /// Show how a caption wraps
    Wrap {
        /// Caption text
        #[arg()]
        text: String,

        /// Maximum characters per line (default: the built-in template's limit)
        #[arg(long)]
        max: Option<usize>,
    },

    /// Print the built-in template, or check a template file
    Template {
        /// Template JSON file to validate
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Template JSON file (default: the built-in template)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Caption text (default: the template caption)
    #[arg(long)]
    caption: Option<String>,

    /// Call-to-action label (default: the template CTA)
    #[arg(long)]
    cta: Option<String>,

    /// Background colour as #RRGGBB
    #[arg(long)]
    background: Option<String>,

    /// Photo to show through the template mask
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Config file (default: ./adcanvas.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "output/creative.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Render(args) => cmd_render(args),
        Commands::Wrap { text, max } => cmd_wrap(&text, max),
        Commands::Template { check } => cmd_template(check.as_deref()),
    }
}

fn run_async<F, T>(future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;
    runtime.block_on(future)
}

fn load_config(explicit: Option<&Path>) -> Result<AdcanvasConfig> {
    match explicit {
        Some(path) => AdcanvasConfig::load_from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        // Best-effort: rendering without a config file is allowed.
        None => Ok(AdcanvasConfig::load_from_file(Path::new(CONFIG_FILE_NAME)).unwrap_or_default()),
    }
}

fn parse_color(value: &str) -> Result<Color, CanvasError> {
    Color::from_hex(value).map_err(|source| CanvasError::InvalidColor {
        value: value.to_string(),
        source,
    })
}

/// Apply the command-line overrides on top of the template's starting state.
fn build_inputs(args: &RenderArgs) -> Result<RenderInputs> {
    let mut template = match &args.template {
        Some(path) => TemplateModel::load_from_file(path)
            .with_context(|| format!("failed to load template: {}", path.display()))?,
        None => TemplateModel::default(),
    };
    let mut state = RenderState::from_template(&template);

    if let Some(caption) = &args.caption {
        state.caption_text = caption.clone();
    }
    if let Some(cta) = &args.cta {
        state.cta_text = cta.clone();
        template.cta.text = cta.clone();
    }
    if let Some(background) = &args.background {
        state.background_color = parse_color(background)?;
    }
    if let Some(photo) = &args.photo {
        let image = load_image(photo)
            .with_context(|| format!("failed to load photo: {}", photo.display()))?;
        state.uploaded_image = Some(Arc::new(image));
    }

    Ok(RenderInputs::new(state, template))
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let start = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let inputs = build_inputs(&args)?;

    for warning in bounds_warnings(&inputs.template, SURFACE_SIZE, SURFACE_SIZE) {
        tracing::warn!("{}", warning);
    }

    let pipeline = CompositingPipeline::from_config(&config)?;
    let surface = SharedSurface::square();
    let session = RenderSession::new(pipeline, surface.clone(), inputs);
    let result = run_async(async { Ok(session.render().await) })?;

    // The surface is written even when an asset failed, like the editor canvas.
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let frame = surface.snapshot();
    save_png(&frame, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Rendered {}", args.output.display());
    println!("   Hash: {}", FrameHash::of(&frame));

    match result {
        Ok(RenderOutcome::Committed { report, .. }) => {
            println!(
                "   Caption: {} line(s), CTA at ({}, {})",
                report.caption_lines.len(),
                report.cta.rect.x,
                report.cta.rect.y
            );
            println!("   Time: {:.2}s", start.elapsed().as_secs_f64());
            Ok(())
        }
        Ok(RenderOutcome::Superseded { generation }) => {
            anyhow::bail!("render pass {} was superseded", generation)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "render failed; partial frame written to {}",
            args.output.display()
        ))),
    }
}

fn cmd_wrap(text: &str, max: Option<usize>) -> Result<()> {
    let max = max.unwrap_or_else(|| TemplateModel::default().caption.max_characters_per_line);
    for line in wrap_lines(text, max) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_template(check: Option<&Path>) -> Result<()> {
    let Some(path) = check else {
        println!("{}", TemplateModel::default().to_json()?);
        return Ok(());
    };

    println!("Checking {}", path.display());
    let template = TemplateModel::load_from_file(path)
        .with_context(|| format!("failed to load template: {}", path.display()))?;
    println!("   ✓ Parse OK");

    for warning in bounds_warnings(&template, SURFACE_SIZE, SURFACE_SIZE) {
        println!("   ⚠ {}", warning);
    }

    validate_template(&template).map_err(|errors| {
        let msgs: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
        anyhow::anyhow!("Validation errors:\n  {}", msgs.join("\n  "))
    })?;
    println!("   ✓ Validation OK");
    Ok(())
}
