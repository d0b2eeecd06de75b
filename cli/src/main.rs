use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use qrgen::render::{svg, text};
use qrgen::{ErrorCorrectionLevel, QrInput, SegmentInput, Symbol};
use tracing_subscriber::EnvFilter;

mod config;

use config::{Config, QrOverrides, RenderOverrides};

/// Largest PNG side, in pixels, the CLI will allocate.
#[cfg(feature = "png")]
const MAX_IMAGE_WIDTH: usize = 16_384;

#[derive(Parser)]
#[command(name = "qrgen")]
#[command(about = "QR Code generator", long_about = None)]
struct Cli {
    /// Log encoder decisions to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a QR Code
    Encode {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Utf8)]
        format: Format,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how data is encoded: version, mask, segments and codewords
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Text to encode
    #[arg(required_unless_present = "segments")]
    text: Option<String>,

    /// JSON file with a segment list: strings, byte arrays or {data, mode} objects
    #[arg(long, conflicts_with = "text")]
    segments: Option<PathBuf>,

    /// Error correction level: L, M, Q or H
    #[arg(short, long)]
    ec_level: Option<ErrorCorrectionLevel>,

    /// Symbol version, 1 to 40
    #[arg(short = 'v', long)]
    qr_version: Option<u8>,

    /// Mask pattern, 0 to 7
    #[arg(short, long)]
    mask: Option<u8>,

    /// JSON file with encoder and renderer options
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct RenderArgs {
    /// Quiet zone width in modules
    #[arg(long)]
    margin: Option<usize>,

    /// Pixels per module
    #[arg(long)]
    scale: Option<f64>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Dark module color (#rgb, #rgba, #rrggbb or #rrggbbaa)
    #[arg(long)]
    dark: Option<String>,

    /// Light module color
    #[arg(long)]
    light: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Png,
    Utf8,
    Ascii,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            render,
            format,
            output,
        } => encode(&input, &render, format, output.as_deref()),
        Commands::Inspect { input } => inspect(&input),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load the config file and apply the flags on top.
fn load_config(input: &InputArgs, render: Option<&RenderArgs>) -> Result<Config> {
    let mut config = Config::load(input.config.as_deref())?;

    QrOverrides {
        ec_level: input.ec_level,
        version: input.qr_version,
        mask: input.mask,
    }
    .apply(&mut config.qr)?;

    if let Some(render) = render {
        RenderOverrides {
            margin: render.margin,
            scale: render.scale,
            width: render.width,
            dark: render.dark.clone(),
            light: render.light.clone(),
        }
        .apply(&mut config.render)?;
    }

    Ok(config)
}

fn read_input(input: &InputArgs) -> Result<QrInput> {
    if let Some(path) = &input.segments {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read segments file '{}'", path.display()))?;
        let segments: Vec<SegmentInput> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid segments file '{}'", path.display()))?;
        return Ok(QrInput::Segments(segments));
    }

    match &input.text {
        Some(text) => Ok(QrInput::Text(text.clone())),
        None => bail!("Nothing to encode: pass TEXT or --segments"),
    }
}

fn build_symbol(input: &InputArgs, config: &Config) -> Result<Symbol> {
    let data = read_input(input)?;
    let symbol = qrgen::create(data, &config.qr).context("Failed to encode QR Code")?;

    tracing::debug!(
        version = symbol.version().value(),
        level = %symbol.error_correction_level(),
        mask = symbol.mask_pattern().value(),
        "encoded"
    );
    Ok(symbol)
}

fn encode(
    input: &InputArgs,
    render: &RenderArgs,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(input, Some(render))?;
    let symbol = build_symbol(input, &config)?;

    let bytes = match format {
        Format::Svg => svg::render(&symbol, &config.render).into_bytes(),
        Format::Png => render_png(&symbol, &config)?,
        Format::Utf8 => text::to_utf8(&symbol, config.render.margin).into_bytes(),
        Format::Ascii => text::to_ascii(&symbol, config.render.margin).into_bytes(),
    };

    match output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn render_png(symbol: &Symbol, config: &Config) -> Result<Vec<u8>> {
    let width = config.render.image_width(symbol.size());
    if width > MAX_IMAGE_WIDTH {
        bail!("Image would be {width}px wide, the limit is {MAX_IMAGE_WIDTH}px");
    }
    Ok(qrgen::render::png::render(symbol, &config.render)?)
}

#[cfg(not(feature = "png"))]
fn render_png(symbol: &Symbol, config: &Config) -> Result<Vec<u8>> {
    let _ = (symbol, config);
    bail!("PNG output requires the `png` feature")
}

fn inspect(input: &InputArgs) -> Result<()> {
    let config = load_config(input, None)?;
    let symbol = build_symbol(input, &config)?;
    let codewords = qrgen::encode_codewords(
        symbol.segments(),
        symbol.version(),
        symbol.error_correction_level(),
    )?;

    let size = symbol.size();
    let image_width = config.render.image_width(size);

    println!("Version:           {}", symbol.version());
    println!("Error correction:  {}", symbol.error_correction_level());
    println!("Mask pattern:      {}", symbol.mask_pattern());
    println!("Size:              {size}x{size} modules ({image_width}px image)");
    println!();
    println!("Segments:");
    for segment in symbol.segments() {
        println!(
            "  {:<13} {:>5}  {}",
            segment.mode().to_string(),
            segment.char_count(),
            String::from_utf8_lossy(segment.data())
        );
    }
    println!();
    println!("Codewords ({}):", codewords.len());
    for line in codewords.chunks(16) {
        println!("  {}", hex::encode(line));
    }

    Ok(())
}
