use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stempel", version)]
struct Cli {
    /// Stamp config JSON; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the base seal image path.
    #[arg(long, global = true)]
    seal: Option<PathBuf>,

    /// Override the arc-text font with a font file.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a stamp as a PNG.
    Stamp(StampArgs),
    /// Render a QR watermark with the stamp centered over it.
    Watermark(WatermarkArgs),
    /// Render the watermark for an issued letter described in JSON.
    Document(DocumentArgs),
}

#[derive(Parser, Debug)]
struct StampArgs {
    /// Text along the top arc.
    #[arg(long)]
    top: String,

    /// Text along the bottom arc.
    #[arg(long)]
    bottom: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct WatermarkArgs {
    /// String encoded into the QR code.
    #[arg(long)]
    payload: String,

    /// Text along the top arc.
    #[arg(long)]
    top: String,

    /// Text along the bottom arc.
    #[arg(long)]
    bottom: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DocumentArgs {
    /// Letter issuance JSON (`letter_number`, `level`, `region`, `issued_on`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stamper = build_stamper(&cli)?;
    match cli.cmd {
        Command::Stamp(args) => {
            let png = stamper.generate_stamp_png(&args.top, &args.bottom)?;
            write_png(&args.out, &png)
        }
        Command::Watermark(args) => {
            let png = stamper.generate_watermark_png(&args.payload, &args.top, &args.bottom)?;
            write_png(&args.out, &png)
        }
        Command::Document(args) => cmd_document(&stamper, args),
    }
}

fn build_stamper(cli: &Cli) -> anyhow::Result<stempel::Stamper> {
    let mut config = match &cli.config {
        Some(path) => stempel::StampConfig::from_path(path)?,
        None => stempel::StampConfig::default(),
    };
    if let Some(seal) = &cli.seal {
        config = config.with_seal_path(seal);
    }
    if let Some(font) = &cli.font {
        config = config.with_font(stempel::FontSource::Path {
            path: font.clone(),
            index: 0,
        });
    }
    Ok(stempel::Stamper::new(config)?)
}

fn cmd_document(stamper: &stempel::Stamper, args: DocumentArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open document JSON '{}'", args.in_path.display()))?;
    let req: stempel::DocumentStampRequest = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse document JSON '{}'", args.in_path.display()))?;

    let watermark = req.to_watermark_request()?;
    tracing::info!(payload = %watermark.qr_payload, "rendering document watermark");
    let png = stamper.render_watermark(&watermark)?.to_png()?;
    write_png(&args.out, &png)
}

fn write_png(out: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, png).with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
