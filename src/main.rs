//! Command-line entry point: renders the icon and writes it as PNG.

use std::path::PathBuf;
use std::process::ExitCode;

use appicon_renderer::{IconRenderer, IconStyle, RenderError, DEFAULT_OUTPUT};
use clap::Parser;

/// Render the application icon to a PNG file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Output file; its directory must already exist.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON style profile to start from.
    #[arg(long, value_name = "PATH")]
    style: Option<PathBuf>,

    /// Override the content scale (0.0-1.0).
    #[arg(long)]
    scale: Option<f64>,

    /// Skip the top highlight.
    #[arg(long)]
    no_highlight: bool,

    /// Skip the node/router glyph.
    #[arg(long)]
    no_glyph: bool,

    /// Print the effective style as JSON and exit.
    #[arg(long)]
    print_style: bool,

    /// Print the JSON schema of style profiles and exit.
    #[cfg(feature = "jsonschema")]
    #[arg(long)]
    print_schema: bool,
}

impl Args {
    fn style(&self) -> Result<IconStyle, RenderError> {
        let mut style = match &self.style {
            Some(path) => IconStyle::load(path)?,
            None => IconStyle::default(),
        };
        if let Some(scale) = self.scale {
            style = style.with_content_scale(scale);
        }
        if self.no_highlight {
            style = style.with_highlight(false);
        }
        if self.no_glyph {
            style = style.with_glyph(false);
        }
        style.validate()?;
        Ok(style)
    }
}

fn run(args: &Args) -> Result<(), RenderError> {
    #[cfg(feature = "jsonschema")]
    if args.print_schema {
        println!("{}", serde_json::to_string_pretty(&IconStyle::json_schema())?);
        return Ok(());
    }

    let style = args.style()?;
    if args.print_style {
        println!("{}", style.to_json_pretty()?);
        return Ok(());
    }

    let icon = IconRenderer::with_style(&style).render_to_path(&args.output)?;
    let size = icon.dimensions();

    println!(
        "Icon written: {} ({}x{})",
        args.output.display(),
        size.width,
        size.height
    );
    println!(
        "   content scale: {} ({}% margin)",
        icon.content_scale,
        icon.margin_percent()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
