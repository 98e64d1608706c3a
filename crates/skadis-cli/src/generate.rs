use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use skadis_export::{DxfFlavor, PreviewOptions, dxf_from_layout, preview_svg};
use skadis_layout::{Layout, Parameters, generate_layout, load_parameters};

use crate::error::CliError;

const PREVIEW_FILE: &str = "preview.svg";

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Parameter file (YAML or JSON); omitted fields keep their defaults
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Board width in millimetres
    #[arg(long, value_name = "MM")]
    pub board_width: Option<f64>,

    /// Board height in millimetres
    #[arg(long, value_name = "MM")]
    pub board_height: Option<f64>,

    /// Board corner radius in millimetres
    #[arg(long, value_name = "MM")]
    pub corner_radius: Option<f64>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,

    /// Drawing file name, without extension
    #[arg(short, long, default_value = "skadis_board")]
    pub name: String,

    /// Write LINE/ARC entities instead of LWPOLYLINEs
    #[arg(long)]
    pub segments: bool,

    /// Also write an SVG preview next to the drawing
    #[arg(long)]
    pub preview: bool,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,
}

pub fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    if args.name.trim().is_empty() || args.name.contains(&['/', '\\'][..]) {
        return Err(CliError::usage(format!(
            "invalid drawing name {:?}: expected a plain file name",
            args.name
        )));
    }

    let params = resolve_parameters(&args)?;
    params
        .validate()
        .map_err(|e| CliError::input(format!("invalid parameters: {e}")))?;

    let layout = generate_layout(&params);
    let flavor = if args.segments {
        DxfFlavor::Segments
    } else {
        DxfFlavor::Polyline
    };
    let dxf_path = write_dxf(&layout, flavor, &args.output, &args.name)?;
    tracing::info!(path = %dxf_path.display(), "wrote drawing");

    if args.preview {
        let svg_path = write_preview(&params, &args.output)?;
        tracing::info!(path = %svg_path.display(), "wrote preview");
    }

    println!(
        "Board: {} × {} mm, Holes: {}",
        fmt_mm(params.board_width),
        fmt_mm(params.board_height),
        layout.hole_count()
    );
    if args.debug {
        println!(
            "Tip: cut HOLES first with a pocket (or outside) toolpath, then BOARD with an outside toolpath."
        );
    }
    Ok(())
}

fn resolve_parameters(args: &GenerateArgs) -> Result<Parameters, CliError> {
    let mut params = match &args.config {
        Some(path) => load_parameters(path).map_err(|e| CliError::input(e.to_string()))?,
        None => Parameters::default(),
    };
    if let Some(w) = args.board_width {
        params.board_width = w;
    }
    if let Some(h) = args.board_height {
        params.board_height = h;
    }
    if let Some(r) = args.corner_radius {
        params.corner_radius = r;
    }
    tracing::debug!(?params, "resolved parameters");
    Ok(params)
}

fn write_dxf(
    layout: &Layout,
    flavor: DxfFlavor,
    dir: &Path,
    name: &str,
) -> anyhow::Result<PathBuf> {
    let dxf = dxf_from_layout(layout, flavor).context("failed to build DXF entities")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(format!("{name}.dxf"));
    dxf.write_file(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn write_preview(params: &Parameters, dir: &Path) -> anyhow::Result<PathBuf> {
    let svg = preview_svg(params, &PreviewOptions::default()).context("failed to render preview")?;
    let path = dir.join(PREVIEW_FILE);
    std::fs::write(&path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Millimetre value with at most two decimals and no trailing zeros.
fn fmt_mm(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
