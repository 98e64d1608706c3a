//! Lightweight board preview. Holes are drawn as plain rounded rectangles at the same
//! centres the DXF uses, not from the bulge geometry.

use skadis_layout::{Parameters, hole_centers};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SvgError {
    #[error("SVG preview needs a board with positive size (got {width} x {height})")]
    EmptyBoard { width: f64, height: f64 },
    #[error("SVG preview area {size} is too small for a {margin} margin")]
    NoDrawingArea { size: f64, margin: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewOptions {
    /// Longest side of the drawing area, in SVG user units.
    pub size: f64,
    pub margin: f64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            size: 400.0,
            margin: 16.0,
        }
    }
}

pub fn preview_svg(params: &Parameters, opts: &PreviewOptions) -> Result<String, SvgError> {
    let (bw, bh) = (params.board_width, params.board_height);
    if !(bw > 0.0 && bh > 0.0 && bw.is_finite() && bh.is_finite()) {
        return Err(SvgError::EmptyBoard {
            width: bw,
            height: bh,
        });
    }
    let area = opts.size - 2.0 * opts.margin;
    if !(area > 0.0) {
        return Err(SvgError::NoDrawingArea {
            size: opts.size,
            margin: opts.margin,
        });
    }

    let m = opts.margin;
    let scale = (area / bw).min(area / bh);
    let svg_w = bw * scale + 2.0 * m;
    let svg_h = bh * scale + 2.0 * m;
    let corner = params.effective_corner_radius() * scale;
    let hole_r = params.effective_hole_radius() * scale;
    let (hw, hh) = (params.hole_width, params.hole_height);

    let mut out = format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">",
        w = fmt_num(svg_w),
        h = fmt_num(svg_h),
    );
    out.push_str(&format!(
        "<rect x=\"{m}\" y=\"{m}\" width=\"{w}\" height=\"{h}\" rx=\"{r}\" ry=\"{r}\" fill=\"#fff\" stroke=\"#22d3ee\" stroke-width=\"2\"/>",
        m = fmt_num(m),
        w = fmt_num(bw * scale),
        h = fmt_num(bh * scale),
        r = fmt_num(corner),
    ));

    let centers = hole_centers(params);
    for c in &centers {
        // Board space is y-up; SVG is y-down.
        let x = m + (c.x - hw / 2.0) * scale;
        let y = m + (bh - (c.y + hh / 2.0)) * scale;
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"{r}\" ry=\"{r}\" fill=\"#fbbf24\" stroke=\"#f59e42\" stroke-width=\"1\" opacity=\"0.85\"/>",
            x = fmt_num(x),
            y = fmt_num(y),
            w = fmt_num(hw * scale),
            h = fmt_num(hh * scale),
            r = fmt_num(hole_r),
        ));
    }
    out.push_str("</svg>");

    tracing::debug!(holes = centers.len(), scale, "rendered preview");
    Ok(out)
}

fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let mut buf = ryu::Buffer::new();
    let s = buf.format(v);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}
