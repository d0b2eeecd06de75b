//! SVG rendering.
//!
//! Dark modules become one stroked path: every horizontal run of dark
//! modules is an `h` segment drawn through the middle of its row, so a 1
//! unit stroke covers the row exactly.

use crate::options::{Color, RenderOptions};
use crate::symbol::Symbol;

/// Path data for the dark modules of `symbol`, offset by `margin`.
///
/// Each row with dark modules starts with an absolute `M`; runs later in
/// the row are reached with a relative `m` over the light gap.
pub fn path_data(symbol: &Symbol, margin: usize) -> String {
    let size = symbol.size();
    let mut path = String::new();

    for row in 0..size {
        let mut new_row = true;
        let mut gap = 0;
        let mut run = 0;

        for col in 0..size {
            if !symbol.get(row, col) {
                gap += 1;
                continue;
            }

            run += 1;
            let starts_run = col == 0 || !symbol.get(row, col - 1);
            if starts_run {
                if new_row {
                    path.push_str(&format!("M{} {}.5", col + margin, row + margin));
                    new_row = false;
                } else {
                    path.push_str(&format!("m{gap} 0"));
                }
                gap = 0;
            }

            let ends_run = col + 1 == size || !symbol.get(row, col + 1);
            if ends_run {
                path.push_str(&format!("h{run}"));
                run = 0;
            }
        }
    }

    path
}

fn color_attr(color: Color, attr: &str) -> String {
    let mut out = format!(r#"{}="{}""#, attr, color.hex());
    if !color.is_opaque() {
        // 0.50 -> .50
        let opacity = format!("{:.2}", color.opacity());
        out.push_str(&format!(
            r#" {}-opacity="{}""#,
            attr,
            opacity.trim_start_matches('0')
        ));
    }
    out
}

/// Standalone SVG document for `symbol`.
///
/// The light color fills a background path unless it is fully
/// transparent. `width`, when set, becomes the document's width and height.
pub fn render(symbol: &Symbol, options: &RenderOptions) -> String {
    let total = symbol.size() + options.margin * 2;
    let colors = &options.color;

    let background = if colors.light.is_transparent() {
        String::new()
    } else {
        format!(
            r#"<path {} d="M0 0h{total}v{total}H0z"/>"#,
            color_attr(colors.light, "fill")
        )
    };

    let foreground = format!(
        r#"<path {} d="{}"/>"#,
        color_attr(colors.dark, "stroke"),
        path_data(symbol, options.margin)
    );

    let dimensions = match options.width {
        Some(width) => format!(r#"width="{width}" height="{width}" "#),
        None => String::new(),
    };

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" {dimensions}viewBox="0 0 {total} {total}" shape-rendering="crispEdges">{background}{foreground}</svg>
"#
    )
}
