//! PNG and PDF renderings of the SVG figure
//!
//! Both start from the document built by [`super::svg::render_figure`], so
//! the three files always show the same plot.

use anyhow::{anyhow, Context, Result};
use resvg::{tiny_skia, usvg};

/// Resolution of the PNG figure
pub const PNG_DPI: f32 = 300.0;

/// SVG user units per inch
const SVG_DPI: f32 = 96.0;

/// Rasterise an SVG document to PNG bytes at `dpi` on a white background.
pub fn render_png(svg: &str, dpi: f32) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).context("Figure is not valid SVG")?;

    let scale = dpi / SVG_DPI;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow!("Figure cannot be scaled to {} dpi", dpi))?;
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow!("Cannot allocate a {}x{} image", size.width(), size.height()))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().context("PNG encoding failed")
}

/// Convert an SVG document to a single-page PDF.
pub fn render_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree =
        svg2pdf::usvg::Tree::from_str(svg, &options).context("Figure is not valid SVG")?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("PDF conversion failed: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="96" height="48" viewBox="0 0 96 48"><rect x="8" y="8" width="32" height="32" fill="#0072B2"/></svg>"##;

    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        // IHDR follows the 8-byte signature and the chunk length and type
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    #[test]
    fn test_png_is_scaled_to_dpi() {
        let png = render_png(SQUARE, PNG_DPI).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_dimensions(&png), (300, 150));

        let png = render_png(SQUARE, 96.0).unwrap();
        assert_eq!(png_dimensions(&png), (96, 48));
    }

    #[test]
    fn test_pdf_has_header() {
        let pdf = render_pdf(SQUARE).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_invalid_svg_is_an_error() {
        assert!(render_png("<svg", PNG_DPI).is_err());
        assert!(render_pdf("not svg at all").is_err());
    }
}
