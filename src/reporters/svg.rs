//! SVG figure of the fitted probability curves
//!
//! Jittered observed /y/ presence, the bootstrap mean curve with its band,
//! the /i/ comparison curve, axes, legend and the CV AUC annotation. The
//! document is self-contained and needs no fonts beyond a sans-serif
//! fallback.

use crate::models::LanguageRow;
use crate::stats::ModelReport;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for the vertical jitter of observed points
pub const JITTER_SEED: u64 = 20250101;
const JITTER: f64 = 0.02;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 40.0;
const BOTTOM: f64 = 60.0;

const Y_MIN: f64 = -0.05;
const Y_MAX: f64 = 1.05;

const Y_COLOR: &str = "#0072B2";
const I_COLOR: &str = "#D55E00";

/// Data-to-pixel mapping for the plot area
struct Frame {
    x_lo: f64,
    x_hi: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        LEFT + (x - self.x_lo) / (self.x_hi - self.x_lo) * (WIDTH - LEFT - RIGHT)
    }

    fn py(&self, y: f64) -> f64 {
        HEIGHT - BOTTOM - (y - Y_MIN) / (Y_MAX - Y_MIN) * (HEIGHT - TOP - BOTTOM)
    }

    fn path(&self, xs: &[f64], ys: &[f64]) -> String {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| format!("{:.2},{:.2}", self.px(x), self.py(y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Step between integer x ticks so at most about a dozen are drawn
fn tick_step(span: f64) -> usize {
    [1usize, 2, 5, 10, 20, 50]
        .into_iter()
        .find(|s| span / *s as f64 <= 12.0)
        .unwrap_or(100)
}

/// Render the figure for a model run over the languages it was fitted on.
pub fn render_figure(report: &ModelReport, rows: &[LanguageRow]) -> String {
    let vmin = report.grid.first().copied().unwrap_or(0.0);
    let vmax = report.grid.last().copied().unwrap_or(1.0);
    let frame = Frame {
        x_lo: vmin - 0.5,
        x_hi: vmax + 0.5,
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="Helvetica, Arial, sans-serif">
<rect width="100%" height="100%" fill="white"/>
<text x="{:.1}" y="24" font-size="16" text-anchor="middle">Probability of /y/ vs vowel inventory size</text>
"#,
        LEFT + (WIDTH - LEFT - RIGHT) / 2.0
    ));

    svg.push_str(&render_axes(&frame));

    // Band: upper edge left to right, lower edge back.
    if !report.grid.is_empty() {
        let mut band = frame.path(&report.grid, &report.y_band.upper);
        let rev_x: Vec<f64> = report.grid.iter().rev().copied().collect();
        let rev_lower: Vec<f64> = report.y_band.lower.iter().rev().copied().collect();
        band.push(' ');
        band.push_str(&frame.path(&rev_x, &rev_lower));
        svg.push_str(&format!(
            "<polygon points=\"{band}\" fill=\"{Y_COLOR}\" fill-opacity=\"0.2\" stroke=\"none\"/>\n"
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(JITTER_SEED);
    svg.push_str("<g fill=\"black\" fill-opacity=\"0.5\">\n");
    for row in rows {
        let base = if row.y_present { 1.0 } else { 0.0 };
        let y = base + rng.random_range(-JITTER..JITTER);
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"2\"/>\n",
            frame.px(row.vowel_inventory_size as f64),
            frame.py(y)
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{Y_COLOR}\" stroke-width=\"2\"/>\n",
        frame.path(&report.grid, &report.y_band.mean)
    ));
    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{I_COLOR}\" stroke-width=\"1.5\" stroke-dasharray=\"6 4\" stroke-opacity=\"0.8\"/>\n",
        frame.path(&report.grid, &report.i_curve)
    ));

    svg.push_str(&render_legend());

    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
        frame.px(vmax * 0.97),
        frame.py(0.9),
        escape(&format!(
            "{}-fold CV AUC (/y/): {:.3}",
            report.cv.folds(),
            report.cv.mean_auc
        ))
    ));

    svg.push_str("</svg>\n");
    svg
}

fn render_axes(frame: &Frame) -> String {
    let x0 = LEFT;
    let x1 = WIDTH - RIGHT;
    let y0 = HEIGHT - BOTTOM;
    let y1 = TOP;
    let mut out = format!(
        "<g stroke=\"black\" stroke-width=\"1\">\n<line x1=\"{x0}\" y1=\"{y0}\" x2=\"{x1}\" y2=\"{y0}\"/>\n<line x1=\"{x0}\" y1=\"{y0}\" x2=\"{x0}\" y2=\"{y1}\"/>\n</g>\n"
    );

    let first = frame.x_lo.ceil().max(0.0) as usize;
    let last = frame.x_hi.floor().max(0.0) as usize;
    let step = tick_step(frame.x_hi - frame.x_lo);
    out.push_str("<g font-size=\"11\" text-anchor=\"middle\">\n");
    for v in (first..=last).filter(|v| v % step == 0) {
        let x = frame.px(v as f64);
        out.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{y0}\" x2=\"{x:.2}\" y2=\"{:.1}\" stroke=\"black\"/>\n<text x=\"{x:.2}\" y=\"{:.1}\">{v}</text>\n",
            y0 + 5.0,
            y0 + 18.0
        ));
    }
    out.push_str("</g>\n");

    out.push_str("<g font-size=\"11\" text-anchor=\"end\" dominant-baseline=\"middle\">\n");
    for k in 0..=4 {
        let p = k as f64 * 0.25;
        let y = frame.py(p);
        out.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.2}\" x2=\"{x0}\" y2=\"{y:.2}\" stroke=\"black\"/>\n<text x=\"{:.1}\" y=\"{y:.2}\">{p:.2}</text>\n",
            x0 - 5.0,
            x0 - 8.0
        ));
    }
    out.push_str("</g>\n");

    out.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"middle\">Vowel inventory size</text>\n",
        LEFT + (WIDTH - LEFT - RIGHT) / 2.0,
        HEIGHT - 15.0
    ));
    out.push_str(&format!(
        "<text x=\"18\" y=\"{cy:.1}\" font-size=\"13\" text-anchor=\"middle\" transform=\"rotate(-90 18 {cy:.1})\">Probability of vowel in inventory</text>\n",
        cy = TOP + (HEIGHT - TOP - BOTTOM) / 2.0
    ));
    out
}

fn render_legend() -> String {
    let x = LEFT + 12.0;
    let y = TOP + 12.0;
    format!(
        r##"<g font-size="11" dominant-baseline="middle">
<rect x="{bx:.1}" y="{by:.1}" width="210" height="62" fill="white" fill-opacity="0.8" stroke="#cccccc"/>
<circle cx="{cx:.1}" cy="{y1:.1}" r="3" fill="black" fill-opacity="0.5"/>
<text x="{tx:.1}" y="{y1:.1}">Languages (/y/ present = 1)</text>
<line x1="{x:.1}" y1="{y2:.1}" x2="{lx:.1}" y2="{y2:.1}" stroke="{Y_COLOR}" stroke-width="2"/>
<text x="{tx:.1}" y="{y2:.1}">Predicted P(/y/)</text>
<line x1="{x:.1}" y1="{y3:.1}" x2="{lx:.1}" y2="{y3:.1}" stroke="{I_COLOR}" stroke-width="1.5" stroke-dasharray="6 4"/>
<text x="{tx:.1}" y="{y3:.1}">Predicted P(/i/)</text>
</g>
"##,
        bx = x - 6.0,
        by = y - 6.0,
        cx = x + 10.0,
        lx = x + 20.0,
        tx = x + 28.0,
        y1 = y + 6.0,
        y2 = y + 24.0,
        y3 = y + 42.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_language_rows, test_model_report};

    #[test]
    fn test_figure_has_all_layers() {
        let svg = render_figure(&test_model_report(), &test_language_rows());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle cx").count(), 4 + 1);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("10-fold CV AUC (/y/): 0.750"));
        assert!(svg.contains("Vowel inventory size"));
    }

    #[test]
    fn test_jitter_is_deterministic_and_small() {
        let a = render_figure(&test_model_report(), &test_language_rows());
        let b = render_figure(&test_model_report(), &test_language_rows());
        assert_eq!(a, b);

        let frame = Frame {
            x_lo: 2.5,
            x_hi: 9.5,
        };
        let span = frame.py(0.0) - frame.py(JITTER);
        assert!(span > 0.0 && span < 10.0);
    }

    #[test]
    fn test_frame_maps_corners() {
        let frame = Frame { x_lo: 0.0, x_hi: 10.0 };
        assert!((frame.px(0.0) - LEFT).abs() < 1e-9);
        assert!((frame.px(10.0) - (WIDTH - RIGHT)).abs() < 1e-9);
        assert!((frame.py(Y_MIN) - (HEIGHT - BOTTOM)).abs() < 1e-9);
        assert!((frame.py(Y_MAX) - TOP).abs() < 1e-9);
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(7.0), 1);
        assert_eq!(tick_step(20.0), 2);
        assert_eq!(tick_step(50.0), 5);
    }

    #[test]
    fn test_empty_grid_still_renders() {
        let mut report = test_model_report();
        report.grid.clear();
        report.y_band.mean.clear();
        report.y_band.lower.clear();
        report.y_band.upper.clear();
        report.i_curve.clear();
        let svg = render_figure(&report, &[]);
        assert!(!svg.contains("<polygon"));
        assert!(svg.contains("</svg>"));
    }
}
