//! Text (terminal) reporter with colors and formatting

use crate::construction::ExtractionReport;
use crate::stats::ModelReport;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Color an AUC by how far it is from chance
fn auc_color(auc: f64) -> &'static str {
    if !auc.is_finite() {
        DIM
    } else if auc >= 0.7 {
        GREEN
    } else if auc >= 0.6 {
        YELLOW
    } else {
        RED
    }
}

fn rule() -> String {
    format!("{DIM}──────────────────────────────────────{RESET}\n")
}

/// Render a model run as formatted terminal output
pub fn render_model(report: &ModelReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}/y/ vs vowel inventory size{RESET}\n"));
    out.push_str(&rule());
    out.push_str(&format!(
        "Languages: {}  /y/ present: {}  /i/ present: {}  Mean vowels: {:.2}\n",
        report.n_languages, report.y_present, report.i_present, report.vowel_mean
    ));
    if let Some(reference) = &report.reference_family {
        out.push_str(&format!("Reference family: {}", reference));
        if let Some(modal) = &report.modal_family {
            out.push_str(&format!("  {DIM}(most frequent: {}){RESET}", modal));
        }
        out.push('\n');
    }
    out.push('\n');

    let auc = report.cv.mean_auc;
    out.push_str(&format!("{BOLD}CROSS-VALIDATION{RESET}\n"));
    out.push_str(&format!(
        "  Mean CV AUC (/y/): {}{BOLD}{:.3}{RESET}  {DIM}{} folds used, {} skipped{RESET}\n\n",
        auc_color(auc),
        auc,
        report.cv.fold_aucs.len(),
        report.cv.skipped_folds
    ));

    out.push_str(&format!("{BOLD}COEFFICIENTS{RESET}\n"));
    out.push_str(&format!(
        "{DIM}  {:<32} {:>10} {:>10}{RESET}\n",
        "TERM", "/y/", "/i/"
    ));
    for (y, i) in report.y_coefficients.iter().zip(report.i_coefficients.iter()) {
        let term: String = y.term.chars().take(32).collect();
        out.push_str(&format!(
            "  {:<32} {:>10.4} {:>10.4}\n",
            term, y.estimate, i.estimate
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "{BOLD}BOOTSTRAP{RESET} ({} resamples used, {} skipped)\n",
        report.y_band.used, report.y_band.skipped
    ));
    if let (Some(first), Some(last)) = (report.grid.first(), report.grid.last()) {
        let n = report.grid.len() - 1;
        for (label, v, j) in [("min", first, 0), ("max", last, n)] {
            out.push_str(&format!(
                "  {} vowels = {:<5.1} P(/y/) {:.3} [{:.3}, {:.3}]  P(/i/) {:.3}\n",
                label,
                v,
                report.y_band.mean[j],
                report.y_band.lower[j],
                report.y_band.upper[j],
                report.i_curve[j]
            ));
        }
    }

    out
}

/// Render corpus statistics as a terminal table
pub fn render_extraction(report: &ExtractionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}let alone: corpus statistics{RESET}\n"));
    out.push_str(&rule());
    out.push_str(&format!(
        "{DIM}  {:<10} {:>8} {:>12} {:>10}   TOP Y HEADS{RESET}\n",
        "CORPUS", "N", "PARALLELISM", "LICENSING"
    ));
    for s in &report.stats {
        let top = if s.top_y_heads.is_empty() {
            format!("{DIM}-{RESET}")
        } else {
            s.top_y_heads.clone()
        };
        out.push_str(&format!(
            "  {:<10} {:>8} {:>12.3} {:>10.3}   {}\n",
            s.corpus, s.n_tokens, s.parallelism_rate, s.licensing_rate, top
        ));
    }
    out.push_str(&format!(
        "\n{} instances in total\n",
        report.instances.len()
    ));
    out
}
