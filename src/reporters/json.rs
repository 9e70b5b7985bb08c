//! JSON reporter
//!
//! Pretty-printed JSON of any serialisable report. Non-finite numbers
//! (an AUC with no contributing fold) come out as `null`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A report with provenance fields prepended
#[derive(Serialize)]
struct Stamped<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    lingstat_version: &'static str,
    #[serde(flatten)]
    report: &'a T,
}

/// Render report as JSON
pub fn render<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render report as JSON with a generation timestamp and tool version
pub fn render_stamped<T: Serialize>(report: &T) -> Result<String> {
    render(&Stamped {
        generated_at: Utc::now(),
        lingstat_version: env!("CARGO_PKG_VERSION"),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_model_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_model_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["n_languages"], 4);
        assert_eq!(parsed["reference_family"], "Atlantic");
        assert_eq!(parsed["y_band"]["used"], 190);
        assert_eq!(parsed["y_coefficients"][1]["term"], "vowel_inv_c");
    }

    #[test]
    fn test_stamped_keeps_report_fields() {
        let json_str = render_stamped(&test_model_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["generated_at"].is_string());
        assert_eq!(parsed["lingstat_version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(parsed["n_languages"], 4);
    }

    #[test]
    fn test_nan_auc_is_null() {
        let mut report = test_model_report();
        report.cv.mean_auc = f64::NAN;
        report.cv.fold_aucs.clear();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["cv"]["mean_auc"].is_null());
    }
}
