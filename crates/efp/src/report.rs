//! Console report

use std::fmt::Write;

use efp_core::analysis::SensitivityReport;
use efp_core::statistics::ImpactStatistics;

/// Hit and containment summary
pub fn format_statistics(stats: &ImpactStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Direct Monte Carlo ({} trials)", stats.trials);
    let _ = writeln!(
        out,
        "  Hit probability:        {:.2}% ({} hits)",
        stats.hit_probability * 100.0,
        stats.hits
    );
    let _ = writeln!(out, "  95% containment radius: {:.3} m", stats.radius_95);
    let _ = writeln!(
        out,
        "  Central 95% span:       x {:.3} m, y {:.3} m",
        stats.span_x, stats.span_y
    );
    let _ = writeln!(
        out,
        "  Mean point of impact:   ({:.3}, {:.3}) m",
        stats.mean_point.x, stats.mean_point.y
    );
    out
}

/// Sensitivity table, ranked by ST
pub fn format_sensitivity(report: &SensitivityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Global sensitivity (N = {}, {} model evaluations)",
        report.base_samples, report.design_rows
    );
    let _ = writeln!(
        out,
        "  {:<12} {:>8} {:>8} {:>8} {:>8}",
        "Parameter", "S1", "S1_conf", "ST", "ST_conf"
    );
    for p in &report.parameters {
        let _ = writeln!(
            out,
            "  {:<12} {:>8.4} {:>8.4} {:>8.4} {:>8.4}",
            p.name, p.s1, p.s1_conf, p.st, p.st_conf
        );
    }
    out
}
