//! SVG charts of the impact cloud and the sensitivity ranking

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, ensure};
use efp_core::analysis::SensitivityReport;
use efp_core::config::TargetRect;
use efp_core::model::ImpactCloud;
use efp_core::statistics::ImpactStatistics;
use plotters::prelude::*;

use crate::util::io::atomic_write_bytes;

/// File name of the impact scatter
pub const IMPACT_PLOT_FILE: &str = "impact_distribution.svg";
/// File name of the S1/ST bar chart
pub const SENSITIVITY_PLOT_FILE: &str = "sensitivity_analysis.svg";

const IMPACT_SIZE: (u32, u32) = (900, 800);
const SENSITIVITY_SIZE: (u32, u32) = (1000, 600);

const ST_COLOR: RGBColor = RGBColor(30, 144, 255);
const S1_COLOR: RGBColor = RGBColor(255, 165, 0);

/// Scatter of the impact points with the target rectangle, the 95% containment circle
/// and the hit probability
pub fn impact_svg(
    cloud: &ImpactCloud,
    stats: &ImpactStatistics,
    target: &TargetRect,
) -> color_eyre::Result<String> {
    let points: Vec<(f64, f64)> = cloud
        .points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| (p.x, p.y))
        .collect();

    let (hw, hh) = (target.half_width(), target.half_height());
    let radius = stats.radius_95.is_finite().then_some(stats.radius_95);
    let extent = points
        .iter()
        .fold(hw.max(hh).max(radius.unwrap_or(0.0)), |acc, &(x, y)| {
            acc.max(x.abs()).max(y.abs())
        })
        * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, IMPACT_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("EFP impact points and target area", ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-extent..extent, -extent..extent)?;

        chart
            .configure_mesh()
            .x_desc("X (m)")
            .y_desc("Y (m)")
            .draw()?;

        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 2, BLUE.mix(0.5).filled())))?
            .label("Impact points")
            .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(-hw, -hh), (hw, hh)],
                RED.stroke_width(2),
            )))?
            .label("Target area")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], RED.stroke_width(2))
            });

        if let Some(r) = radius {
            let circle = (0..=180).map(move |i| {
                let angle = f64::from(i) * std::f64::consts::TAU / 180.0;
                (r * angle.cos(), r * angle.sin())
            });
            chart
                .draw_series(DashedLineSeries::new(circle, 8, 5, BLUE.stroke_width(2)))?
                .label("95% containment circle")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.draw(&Text::new(
            format!("Hit probability: {:.2}%", stats.hit_probability * 100.0),
            (90, 60),
            ("sans-serif", 18).into_font(),
        ))?;
        root.present()?;
    }
    Ok(svg)
}

/// Horizontal ST bars with the S1 bars overlaid, highest ST at the top
pub fn sensitivity_svg(report: &SensitivityReport) -> color_eyre::Result<String> {
    let n = report.parameters.len();
    ensure!(n > 0, "sensitivity report has no parameters to plot");

    let finite = || {
        report
            .parameters
            .iter()
            .flat_map(|p| [p.s1, p.st])
            .filter(|v| v.is_finite())
    };
    let x_max = finite().fold(0.1_f64, f64::max) * 1.25;
    let x_min = finite().fold(0.0_f64, f64::min) * 1.25;

    // Segment 0 is the bottom of the chart
    let slot = |rank: usize| n - 1 - rank;
    let label = |v: &SegmentValue<usize>| -> String {
        match v {
            SegmentValue::CenterOf(i) if *i < n => report.parameters[n - 1 - *i].name.clone(),
            _ => String::new(),
        }
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SENSITIVITY_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Global sensitivity of the distance to the target center",
                ("sans-serif", 22),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(110)
            .build_cartesian_2d(x_min..x_max, (0..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&label)
            .x_desc("Sensitivity index")
            .draw()?;

        let bar = |value: f64, rank: usize, inset: u32, style: ShapeStyle| {
            let mut rect = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(slot(rank))),
                    (value, SegmentValue::Exact(slot(rank) + 1)),
                ],
                style,
            );
            rect.set_margin(inset, inset, 0, 0);
            rect
        };

        chart
            .draw_series(
                report
                    .parameters
                    .iter()
                    .enumerate()
                    .map(|(rank, p)| bar(p.st, rank, 4, ST_COLOR.filled())),
            )?
            .label("ST (total order)")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], ST_COLOR.filled())
            });

        chart
            .draw_series(
                report
                    .parameters
                    .iter()
                    .enumerate()
                    .map(|(rank, p)| bar(p.s1, rank, 14, S1_COLOR.mix(0.85).filled())),
            )?
            .label("S1 (first order)")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], S1_COLOR.filled())
            });

        let font = ("sans-serif", 13).into_font();
        chart.draw_series(report.parameters.iter().enumerate().flat_map(|(rank, p)| {
            let center = SegmentValue::CenterOf(slot(rank));
            [(p.st, -14), (p.s1, 2)].map(|(value, dy)| {
                EmptyElement::at((value.max(0.0), center.clone()))
                    + Text::new(format!("{value:.3}"), (6, dy), font.clone())
            })
        }))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }
    Ok(svg)
}

/// Write the impact scatter and, when a report is given, the sensitivity chart into
/// `dir`, returning the paths written
pub fn write_plots(
    cloud: &ImpactCloud,
    stats: &ImpactStatistics,
    target: &TargetRect,
    report: Option<&SensitivityReport>,
    dir: &Path,
) -> color_eyre::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create output directory {}", dir.display()))?;

    let mut charts = vec![(IMPACT_PLOT_FILE, impact_svg(cloud, stats, target)?)];
    if let Some(report) = report {
        charts.push((SENSITIVITY_PLOT_FILE, sensitivity_svg(report)?));
    }

    let mut written = Vec::with_capacity(charts.len());
    for (name, svg) in charts {
        let path = dir.join(name);
        atomic_write_bytes(&path, svg.as_bytes())
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    tracing::info!(files = written.len(), dir = %dir.display(), "rendered plots");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use efp_core::analysis::ParameterSensitivity;
    use efp_core::model::ImpactPoint;
    use tempfile::tempdir;

    fn cloud() -> ImpactCloud {
        let points = vec![
            ImpactPoint::new(0.5, -0.25),
            ImpactPoint::new(-1.0, 0.75),
            ImpactPoint::new(5.0, 0.0),
            ImpactPoint::new(f64::NAN, 1.0),
        ];
        ImpactCloud::new(points, 42)
    }

    fn stats() -> ImpactStatistics {
        ImpactStatistics {
            trials: 4,
            hits: 2,
            hit_probability: 0.5,
            radius_95: 1.6649,
            span_x: 3.3298,
            span_y: 1.0,
            mean_point: ImpactPoint::new(0.0, 0.0),
        }
    }

    fn report() -> SensitivityReport {
        let param = |name: &str, s1: f64, st: f64| ParameterSensitivity {
            name: name.to_string(),
            s1,
            st,
            s1_conf: 0.01,
            st_conf: 0.02,
        };
        SensitivityReport {
            parameters: vec![
                param("theta0", 0.385, 0.499),
                param("phi0", 0.31, 0.402),
                param("dphi_dt", -0.001, 0.0),
            ],
            second_order: None,
            base_samples: 8,
            design_rows: 160,
        }
    }

    #[test]
    fn test_impact_chart_contents() {
        let svg = impact_svg(&cloud(), &stats(), &TargetRect::default()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Hit probability: 50.00%"));
        assert!(svg.contains("Target area"));
        assert!(svg.contains("95% containment circle"));
    }

    #[test]
    fn test_non_finite_radius_skips_circle() {
        let mut stats = stats();
        stats.radius_95 = f64::INFINITY;
        let svg = impact_svg(&cloud(), &stats, &TargetRect::default()).unwrap();

        assert!(svg.contains("Target area"));
        assert!(!svg.contains("95% containment circle"));
    }

    #[test]
    fn test_sensitivity_chart_labels_every_parameter() {
        let svg = sensitivity_svg(&report()).unwrap();

        for name in ["theta0", "phi0", "dphi_dt"] {
            assert!(svg.contains(name), "missing {name}");
        }
        assert!(svg.contains("0.499"));
        assert!(svg.contains("S1 (first order)"));
    }

    #[test]
    fn test_empty_report_rejected() {
        let mut report = report();
        report.parameters.clear();
        assert!(sensitivity_svg(&report).is_err());
    }

    #[test]
    fn test_plots_written_to_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("plots");
        let report = report();

        let written = write_plots(
            &cloud(),
            &stats(),
            &TargetRect::default(),
            Some(&report),
            &out,
        )
        .unwrap();

        assert_eq!(
            written,
            vec![out.join(IMPACT_PLOT_FILE), out.join(SENSITIVITY_PLOT_FILE)]
        );
        let svg = fs::read_to_string(out.join(SENSITIVITY_PLOT_FILE)).unwrap();
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_only_impact_plot_without_report() {
        let dir = tempdir().unwrap();
        let written =
            write_plots(&cloud(), &stats(), &TargetRect::default(), None, dir.path()).unwrap();

        assert_eq!(written, vec![dir.path().join(IMPACT_PLOT_FILE)]);
        assert!(!dir.path().join(SENSITIVITY_PLOT_FILE).exists());
    }
}
