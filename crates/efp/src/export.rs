//! CSV export of the sensitivity table

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use efp_core::analysis::SensitivityReport;
use serde::Serialize;

use crate::util::io::atomic_write_bytes;

/// File name of the first- and total-order table
pub const SENSITIVITY_FILE: &str = "global_sobol.csv";
/// File name of the second-order table
pub const SECOND_ORDER_FILE: &str = "global_sobol_s2.csv";

#[derive(Serialize)]
struct SensitivityRow<'a> {
    #[serde(rename = "Parameter")]
    parameter: &'a str,
    #[serde(rename = "S1")]
    s1: f64,
    #[serde(rename = "ST")]
    st: f64,
    #[serde(rename = "S1_conf")]
    s1_conf: f64,
    #[serde(rename = "ST_conf")]
    st_conf: f64,
}

#[derive(Serialize)]
struct SecondOrderRow<'a> {
    #[serde(rename = "Parameter_1")]
    first: &'a str,
    #[serde(rename = "Parameter_2")]
    second: &'a str,
    #[serde(rename = "S2")]
    s2: f64,
    #[serde(rename = "S2_conf")]
    s2_conf: f64,
}

fn to_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> color_eyre::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .wrap_err("failed to flush CSV buffer")
}

/// Ranked table with columns `Parameter,S1,ST,S1_conf,ST_conf`
pub fn sensitivity_csv(report: &SensitivityReport) -> color_eyre::Result<Vec<u8>> {
    to_csv(report.parameters.iter().map(|p| SensitivityRow {
        parameter: &p.name,
        s1: p.s1,
        st: p.st,
        s1_conf: p.s1_conf,
        st_conf: p.st_conf,
    }))
}

/// Write the sensitivity tables into `dir`, returning the paths written
pub fn write_sensitivity_tables(
    report: &SensitivityReport,
    dir: &Path,
) -> color_eyre::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::new();

    let path = dir.join(SENSITIVITY_FILE);
    atomic_write_bytes(&path, &sensitivity_csv(report)?)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    written.push(path);

    if let Some(pairs) = &report.second_order {
        let bytes = to_csv(pairs.iter().map(|pair| SecondOrderRow {
            first: &pair.first,
            second: &pair.second,
            s2: pair.s2,
            s2_conf: pair.s2_conf,
        }))?;
        let path = dir.join(SECOND_ORDER_FILE);
        atomic_write_bytes(&path, &bytes)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    tracing::info!(files = written.len(), dir = %dir.display(), "exported sensitivity tables");
    Ok(written)
}
