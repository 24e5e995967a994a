//! Tabular vertex export (CSV or Parquet, chosen by extension).

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use visimesh::Mesh;

/// One row per mesh vertex: position, UV, and whether it is the anchor.
pub fn vertex_frame(mesh: &Mesh) -> Result<DataFrame> {
    let xs: Vec<f64> = mesh.vertices.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = mesh.vertices.iter().map(|p| p.y).collect();
    let us: Vec<f64> = mesh.uv.iter().map(|p| p.x).collect();
    let vs: Vec<f64> = mesh.uv.iter().map(|p| p.y).collect();
    let anchor: Vec<bool> = (0..mesh.vertices.len()).map(|i| i == 0).collect();
    let df = df!(
        "x" => xs,
        "y" => ys,
        "u" => us,
        "v" => vs,
        "anchor" => anchor
    )?;
    Ok(df)
}

pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match ext {
        "csv" => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing csv {}", path.display()))?,
        "parquet" => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("writing parquet {}", path.display()))?;
        }
        other => bail!("unsupported table extension {other:?} (use .csv or .parquet)"),
    }
    Ok(())
}
