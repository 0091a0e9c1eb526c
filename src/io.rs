//! CSV I/O for the pipeline: dataframe reads, and atomic whole-file writes
//! of the conformed output.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::frame::DataFrame;
use polars::io::{SerReader, SerWriter};
use polars::prelude::{Column, CsvReader, CsvWriter};
use tempfile::NamedTempFile;

use crate::pipeline::DistrictResult;

pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Reads a CSV file from `path` into a Polars DataFrame.
pub fn read_from_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input: {}", path.display()))?;
    let df = CsvReader::new(file).finish()?;
    Ok(df)
}

/// Build the output dataframe in the gerrymetrics column order:
/// State,Year,District,Dem Votes,GOP Votes,D Voteshare,Incumbent,Party
pub fn results_to_dataframe(results: &[DistrictResult]) -> Result<DataFrame> {
    let states: Vec<&str> = results.iter().map(|r| r.state.as_str()).collect();
    let years: Vec<i32> = results.iter().map(|r| r.year).collect();
    let districts: Vec<&str> = results.iter().map(|r| r.district.as_str()).collect();
    let dem_votes: Vec<i64> = results.iter().map(|r| r.dem_votes).collect();
    let gop_votes: Vec<i64> = results.iter().map(|r| r.gop_votes).collect();
    let voteshares: Vec<f64> = results.iter().map(|r| r.d_voteshare).collect();
    let incumbents: Vec<i32> = results.iter().map(|r| r.incumbent).collect();
    let winners: Vec<&str> = results.iter().map(|r| r.winner.as_str()).collect();

    let df = DataFrame::new(vec![
        Column::new("State".into(), states),
        Column::new("Year".into(), years),
        Column::new("District".into(), districts),
        Column::new("Dem Votes".into(), dem_votes),
        Column::new("GOP Votes".into(), gop_votes),
        Column::new("D Voteshare".into(), voteshares),
        Column::new("Incumbent".into(), incumbents),
        Column::new("Party".into(), winners),
    ])?;
    Ok(df)
}

/// Write-then-rename so a failed run never leaves a truncated output behind.
pub fn write_to_csv(df: &mut DataFrame, target: &Path, force: bool) -> Result<()> {
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }

    let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
    CsvWriter::new(tmp.as_file())
        .finish(df)
        .with_context(|| format!("Failed to write CSV for {}", target.display()))?;
    tmp.as_file().sync_all().ok(); // best-effort fsync
    tmp.persist(target)
        .with_context(|| format!("rename to {}", target.display()))?;
    Ok(())
}
