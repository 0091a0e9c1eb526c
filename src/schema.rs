//! Typed extraction from the raw distributor (MEDSL) table.
//!
//! The loader keeps the dataframe layer thin: columns are validated and
//! coerced here, and everything downstream works on typed records.

use ahash::AHashSet;
use polars::frame::DataFrame;
use polars::prelude::DataType;

use crate::error::ConformError;

/// Column names of the MEDSL results schema.
pub mod columns {
    pub const YEAR: &str = "year";
    pub const STATE_PO: &str = "state_po";
    pub const DISTRICT: &str = "district";
    pub const OFFICE: &str = "office";
    pub const CANDIDATE: &str = "candidate";
    pub const PARTY: &str = "party";
    pub const MODE: &str = "mode";
    pub const CANDIDATE_VOTES: &str = "candidatevotes";
    pub const TOTAL_VOTES: &str = "totalvotes";
}

/// One row of the raw results table. Vote counts stay optional until the
/// cleaner fills them; a missing party is legitimate (write-ins, "All
/// Others") and survives all the way into aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub year: i32,
    pub state: String,
    pub district: String,
    pub office: String,
    pub candidate: String,
    pub party: Option<String>,
    pub mode: String,
    pub candidate_votes: Option<i64>,
    pub total_votes: Option<i64>,
}

/// Extract typed records from a raw results dataframe.
///
/// Fails with [`ConformError::MissingColumn`] when the table does not follow
/// the distributor schema, and [`ConformError::TypeConversion`] when a vote
/// column holds non-numeric, non-empty values.
pub fn extract_records(df: &DataFrame) -> Result<Vec<RawRecord>, ConformError> {
    let year = int_column(df, columns::YEAR)?;
    let state = string_column(df, columns::STATE_PO)?;
    let district = string_column(df, columns::DISTRICT)?;
    let office = string_column(df, columns::OFFICE)?;
    let candidate = string_column(df, columns::CANDIDATE)?;
    let party = string_column(df, columns::PARTY)?;
    let mode = string_column(df, columns::MODE)?;
    let candidate_votes = vote_column(df, columns::CANDIDATE_VOTES)?;
    let total_votes = vote_column(df, columns::TOTAL_VOTES)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        records.push(RawRecord {
            year: year[i].unwrap_or_default(),
            state: state[i].clone().unwrap_or_default(),
            district: district[i].clone().unwrap_or_default(),
            office: office[i].clone().unwrap_or_default(),
            candidate: candidate[i].clone().unwrap_or_default(),
            party: party[i].clone(),
            mode: mode[i].clone().unwrap_or_default(),
            candidate_votes: candidate_votes[i],
            total_votes: total_votes[i],
        });
    }
    Ok(records)
}

/// Keep only records whose office title belongs to the requested chamber.
pub fn select_offices(records: Vec<RawRecord>, offices: &[String]) -> Vec<RawRecord> {
    let wanted: AHashSet<&str> = offices.iter().map(String::as_str).collect();
    records
        .into_iter()
        .filter(|r| wanted.contains(r.office.as_str()))
        .collect()
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ConformError> {
    let column = df
        .column(name)
        .map_err(|_| ConformError::MissingColumn(name.to_string()))?;
    // District labels in particular arrive as integers in some cycles.
    let casted = column.cast(&DataType::String).map_err(|_| {
        ConformError::TypeConversion { column: name.to_string(), count: column.len() }
    })?;
    let values = casted.str().map_err(|_| {
        ConformError::TypeConversion { column: name.to_string(), count: column.len() }
    })?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>, ConformError> {
    let column = df
        .column(name)
        .map_err(|_| ConformError::MissingColumn(name.to_string()))?;
    let casted = column.cast(&DataType::Int32).map_err(|_| {
        ConformError::TypeConversion { column: name.to_string(), count: column.len() }
    })?;
    let values = casted.i32().map_err(|_| {
        ConformError::TypeConversion { column: name.to_string(), count: column.len() }
    })?;
    Ok(values.into_iter().collect())
}

/// Coerce a vote column to integers, preserving nulls for the cleaner to
/// fill. Values that were present but fail the coercion are a schema defect.
fn vote_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, ConformError> {
    let column = df
        .column(name)
        .map_err(|_| ConformError::MissingColumn(name.to_string()))?;
    let casted = match column.dtype() {
        // Text columns go through float first so "6700.0" style values survive.
        DataType::String => column
            .cast(&DataType::Float64)
            .and_then(|c| c.cast(&DataType::Int64)),
        _ => column.cast(&DataType::Int64),
    }
    .map_err(|_| ConformError::TypeConversion { column: name.to_string(), count: column.len() })?;

    // A non-strict cast turns unparseable values into nulls; any null that
    // was not already in the input is a non-numeric value.
    let introduced = casted.null_count().saturating_sub(column.null_count());
    if introduced > 0 {
        return Err(ConformError::TypeConversion { column: name.to_string(), count: introduced });
    }
    let values = casted.i64().map_err(|_| {
        ConformError::TypeConversion { column: name.to_string(), count: column.len() }
    })?;
    Ok(values.into_iter().collect())
}
