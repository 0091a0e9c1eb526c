use super::reshape::WideRow;
use crate::error::ConformError;
use crate::types::party::{self, Winner};

/// One conformed district row in the gerrymetrics schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictResult {
    pub state: String,
    pub year: i32,
    pub district: String,
    pub dem_votes: i64,
    pub gop_votes: i64,
    /// dem / (dem + gop), in [0, 1].
    pub d_voteshare: f64,
    /// Carried for schema compatibility; this pipeline always writes 0 and
    /// enforces no meaning.
    pub incumbent: i32,
    pub winner: Winner,
}

/// Shape wide rows into the output schema: major-party vote columns, the
/// configured year, the two-party voteshare, and the winner label.
///
/// A district with zero votes in both major-party columns means the
/// third-party/invalid-state filters upstream let something through; that
/// is fatal, never silently imputed.
pub fn format_results(rows: Vec<WideRow>, year: i32) -> Result<Vec<DistrictResult>, ConformError> {
    rows.into_iter()
        .map(|row| {
            let dem = row.votes.get(party::DEMOCRAT).copied().unwrap_or(0);
            let gop = row.votes.get(party::REPUBLICAN).copied().unwrap_or(0);
            if dem + gop == 0 {
                return Err(ConformError::ZeroDenominator {
                    state: row.state,
                    district: row.district,
                });
            }
            // Ties go to R, matching the reference datasets.
            let winner = if dem > gop { Winner::D } else { Winner::R };
            Ok(DistrictResult {
                state: row.state,
                year,
                district: row.district,
                dem_votes: dem,
                gop_votes: gop,
                d_voteshare: dem as f64 / (dem + gop) as f64,
                incumbent: 0,
                winner,
            })
        })
        .collect()
}
