//! The clean/conform pipeline: a strictly sequential chain of pure
//! transforms from the raw distributor schema down to one row per district.

mod aggregate;
mod clean;
pub mod explore;
mod filter;
mod fix;
mod format;
mod reshape;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

pub use aggregate::{CandidateTotal, aggregate};
pub use clean::{Record, clean};
pub use filter::filter_two_party;
pub use fix::{DistrictOverride, FixSet, PartyOverride, VoteMerge};
pub use format::{DistrictResult, format_results};
pub use reshape::{WideRow, pivot};

use crate::report::RunReport;
use crate::schema::RawRecord;
use crate::types::state;

/// Pre-clean exclusions: human-readable reason -> state codes. Kept as an
/// explicit, auditable input rather than inlined logic.
pub type ExclusionMap = BTreeMap<String, BTreeSet<String>>;

pub fn read_exclusions(path: &Path) -> Result<ExclusionMap> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open exclusion map: {}", path.display()))?;
    let map = serde_json::from_reader(file)
        .with_context(|| format!("Malformed exclusion map: {}", path.display()))?;
    Ok(map)
}

/// Per-run settings for [`conform`].
#[derive(Debug)]
pub struct ConformOptions<'a> {
    /// Dataset name used in the run report.
    pub name: &'a str,
    /// Year stamped on every output row.
    pub year: i32,
    pub exclusions: &'a ExclusionMap,
    pub fixes: &'a FixSet,
}

/// Run the whole pipeline over typed records: exclusions, clean, fix,
/// aggregate, pivot, two-party filter, format.
///
/// Returns the conformed districts together with the structured run report.
pub fn conform(
    records: Vec<RawRecord>,
    options: &ConformOptions<'_>,
) -> Result<(Vec<DistrictResult>, RunReport)> {
    let mut report = RunReport::new(options.name);

    // Configured exclusions apply before anything else.
    for (reason, states) in options.exclusions {
        report.exclude(reason.clone(), states.iter().cloned());
    }
    let excluded = report.excluded_states();
    let records: Vec<RawRecord> = records
        .into_iter()
        .filter(|r| !excluded.contains(&r.state))
        .collect();

    // States the distributor never covered at all.
    let present: BTreeSet<&str> = records.iter().map(|r| r.state.as_str()).collect();
    report.missing_states = state::STATE_PO
        .iter()
        .filter(|s| !present.contains(**s) && !excluded.contains(**s))
        .map(|s| s.to_string())
        .collect();

    let records = clean(records, &mut report);
    let records = options.fixes.apply(records);
    let totals = aggregate(records);
    let wide = pivot(&totals);
    let wide = filter_two_party(wide, &mut report);
    let results = format_results(wide, options.year)?;

    let included: BTreeSet<&str> = results.iter().map(|r| r.state.as_str()).collect();
    report.included_states = included.iter().map(|s| s.to_string()).collect();
    report.omitted_states = state::STATE_PO
        .iter()
        .filter(|s| !included.contains(**s))
        .map(|s| s.to_string())
        .collect();

    Ok((results, report))
}
