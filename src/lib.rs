#![doc = "Gerryconform public API"]
pub mod cli;
pub mod commands;
mod error;
pub mod io;
mod pipeline;
mod report;
mod schema;
mod types;

#[doc(inline)]
pub use error::ConformError;

#[doc(inline)]
pub use pipeline::{
    ConformOptions, DistrictOverride, ExclusionMap, FixSet, PartyOverride, VoteMerge, conform,
    explore, read_exclusions,
};

#[doc(inline)]
pub use pipeline::{CandidateTotal, DistrictResult, Record, WideRow};

#[doc(inline)]
pub use report::{Exclusion, RunReport};

#[doc(inline)]
pub use schema::{RawRecord, extract_records, select_offices};

#[doc(inline)]
pub use types::{Chamber, OfficeMap, Winner, party, state};
