use anyhow::{Result, bail};

use crate::cli::{Cli, ExploreArgs};
use crate::pipeline::explore;
use crate::types::OfficeMap;
use crate::{io, schema};

pub fn run(cli: &Cli, args: &ExploreArgs) -> Result<()> {
    let df = io::read_from_csv(&args.input)?;
    let mut records = schema::extract_records(&df)?;

    if let Some(chamber) = args.chamber {
        let Some(offices_path) = &args.offices else {
            bail!("--chamber requires --offices");
        };
        let office_map = OfficeMap::read_from_json(offices_path)?;
        records = schema::select_offices(records, office_map.offices(chamber));
    }
    if cli.verbose > 0 {
        eprintln!("[explore] {} rows <- {}", records.len(), args.input.display());
    }

    let missing = explore::candidates_missing_party(&records);
    println!("Candidates missing a party label ({}):", missing.len());
    for r in missing {
        println!("  {} {}: {}", r.state, r.district, r.candidate);
    }

    let multi = explore::multi_district_candidates(&records);
    println!("Candidates in more than one district ({}):", multi.len());
    for (state, candidate, n) in multi {
        println!("  {state} {candidate} ({n} districts)");
    }

    let winners = explore::no_party_winners(&records);
    println!("District winners without a party ({}):", winners.len());
    for r in winners {
        println!("  {} {}: {}", r.state, r.district, r.candidate);
    }

    println!("Third parties at or above {:.0}% statewide:", args.threshold * 100.0);
    for (state, party, share) in explore::third_party_voteshares(&records, args.threshold) {
        println!("  {state} {party} {:.0}%", share * 100.0);
    }

    println!("Districts per state:");
    for (state, n) in explore::districts_per_state(&records) {
        println!("  {state}: {n}");
    }
    Ok(())
}
