use anyhow::{Context, Result, bail};

use crate::cli::{Cli, ConformArgs};
use crate::pipeline::{self, ConformOptions, ExclusionMap, FixSet};
use crate::types::OfficeMap;
use crate::{io, schema};

pub fn run(cli: &Cli, args: &ConformArgs) -> Result<()> {
    io::assert_not_stdout(&args.output)?;

    let df = io::read_from_csv(&args.input)?;
    let mut records = schema::extract_records(&df)
        .with_context(|| format!("Schema error in {}", args.input.display()))?;
    if cli.verbose > 0 {
        eprintln!("[conform] {} raw rows <- {}", records.len(), args.input.display());
    }

    if let Some(chamber) = args.chamber {
        let Some(offices_path) = &args.offices else {
            bail!("--chamber requires --offices");
        };
        let office_map = OfficeMap::read_from_json(offices_path)?;
        records = schema::select_offices(records, office_map.offices(chamber));
        if cli.verbose > 0 {
            eprintln!("[conform] {} rows after office selection", records.len());
        }
    }

    let exclusions = match &args.exclusions {
        Some(path) => pipeline::read_exclusions(path)?,
        None => ExclusionMap::new(),
    };
    let fixes = match &args.fixes {
        Some(path) => FixSet::read_from_json(path)?,
        None => FixSet::default(),
    };

    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "conform".to_string()),
    };

    let options = ConformOptions {
        name: &name,
        year: args.year,
        exclusions: &exclusions,
        fixes: &fixes,
    };
    let (results, report) = pipeline::conform(records, &options)?;

    let mut df = io::results_to_dataframe(&results)?;
    io::write_to_csv(&mut df, &args.output, args.force)?;

    println!("{report}");
    if cli.verbose > 0 {
        eprintln!("[conform] wrote {} districts -> {}", results.len(), args.output.display());
    }
    Ok(())
}
