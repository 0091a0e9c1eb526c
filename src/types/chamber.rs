use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Legislative chamber of a state legislature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Chamber {
    /// State senates
    Upper,
    /// State houses / assemblies / general assemblies
    Lower,
}

/// Classification of raw office-title strings into chambers. The titles vary
/// by state and election cycle, so the mapping is external configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficeMap {
    pub upper: Vec<String>,
    pub lower: Vec<String>,
}

impl OfficeMap {
    pub fn read_from_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open office map: {}", path.display()))?;
        let map = serde_json::from_reader(file)
            .with_context(|| format!("Malformed office map: {}", path.display()))?;
        Ok(map)
    }

    pub fn offices(&self, chamber: Chamber) -> &[String] {
        match chamber {
            Chamber::Upper => &self.upper,
            Chamber::Lower => &self.lower,
        }
    }
}
