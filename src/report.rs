use std::collections::BTreeSet;
use std::fmt;

/// One group of states removed from a run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub reason: String,
    pub states: Vec<String>,
}

/// Structured diagnostics for a single pipeline run. Stages append to this
/// instead of printing, so callers (and tests) can assert on exclusions.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Dataset name, e.g. "2018_state_leg_upper".
    pub name: String,
    /// States removed along the way, grouped by reason, in removal order.
    pub exclusions: Vec<Exclusion>,
    /// Known states absent from the input (and not already excluded).
    pub missing_states: Vec<String>,
    /// States present in the conformed output.
    pub included_states: Vec<String>,
    /// Known states absent from the conformed output.
    pub omitted_states: Vec<String>,
}

impl RunReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Record an exclusion. Empty state sets are dropped silently so stages
    /// can report unconditionally.
    pub fn exclude(&mut self, reason: impl Into<String>, states: impl IntoIterator<Item = String>) {
        let states: BTreeSet<String> = states.into_iter().collect();
        if states.is_empty() {
            return;
        }
        self.exclusions.push(Exclusion {
            reason: reason.into(),
            states: states.into_iter().collect(),
        });
    }

    /// Union of every state excluded so far.
    pub fn excluded_states(&self) -> BTreeSet<String> {
        self.exclusions
            .iter()
            .flat_map(|e| e.states.iter().cloned())
            .collect()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Reasons for omission:")?;
        for exclusion in &self.exclusions {
            writeln!(
                f,
                "  {} ({}): {}",
                exclusion.reason,
                exclusion.states.len(),
                exclusion.states.join(", ")
            )?;
        }
        if !self.missing_states.is_empty() {
            writeln!(
                f,
                "Not in dataset ({}): {}",
                self.missing_states.len(),
                self.missing_states.join(", ")
            )?;
        }
        writeln!(
            f,
            "States included ({}): {}",
            self.included_states.len(),
            self.included_states.join(", ")
        )?;
        write!(
            f,
            "States omitted ({}): {}",
            self.omitted_states.len(),
            self.omitted_states.join(", ")
        )
    }
}
