//! Party labels as they appear in the distributor data, plus the two-party
//! winner label used by the conformed schema.

/// The two major parties tracked by the downstream metrics engine.
pub const DEMOCRAT: &str = "democrat";
pub const REPUBLICAN: &str = "republican";

// State-specific ballot names that count as the national Democratic party,
// e.g. the Democratic-Farmer-Labor party in Minnesota.
const DEMOCRAT_ALIASES: [&str; 4] = [
    "democratic farmer labor",
    "democratic-farmer-labor",
    "democratic-npl",
    "democrat&republican",
];

/// Map a raw party label onto its national equivalent. Unknown labels pass
/// through unchanged.
pub fn canonicalize(label: String) -> String {
    if DEMOCRAT_ALIASES.contains(&label.as_str()) {
        DEMOCRAT.to_string()
    } else {
        label
    }
}

/// True for the two major parties the metrics engine models.
pub fn is_major(label: &str) -> bool {
    label == DEMOCRAT || label == REPUBLICAN
}

/// Winning-party label in the conformed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    D,
    R,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::D => "D",
            Winner::R => "R",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_democrat() {
        assert_eq!(canonicalize("democratic farmer labor".into()), DEMOCRAT);
        assert_eq!(canonicalize("democratic-npl".into()), DEMOCRAT);
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(canonicalize("green".into()), "green");
        assert_eq!(canonicalize("republican".into()), REPUBLICAN);
    }
}
