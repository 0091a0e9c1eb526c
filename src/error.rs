use thiserror::Error;

/// Fatal pipeline failures. Recoverable conditions (incomplete states,
/// third-party wins) never surface here; they are collected in
/// [`crate::RunReport`] instead.
#[derive(Debug, Error)]
pub enum ConformError {
    /// The input table does not follow the expected distributor schema.
    #[error("input is missing required column `{0}`")]
    MissingColumn(String),

    /// A vote column holds values that cannot be coerced to integers.
    #[error("column `{column}` holds {count} non-numeric value(s)")]
    TypeConversion { column: String, count: usize },

    /// A district reached the formatter with no major-party votes at all,
    /// which the third-party/invalid-state filters are supposed to prevent.
    #[error("district {state} {district} has no major-party votes after filtering")]
    ZeroDenominator { state: String, district: String },
}
