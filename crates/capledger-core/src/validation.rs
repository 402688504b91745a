use thiserror::Error;

/// A string that does not conform to its field's canonical shape.
///
/// Identifiers and digests are validated once, at the boundary; everything
/// past `parse` holds a conforming value. The error carries the pattern the
/// value was checked against so callers can say exactly what a well-formed
/// value looks like.
#[derive(Debug, Error)]
#[error("{field} '{value}' does not match {expected}")]
pub struct ValidationError {
    /// Field that failed to parse.
    pub field: &'static str,
    /// Pattern the value was checked against.
    pub expected: &'static str,
    /// Offending value.
    pub value: String,
}
