//! Error types for reading interpretation
//!
//! The engine never lets an error escape as a panic or cross the public
//! boundary of a classification call: a reading that cannot be interpreted
//! surfaces as [`ValueValidity::Invalid`](crate::validity::ValueValidity),
//! and a parse failure inside threshold projection falls back to the static
//! configured bound. [`ParseError`] only exists at the seam where a raw
//! value string is turned into a number.

use thiserror_no_std::Error;

/// Failure to interpret a raw value string as its declared data type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The reading carries no value at all.
    #[error("value is absent")]
    Absent,

    /// The string is not a decimal number (or is NaN/infinite).
    #[error("`{0}` is not a decimal number")]
    NotDecimal(String),

    /// The string is not a whole number.
    #[error("`{0}` is not a whole number")]
    NotInteger(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ParseError::NotDecimal("abc".into());
        assert_eq!(err.to_string(), "`abc` is not a decimal number");
    }
}
