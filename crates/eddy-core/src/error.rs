//! Error type shared by every eddy crate.

use thiserror::Error;

/// Errors raised while building or combining algebra objects.
///
/// Construction-time problems (generator counts, signatures) are never
/// defaulted away; they surface here and the caller decides what to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EddyError {
    /// Generator count or generator ordinal outside the supported range.
    #[error("generator value {got} outside [0, {max}]")]
    GeneratorRange { got: usize, max: usize },

    /// Direct indexed access past the end of a basis or table.
    #[error("index {index} outside [0, {len})")]
    IndexRange { index: usize, len: usize },

    /// Grade outside `[0, generator count]`.
    #[error("grade {grade} outside [0, {max}]")]
    GradeRange { grade: usize, max: usize },

    /// Signature string of bad length or with characters other than `+`/`-`.
    #[error("invalid signature {signature:?}: {reason}")]
    Signature { signature: String, reason: String },

    /// Two objects built from different bases, signatures or generator counts.
    #[error("reference mismatch: {0}")]
    ReferenceMismatch(String),

    /// Two scalars carrying different unit tags.
    #[error("cardinal mismatch: {left} vs {right}")]
    CardinalMismatch { left: String, right: String },

    /// Multiplicative inverse requested for a zero scalar.
    #[error("{0} has no multiplicative inverse")]
    NotInvertible(String),

    /// Engine or CLI configuration outside its allowed values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EddyError {
    /// Whether this is one of the range-class errors.
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            EddyError::GeneratorRange { .. }
                | EddyError::IndexRange { .. }
                | EddyError::GradeRange { .. }
        )
    }

    /// Whether this error reports objects that cannot be combined.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            EddyError::ReferenceMismatch(_) | EddyError::CardinalMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = EddyError::GeneratorRange { got: 15, max: 14 };
        assert_eq!(e.to_string(), "generator value 15 outside [0, 14]");

        let e = EddyError::IndexRange { index: 8, len: 8 };
        assert_eq!(e.to_string(), "index 8 outside [0, 8)");

        let e = EddyError::Signature {
            signature: "+x".into(),
            reason: "bad character 'x'".into(),
        };
        assert_eq!(e.to_string(), "invalid signature \"+x\": bad character 'x'");
    }

    #[test]
    fn test_classes() {
        assert!(EddyError::GradeRange { grade: 4, max: 3 }.is_range());
        assert!(!EddyError::NotInvertible("0".into()).is_range());
        assert!(EddyError::ReferenceMismatch("x".into()).is_mismatch());
        assert!(EddyError::CardinalMismatch { left: "a".into(), right: "b".into() }.is_mismatch());
    }
}
