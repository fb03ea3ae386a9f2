// ---------------------------------------------------------------------------
// ConstructionError: failures while instantiating a placed object
// ---------------------------------------------------------------------------

use std::fmt;

/// A placement passed validation but its object could not be built.
///
/// Nothing is written to the grid or registry when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The prototype's model key has no entry in the model catalog.
    MissingModel(String),
    /// A prototype name did not resolve in the library.
    UnknownPrototype(String),
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::MissingModel(key) => write!(f, "Missing model: {key}"),
            ConstructionError::UnknownPrototype(name) => write!(f, "Unknown prototype: {name}"),
        }
    }
}

impl std::error::Error for ConstructionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_model() {
        let err = ConstructionError::MissingModel("wall_a".into());
        assert_eq!(err.to_string(), "Missing model: wall_a");
    }

    #[test]
    fn test_display_unknown_prototype() {
        let err = ConstructionError::UnknownPrototype("Tower".into());
        assert!(err.to_string().contains("Tower"));
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(ConstructionError::MissingModel("x".into()));
        assert!(err.source().is_none());
    }
}
