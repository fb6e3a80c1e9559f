use thiserror::Error;

/// Caller-contract violations raised by the catalog and navigator.
///
/// These never come from ordinary end-user navigation; stepping past either end
/// is absorbed silently by the navigator instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("step index {index} is out of range (catalog has {len} steps)")]
    InvalidStepIndex { index: usize, len: usize },

    #[error("no step named '{0}' in the catalog")]
    UnknownStep(String),
}

/// Errors raised while building a catalog from a step definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("a step catalog needs at least one step")]
    Empty,

    #[error("step name '{0}' appears more than once")]
    DuplicateName(String),
}
