use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the boundary between the simulation core and its hosts.
///
/// None of these abort a running simulation: the scheduler logs them and drops the
/// offending input.
#[derive(Debug, Error)]
pub enum Error {
    /// A bounded brush setting was given a value outside its range.
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Color input that is not a `#rrggbb` string.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Algorithm token that names no known force field.
    #[error("unknown force algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// Body with a non-positive or non-finite mass or position.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A simulation must start with exactly one fixed body.
    #[error("expected exactly one fixed body, found {0}")]
    FixedBodyCount(usize),

    /// Invalid run parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
