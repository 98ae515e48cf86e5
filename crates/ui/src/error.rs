use thiserror::Error;

/// Validation failure raised while turning user input into a committed value.
///
/// Controls never propagate these to the host, they are swallowed at the
/// point of entry and surfaced as a disabled button or an inline message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("value is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("text is longer than {max} characters")]
    TooLong { max: usize },
    #[error("text has more than {max} lines")]
    TooManyLines { max: usize },
    #[error("`{0}` is not a #RRGGBB or #RRGGBBAA color")]
    InvalidHex(String),
    /// The display text is the message shown under the object editor.
    #[error("invalid JSON format")]
    InvalidJson(String),
}

pub type Result<T> = std::result::Result<T, ControlError>;
