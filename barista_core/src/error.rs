use thiserror::Error;

/// Measurement fields a classifier validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Dose,
    Yield,
    Time,
    TargetMin,
    TargetMax,
}

impl core::fmt::Display for InputField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            InputField::Dose => "dose",
            InputField::Yield => "yield",
            InputField::Time => "time",
            InputField::TargetMin => "target min",
            InputField::TargetMax => "target max",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DialInError {
    /// Not enough data to classify; callers suppress feedback.
    #[error("insufficient input: {0} must be a positive number")]
    InsufficientInput(InputField),
    #[error("roast level {0} is outside 1..=5")]
    RoastLevelOutOfRange(u8),
    #[error("target window is inverted: min {min}s > max {max}s")]
    InvertedWindow { min: f64, max: f64 },
}

impl DialInError {
    /// True for the recoverable "not enough data" case.
    pub fn is_insufficient_input(&self) -> bool {
        matches!(self, DialInError::InsufficientInput(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("unknown maintenance task: {0}")]
    UnknownTask(String),
    #[error("unknown milk type: {0}")]
    UnknownMilk(String),
}
